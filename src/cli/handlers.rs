use std::path::PathBuf;

use serde_json::json;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::import::{decode, import_bytes, FileSource, RecordSource};
use crate::logging;
use crate::schema::Schema;
use crate::server;
use crate::storage::QuoteStore;

pub fn handle_serve(config: ServerConfig) -> Result<()> {
    logging::init();
    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(config))
}

pub fn handle_schema() -> Result<()> {
    print!("{}", Schema::new().to_sdl());
    Ok(())
}

pub fn handle_import_check(path: PathBuf, json: bool) -> Result<()> {
    let source = FileSource::new(path);
    let bytes = source.read()?;
    let entries = decode(&bytes)?.len();

    let mut store = QuoteStore::new();
    let report = import_bytes(&mut store, &bytes);

    if json {
        let output = json!({
            "source": source.describe(),
            "entries": entries,
            "imported": report.imported,
            "skipped": report.skipped,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{}: {} quotes would be loaded ({} skipped)",
            source.describe(),
            report.imported,
            report.skipped
        );
    }

    Ok(())
}
