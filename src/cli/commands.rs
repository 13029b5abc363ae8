use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_BIND;
use crate::storage::DEFAULT_MAX_ID;

#[derive(Parser, Debug)]
#[command(name = "quotebook")]
#[command(version, about = "Schema-typed CRUD resolvers over an in-memory quote collection")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the resolvers over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// JSON document to bulk-load before serving
        #[arg(long = "import", value_name = "PATH")]
        import_path: Option<PathBuf>,

        /// Largest id handed out to new quotes
        #[arg(long, default_value_t = DEFAULT_MAX_ID)]
        max_id: i64,
    },

    /// Print the schema in SDL form
    Schema,

    /// Check that an import document decodes and report what it would load
    ImportCheck {
        /// Path to the JSON document
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
