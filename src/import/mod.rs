//! Bulk loading of quotes from a keyed JSON document.
//!
//! The document maps arbitrary string keys to quote-shaped objects. Import
//! runs once before the store is shared with resolvers and never aborts
//! startup: failures are reported through `ImportReport::success`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::entity::{Quote, QuoteDraft, QuoteId};
use crate::error::Result;
use crate::storage::QuoteStore;

/// Source of the raw import document.
pub trait RecordSource {
    /// Human-readable origin used in diagnostics.
    fn describe(&self) -> String;

    fn read(&self) -> Result<Vec<u8>>;
}

/// Reads the import document from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

/// One entry of the import document.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotePayload {
    #[serde(default)]
    pub id: Option<QuoteId>,
    #[serde(alias = "quote")]
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "date")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// `false` when the document could not be read or decoded.
    pub success: bool,
    pub imported: usize,
    /// Entries dropped for a duplicate id, empty text, or no free id.
    pub skipped: usize,
}

impl ImportReport {
    fn failed() -> Self {
        Self::default()
    }
}

/// Decode an import document without touching any store.
pub fn decode(bytes: &[u8]) -> Result<HashMap<String, QuotePayload>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode `bytes` and load every entry into `store`.
///
/// Decoding is all-or-nothing; a malformed document loads no records.
pub fn import_bytes(store: &mut QuoteStore, bytes: &[u8]) -> ImportReport {
    let payloads = match decode(bytes) {
        Ok(payloads) => payloads,
        Err(e) => {
            warn!(error = %e, "failed to decode import document");
            return ImportReport::failed();
        }
    };

    let mut report = ImportReport {
        success: true,
        ..ImportReport::default()
    };
    let now = Utc::now();

    // Entries carrying an id go in first so generated ids cannot take theirs.
    // Ids below 1 are never handed out by the store and 0 is the id of the
    // empty record, so those entries get a generated id instead.
    let (keyed, unkeyed): (Vec<_>, Vec<_>) = payloads
        .into_iter()
        .map(|(key, payload)| {
            let carried = payload.id.or_else(|| key.parse().ok());
            let id = carried.filter(|id| *id > 0);
            if let (Some(carried), None) = (carried, id) {
                warn!(key = %key, id = carried, "ignoring non-positive id on imported quote");
            }
            (key, id, payload)
        })
        .partition(|(_, id, _)| id.is_some());

    for (key, id, payload) in keyed.into_iter().chain(unkeyed) {
        if payload.text.is_empty() {
            warn!(key = %key, "skipping imported quote with empty text");
            report.skipped += 1;
            continue;
        }

        let id = match id {
            Some(id) => id,
            None => match store.next_id() {
                Ok(id) => id,
                Err(e) => {
                    warn!(key = %key, error = %e, "no id available for imported quote");
                    report.skipped += 1;
                    continue;
                }
            },
        };

        let draft = QuoteDraft {
            text: payload.text,
            author: payload.author,
            tags: payload.tags,
        };
        let quote = Quote::with_timestamp(id, draft, payload.created_at.unwrap_or(now));

        if store.insert_record(quote) {
            report.imported += 1;
        } else {
            warn!(key = %key, id, "skipping imported quote with duplicate id");
            report.skipped += 1;
        }
    }

    info!(
        imported = report.imported,
        skipped = report.skipped,
        "imported quotes"
    );
    report
}

/// Read from `source` and import. A read failure leaves the store untouched.
pub fn import_from_source(store: &mut QuoteStore, source: &dyn RecordSource) -> ImportReport {
    match source.read() {
        Ok(bytes) => import_bytes(store, &bytes),
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "failed to read import document");
            ImportReport::failed()
        }
    }
}
