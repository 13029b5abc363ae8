//! Argument coercion for resolvers.
//!
//! Resolvers receive a loosely typed argument map from the query engine.
//! Each operation coerces it into a typed struct here before touching the
//! store. A malformed argument degrades to "absent" with a warning rather
//! than failing the operation; the only hard failure is a create without
//! usable text.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::entity::{QuoteDraft, QuoteId, QuoteUpdate};
use crate::error::{QuoteError, Result};

/// Argument map as handed over by the query engine.
pub type Arguments = serde_json::Map<String, Value>;

/// Accepted timestamp layout: `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const TIMESTAMP_LEN: usize = 24;

/// Value stored when a supplied timestamp cannot be parsed (the Unix epoch).
pub fn timestamp_sentinel() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

/// Parse a strict UTC millisecond timestamp such as `2024-03-01T12:30:00.250Z`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let bytes = value.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return None;
    }
    let separators = [
        (4, b'-'),
        (7, b'-'),
        (10, b'T'),
        (13, b':'),
        (16, b':'),
        (19, b'.'),
        (23, b'Z'),
    ];
    if separators.iter().any(|&(i, c)| bytes[i] != c) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp in the layout `parse_timestamp` accepts.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn present<'a>(args: &'a Arguments, name: &str) -> Option<&'a Value> {
    args.get(name).filter(|v| !v.is_null())
}

/// Integer argument; anything that is not an integer counts as absent.
pub fn coerce_id(args: &Arguments, name: &str) -> Option<QuoteId> {
    let value = present(args, name)?;
    let id = value.as_i64();
    if id.is_none() {
        warn!(argument = name, %value, "ignoring non-integer id argument");
    }
    id
}

/// String argument. Absence stays distinct from the empty string.
pub fn coerce_string(args: &Arguments, name: &str) -> Option<String> {
    let value = present(args, name)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            warn!(argument = name, %value, "ignoring non-string argument");
            None
        }
    }
}

/// List argument. Every element is kept, stringified if it is not a string.
pub fn coerce_tags(args: &Arguments, name: &str) -> Option<Vec<String>> {
    let value = present(args, name)?;
    match value.as_array() {
        Some(items) => Some(items.iter().map(stringify).collect()),
        None => {
            warn!(argument = name, %value, "ignoring non-list argument");
            None
        }
    }
}

/// Timestamp argument. An unparseable string yields the epoch sentinel.
pub fn coerce_timestamp(args: &Arguments, name: &str) -> Option<DateTime<Utc>> {
    let value = present(args, name)?;
    let Some(raw) = value.as_str() else {
        warn!(argument = name, %value, "ignoring non-string timestamp argument");
        return None;
    };
    match parse_timestamp(raw) {
        Some(ts) => Some(ts),
        None => {
            warn!(
                argument = name,
                value = raw,
                expected = TIMESTAMP_FORMAT,
                "unparseable timestamp, storing epoch"
            );
            Some(timestamp_sentinel())
        }
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Arguments of the `quote` query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteArgs {
    pub id: Option<QuoteId>,
}

impl QuoteArgs {
    pub fn from_args(args: &Arguments) -> Self {
        Self {
            id: coerce_id(args, "id"),
        }
    }
}

/// Arguments of the `create` mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    pub draft: QuoteDraft,
}

impl CreateArgs {
    pub fn from_args(args: &Arguments) -> Result<Self> {
        if present(args, "text").is_some_and(|v| !v.is_string()) {
            return Err(QuoteError::InvalidArgument {
                argument: "text".to_string(),
                message: "Quote text must be a string".to_string(),
            });
        }
        let text = coerce_string(args, "text").ok_or_else(|| QuoteError::MissingArgument {
            field: "create".to_string(),
            argument: "text".to_string(),
        })?;
        if text.is_empty() {
            return Err(QuoteError::InvalidArgument {
                argument: "text".to_string(),
                message: "Quote text cannot be empty".to_string(),
            });
        }

        Ok(Self {
            draft: QuoteDraft {
                text,
                author: coerce_string(args, "author"),
                tags: coerce_tags(args, "tags").unwrap_or_default(),
            },
        })
    }
}

/// Arguments of the `update` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateArgs {
    pub id: Option<QuoteId>,
    pub update: QuoteUpdate,
}

impl UpdateArgs {
    pub fn from_args(args: &Arguments) -> Self {
        let text = coerce_string(args, "text").filter(|t| {
            if t.is_empty() {
                warn!(argument = "text", "ignoring empty text on update");
            }
            !t.is_empty()
        });

        Self {
            id: coerce_id(args, "id"),
            update: QuoteUpdate {
                text,
                author: coerce_string(args, "author"),
                tags: coerce_tags(args, "tags"),
                created_at: coerce_timestamp(args, "created_at"),
            },
        }
    }
}

/// Arguments of the `delete` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteArgs {
    pub id: Option<QuoteId>,
}

impl DeleteArgs {
    pub fn from_args(args: &Arguments) -> Self {
        Self {
            id: coerce_id(args, "id"),
        }
    }
}
