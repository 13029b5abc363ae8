// src/entity/quote.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store. Never supplied by callers on create.
pub type QuoteId = i64;

/// A stored quote.
///
/// `Default` yields the empty record (id 0, empty text, epoch timestamp) that
/// `update` and `delete` return when no record matches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    /// `None` means "not provided", which is distinct from an empty string.
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Build a record from a draft, stamped with the current time.
    pub fn new(id: QuoteId, draft: QuoteDraft) -> Self {
        Self::with_timestamp(id, draft, Utc::now())
    }

    pub fn with_timestamp(id: QuoteId, draft: QuoteDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: draft.text,
            author: draft.author,
            tags: draft.tags,
            created_at,
        }
    }
}

/// Caller-supplied fields for a new quote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteDraft {
    pub text: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

impl QuoteDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update payload. Only `Some` fields are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteUpdate {
    pub text: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl QuoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.author.is_none()
            && self.tags.is_none()
            && self.created_at.is_none()
    }

    /// Overwrite the supplied fields on `quote`. The id is never touched.
    pub fn apply_to(self, quote: &mut Quote) {
        if let Some(text) = self.text {
            quote.text = text;
        }
        if let Some(author) = self.author {
            quote.author = Some(author);
        }
        if let Some(tags) = self.tags {
            quote.tags = tags;
        }
        if let Some(created_at) = self.created_at {
            quote.created_at = created_at;
        }
    }
}
