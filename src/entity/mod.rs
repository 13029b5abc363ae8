mod quote;

pub use quote::{Quote, QuoteDraft, QuoteId, QuoteUpdate};
