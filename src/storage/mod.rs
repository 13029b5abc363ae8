mod quote_store;

pub use quote_store::{QuoteStore, DEFAULT_MAX_ID};
