pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod import;
pub mod logging;
pub mod resolver;
pub mod schema;
pub mod server;
pub mod storage;

pub use config::ServerConfig;
pub use entity::{Quote, QuoteDraft, QuoteId, QuoteUpdate};
pub use error::{QuoteError, Result};
pub use resolver::Resolvers;
pub use storage::QuoteStore;
