use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::storage::DEFAULT_MAX_ID;

/// Default listen address for `quotebook serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind: SocketAddr,
    /// Optional JSON document loaded into the store before serving.
    pub import_path: Option<PathBuf>,
    /// Upper bound (inclusive) of generated quote ids.
    pub max_id: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            import_path: None,
            max_id: DEFAULT_MAX_ID,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_id < 1 {
            return Err(QuoteError::Config(format!(
                "max_id must be at least 1, got {}",
                self.max_id
            )));
        }
        Ok(())
    }
}
