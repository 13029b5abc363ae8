use thiserror::Error;

/// Stable numeric codes reported alongside transport-level errors.
pub mod error_codes {
    pub const MISSING_ARGUMENT: i32 = -32001;
    pub const INVALID_ARGUMENT: i32 = -32002;
    pub const UNKNOWN_FIELD: i32 = -32003;
    pub const UNKNOWN_ARGUMENT: i32 = -32004;
    pub const ID_SPACE_EXHAUSTED: i32 = -32010;
    pub const CONFIG_ERROR: i32 = -32011;
    pub const INTERNAL_ERROR: i32 = -32012;
}

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Missing required argument '{argument}' for field '{field}'")]
    MissingArgument { field: String, argument: String },

    #[error("Invalid value for argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("Unknown {operation} field: {field}")]
    UnknownField { operation: String, field: String },

    #[error("Unknown argument '{argument}' on field '{field}'")]
    UnknownArgument { field: String, argument: String },

    #[error("No free quote id left in 1..={max_id}")]
    IdSpaceExhausted { max_id: i64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuoteError {
    pub fn error_code(&self) -> i32 {
        match self {
            QuoteError::MissingArgument { .. } => error_codes::MISSING_ARGUMENT,
            QuoteError::InvalidArgument { .. } => error_codes::INVALID_ARGUMENT,
            QuoteError::UnknownField { .. } => error_codes::UNKNOWN_FIELD,
            QuoteError::UnknownArgument { .. } => error_codes::UNKNOWN_ARGUMENT,
            QuoteError::IdSpaceExhausted { .. } => error_codes::ID_SPACE_EXHAUSTED,
            QuoteError::Config(_) => error_codes::CONFIG_ERROR,
            QuoteError::Io(_) | QuoteError::Json(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Type name reported in error payloads.
    pub fn error_type(&self) -> &'static str {
        match self {
            QuoteError::MissingArgument { .. } => "MissingArgument",
            QuoteError::InvalidArgument { .. } => "InvalidArgument",
            QuoteError::UnknownField { .. } => "UnknownField",
            QuoteError::UnknownArgument { .. } => "UnknownArgument",
            QuoteError::IdSpaceExhausted { .. } => "IdSpaceExhausted",
            QuoteError::Config(_) => "ConfigError",
            QuoteError::Io(_) => "IoError",
            QuoteError::Json(_) => "JsonError",
        }
    }

    /// Whether the caller supplied a bad request, as opposed to a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QuoteError::MissingArgument { .. }
                | QuoteError::InvalidArgument { .. }
                | QuoteError::UnknownField { .. }
                | QuoteError::UnknownArgument { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
