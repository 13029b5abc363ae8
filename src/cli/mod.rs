mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{handle_import_check, handle_schema, handle_serve};
