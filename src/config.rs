//! Configuration management.
//!
//! Generator defaults, optionally loaded from environment variables using
//! dotenvy, plus the crate-wide error types.

mod error;
mod settings;

pub use error::{CodeError, Result, ValidationError};
pub use settings::{Config, DEFAULT_CODE_LENGTH, DEFAULT_FONT_SIZE, OutputFormat};
