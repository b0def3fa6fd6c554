//! Error types and result aliases.
//!
//! Defines the `CodeError` enumeration, the `ValidationError` raised while
//! checking generation parameters, and the common `Result` type.

use thiserror::Error;

/// Rejected generation parameters.
///
/// Raised synchronously before any drawing surface is acquired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Width or height absent or falsy.
    #[error("missing dimensions")]
    MissingDimensions,

    #[error("width must be a number")]
    WidthNotNumber,

    #[error("height must be a number")]
    HeightNotNumber,

    /// Character set name outside `default`, `number`, `letter`.
    #[error("invalid type")]
    InvalidType,

    #[error("codeLen must be positive integer")]
    InvalidCodeLength,

    /// Third legacy argument that is neither text nor a number.
    #[error("invalid third parameter")]
    InvalidThirdParameter,

    /// Dimension that does not fit a drawable surface.
    #[error("{dimension} must be between 1 and {max} pixels")]
    DimensionOutOfRange { dimension: &'static str, max: u32 },
}

/// Code generation errors.
#[derive(Debug, Error)]
pub enum CodeError {
    /// Invalid caller input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No usable font face for the raster surface.
    #[error("font error: {0}")]
    Font(String),

    /// The provider cannot allocate a surface of this size.
    #[error("cannot allocate a {width}x{height} surface")]
    InvalidSurface { width: u32, height: u32 },

    /// The rendered surface could not be encoded.
    #[error("image encode error: {0}")]
    Encode(String),
}

/// Result type alias for `CodeError`.
pub type Result<T> = std::result::Result<T, CodeError>;
