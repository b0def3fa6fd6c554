//! Loosely-typed entry point.
//!
//! Accepts dynamically-typed arguments for drop-in callers: the third
//! argument selects either a character set (text) or a code length (number).
//! Everything is normalized into a [`GenerationRequest`] before any drawing
//! happens.

use crate::captcha::generator::CodeImageGenerator;
use crate::captcha::palette::CharacterSet;
use crate::captcha::request::{GenerationRequest, GenerationResult, MAX_DIMENSION};
use crate::config::{Config, DEFAULT_CODE_LENGTH, Result, ValidationError};
use crate::surface::{RasterProvider, SurfaceProvider};

/// A dynamically-typed argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Arg {
    /// Truthiness: non-zero non-NaN numbers, non-empty text, `true`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Bool(b) => *b,
        }
    }

    const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Validates loosely-typed arguments and builds the canonical request.
///
/// Checks run in order and the first failure wins: dimensions present,
/// width numeric, height numeric, the third argument, the fourth argument,
/// and finally the dimension range. A positive integer third argument
/// becomes the code length with a mixed character set, and `code_len` is
/// ignored.
///
/// # Errors
///
/// Returns the `ValidationError` of the first failing check.
pub fn parse_args(
    width: Option<&Arg>,
    height: Option<&Arg>,
    kind: Option<&Arg>,
    code_len: Option<&Arg>,
) -> std::result::Result<GenerationRequest, ValidationError> {
    let (Some(width), Some(height)) = (width, height) else {
        return Err(ValidationError::MissingDimensions);
    };
    if !width.is_truthy() || !height.is_truthy() {
        return Err(ValidationError::MissingDimensions);
    }
    let width = width.as_number().ok_or(ValidationError::WidthNotNumber)?;
    let height = height.as_number().ok_or(ValidationError::HeightNotNumber)?;
    let (character_set, code_length) = parse_selector(kind, code_len)?;

    Ok(GenerationRequest::new(
        to_dimension(width, "width")?,
        to_dimension(height, "height")?,
    )
    .with_character_set(character_set)
    .with_code_length(code_length))
}

/// Third and fourth arguments: character set name or legacy length, then length.
fn parse_selector(
    kind: Option<&Arg>,
    code_len: Option<&Arg>,
) -> std::result::Result<(CharacterSet, usize), ValidationError> {
    let character_set = match kind {
        None => CharacterSet::Mixed,
        Some(Arg::Text(name)) => name.parse()?,
        Some(Arg::Number(n)) => return Ok((CharacterSet::Mixed, to_code_length(*n)?)),
        Some(Arg::Bool(_)) => return Err(ValidationError::InvalidThirdParameter),
    };
    let code_length = match code_len {
        None => DEFAULT_CODE_LENGTH,
        Some(arg) => arg
            .as_number()
            .ok_or(ValidationError::InvalidCodeLength)
            .and_then(to_code_length)?,
    };
    Ok((character_set, code_length))
}

/// Generates a code on the raster surface from loosely-typed arguments.
///
/// The face and output format come from [`Config::from_env`]: the file named
/// by `CAPTCHA_FONT_PATH` when set, the bundled face otherwise.
///
/// # Errors
///
/// Returns `CodeError::Validation` for rejected arguments (before any font
/// lookup), `CodeError::Font` when the configured font is unusable, or
/// `CodeError::Encode` if the image cannot be encoded.
pub fn generate_code(
    width: Option<Arg>,
    height: Option<Arg>,
    kind: Option<Arg>,
    code_len: Option<Arg>,
) -> Result<GenerationResult> {
    let request = parse_args(
        width.as_ref(),
        height.as_ref(),
        kind.as_ref(),
        code_len.as_ref(),
    )?;
    let config = Config::from_env();
    let provider = RasterProvider::from_config(&config)?;
    CodeImageGenerator::new(provider)
        .with_config(&config)
        .generate(&request)
}

/// Same as [`generate_code`] but drawing on surfaces from `provider`.
///
/// # Errors
///
/// Returns `CodeError::Validation` for rejected arguments; provider failures
/// propagate unchanged.
pub fn generate_code_with<P: SurfaceProvider>(
    provider: P,
    width: Option<Arg>,
    height: Option<Arg>,
    kind: Option<Arg>,
    code_len: Option<Arg>,
) -> Result<GenerationResult> {
    let request = parse_args(
        width.as_ref(),
        height.as_ref(),
        kind.as_ref(),
        code_len.as_ref(),
    )?;
    CodeImageGenerator::new(provider).generate(&request)
}

/// Positive integer check on a finite number.
fn to_code_length(n: f64) -> std::result::Result<usize, ValidationError> {
    if !n.is_finite() || n.fract() != 0.0 || n < 1.0 || n > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidCodeLength);
    }
    usize::try_from(f64_to_u32(n)).map_err(|_| ValidationError::InvalidCodeLength)
}

/// Truncates toward zero like a canvas dimension assignment.
fn to_dimension(n: f64, dimension: &'static str) -> std::result::Result<u32, ValidationError> {
    let out_of_range = ValidationError::DimensionOutOfRange {
        dimension,
        max: MAX_DIMENSION,
    };
    let n = n.trunc();
    if !n.is_finite() || n < 1.0 || n > f64::from(MAX_DIMENSION) {
        return Err(out_of_range);
    }
    Ok(f64_to_u32(n))
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn f64_to_u32(n: f64) -> u32 {
    n as u32
}
