//! Configuration settings.
//!
//! Defines the `Config` struct and environment variable loading logic.

use crate::captcha::CharacterSet;
use std::env;
use std::path::PathBuf;

/// Default glyph size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 38.0;

/// Default number of characters in a code.
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Encoding used when exporting a rendered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    WebP,
}

impl OutputFormat {
    fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "WEBP" => Self::WebP,
            _ => Self::Png,
        }
    }

    /// MIME type used in the exported data URL.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    pub(crate) const fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_bool(key: &str) -> bool {
    env::var(key)
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(false)
}

fn get_env_f32_or(key: &str, default: f32) -> f32 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|v: &f32| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

fn get_env_usize_or(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|v: &usize| *v > 0)
        .unwrap_or(default)
}

/// Generator defaults.
///
/// `Config::default()` touches no environment; `Config::from_env()` is the
/// opt-in path for applications that want deployment-time overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Font file used by the raster surface. Platform fonts are searched when unset.
    pub font_path: Option<PathBuf>,
    /// Glyph size in pixels.
    pub font_size: f32,
    /// Number of characters when a request does not specify one.
    pub code_length: usize,
    /// Character set when a request does not specify one.
    pub character_set: CharacterSet,
    /// Exported image encoding.
    pub output_format: OutputFormat,
    /// Drop look-alike glyphs (`0`/`O`, `1`/`l`/`I`, ...) from every palette.
    pub exclude_ambiguous: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: DEFAULT_FONT_SIZE,
            code_length: DEFAULT_CODE_LENGTH,
            character_set: CharacterSet::Mixed,
            output_format: OutputFormat::Png,
            exclude_ambiguous: false,
        }
    }
}

impl Config {
    /// Loads configuration from a `.env` file and environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults:
    /// - `CAPTCHA_FONT_PATH` (unset)
    /// - `CAPTCHA_FONT_SIZE` (38)
    /// - `CAPTCHA_CODE_LENGTH` (4)
    /// - `CAPTCHA_CHARSET` (`default`, also `number` or `letter`)
    /// - `CAPTCHA_IMAGE_FORMAT` (`png`, also `webp`)
    /// - `CAPTCHA_EXCLUDE_AMBIGUOUS` (false)
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let font_path = env::var("CAPTCHA_FONT_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        let character_set: CharacterSet = get_env_or("CAPTCHA_CHARSET", "default")
            .to_lowercase()
            .parse()
            .unwrap_or_default();

        Self {
            font_path,
            font_size: get_env_f32_or("CAPTCHA_FONT_SIZE", DEFAULT_FONT_SIZE),
            code_length: get_env_usize_or("CAPTCHA_CODE_LENGTH", DEFAULT_CODE_LENGTH),
            character_set,
            output_format: OutputFormat::from_str(&get_env_or("CAPTCHA_IMAGE_FORMAT", "png")),
            exclude_ambiguous: get_env_bool("CAPTCHA_EXCLUDE_AMBIGUOUS"),
        }
    }
}
