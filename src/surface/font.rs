//! Font face resolution for the raster surface.

use crate::config::{CodeError, Config, Result};
use ab_glyph::FontArc;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

const FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSerif-Bold.ttf");

static EMBEDDED_FONT: OnceLock<FontArc> = OnceLock::new();

/// Parses a TrueType/OpenType face from owned bytes.
///
/// # Errors
///
/// Returns `CodeError::Font` if the data is not a usable face.
pub fn font_from_bytes(data: Vec<u8>) -> Result<FontArc> {
    FontArc::try_from_vec(data)
        .map_err(|_| CodeError::Font("failed to parse font data (TTF/OTF)".to_string()))
}

/// Reads and parses a font file.
///
/// # Errors
///
/// Returns `CodeError::Font` if the file cannot be read or parsed.
pub fn font_from_path(path: &Path) -> Result<FontArc> {
    let data = std::fs::read(path)
        .map_err(|e| CodeError::Font(format!("failed to read '{}': {e}", path.display())))?;
    let font = FontArc::try_from_vec(data).map_err(|_| {
        CodeError::Font(format!("failed to parse '{}' (TTF/OTF)", path.display()))
    })?;
    info!(path = %path.display(), "Using configured font for verification codes");
    Ok(font)
}

/// Bundled bold serif face, parsed once per process.
///
/// # Errors
///
/// Returns `CodeError::Font` if the bundled data fails to parse.
pub fn embedded_font() -> Result<FontArc> {
    if let Some(font) = EMBEDDED_FONT.get() {
        return Ok(font.clone());
    }
    let font = FontArc::try_from_slice(FONT_BYTES)
        .map_err(|_| CodeError::Font("failed to parse bundled font".to_string()))?;
    debug!(bytes = FONT_BYTES.len(), "Loaded bundled font");
    Ok(EMBEDDED_FONT.get_or_init(|| font).clone())
}

/// Resolves the face named by `config`, falling back to the bundled face.
///
/// A configured path that cannot be loaded is an error, not a fallback.
///
/// # Errors
///
/// Returns `CodeError::Font` if the configured file is unusable.
pub fn load_font(config: &Config) -> Result<FontArc> {
    match &config.font_path {
        Some(path) => font_from_path(path),
        None => embedded_font(),
    }
}
