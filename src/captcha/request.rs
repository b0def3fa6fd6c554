//! Generation requests and results.

use crate::captcha::palette::{CharacterPalette, CharacterSet};
use crate::config::{Config, DEFAULT_CODE_LENGTH, ValidationError};
use serde::{Deserialize, Serialize};

/// Largest accepted surface edge in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Canonical parameters of a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub width: u32,
    pub height: u32,
    pub character_set: CharacterSet,
    pub code_length: usize,
    /// Drop look-alike glyphs from the palette.
    pub exclude_ambiguous: bool,
}

impl GenerationRequest {
    /// Creates a request for a mixed-character code of the default length.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            character_set: CharacterSet::Mixed,
            code_length: DEFAULT_CODE_LENGTH,
            exclude_ambiguous: false,
        }
    }

    /// Creates a request using the configured defaults.
    #[must_use]
    pub const fn from_config(width: u32, height: u32, config: &Config) -> Self {
        Self {
            width,
            height,
            character_set: config.character_set,
            code_length: config.code_length,
            exclude_ambiguous: config.exclude_ambiguous,
        }
    }

    #[must_use]
    pub const fn with_character_set(mut self, character_set: CharacterSet) -> Self {
        self.character_set = character_set;
        self
    }

    #[must_use]
    pub const fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    #[must_use]
    pub const fn with_exclude_ambiguous(mut self, exclude_ambiguous: bool) -> Self {
        self.exclude_ambiguous = exclude_ambiguous;
        self
    }

    /// Checks the request can be rendered.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a zero or oversized dimension, or a zero code length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.width == 0 || self.height == 0 {
            return Err(ValidationError::MissingDimensions);
        }
        if self.width > MAX_DIMENSION {
            return Err(ValidationError::DimensionOutOfRange {
                dimension: "width",
                max: MAX_DIMENSION,
            });
        }
        if self.height > MAX_DIMENSION {
            return Err(ValidationError::DimensionOutOfRange {
                dimension: "height",
                max: MAX_DIMENSION,
            });
        }
        if self.code_length == 0 {
            return Err(ValidationError::InvalidCodeLength);
        }
        Ok(())
    }

    /// Palette the code is drawn from.
    #[must_use]
    pub fn palette(&self) -> CharacterPalette {
        let palette = CharacterPalette::for_set(self.character_set);
        if self.exclude_ambiguous {
            palette.without_ambiguous()
        } else {
            palette
        }
    }
}

/// Plaintext code and the rendered image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Lowercased code, one character per drawn glyph.
    pub code: String,
    /// Self-describing encoded image, e.g. `data:image/png;base64,...`.
    pub image: String,
}
