//! Character sets and the glyph palettes derived from them.

use crate::config::ValidationError;
use rand::Rng;
use serde::{Deserialize, Serialize};

const DIGITS: &str = "0123456789";
const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Glyphs easily confused with one another in common faces.
pub const AMBIGUOUS_GLYPHS: &[char] = &['0', '1', 'i', 'l', 'o', 'I', 'L', 'O', 'Q', 'S'];

/// Which glyphs a code may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterSet {
    /// Digits followed by letters.
    #[default]
    #[serde(rename = "default")]
    Mixed,
    #[serde(rename = "number")]
    Digits,
    #[serde(rename = "letter")]
    Letters,
}

impl std::str::FromStr for CharacterSet {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Mixed),
            "number" => Ok(Self::Digits),
            "letter" => Ok(Self::Letters),
            _ => Err(ValidationError::InvalidType),
        }
    }
}

impl CharacterSet {
    /// Name accepted by the string form of the type selector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mixed => "default",
            Self::Digits => "number",
            Self::Letters => "letter",
        }
    }
}

impl std::fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, fixed sequence of glyphs a code is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPalette {
    glyphs: Vec<char>,
}

impl CharacterPalette {
    /// Builds the palette for a character set.
    #[must_use]
    pub fn for_set(set: CharacterSet) -> Self {
        let glyphs = match set {
            CharacterSet::Mixed => DIGITS.chars().chain(LETTERS.chars()).collect(),
            CharacterSet::Digits => DIGITS.chars().collect(),
            CharacterSet::Letters => LETTERS.chars().collect(),
        };
        Self { glyphs }
    }

    /// Removes [`AMBIGUOUS_GLYPHS`], keeping the remaining order.
    #[must_use]
    pub fn without_ambiguous(mut self) -> Self {
        self.glyphs.retain(|c| !AMBIGUOUS_GLYPHS.contains(c));
        self
    }

    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Case-insensitive membership, matching the lowercased codes handed to callers.
    #[must_use]
    pub fn contains_ignore_case(&self, ch: char) -> bool {
        self.glyphs.iter().any(|g| g.eq_ignore_ascii_case(&ch))
    }

    /// Picks a glyph with a uniform random index.
    pub fn pick(&self, rng: &mut impl Rng) -> char {
        self.glyphs[rng.random_range(0..self.glyphs.len())]
    }
}
