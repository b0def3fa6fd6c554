//! Verification code generation.
//!
//! Picks glyphs from a character palette and draws them with randomized
//! colour, scale and tilt. [`legacy`] accepts loosely-typed arguments.

pub mod generator;
pub mod legacy;
pub mod palette;
pub mod request;
pub mod style;

pub use generator::CodeImageGenerator;
pub use legacy::{Arg, generate_code, generate_code_with, parse_args};
pub use palette::{AMBIGUOUS_GLYPHS, CharacterPalette, CharacterSet};
pub use request::{GenerationRequest, GenerationResult, MAX_DIMENSION};
pub use style::DrawStyle;
