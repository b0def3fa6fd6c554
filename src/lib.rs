//! Library definitions.
//!
//! Renders short random codes onto noisy bitmap images and returns the code
//! together with a `data:` URL of the image.

pub mod captcha;
pub mod config;
pub mod surface;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
pub use captcha::{
    Arg, CharacterPalette, CharacterSet, CodeImageGenerator, GenerationRequest, GenerationResult,
    generate_code, generate_code_with,
};
pub use config::{CodeError, Config, OutputFormat, Result, ValidationError};
pub use surface::{FontSpec, RasterProvider, RasterSurface, Surface2D, SurfaceProvider};
