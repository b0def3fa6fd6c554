//! Drawing surfaces.
//!
//! The generator only talks to the [`Surface2D`] and [`SurfaceProvider`]
//! traits. [`RasterProvider`] is the in-memory implementation used by default.

pub mod font;
pub mod raster;
pub mod transform;

pub use raster::{RasterProvider, RasterSurface};
pub use transform::Affine;

use crate::config::Result;
use image::Rgb;

/// Font weight of a [`FontSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Generic font family of a [`FontSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
}

/// Text style, rendered as CSS shorthand (`bold 38px serif`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub weight: FontWeight,
    pub size: f32,
    pub family: FontFamily,
}

impl FontSpec {
    #[must_use]
    pub const fn bold_serif(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
            family: FontFamily::Serif,
        }
    }
}

impl std::fmt::Display for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weight = match self.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        let family = match self.family {
            FontFamily::Serif => "serif",
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Monospace => "monospace",
        };
        write!(f, "{weight} {}px {family}", self.size)
    }
}

/// Vertical anchor of text relative to the `y` passed to `fill_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

/// A rectangular pixel surface with a 2D drawing context.
///
/// Drawing calls are infallible; only export can fail. Transform calls
/// post-multiply the current matrix, so `translate` then `rotate` rotates
/// about the translated origin.
pub trait Surface2D {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn set_fill_style(&mut self, color: Rgb<u8>);
    /// Opacity applied to subsequent fills, clamped to `0.0..=1.0`.
    fn set_global_alpha(&mut self, alpha: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn set_font(&mut self, font: FontSpec);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);
    /// Clockwise rotation in radians (y axis points down).
    fn rotate(&mut self, angle: f32);
    fn reset_transform(&mut self);

    /// Encodes the surface as a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::Encode` if the pixels cannot be encoded.
    fn to_data_url(&self) -> Result<String>;
}

/// Supplies fresh surfaces of an exact size.
pub trait SurfaceProvider {
    type Surface: Surface2D;

    /// Acquires a surface of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Propagates whatever prevents the provider from producing a surface.
    fn create_surface(&self, width: u32, height: u32) -> Result<Self::Surface>;
}

impl<P: SurfaceProvider + ?Sized> SurfaceProvider for &P {
    type Surface = P::Surface;

    fn create_surface(&self, width: u32, height: u32) -> Result<Self::Surface> {
        (**self).create_surface(width, height)
    }
}
