//! In-memory RGBA raster surface.
//!
//! Fills composite source-over with the global alpha. Text is rendered
//! upright into a scratch coverage image, then warped through the current
//! transform onto the canvas.

use crate::config::{CodeError, Config, OutputFormat, Result};
use crate::surface::font::{embedded_font, load_font};
use crate::surface::{Affine, FontSpec, Surface2D, SurfaceProvider, TextBaseline};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use imageproc::geometric_transformations::{Interpolation, warp_into};
use tracing::debug;

/// Margin around rendered text in the scratch image.
const TEXT_PADDING: u32 = 2;

/// Creates [`RasterSurface`]s sharing one font face.
#[derive(Clone)]
pub struct RasterProvider {
    font: FontArc,
    format: OutputFormat,
}

impl RasterProvider {
    /// Creates a PNG-exporting provider for `font`.
    #[must_use]
    pub fn new(font: FontArc) -> Self {
        Self {
            font,
            format: OutputFormat::Png,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Creates a provider from the configured font and output format.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::Font` if no font face can be loaded.
    pub fn from_config(config: &Config) -> Result<Self> {
        let font = load_font(config)?;
        Ok(Self::new(font).with_format(config.output_format))
    }

    /// Creates a provider from `CAPTCHA_FONT_PATH` and `CAPTCHA_IMAGE_FORMAT`.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::Font` if the configured font file is unusable.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::from_env())
    }

    /// PNG-exporting provider backed by the bundled bold serif face.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::Font` if the bundled face fails to parse.
    pub fn embedded() -> Result<Self> {
        embedded_font().map(Self::new)
    }

    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }
}

impl SurfaceProvider for RasterProvider {
    type Surface = RasterSurface;

    fn create_surface(&self, width: u32, height: u32) -> Result<RasterSurface> {
        if width == 0 || height == 0 {
            return Err(CodeError::InvalidSurface { width, height });
        }
        Ok(RasterSurface::new(width, height, self.font.clone(), self.format))
    }
}

/// Transparent RGBA canvas with canvas-style drawing state.
pub struct RasterSurface {
    canvas: RgbaImage,
    font: FontArc,
    format: OutputFormat,
    fill: Rgb<u8>,
    alpha: f32,
    font_spec: FontSpec,
    baseline: TextBaseline,
    transform: Affine,
}

impl RasterSurface {
    #[must_use]
    pub fn new(width: u32, height: u32, font: FontArc, format: OutputFormat) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            font,
            format,
            fill: Rgb([0, 0, 0]),
            alpha: 1.0,
            font_spec: FontSpec::bold_serif(crate::config::DEFAULT_FONT_SIZE),
            baseline: TextBaseline::Alphabetic,
            transform: Affine::IDENTITY,
        }
    }

    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    #[must_use]
    pub const fn transform(&self) -> Affine {
        self.transform
    }

    #[must_use]
    pub const fn global_alpha(&self) -> f32 {
        self.alpha
    }

    /// Upright coverage of `text` with its top-left at the scratch origin.
    fn rasterize_text(&self, text: &str, scale: PxScale) -> GrayImage {
        let (text_width, _) = text_size(scale, &self.font, text);
        let scaled = self.font.as_scaled(scale);
        let overhang = f32_to_u32(scale.x * 0.25);
        let line_height = f32_to_u32(scaled.ascent() - scaled.descent());

        let mut scratch = GrayImage::new(
            text_width + overhang + TEXT_PADDING * 2,
            line_height + TEXT_PADDING * 2,
        );
        let offset = i32::try_from(TEXT_PADDING).unwrap_or(0);
        draw_text_mut(
            &mut scratch,
            Luma([255]),
            offset,
            offset,
            scale,
            &self.font,
            text,
        );
        scratch
    }
}

impl Surface2D for RasterSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_fill_style(&mut self, color: Rgb<u8>) {
        self.fill = color;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        fill_rect_into(
            &mut self.canvas,
            &self.transform,
            (x, y, width, height),
            self.fill,
            self.alpha,
        );
    }

    fn set_font(&mut self, font: FontSpec) {
        self.font_spec = font;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        if text.is_empty() || self.alpha <= 0.0 || self.font_spec.size <= 0.0 {
            return;
        }
        let scale = PxScale::from(self.font_spec.size);
        let scaled = self.font.as_scaled(scale);
        let (ascent, descent) = (scaled.ascent(), scaled.descent());
        let baseline_y = y + baseline_shift(self.baseline, ascent, descent);

        let scratch = self.rasterize_text(text, scale);
        let padding = f32::from(u16::try_from(TEXT_PADDING).unwrap_or(0));

        let mut to_canvas = self.transform;
        to_canvas.translate(x - padding, baseline_y - ascent - padding);
        let Some(projection) = to_canvas.to_projection() else {
            return;
        };

        let mut mask = GrayImage::new(self.canvas.width(), self.canvas.height());
        warp_into(
            &scratch,
            &projection,
            Interpolation::Bilinear,
            Luma([0]),
            &mut mask,
        );
        composite_mask(&mut self.canvas, &mask, self.fill, self.alpha);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transform.translate(x, y);
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.transform.scale(x, y);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform.rotate(angle);
    }

    fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
    }

    fn to_data_url(&self) -> Result<String> {
        let mut bytes = Vec::new();
        self.canvas
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                self.format.image_format(),
            )
            .map_err(|e| CodeError::Encode(format!("{:?} encode failed: {e}", self.format)))?;

        debug!(format = ?self.format, bytes = bytes.len(), "Surface exported");
        Ok(format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&bytes)
        ))
    }
}

/// Offset from the requested `y` to the alphabetic baseline.
fn baseline_shift(baseline: TextBaseline, ascent: f32, descent: f32) -> f32 {
    match baseline {
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Top => ascent,
        TextBaseline::Middle => (ascent + descent) / 2.0,
        TextBaseline::Bottom => descent,
    }
}

/// Fills the transformed rectangle `(x, y, width, height)`.
///
/// A destination pixel is covered when its centre maps back inside the rectangle.
fn fill_rect_into(
    canvas: &mut RgbaImage,
    transform: &Affine,
    (x, y, width, height): (f32, f32, f32, f32),
    color: Rgb<u8>,
    alpha: f32,
) {
    if width <= 0.0 || height <= 0.0 || alpha <= 0.0 {
        return;
    }
    let Some(inverse) = transform.invert() else {
        return;
    };

    let (min_x, min_y, max_x, max_y) = transform.bounds(x, y, width, height);
    let x_range = f32_to_u32(min_x.floor())..f32_to_u32(max_x.ceil()).min(canvas.width());
    let y_range = f32_to_u32(min_y.floor())..f32_to_u32(max_y.ceil()).min(canvas.height());

    for py in y_range {
        for px in x_range.clone() {
            let (lx, ly) = inverse.apply(u32_to_f32(px) + 0.5, u32_to_f32(py) + 0.5);
            if lx >= x && lx < x + width && ly >= y && ly < y + height {
                blend(canvas.get_pixel_mut(px, py), color, alpha);
            }
        }
    }
}

/// Blends `color` wherever `mask` has coverage.
fn composite_mask(canvas: &mut RgbaImage, mask: &GrayImage, color: Rgb<u8>, alpha: f32) {
    for (x, y, coverage) in mask.enumerate_pixels() {
        if coverage[0] > 0 && x < canvas.width() && y < canvas.height() {
            let weight = alpha * f32::from(coverage[0]) / 255.0;
            blend(canvas.get_pixel_mut(x, y), color, weight);
        }
    }
}

/// Source-over compositing of an opaque colour at `coverage` onto a
/// non-premultiplied pixel.
fn blend(dst: &mut Rgba<u8>, src: Rgb<u8>, coverage: f32) {
    let src_a = coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    for i in 0..3 {
        let value = f32::from(src[i])
            .mul_add(src_a, f32::from(dst[i]) * dst_a * (1.0 - src_a))
            / out_a;
        dst[i] = channel(value);
    }
    dst[3] = channel(out_a * 255.0);
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(val: f32) -> u8 {
    val.round().clamp(0.0, 255.0) as u8
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn f32_to_u32(val: f32) -> u32 {
    if val.is_finite() {
        val.ceil().clamp(0.0, f32::from(u16::MAX)) as u32
    } else {
        0
    }
}

#[inline]
#[allow(clippy::cast_precision_loss)]
const fn u32_to_f32(val: u32) -> f32 {
    val as f32
}
