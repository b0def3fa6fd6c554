//! Verification code generation.
//!
//! Paints a light translucent background, then draws each glyph with its own
//! colour, anisotropic scale and tilt, and exports the surface.

use crate::captcha::request::{GenerationRequest, GenerationResult};
use crate::captcha::style::{BACKGROUND_ALPHA, BACKGROUND_CHANNEL, DrawStyle, random_color};
use crate::config::{Config, DEFAULT_FONT_SIZE, Result};
use crate::surface::{FontSpec, Surface2D, SurfaceProvider, TextBaseline};
use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::debug;

/// Renders randomized codes onto surfaces from `P`, drawing randomness from `R`.
pub struct CodeImageGenerator<P, R = ThreadRng> {
    provider: P,
    rng: R,
    font: FontSpec,
}

impl<P: SurfaceProvider> CodeImageGenerator<P, ThreadRng> {
    /// Creates a generator using the thread-local RNG.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_rng(provider, rand::rng())
    }
}

impl<P: SurfaceProvider, R: Rng> CodeImageGenerator<P, R> {
    /// Creates a generator with an explicit RNG, e.g. a seeded `StdRng`.
    #[must_use]
    pub fn with_rng(provider: P, rng: R) -> Self {
        Self {
            provider,
            rng,
            font: FontSpec::bold_serif(DEFAULT_FONT_SIZE),
        }
    }

    /// Overrides the glyph font.
    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Applies the configured glyph size.
    #[must_use]
    pub fn with_config(self, config: &Config) -> Self {
        self.with_font(FontSpec::bold_serif(config.font_size))
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Generates a new code and its image.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::Validation` for an unrenderable request before any
    /// surface is acquired; provider and export failures propagate as-is.
    pub fn generate(&mut self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;
        let palette = request.palette();
        debug!(
            width = request.width,
            height = request.height,
            character_set = %request.character_set,
            code_length = request.code_length,
            palette_size = palette.len(),
            "Generating verification code"
        );

        let mut surface = self.provider.create_surface(request.width, request.height)?;
        self.paint_background(&mut surface, request);

        let mut code = String::new();
        let mut glyph_buf = [0u8; 4];
        for i in 0..request.code_length {
            let glyph = palette.pick(&mut self.rng);
            code.push(glyph);

            surface.set_font(self.font);
            surface.set_text_baseline(TextBaseline::Middle);

            let style = DrawStyle::random(
                &mut self.rng,
                i,
                request.code_length,
                request.width,
                request.height,
            );
            surface.set_fill_style(style.color);
            style.apply(&mut surface);
            surface.fill_text(glyph.encode_utf8(&mut glyph_buf), 0.0, 0.0);
            surface.reset_transform();
        }

        let image = surface.to_data_url()?;
        Ok(GenerationResult {
            code: code.to_lowercase(),
            image,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn paint_background(&mut self, surface: &mut P::Surface, request: &GenerationRequest) {
        surface.set_fill_style(random_color(&mut self.rng, BACKGROUND_CHANNEL));
        surface.set_global_alpha(BACKGROUND_ALPHA);
        surface.fill_rect(0.0, 0.0, request.width as f32, request.height as f32);
        surface.set_global_alpha(1.0);
    }
}
