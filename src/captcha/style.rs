//! Randomized colours and per-glyph geometry.

use crate::surface::Surface2D;
use image::Rgb;
use rand::Rng;

/// Channel range of the light background colour.
pub const BACKGROUND_CHANNEL: (u8, u8) = (180, 255);
/// Channel range of the dark glyph colour.
pub const GLYPH_CHANNEL: (u8, u8) = (1, 100);
/// Background opacity.
pub const BACKGROUND_ALPHA: f32 = 0.7;
/// Lower bound of the glyph scale factors; the upper bound 1.0 is exclusive.
pub const MIN_SCALE: f32 = 0.8;
/// Maximum glyph tilt either way, in degrees.
pub const MAX_ROTATION_DEG: f32 = 60.0;
/// Fraction of a slot width the glyph anchor is pushed right of the slot start.
pub const SLOT_OFFSET: f32 = 0.2;

/// Colour whose channels are each uniform in `min..=max`.
pub fn random_color(rng: &mut impl Rng, (min, max): (u8, u8)) -> Rgb<u8> {
    Rgb([
        rng.random_range(min..=max),
        rng.random_range(min..=max),
        rng.random_range(min..=max),
    ])
}

/// Randomized appearance of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub color: Rgb<u8>,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Radians.
    pub rotation: f32,
}

impl DrawStyle {
    /// Derives the style of glyph `index` out of `code_length` on a
    /// `width` x `height` surface.
    ///
    /// Draws colour, horizontal scale, vertical scale and rotation from `rng`
    /// in that order.
    pub fn random(
        rng: &mut impl Rng,
        index: usize,
        code_length: usize,
        width: u32,
        height: u32,
    ) -> Self {
        let color = random_color(rng, GLYPH_CHANNEL);
        let (translate_x, translate_y) = anchor(index, code_length, width, height);
        let scale_x = rng.random_range(MIN_SCALE..1.0);
        let scale_y = rng.random_range(MIN_SCALE..1.0);
        let rotation = rng
            .random_range(-MAX_ROTATION_DEG..=MAX_ROTATION_DEG)
            .to_radians();

        Self {
            color,
            translate_x,
            translate_y,
            scale_x,
            scale_y,
            rotation,
        }
    }

    /// Applies translate, scale, rotate in that order.
    ///
    /// Any other order moves the glyph away from its slot.
    pub fn apply(&self, surface: &mut impl Surface2D) {
        surface.translate(self.translate_x, self.translate_y);
        surface.scale(self.scale_x, self.scale_y);
        surface.rotate(self.rotation);
    }
}

/// Glyph anchor: `(width / code_length) * (index + 0.2)`, vertically centred.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn anchor(index: usize, code_length: usize, width: u32, height: u32) -> (f32, f32) {
    let slot = width as f32 / code_length.max(1) as f32;
    (slot * (index as f32 + SLOT_OFFSET), height as f32 / 2.0)
}
