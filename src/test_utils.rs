//! Test utilities.
//!
//! Surfaces that record or refuse drawing calls, so generator behavior can
//! be asserted without a font face or pixel comparisons.

use crate::config::{CodeError, Result};
use crate::surface::{FontSpec, Surface2D, SurfaceProvider, TextBaseline};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::Rgb;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;

/// Serializes tests that read or write `CAPTCHA_*` environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// One recorded surface interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    CreateSurface(u32, u32),
    FillStyle(Rgb<u8>),
    GlobalAlpha(f32),
    FillRect(f32, f32, f32, f32),
    Font(FontSpec),
    Baseline(TextBaseline),
    FillText(String, f32, f32),
    Translate(f32, f32),
    Scale(f32, f32),
    Rotate(f32),
    ResetTransform,
    Export,
}

/// Provider whose surfaces append every call to one shared log.
#[derive(Debug, Default, Clone)]
pub struct RecordingProvider {
    log: Rc<RefCell<Vec<DrawCall>>>,
}

impl RecordingProvider {
    /// Snapshot of all calls recorded so far, across surfaces.
    #[must_use]
    pub fn calls(&self) -> Vec<DrawCall> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl SurfaceProvider for RecordingProvider {
    type Surface = RecordingSurface;

    fn create_surface(&self, width: u32, height: u32) -> Result<RecordingSurface> {
        self.log
            .borrow_mut()
            .push(DrawCall::CreateSurface(width, height));
        Ok(RecordingSurface {
            width,
            height,
            log: Rc::clone(&self.log),
        })
    }
}

/// Surface created by [`RecordingProvider`].
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    log: Rc<RefCell<Vec<DrawCall>>>,
}

impl RecordingSurface {
    fn record(&self, call: DrawCall) {
        self.log.borrow_mut().push(call);
    }
}

impl Surface2D for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_fill_style(&mut self, color: Rgb<u8>) {
        self.record(DrawCall::FillStyle(color));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.record(DrawCall::GlobalAlpha(alpha));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.record(DrawCall::FillRect(x, y, width, height));
    }

    fn set_font(&mut self, font: FontSpec) {
        self.record(DrawCall::Font(font));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.record(DrawCall::Baseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.record(DrawCall::FillText(text.to_string(), x, y));
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.record(DrawCall::Translate(x, y));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.record(DrawCall::Scale(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.record(DrawCall::Rotate(angle));
    }

    fn reset_transform(&mut self) {
        self.record(DrawCall::ResetTransform);
    }

    /// Encodes the call log so far, so identical drawings give identical URLs.
    fn to_data_url(&self) -> Result<String> {
        let body = format!("{:?}", self.log.borrow());
        self.record(DrawCall::Export);
        Ok(format!(
            "data:text/plain;base64,{}",
            STANDARD.encode(body.as_bytes())
        ))
    }
}

/// Provider that never yields a surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingProvider;

impl SurfaceProvider for FailingProvider {
    type Surface = RecordingSurface;

    fn create_surface(&self, _width: u32, _height: u32) -> Result<RecordingSurface> {
        Err(CodeError::Font("no font available".to_string()))
    }
}
