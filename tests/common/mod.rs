use image::Rgb;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;
use tracing_subscriber::EnvFilter;
use verification_code::config::Result;
use verification_code::surface::{FontSpec, Surface2D, SurfaceProvider, TextBaseline};

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Counts glyph draws and remembers the last surface size.
#[derive(Default, Clone)]
pub struct CountingProvider {
    pub surfaces: Rc<Cell<usize>>,
    pub glyphs: Rc<Cell<usize>>,
    pub size: Rc<Cell<(u32, u32)>>,
}

pub struct CountingSurface {
    width: u32,
    height: u32,
    glyphs: Rc<Cell<usize>>,
}

impl SurfaceProvider for CountingProvider {
    type Surface = CountingSurface;

    fn create_surface(&self, width: u32, height: u32) -> Result<CountingSurface> {
        self.surfaces.set(self.surfaces.get() + 1);
        self.size.set((width, height));
        Ok(CountingSurface {
            width,
            height,
            glyphs: Rc::clone(&self.glyphs),
        })
    }
}

impl Surface2D for CountingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_fill_style(&mut self, _color: Rgb<u8>) {}

    fn set_global_alpha(&mut self, _alpha: f32) {}

    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}

    fn set_font(&mut self, _font: FontSpec) {}

    fn set_text_baseline(&mut self, _baseline: TextBaseline) {}

    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32) {
        self.glyphs.set(self.glyphs.get() + 1);
    }

    fn translate(&mut self, _x: f32, _y: f32) {}

    fn scale(&mut self, _x: f32, _y: f32) {}

    fn rotate(&mut self, _angle: f32) {}

    fn reset_transform(&mut self) {}

    fn to_data_url(&self) -> Result<String> {
        Ok(format!("data:text/plain,{}x{}", self.width, self.height))
    }
}
