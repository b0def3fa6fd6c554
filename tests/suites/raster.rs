use crate::common::init_tracing;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use verification_code::config::{CodeError, Config, OutputFormat};
use verification_code::{Arg, CodeImageGenerator, GenerationRequest, RasterProvider, generate_code};

fn decode(url: &str, mime: &str) -> RgbaImage {
    let payload = url
        .strip_prefix(&format!("data:{mime};base64,"))
        .unwrap_or_else(|| panic!("unexpected data url prefix: {}", &url[..url.len().min(40)]));
    let bytes = STANDARD.decode(payload).unwrap();
    image::load_from_memory(&bytes).unwrap().to_rgba8()
}

fn provider() -> RasterProvider {
    RasterProvider::embedded().unwrap()
}

#[test]
fn test_generate_code_end_to_end() {
    init_tracing();
    let result = generate_code(Some(200.into()), Some(80.into()), None, None).unwrap();
    assert_eq!(result.code.len(), 4);

    let image = decode(&result.image, "image/png");
    assert_eq!(image.dimensions(), (200, 80));
}

#[test]
fn test_background_is_light_and_translucent() {
    let mut generator = CodeImageGenerator::with_rng(provider(), StdRng::seed_from_u64(21));
    let result = generator
        .generate(&GenerationRequest::new(160, 60).with_code_length(1))
        .unwrap();
    let image = decode(&result.image, "image/png");

    // the last column is left of no glyph anchor
    let corner = image.get_pixel(159, 0);
    assert!((178..=179).contains(&corner[3]));
    assert!(corner.0[..3].iter().all(|c| *c >= 180));
}

#[test]
fn test_glyphs_darken_pixels() {
    let mut generator = CodeImageGenerator::with_rng(provider(), StdRng::seed_from_u64(22));
    let result = generator
        .generate(&GenerationRequest::new(200, 80).with_code_length(4))
        .unwrap();
    let image = decode(&result.image, "image/png");

    let dark = image
        .pixels()
        .filter(|p| p.0[..3].iter().all(|c| *c <= 120) && p[3] > 200)
        .count();
    assert!(dark > 50, "only {dark} glyph pixels");
}

#[test]
fn test_webp_output() {
    let mut generator = CodeImageGenerator::with_rng(
        provider().with_format(OutputFormat::WebP),
        StdRng::seed_from_u64(23),
    );
    let result = generator.generate(&GenerationRequest::new(90, 30)).unwrap();
    assert!(result.image.starts_with("data:image/webp;base64,"));
}

#[test]
fn test_repeated_calls_produce_distinct_images() {
    let a = generate_code(Some(Arg::Number(120.0)), Some(40.into()), Some(8.into()), None).unwrap();
    let b = generate_code(Some(Arg::Number(120.0)), Some(40.into()), Some(8.into()), None).unwrap();
    assert_ne!(a.image, b.image);
}

#[test]
fn test_configured_font_file() {
    let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/DejaVuSerif-Bold.ttf");
    let config = Config {
        font_path: Some(bundled),
        ..Config::default()
    };
    let mut generator = CodeImageGenerator::with_rng(
        RasterProvider::from_config(&config).unwrap(),
        StdRng::seed_from_u64(24),
    )
    .with_config(&config);
    let result = generator.generate(&GenerationRequest::new(100, 40)).unwrap();
    assert_eq!(decode(&result.image, "image/png").dimensions(), (100, 40));

    let missing = Config {
        font_path: Some("/nonexistent/verification-code/face.ttf".into()),
        ..Config::default()
    };
    assert!(matches!(
        RasterProvider::from_config(&missing),
        Err(CodeError::Font(_))
    ));
}
