use crate::common::{CountingProvider, init_tracing};
use rand::SeedableRng;
use rand::rngs::StdRng;
use verification_code::captcha::AMBIGUOUS_GLYPHS;
use verification_code::config::{CodeError, Config, ValidationError};
use verification_code::{CharacterSet, CodeImageGenerator, GenerationRequest};

#[test]
fn test_one_glyph_per_code_character() {
    init_tracing();
    let provider = CountingProvider::default();
    let mut generator = CodeImageGenerator::with_rng(provider.clone(), StdRng::seed_from_u64(1));

    let result = generator
        .generate(&GenerationRequest::new(240, 60).with_code_length(9))
        .unwrap();

    assert_eq!(result.code.chars().count(), 9);
    assert_eq!(provider.glyphs.get(), 9);
    assert_eq!(provider.surfaces.get(), 1);
    assert_eq!(provider.size.get(), (240, 60));
    assert_eq!(result.image, "data:text/plain,240x60");
}

#[test]
fn test_codes_are_lowercase_alphanumeric() {
    let mut generator =
        CodeImageGenerator::with_rng(CountingProvider::default(), StdRng::seed_from_u64(2));
    let request = GenerationRequest::new(200, 80).with_code_length(16);
    for _ in 0..100 {
        let code = generator.generate(&request).unwrap().code;
        assert!(
            code.chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }
}

#[test]
fn test_mixed_set_reaches_digits_and_letters() {
    let mut generator =
        CodeImageGenerator::with_rng(CountingProvider::default(), StdRng::seed_from_u64(3));
    let request = GenerationRequest::new(200, 80).with_code_length(32);

    let mut seen = String::new();
    for _ in 0..20 {
        seen.push_str(&generator.generate(&request).unwrap().code);
    }
    assert!(seen.chars().any(|c| c.is_ascii_digit()));
    assert!(seen.chars().any(|c| c.is_ascii_lowercase()));
}

#[test]
fn test_ambiguous_filter_from_config() {
    let config = Config {
        exclude_ambiguous: true,
        code_length: 24,
        character_set: CharacterSet::Mixed,
        ..Config::default()
    };
    let request = GenerationRequest::from_config(300, 80, &config);
    let mut generator =
        CodeImageGenerator::with_rng(CountingProvider::default(), StdRng::seed_from_u64(4))
            .with_config(&config);

    let lowered: Vec<char> = AMBIGUOUS_GLYPHS
        .iter()
        .filter(|c| !matches!(c, 'Q' | 'S'))
        .map(char::to_ascii_lowercase)
        .collect();
    for _ in 0..50 {
        let code = generator.generate(&request).unwrap().code;
        assert_eq!(code.len(), 24);
        assert!(!code.contains(lowered.as_slice()));
    }
}

#[test]
fn test_different_seeds_diverge() {
    let request = GenerationRequest::new(200, 80).with_code_length(12);
    let a = CodeImageGenerator::with_rng(CountingProvider::default(), StdRng::seed_from_u64(10))
        .generate(&request)
        .unwrap();
    let b = CodeImageGenerator::with_rng(CountingProvider::default(), StdRng::seed_from_u64(11))
        .generate(&request)
        .unwrap();
    assert_ne!(a.code, b.code);
}

#[test]
fn test_oversized_request_rejected() {
    let provider = CountingProvider::default();
    let mut generator = CodeImageGenerator::new(provider.clone());
    let err = generator
        .generate(&GenerationRequest::new(10_000, 80))
        .unwrap_err();

    assert!(matches!(
        err,
        CodeError::Validation(ValidationError::DimensionOutOfRange {
            dimension: "width",
            ..
        })
    ));
    assert_eq!(err.to_string(), "width must be between 1 and 8192 pixels");
    assert_eq!(provider.surfaces.get(), 0);
}

#[test]
fn test_result_serializes() {
    let mut generator =
        CodeImageGenerator::with_rng(CountingProvider::default(), StdRng::seed_from_u64(5));
    let result = generator.generate(&GenerationRequest::new(50, 20)).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["code"], result.code.as_str());
    assert_eq!(json["image"], "data:text/plain,50x20");
}
