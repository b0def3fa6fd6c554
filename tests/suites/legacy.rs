use crate::common::{CountingProvider, init_tracing};
use verification_code::config::{CodeError, ValidationError};
use verification_code::{Arg, generate_code, generate_code_with};

fn message(width: Option<Arg>, height: Option<Arg>, kind: Option<Arg>) -> String {
    let err = generate_code(width, height, kind, None).unwrap_err();
    assert!(matches!(err, CodeError::Validation(_)), "got {err:?}");
    err.to_string()
}

#[test]
fn test_error_messages() {
    init_tracing();
    let w = || Some(Arg::from(200));
    let h = || Some(Arg::from(80));

    assert_eq!(message(None, None, None), "missing dimensions");
    assert_eq!(message(w(), None, None), "missing dimensions");
    assert_eq!(message(Some("200".into()), h(), None), "width must be a number");
    assert_eq!(message(w(), Some("80".into()), None), "height must be a number");
    assert_eq!(message(w(), h(), Some("bogus".into())), "invalid type");
    assert_eq!(message(w(), h(), Some(0.into())), "codeLen must be positive integer");
    assert_eq!(message(w(), h(), Some((-1).into())), "codeLen must be positive integer");
    assert_eq!(message(w(), h(), Some(true.into())), "invalid third parameter");
    assert_eq!(
        message(Some(9000.into()), h(), None),
        "width must be between 1 and 8192 pixels"
    );
}

#[test]
fn test_third_argument_reported_before_dimension_range() {
    let h = || Some(Arg::from(80));
    assert_eq!(message(Some((-5).into()), h(), Some("bogus".into())), "invalid type");
    assert_eq!(
        message(Some(Arg::Number(0.5)), h(), Some(false.into())),
        "invalid third parameter"
    );
}

#[test]
fn test_validation_draws_nothing() {
    let provider = CountingProvider::default();
    let err = generate_code_with(
        provider.clone(),
        Some(200.into()),
        Some(80.into()),
        Some("letters".into()),
        None,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CodeError::Validation(ValidationError::InvalidType)
    ));
    assert_eq!(provider.surfaces.get(), 0);
}

#[test]
fn test_number_type_with_length() {
    let provider = CountingProvider::default();
    let result = generate_code_with(
        provider.clone(),
        Some(200.into()),
        Some(80.into()),
        Some("number".into()),
        Some(6.into()),
    )
    .unwrap();

    assert_eq!(result.code.len(), 6);
    assert!(result.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(provider.glyphs.get(), 6);
}

#[test]
fn test_letter_type_default_length() {
    let result = generate_code_with(
        CountingProvider::default(),
        Some(200.into()),
        Some(80.into()),
        Some("letter".into()),
        None,
    )
    .unwrap();

    assert_eq!(result.code.len(), 4);
    assert!(result.code.chars().all(|c| c.is_ascii_lowercase()));
}

#[test]
fn test_numeric_third_argument_is_length() {
    let provider = CountingProvider::default();
    let result = generate_code_with(
        provider.clone(),
        Some(Arg::Number(200.0)),
        Some(Arg::Number(80.0)),
        Some(5.into()),
        Some(99.into()),
    )
    .unwrap();

    assert_eq!(result.code.len(), 5);
    assert_eq!(provider.size.get(), (200, 80));
}

#[test]
fn test_fractional_dimensions_truncate() {
    let provider = CountingProvider::default();
    generate_code_with(
        provider.clone(),
        Some(Arg::Number(120.7)),
        Some(Arg::Number(40.2)),
        None,
        None,
    )
    .unwrap();
    assert_eq!(provider.size.get(), (120, 40));
}
