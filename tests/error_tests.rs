use attrdiff::{AttributeError, CompareError, DiffError, ParseError};
use std::error::Error;

#[test]
fn test_parse_error_display() {
    let err = ParseError::file_not_found("audit.json");
    assert_eq!(err.to_string(), "File not found: audit.json");
}

#[test]
fn test_unknown_format_error() {
    let err = ParseError::unknown_format("/path/to/settings.txt");
    assert!(err.to_string().contains("Could not detect settings format"));
    assert!(err.to_string().contains("/path/to/settings.txt"));
}

#[test]
fn test_attribute_error_display() {
    let err = AttributeError::access_denied("pin", "field is sealed");
    assert_eq!(err.to_string(), "Access to attribute pin denied: field is sealed");
}

#[test]
fn test_diff_error_from_parse_error() {
    let diff_err: DiffError = ParseError::file_not_found("audit.json").into();
    assert!(matches!(diff_err, DiffError::Parse(_)));
    assert_eq!(diff_err.to_string(), "File not found: audit.json");
}

#[test]
fn test_compare_error_is_source_of_diff_error() {
    let err = DiffError::compare("addresses", CompareError::incomparable("double", "absent value"));
    assert_eq!(
        err.to_string(),
        concat!(
            "Failed to compare attribute addresses: ",
            "Incomparable value: expected double, found absent value"
        )
    );
    let source = err.source().map(|s| s.to_string());
    assert_eq!(
        source.as_deref(),
        Some("Incomparable value: expected double, found absent value")
    );
}

#[test]
fn test_invalid_argument() {
    let err = DiffError::invalid_argument("first Order instance is missing");
    assert!(err.to_string().starts_with("Invalid argument"));
}

#[test]
fn test_compare_errors_are_comparable() {
    assert_eq!(CompareError::key_not_found(7), CompareError::key_not_found(7));
    assert_ne!(
        CompareError::key_not_found("a"),
        CompareError::incomparable("string", "a")
    );
}
