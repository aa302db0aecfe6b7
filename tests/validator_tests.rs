use attrdiff::validator::{ByteValidator, Validator};
use attrdiff::Locale;
use proptest::prelude::*;

#[test]
fn test_strict_rejects_decoration() {
    let validator = ByteValidator::new();
    assert!(validator.is_strict());
    for raw in [" 1", "1 ", "+1", "1,0", "0x10", "1e2", "--1", "-"] {
        assert!(!validator.validate(raw), "{raw:?} should be rejected");
    }
}

#[test]
fn test_strict_out_of_range() {
    let validator = ByteValidator::new();
    assert_eq!(validator.parse("128"), None);
    assert_eq!(validator.parse("99999999999999999999999"), None);
    assert_eq!(validator.parse("-0"), Some(0));
}

#[test]
fn test_lenient_accepts_whitespace_sign_and_grouping() {
    let validator = ByteValidator::lenient();
    assert!(!validator.is_strict());
    assert_eq!(validator.parse("  42\t"), Some(42));
    assert_eq!(validator.parse("+7"), Some(7));
    assert_eq!(validator.parse("1,2,0"), Some(120));
    assert_eq!(validator.parse("-1,28"), Some(-128));
    assert_eq!(validator.parse("1,28"), None);
}

#[test]
fn test_locale_grouping_separators() {
    let french = ByteValidator::lenient().with_locale(&Locale::new("fr"));
    assert_eq!(french.parse("1 00"), Some(100));
    assert_eq!(french.parse("1,00"), None);

    let english = ByteValidator::lenient().with_locale(&Locale::with_region("en", "us"));
    assert_eq!(english.parse("1,00"), Some(100));

    let custom = ByteValidator::lenient().with_grouping('_');
    assert_eq!(custom.parse("1_0"), Some(10));
}

#[test]
fn test_locale_does_not_loosen_strict_mode() {
    let validator = ByteValidator::new().with_locale(&Locale::new("de"));
    assert_eq!(validator.parse("1.2"), None);
}

proptest! {
    #[test]
    fn prop_strict_accepts_every_byte(value in any::<i8>()) {
        prop_assert_eq!(ByteValidator::new().parse(&value.to_string()), Some(value));
    }

    #[test]
    fn prop_out_of_range_is_rejected(value in prop_oneof![-100_000_i64..-129, 128_i64..100_000]) {
        prop_assert!(!ByteValidator::new().validate(&value.to_string()));
        prop_assert!(!ByteValidator::lenient().validate(&value.to_string()));
    }
}
