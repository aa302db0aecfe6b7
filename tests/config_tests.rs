use attrdiff::config::{load_settings, parse_settings, DiffSettings, FormatHint};
use attrdiff::ParseError;
use predicates::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

fn settings_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_load_json_settings() {
    let file = settings_file(".json", r#"{"include": ["id", "status"], "nulls_last": true}"#);
    let settings = load_settings(file.path()).unwrap();
    assert_eq!(
        settings,
        DiffSettings {
            include: vec!["id".to_string(), "status".to_string()],
            exclude: Vec::new(),
            nulls_last: true,
        }
    );
}

#[test]
fn test_load_yaml_settings() -> anyhow::Result<()> {
    let file = settings_file(".yml", "exclude:\n  - createdAt\n  - updatedAt\n");
    let settings = load_settings(file.path())?;
    assert_eq!(settings.exclude, vec!["createdAt", "updatedAt"]);
    assert!(settings.include.is_empty());
    assert!(!settings.nulls_last);
    Ok(())
}

#[test]
fn test_load_toml_settings() {
    let file = settings_file(".toml", "include = [\"balance\"]\nexclude = [\"balance\"]\n");
    let settings = load_settings(file.path()).unwrap();
    assert_eq!(settings.include, settings.exclude);
}

#[test]
fn test_load_without_extension_detects_format() {
    let file = settings_file(".cfg", r#"{"exclude": ["gid"]}"#);
    let settings = load_settings(file.path()).unwrap();
    assert_eq!(settings.exclude, vec!["gid"]);
}

#[test]
fn test_missing_file() {
    let err = load_settings(Path::new("/nonexistent/audit.yaml")).unwrap_err();
    assert!(matches!(err, ParseError::FileNotFound { .. }));
    assert!(predicate::str::contains("/nonexistent/audit.yaml").eval(&err.to_string()));
}

#[test]
fn test_invalid_json_reports_path() {
    let file = settings_file(".json", "{\"include\": [");
    let err = load_settings(file.path()).unwrap_err();
    assert!(matches!(err, ParseError::JsonError { .. }));
    let message = err.to_string();
    assert!(predicate::str::starts_with("Invalid JSON in").eval(&message));
    assert!(predicate::str::contains(file.path().to_string_lossy().as_ref()).eval(&message));
}

#[test]
fn test_wrong_field_type_in_yaml() {
    let result = parse_settings("nulls_last: sometimes", FormatHint::Yaml);
    assert!(matches!(result, Err(ParseError::YamlError { .. })));
}

#[test]
fn test_unrecognized_content() {
    let file = settings_file(".txt", "include: [\n= broken");
    let err = load_settings(file.path()).unwrap_err();
    assert!(matches!(err, ParseError::UnknownFormat { .. }));
    assert!(predicate::str::contains("Could not detect settings format").eval(&err.to_string()));
}

#[test]
fn test_empty_document_uses_defaults() {
    let settings = parse_settings("{}", FormatHint::Auto).unwrap();
    assert_eq!(settings, DiffSettings::default());
}
