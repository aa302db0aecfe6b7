//! Diff settings loaded from JSON, YAML or TOML.
//!
//! Settings carry the include/exclude lists and the null policy, so the set of
//! audited attributes can live in configuration instead of code.
//!
//! # Examples
//!
//! ```
//! use attrdiff::config::{parse_settings, FormatHint};
//!
//! let yaml = "include: [id, status]\nnulls_last: true";
//! let settings = parse_settings(yaml, FormatHint::Yaml).unwrap();
//! assert_eq!(settings.include, vec!["id", "status"]);
//! assert!(settings.exclude.is_empty());
//! assert!(settings.nulls_last);
//! ```

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Include/exclude lists and null policy for a diff comparator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSettings {
    /// Attributes to compare. Empty means every resolved attribute.
    pub include: Vec<String>,
    /// Attributes never compared, even when included.
    pub exclude: Vec<String>,
    /// Whether absent values sort after present ones.
    pub nulls_last: bool,
}

/// Format of settings content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
    /// Try JSON, then YAML, then TOML.
    #[default]
    Auto,
}

impl FormatHint {
    /// Picks a format from a file extension; unknown extensions mean `Auto`.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => FormatHint::Json,
            Some("yaml") | Some("yml") => FormatHint::Yaml,
            Some("toml") => FormatHint::Toml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses settings from a string.
///
/// # Errors
///
/// Returns the format's parse error for an explicit format, or
/// `ParseError::UnknownFormat` when `Auto` finds no format that accepts the
/// content.
pub fn parse_settings(content: &str, hint: FormatHint) -> Result<DiffSettings, ParseError> {
    parse_with_source(content, hint, "<string>")
}

/// Loads settings from a file, picking the format by extension.
///
/// # Errors
///
/// This function will return an error if:
/// - The file does not exist (`ParseError::FileNotFound`)
/// - The file cannot be read (`ParseError::ReadError`)
/// - The content is invalid for the detected format
/// - No format accepts the content (`ParseError::UnknownFormat`)
///
/// # Examples
///
/// ```no_run
/// use attrdiff::config::load_settings;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = load_settings(Path::new("audit.toml"))?;
/// println!("comparing {:?}", settings.include);
/// # Ok(())
/// # }
/// ```
pub fn load_settings(path: &Path) -> Result<DiffSettings, ParseError> {
    let source = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(ParseError::file_not_found(source));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(source.clone(), e))?;
    parse_with_source(&content, FormatHint::from_path(path), &source)
}

fn parse_with_source(
    content: &str,
    hint: FormatHint,
    source: &str,
) -> Result<DiffSettings, ParseError> {
    match hint {
        FormatHint::Json => {
            serde_json::from_str(content).map_err(|e| ParseError::json_error(source, e))
        }
        FormatHint::Yaml => {
            serde_yaml::from_str(content).map_err(|e| ParseError::yaml_error(source, e))
        }
        FormatHint::Toml => toml::from_str(content).map_err(|e| ParseError::toml_error(source, e)),
        FormatHint::Auto => serde_json::from_str(content)
            .map_err(|_| ())
            .or_else(|_| serde_yaml::from_str(content).map_err(|_| ()))
            .or_else(|_| toml::from_str(content).map_err(|_| ()))
            .map_err(|_| ParseError::unknown_format(source)),
    }
}
