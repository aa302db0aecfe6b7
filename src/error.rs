//! Custom error types for attrdiff.

/// Failure raised by a comparator while ordering two operands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// The comparator was handed an operand it cannot order: an absent value
    /// where it assumes presence, or a value of the wrong kind.
    #[error("Incomparable value: expected {expected}, found {found}")]
    IncomparableValue { expected: String, found: String },

    /// A map-value comparator was asked to rank a key it has no entry for.
    #[error("Key not found in ranking map: {key}")]
    KeyNotFound { key: String },
}

/// Failure to resolve or read a named attribute.
#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    #[error("Unknown attribute: {name}")]
    Unknown { name: String },

    #[error("Access to attribute {name} denied: {reason}")]
    AccessDenied { name: String, reason: String },

    #[error("Failed to serialize attribute {name}: {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to load diff settings.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not detect settings format for {path}")]
    UnknownFormat { path: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Failed to compare attribute {attribute}: {source}")]
    Compare {
        attribute: String,
        #[source]
        source: CompareError,
    },

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompareError {
    pub fn incomparable(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::IncomparableValue {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// The error a strict comparator reports when handed an absent operand.
    pub fn absent(expected: impl Into<String>) -> Self {
        Self::incomparable(expected, "absent value")
    }

    pub fn key_not_found(key: impl std::fmt::Debug) -> Self {
        Self::KeyNotFound {
            key: format!("{:?}", key),
        }
    }
}

impl AttributeError {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::Unknown { name: name.into() }
    }

    pub fn access_denied(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn serialization(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            name: name.into(),
            source,
        }
    }
}

impl ParseError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn json_error(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonError {
            path: path.into(),
            source,
        }
    }

    pub fn yaml_error(path: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::YamlError {
            path: path.into(),
            source,
        }
    }

    pub fn toml_error(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::TomlError {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }
}

impl DiffError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn compare(attribute: impl Into<String>, source: CompareError) -> Self {
        Self::Compare {
            attribute: attribute.into(),
            source,
        }
    }
}

/// Convenience alias for comparator results.
pub type CompareResult = Result<std::cmp::Ordering, CompareError>;
