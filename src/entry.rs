//! Difference records.

use crate::value::Value;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Maximum length of a value preview in the `Display` form.
const PREVIEW_LEN: usize = 60;

/// One reported difference: the attribute name and its first and last values.
///
/// Entries are plain data. They hold owned copies of the values and no
/// reference back to the compared instances.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    property_name: String,
    first: Value,
    last: Value,
}

impl DiffEntry {
    pub fn new(
        property_name: impl Into<String>,
        first: impl Into<Value>,
        last: impl Into<Value>,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn first(&self) -> &Value {
        &self.first
    }

    pub fn last(&self) -> &Value {
        &self.last
    }

    pub fn into_parts(self) -> (String, Value, Value) {
        (self.property_name, self.first, self.last)
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.property_name,
            self.first.preview(PREVIEW_LEN),
            self.last.preview(PREVIEW_LEN)
        )
    }
}

impl Serialize for DiffEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DiffEntry", 3)?;
        state.serialize_field("property", &self.property_name)?;
        state.serialize_field("first", &self.first)?;
        state.serialize_field("last", &self.last)?;
        state.end()
    }
}
