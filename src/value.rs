//! Dynamic attribute values.
//!
//! Attribute readers hand their results to the diff engine as [`Value`]s, so one
//! comparator registry can hold comparators for every attribute of a type no
//! matter what the attribute's Rust type is. [`ValueKind`] is the declared kind
//! of an attribute and drives the choice of default comparator.

use bigdecimal::BigDecimal;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A language tag such as `fr` or `en-US`, ordered by its textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locale {
    tag: String,
}

impl Locale {
    /// Builds a locale from a language code, normalized to lowercase.
    pub fn new(language: &str) -> Self {
        Self {
            tag: language.trim().to_lowercase(),
        }
    }

    pub fn with_region(language: &str, region: &str) -> Self {
        Self {
            tag: format!(
                "{}-{}",
                language.trim().to_lowercase(),
                region.trim().to_uppercase()
            ),
        }
    }

    /// Parses `en-US`, `en_US` or `en`.
    pub fn parse(tag: &str) -> Self {
        match tag.split_once(['-', '_']) {
            Some((language, region)) => Self::with_region(language, region),
            None => Self::new(tag),
        }
    }

    pub fn language(&self) -> &str {
        self.tag.split('-').next().unwrap_or_default()
    }

    pub fn region(&self) -> Option<&str> {
        self.tag.split_once('-').map(|(_, region)| region)
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// The declared kind of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    String,
    Decimal,
    Locale,
    Timestamp,
    BoolArray,
    ByteArray,
    ShortArray,
    CharArray,
    IntArray,
    LongArray,
    FloatArray,
    DoubleArray,
    List,
    Map,
    /// A nested composite, identified by its type name.
    Record(String),
    /// Kind not known statically.
    Any,
}

impl ValueKind {
    pub fn record(type_name: impl Into<String>) -> Self {
        Self::Record(type_name.into())
    }

    pub fn type_name(&self) -> &str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Byte => "byte",
            ValueKind::Short => "short",
            ValueKind::Char => "char",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Decimal => "decimal",
            ValueKind::Locale => "locale",
            ValueKind::Timestamp => "timestamp",
            ValueKind::BoolArray => "bool[]",
            ValueKind::ByteArray => "byte[]",
            ValueKind::ShortArray => "short[]",
            ValueKind::CharArray => "char[]",
            ValueKind::IntArray => "int[]",
            ValueKind::LongArray => "long[]",
            ValueKind::FloatArray => "float[]",
            ValueKind::DoubleArray => "double[]",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Record(name) => name,
            ValueKind::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A nested composite value: a type name and its fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, replacing an earlier field of the same name in place.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

/// A single attribute value. `Null` stands for an absent value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Decimal(BigDecimal),
    Locale(Locale),
    Timestamp(DateTime<Utc>),
    BoolArray(Vec<bool>),
    ByteArray(Vec<i8>),
    ShortArray(Vec<i16>),
    CharArray(Vec<char>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    /// A sequence of values; elements may be `Null`.
    List(Vec<Value>),
    /// Key/value pairs in insertion order.
    Map(Vec<(Value, Value)>),
    Record(Record),
}

impl Value {
    /// The runtime kind of this value. `Null` has no kind of its own.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Any,
            Value::Bool(_) => ValueKind::Bool,
            Value::Byte(_) => ValueKind::Byte,
            Value::Short(_) => ValueKind::Short,
            Value::Char(_) => ValueKind::Char,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Locale(_) => ValueKind::Locale,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::BoolArray(_) => ValueKind::BoolArray,
            Value::ByteArray(_) => ValueKind::ByteArray,
            Value::ShortArray(_) => ValueKind::ShortArray,
            Value::CharArray(_) => ValueKind::CharArray,
            Value::IntArray(_) => ValueKind::IntArray,
            Value::LongArray(_) => ValueKind::LongArray,
            Value::FloatArray(_) => ValueKind::FloatArray,
            Value::DoubleArray(_) => ValueKind::DoubleArray,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Record(record) => ValueKind::Record(record.type_name.clone()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Record(record) => record.type_name(),
            _ => type_name_of(self),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `None` for `Null`, the value itself otherwise.
    pub fn present(&self) -> Option<&Value> {
        match self {
            Value::Null => None,
            other => Some(other),
        }
    }

    /// Returns a short preview of the value, truncated to max_len.
    pub fn preview(&self, max_len: usize) -> String {
        let preview = match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Byte(n) => n.to_string(),
            Value::Short(n) => n.to_string(),
            Value::Char(c) => format!("'{}'", c),
            Value::Int(n) => n.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Double(n) => n.to_string(),
            Value::String(s) => format!("\"{}\"", s),
            Value::Decimal(d) => d.to_string(),
            Value::Locale(l) => l.to_string(),
            Value::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
            Value::BoolArray(v) => count_label("[", v.len(), "item", "]"),
            Value::ByteArray(v) => count_label("[", v.len(), "item", "]"),
            Value::ShortArray(v) => count_label("[", v.len(), "item", "]"),
            Value::CharArray(v) => count_label("[", v.len(), "item", "]"),
            Value::IntArray(v) => count_label("[", v.len(), "item", "]"),
            Value::LongArray(v) => count_label("[", v.len(), "item", "]"),
            Value::FloatArray(v) => count_label("[", v.len(), "item", "]"),
            Value::DoubleArray(v) => count_label("[", v.len(), "item", "]"),
            Value::List(v) => count_label("[", v.len(), "item", "]"),
            Value::Map(v) => count_label("{", v.len(), "entry", "}"),
            Value::Record(r) => format!(
                "{} {}",
                r.type_name,
                count_label("{", r.fields.len(), "field", "}")
            ),
        };

        if preview.chars().count() > max_len {
            let kept: String = preview.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            preview
        }
    }

    /// Converts the value into plain JSON data.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        match self {
            Value::Null => json!(null),
            Value::Bool(b) => json!(b),
            Value::Byte(n) => json!(n),
            Value::Short(n) => json!(n),
            Value::Char(c) => json!(c.to_string()),
            Value::Int(n) => json!(n),
            Value::Long(n) => json!(n),
            Value::Float(n) => json!(n),
            Value::Double(n) => json!(n),
            Value::String(s) => json!(s),
            Value::Decimal(d) => json!(d.to_string()),
            Value::Locale(l) => json!(l.as_str()),
            Value::Timestamp(t) => json!(t.to_rfc3339()),
            Value::BoolArray(v) => json!(v),
            Value::ByteArray(v) => json!(v),
            Value::ShortArray(v) => json!(v),
            Value::CharArray(v) => json!(v.iter().map(char::to_string).collect::<Vec<_>>()),
            Value::IntArray(v) => json!(v),
            Value::LongArray(v) => json!(v),
            Value::FloatArray(v) => json!(v),
            Value::DoubleArray(v) => json!(v),
            Value::List(v) => serde_json::Value::Array(v.iter().map(Value::to_json).collect()),
            Value::Map(entries) => serde_json::Value::Array(
                entries
                    .iter()
                    .map(|(k, v)| json!([k.to_json(), v.to_json()]))
                    .collect(),
            ),
            Value::Record(record) => {
                let fields: serde_json::Map<String, serde_json::Value> = record
                    .fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect();
                serde_json::Value::Object(fields)
            }
        }
    }

    /// Converts JSON data into a value.
    ///
    /// Integers that fit `i64` become `Long` and larger unsigned integers
    /// become an exact `Decimal`. Other numbers become `Double`, objects
    /// anonymous records with their field order preserved.
    pub fn from_json(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Long(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Decimal(BigDecimal::from(u))
                } else {
                    Value::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::List(arr.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(obj) => Value::Record(Record {
                type_name: String::new(),
                fields: obj
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            }),
        }
    }
}

fn type_name_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Byte(_) => "byte",
        Value::Short(_) => "short",
        Value::Char(_) => "char",
        Value::Int(_) => "int",
        Value::Long(_) => "long",
        Value::Float(_) => "float",
        Value::Double(_) => "double",
        Value::String(_) => "string",
        Value::Decimal(_) => "decimal",
        Value::Locale(_) => "locale",
        Value::Timestamp(_) => "timestamp",
        Value::BoolArray(_) => "bool[]",
        Value::ByteArray(_) => "byte[]",
        Value::ShortArray(_) => "short[]",
        Value::CharArray(_) => "char[]",
        Value::IntArray(_) => "int[]",
        Value::LongArray(_) => "long[]",
        Value::FloatArray(_) => "float[]",
        Value::DoubleArray(_) => "double[]",
        Value::List(_) => "list",
        Value::Map(_) => "map",
        Value::Record(_) => "record",
    }
}

fn count_label(open: &str, count: usize, noun: &str, close: &str) -> String {
    match count {
        0 => format!("{}{}", open, close),
        1 => format!("{} 1 {} {}", open, noun, close),
        n if noun == "entry" => format!("{} {} entries {}", open, n, close),
        n => format!("{} {} {}s {}", open, n, noun, close),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview(usize::MAX))
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    char => Char,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    BigDecimal => Decimal,
    Locale => Locale,
    DateTime<Utc> => Timestamp,
    Vec<bool> => BoolArray,
    Vec<i8> => ByteArray,
    Vec<i16> => ShortArray,
    Vec<char> => CharArray,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
    Vec<f32> => FloatArray,
    Vec<f64> => DoubleArray,
    Vec<Value> => List,
    Vec<(Value, Value)> => Map,
    Record => Record,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Typed view into a [`Value`], used to run a typed comparator against a
/// dynamically typed attribute.
pub trait AttributeValue {
    /// Name of the expected kind, used in mismatch errors.
    fn kind_name() -> &'static str;

    fn from_value(value: &Value) -> Option<&Self>;
}

impl AttributeValue for Value {
    fn kind_name() -> &'static str {
        "any"
    }

    fn from_value(value: &Value) -> Option<&Self> {
        Some(value)
    }
}

impl AttributeValue for str {
    fn kind_name() -> &'static str {
        "string"
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

macro_rules! attribute_value {
    ($($ty:ty => $variant:ident as $name:literal),* $(,)?) => {
        $(
            impl AttributeValue for $ty {
                fn kind_name() -> &'static str {
                    $name
                }

                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

attribute_value! {
    bool => Bool as "bool",
    i8 => Byte as "byte",
    i16 => Short as "short",
    char => Char as "char",
    i32 => Int as "int",
    i64 => Long as "long",
    f32 => Float as "float",
    f64 => Double as "double",
    String => String as "string",
    BigDecimal => Decimal as "decimal",
    Locale => Locale as "locale",
    DateTime<Utc> => Timestamp as "timestamp",
    Record => Record as "record",
    [bool] => BoolArray as "bool[]",
    [i8] => ByteArray as "byte[]",
    [i16] => ShortArray as "short[]",
    [char] => CharArray as "char[]",
    [i32] => IntArray as "int[]",
    [i64] => LongArray as "long[]",
    [f32] => FloatArray as "float[]",
    [f64] => DoubleArray as "double[]",
    [Value] => List as "list",
    [(Value, Value)] => Map as "map",
}
