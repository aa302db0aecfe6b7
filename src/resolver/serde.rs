//! Attribute discovery through `serde`.

use super::{AttributeInfo, AttributeResolver};
use crate::error::AttributeError;
use crate::value::{Value, ValueKind};
use ::serde::Serialize;
use std::marker::PhantomData;

/// Resolves the attributes of any `Serialize` struct.
///
/// Attribute names and kinds are discovered once from a prototype instance,
/// in the order serde emits the fields. Reads serialize the instance and pick
/// out the named field, so renamed or skipped serde fields are renamed or
/// skipped here too. [`read_many`](AttributeResolver::read_many) serializes
/// once per instance, so a diff costs two serializations.
///
/// Integer fields are declared [`ValueKind::Any`]: a prototype does not tell
/// an `i64` from a `u64`, and values above `i64::MAX` read as exact
/// [`Value::Decimal`]s. Non-finite floats serialize as JSON `null` and so read
/// as [`Value::Null`].
///
/// # Examples
///
/// ```
/// use attrdiff::resolver::{AttributeResolver, SerdeResolver};
/// use attrdiff::Value;
/// use serde::Serialize;
///
/// #[derive(Serialize, Default)]
/// struct Parcel {
///     weight: f64,
///     label: String,
/// }
///
/// let resolver = SerdeResolver::from_prototype(&Parcel::default()).unwrap();
/// assert_eq!(resolver.type_name(), "Parcel");
///
/// let parcel = Parcel { weight: 1.5, label: "fragile".into() };
/// assert_eq!(resolver.read(&parcel, "weight").unwrap(), Value::Double(1.5));
/// ```
#[derive(Debug, Clone)]
pub struct SerdeResolver<T> {
    type_name: String,
    attributes: Vec<AttributeInfo>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: Serialize> SerdeResolver<T> {
    pub fn from_prototype(prototype: &T) -> Result<Self, AttributeError> {
        let type_name = short_type_name::<T>().to_string();
        let fields = fields_of(prototype, &type_name)?;
        let attributes = fields
            .iter()
            .map(|(name, value)| AttributeInfo::new(name.clone(), kind_of(value)))
            .collect();

        Ok(Self {
            type_name,
            attributes,
            _marker: PhantomData,
        })
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }
}

impl<T: Serialize> AttributeResolver<T> for SerdeResolver<T> {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn attributes(&self) -> Vec<AttributeInfo> {
        self.attributes.clone()
    }

    fn read(&self, instance: &T, name: &str) -> Result<Value, AttributeError> {
        let mut fields = fields_of(instance, name)?;
        fields
            .remove(name)
            .map(Value::from_json)
            .ok_or_else(|| AttributeError::unknown(name))
    }

    fn read_many(&self, instance: &T, names: &[String]) -> Vec<Result<Value, AttributeError>> {
        let mut fields = match fields_of(instance, &self.type_name) {
            Ok(fields) => fields,
            Err(_) => return names.iter().map(|name| self.read(instance, name)).collect(),
        };
        names
            .iter()
            .map(|name| {
                fields
                    .remove(name.as_str())
                    .map(Value::from_json)
                    .ok_or_else(|| AttributeError::unknown(name.as_str()))
            })
            .collect()
    }
}

fn fields_of<T: Serialize>(
    instance: &T,
    context: &str,
) -> Result<serde_json::Map<String, serde_json::Value>, AttributeError> {
    match serde_json::to_value(instance) {
        Ok(serde_json::Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(AttributeError::access_denied(
            context,
            "value does not serialize as a struct",
        )),
        Err(source) => Err(AttributeError::serialization(context, source)),
    }
}

fn kind_of(value: &serde_json::Value) -> ValueKind {
    match value {
        serde_json::Value::Null => ValueKind::Any,
        serde_json::Value::Bool(_) => ValueKind::Bool,
        serde_json::Value::Number(n) if n.is_f64() => ValueKind::Double,
        serde_json::Value::Number(_) => ValueKind::Any,
        serde_json::Value::String(_) => ValueKind::String,
        serde_json::Value::Array(_) => ValueKind::List,
        serde_json::Value::Object(_) => ValueKind::Any,
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
