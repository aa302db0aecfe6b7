//! Attribute discovery and access.
//!
//! An [`AttributeResolver`] tells the diff engine which named attributes a
//! type has, what kind each one is, and how to read it off an instance. The
//! engine depends on nothing else about the type.
//!
//! [`TypeDescriptor`] is the explicit, per-type registration: readers are
//! closures, so they may read private fields as long as the descriptor is
//! built inside the type's own module. [`SerdeResolver`] discovers attributes
//! from a type's `Serialize` implementation instead.
//!
//! # Examples
//!
//! ```
//! use attrdiff::resolver::{AttributeResolver, TypeDescriptor};
//! use attrdiff::ValueKind;
//!
//! struct Account {
//!     id: i64,
//!     owner: String,
//! }
//!
//! let descriptor = TypeDescriptor::<Account>::new("Account")
//!     .attribute("id", ValueKind::Long, |a: &Account| a.id)
//!     .attribute("owner", ValueKind::String, |a: &Account| a.owner.clone());
//!
//! let names: Vec<String> = descriptor.attributes().into_iter().map(|a| a.name).collect();
//! assert_eq!(names, vec!["id", "owner"]);
//! ```

mod serde;

pub use self::serde::SerdeResolver;

use crate::error::AttributeError;
use crate::value::{Value, ValueKind};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A discovered attribute: its name and declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    pub name: String,
    pub kind: ValueKind,
}

impl AttributeInfo {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Discovers the comparable attributes of `T` and reads them off instances.
pub trait AttributeResolver<T: ?Sized>: Send + Sync {
    /// Name of the resolved type.
    fn type_name(&self) -> &str;

    /// The comparable attributes, in a stable discovery order.
    fn attributes(&self) -> Vec<AttributeInfo>;

    /// Reads the named attribute off `instance`.
    fn read(&self, instance: &T, name: &str) -> Result<Value, AttributeError>;

    /// Reads several attributes off `instance`, one result per name in
    /// `names` order. Resolvers with a costly per-instance step override this
    /// to pay it once.
    fn read_many(&self, instance: &T, names: &[String]) -> Vec<Result<Value, AttributeError>> {
        names.iter().map(|name| self.read(instance, name)).collect()
    }
}

type Reader<T> = Arc<dyn Fn(&T) -> Result<Value, AttributeError> + Send + Sync>;

/// A named attribute of `T` together with its reader.
pub struct AttributeDescriptor<T: ?Sized> {
    name: String,
    kind: ValueKind,
    comparable: bool,
    reader: Reader<T>,
}

impl<T: ?Sized> AttributeDescriptor<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn is_comparable(&self) -> bool {
        self.comparable
    }

    pub fn read(&self, instance: &T) -> Result<Value, AttributeError> {
        (self.reader)(instance)
    }
}

impl<T: ?Sized> Clone for AttributeDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind.clone(),
            comparable: self.comparable,
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<T: ?Sized> fmt::Debug for AttributeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("comparable", &self.comparable)
            .finish()
    }
}

/// Explicit attribute registration for a type.
///
/// Attributes keep the order they were declared in. Inherited attributes
/// come first; redeclaring a name replaces the earlier attribute in place.
/// Attributes whose kind is this type itself and attributes marked
/// non-comparable are not discovered.
pub struct TypeDescriptor<T: ?Sized> {
    type_name: String,
    attributes: Vec<AttributeDescriptor<T>>,
}

impl<T: ?Sized + 'static> TypeDescriptor<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Vec::new(),
        }
    }

    /// Declares an attribute read by an infallible accessor.
    pub fn attribute<V, F>(self, name: impl Into<String>, kind: ValueKind, reader: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.fallible_attribute(name, kind, move |instance: &T| Ok(reader(instance).into()))
    }

    /// Declares an attribute whose accessor may fail, for example because the
    /// value is guarded.
    pub fn fallible_attribute<F>(
        mut self,
        name: impl Into<String>,
        kind: ValueKind,
        reader: F,
    ) -> Self
    where
        F: Fn(&T) -> Result<Value, AttributeError> + Send + Sync + 'static,
    {
        self.push(AttributeDescriptor {
            name: name.into(),
            kind,
            comparable: true,
            reader: Arc::new(reader),
        });
        self
    }

    /// Marks a declared attribute as excluded from discovery.
    pub fn non_comparable(mut self, name: &str) -> Self {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attribute) => attribute.comparable = false,
            None => debug!(
                type_name = %self.type_name,
                attribute = name,
                "Ignoring non-comparable mark for undeclared attribute"
            ),
        }
        self
    }

    /// Inherits the attributes of a parent or embedded type.
    ///
    /// `project` borrows the parent part of an instance. Inherited attributes
    /// are placed before the attributes of this type; an attribute already
    /// declared here shadows the inherited one of the same name.
    pub fn inherit<P, F>(mut self, parent: TypeDescriptor<P>, project: F) -> Self
    where
        P: ?Sized + 'static,
        F: Fn(&T) -> &P + Send + Sync + 'static,
    {
        let project = Arc::new(project);
        let mut own = std::mem::take(&mut self.attributes);

        for inherited in parent.attributes {
            match own.iter().position(|a| a.name == inherited.name) {
                Some(index) => self.attributes.push(own.remove(index)),
                None => {
                    let project = Arc::clone(&project);
                    let reader = inherited.reader;
                    self.attributes.push(AttributeDescriptor {
                        name: inherited.name,
                        kind: inherited.kind,
                        comparable: inherited.comparable,
                        reader: Arc::new(move |instance: &T| reader(project(instance))),
                    });
                }
            }
        }
        self.attributes.extend(own);
        self
    }

    pub fn descriptors(&self) -> &[AttributeDescriptor<T>] {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor<T>> {
        self.attributes.iter().find(|a| a.name == name)
    }

    fn push(&mut self, descriptor: AttributeDescriptor<T>) {
        match self.attributes.iter_mut().find(|a| a.name == descriptor.name) {
            Some(slot) => *slot = descriptor,
            None => self.attributes.push(descriptor),
        }
    }

    fn is_self_reference(&self, kind: &ValueKind) -> bool {
        matches!(kind, ValueKind::Record(name) if *name == self.type_name)
    }
}

impl<T: ?Sized + 'static> AttributeResolver<T> for TypeDescriptor<T> {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn attributes(&self) -> Vec<AttributeInfo> {
        self.attributes
            .iter()
            .filter(|a| a.comparable && !self.is_self_reference(&a.kind))
            .map(|a| AttributeInfo::new(a.name.clone(), a.kind.clone()))
            .collect()
    }

    fn read(&self, instance: &T, name: &str) -> Result<Value, AttributeError> {
        self.get(name)
            .ok_or_else(|| AttributeError::unknown(name))?
            .read(instance)
    }
}

impl<T: ?Sized> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// A type that publishes its own attribute descriptor.
pub trait Diffable: Sized + 'static {
    fn descriptor() -> TypeDescriptor<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        id: i32,
        label: Option<String>,
        secret: String,
        parent: Option<Box<Node>>,
    }

    fn node() -> Node {
        Node {
            id: 7,
            label: None,
            secret: "hunter2".to_string(),
            parent: None,
        }
    }

    fn descriptor() -> TypeDescriptor<Node> {
        TypeDescriptor::new("Node")
            .attribute("id", ValueKind::Int, |n: &Node| n.id)
            .attribute("label", ValueKind::String, |n: &Node| n.label.clone())
            .attribute("secret", ValueKind::String, |n: &Node| n.secret.clone())
            .attribute("parent", ValueKind::record("Node"), |n: &Node| {
                n.parent.as_ref().map(|p| p.id)
            })
            .non_comparable("secret")
    }

    #[test]
    fn test_discovery_skips_self_reference_and_non_comparable() {
        let names: Vec<String> = descriptor().attributes().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["id", "label"]);
    }

    #[test]
    fn test_read_declared_attribute() {
        let descriptor = descriptor();
        assert_eq!(descriptor.read(&node(), "id").unwrap(), Value::Int(7));
        assert_eq!(descriptor.read(&node(), "label").unwrap(), Value::Null);
    }

    #[test]
    fn test_read_unknown_attribute() {
        let err = descriptor().read(&node(), "missing").unwrap_err();
        assert!(matches!(err, AttributeError::Unknown { .. }));
    }

    #[test]
    fn test_read_many_keeps_name_order() {
        let names = ["label", "missing", "id"].map(String::from);
        let values = descriptor().read_many(&node(), &names);
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].as_ref().unwrap(), &Value::Null);
        assert!(matches!(values[1], Err(AttributeError::Unknown { .. })));
        assert_eq!(values[2].as_ref().unwrap(), &Value::Int(7));
    }

    #[test]
    fn test_redeclared_attribute_replaces_in_place() {
        let descriptor =
            descriptor().attribute("id", ValueKind::Long, |n: &Node| i64::from(n.id) * 2);
        let infos = descriptor.attributes();
        assert_eq!(infos[0], AttributeInfo::new("id", ValueKind::Long));
        assert_eq!(descriptor.read(&node(), "id").unwrap(), Value::Long(14));
    }
}
