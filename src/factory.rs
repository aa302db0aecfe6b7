//! Ready-to-use diff comparators for `Diffable` types.
//!
//! # Examples
//!
//! ```
//! use attrdiff::{DiffComparatorFactory, Diffable, TypeDescriptor, ValueKind};
//!
//! struct Invoice {
//!     id: i64,
//!     total: f64,
//!     updated_at: String,
//! }
//!
//! impl Diffable for Invoice {
//!     fn descriptor() -> TypeDescriptor<Self> {
//!         TypeDescriptor::new("Invoice")
//!             .attribute("id", ValueKind::Long, |i: &Invoice| i.id)
//!             .attribute("total", ValueKind::Double, |i: &Invoice| i.total)
//!             .attribute("updatedAt", ValueKind::String, |i: &Invoice| i.updated_at.clone())
//!     }
//! }
//!
//! let comparator = DiffComparatorFactory::create_excluding::<Invoice, _, _>(["updatedAt"]);
//! assert_eq!(comparator.active_properties(), ["id", "total"]);
//! ```

use crate::comparator::Comparator;
use crate::config::{load_settings, DiffSettings};
use crate::diff::DiffComparator;
use crate::error::DiffError;
use crate::resolver::{Diffable, SerdeResolver};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Builds [`DiffComparator`]s from a type plus optional base comparator,
/// include list and exclude list. Exclusion always wins over inclusion.
pub struct DiffComparatorFactory;

impl DiffComparatorFactory {
    /// All resolved attributes, default comparators.
    pub fn create<T: Diffable>() -> DiffComparator<T> {
        DiffComparator::new()
    }

    /// All resolved attributes, with `base` as the whole-instance ordering.
    pub fn create_with_comparator<T, C>(base: C) -> DiffComparator<T>
    where
        T: Diffable,
        C: Comparator<T> + 'static,
    {
        DiffComparator::new().with_base_comparator(base)
    }

    /// Every resolved attribute except `exclude`.
    pub fn create_excluding<T, I, S>(exclude: I) -> DiffComparator<T>
    where
        T: Diffable,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut comparator = DiffComparator::new();
        comparator.exclude_properties(exclude);
        comparator
    }

    /// Only `include`, minus `exclude`.
    pub fn create_filtered<T, I, S, E, X>(include: I, exclude: E) -> DiffComparator<T>
    where
        T: Diffable,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = X>,
        X: Into<String>,
    {
        let mut comparator = DiffComparator::new();
        comparator.include_properties(include).exclude_properties(exclude);
        comparator
    }

    /// Base comparator, `include` and `exclude` together.
    pub fn create_with<T, C, I, S, E, X>(base: C, include: I, exclude: E) -> DiffComparator<T>
    where
        T: Diffable,
        C: Comparator<T> + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = X>,
        X: Into<String>,
    {
        let mut comparator = DiffComparator::new().with_base_comparator(base);
        comparator.include_properties(include).exclude_properties(exclude);
        comparator
    }

    /// Applies loaded settings: include and exclude lists and the null policy.
    pub fn from_settings<T: Diffable>(settings: &DiffSettings) -> DiffComparator<T> {
        let mut comparator = DiffComparator::new().with_nulls_last(settings.nulls_last);
        if !settings.include.is_empty() {
            comparator.include_properties(settings.include.iter().cloned());
        }
        if !settings.exclude.is_empty() {
            comparator.exclude_properties(settings.exclude.iter().cloned());
        }
        comparator
    }

    /// Loads settings from a file and applies them.
    pub fn from_settings_file<T: Diffable>(path: &Path) -> Result<DiffComparator<T>, DiffError> {
        let settings = load_settings(path)?;
        Ok(Self::from_settings(&settings))
    }

    /// All attributes `prototype` serializes, discovered through serde.
    ///
    /// Fails when the prototype does not serialize as a struct.
    pub fn create_from_serde<T>(prototype: &T) -> Result<DiffComparator<T>, DiffError>
    where
        T: Serialize + 'static,
    {
        let resolver = SerdeResolver::from_prototype(prototype)?;
        Ok(DiffComparator::with_resolver(resolver))
    }

    /// Like [`create_with`](Self::create_with) with an already shared base.
    pub fn create_with_shared<T, I, S, E, X>(
        base: Arc<dyn Comparator<T>>,
        include: I,
        exclude: E,
    ) -> DiffComparator<T>
    where
        T: Diffable,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = X>,
        X: Into<String>,
    {
        let mut comparator = DiffComparator::new();
        comparator
            .set_base_comparator(base)
            .include_properties(include)
            .exclude_properties(exclude);
        comparator
    }
}
