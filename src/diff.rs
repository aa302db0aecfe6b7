//! Attribute-level diff algorithm.
//!
//! A [`DiffComparator`] is bound to one type. It resolves the type's
//! attributes once, narrows them to an active set through include/exclude
//! filters, and keeps one comparator per attribute: an override installed
//! with [`DiffComparator::set_comparator`], or else the library default for
//! the attribute's declared kind.
//!
//! [`DiffComparator::diff_compare`] walks the active set in discovery order
//! and reports a [`DiffEntry`] for every attribute whose comparator does not
//! return `Equal`.
//!
//! # Examples
//!
//! ```
//! use attrdiff::{DiffComparator, TypeDescriptor, ValueKind};
//!
//! struct Order {
//!     id: i64,
//!     status: String,
//! }
//!
//! let descriptor = TypeDescriptor::<Order>::new("Order")
//!     .attribute("id", ValueKind::Long, |o: &Order| o.id)
//!     .attribute("status", ValueKind::String, |o: &Order| o.status.clone());
//!
//! let comparator = DiffComparator::with_resolver(descriptor);
//! let before = Order { id: 1, status: "PENDING".into() };
//! let after = Order { id: 1, status: "DELIVERED".into() };
//!
//! let entries = comparator.diff_compare(&before, &after).unwrap();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].property_name(), "status");
//! ```

use crate::comparator::{library, typed, Comparator};
use crate::entry::DiffEntry;
use crate::error::{AttributeError, CompareResult, DiffError};
use crate::filter::PropertyFilter;
use crate::resolver::{AttributeInfo, AttributeResolver, Diffable};
use crate::value::{AttributeValue, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

type ValueComparator = Arc<dyn Comparator<Value>>;

/// Compares two instances of `T` attribute by attribute.
///
/// Configure it fully (filters, overrides, null policy) before sharing it;
/// [`diff_compare`](Self::diff_compare) takes `&self` and mutates nothing, so a
/// configured comparator can be shared across threads read-only.
pub struct DiffComparator<T: ?Sized + 'static> {
    resolver: Arc<dyn AttributeResolver<T>>,
    resolved: Vec<AttributeInfo>,
    base: Option<Arc<dyn Comparator<T>>>,
    filter: PropertyFilter,
    active: Vec<String>,
    defaults: HashMap<String, ValueComparator>,
    overrides: HashMap<String, ValueComparator>,
    fallback: ValueComparator,
    nulls_last: bool,
}

impl<T: Diffable> DiffComparator<T> {
    /// Builds a comparator over every attribute `T` publishes.
    pub fn new() -> Self {
        Self::with_resolver(T::descriptor())
    }
}

impl<T: Diffable> Default for DiffComparator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> DiffComparator<T> {
    pub fn with_resolver<R: AttributeResolver<T> + 'static>(resolver: R) -> Self {
        Self::from_shared_resolver(Arc::new(resolver))
    }

    /// Builds a comparator over a resolver that may be shared with others.
    pub fn from_shared_resolver(resolver: Arc<dyn AttributeResolver<T>>) -> Self {
        let resolved = resolver.attributes();
        let active = resolved.iter().map(|a| a.name.clone()).collect();
        let mut comparator = Self {
            resolver,
            resolved,
            base: None,
            filter: PropertyFilter::new(),
            active,
            defaults: HashMap::new(),
            overrides: HashMap::new(),
            fallback: library::fallback(false),
            nulls_last: false,
        };
        comparator.install_defaults();
        debug!(
            type_name = %comparator.type_name(),
            attributes = comparator.resolved.len(),
            "Resolved attributes"
        );
        comparator
    }

    /// Sets the absence policy of the default comparators.
    ///
    /// With `false` an absent value sorts before a present one, with `true`
    /// after it. Overrides installed with `set_comparator` are unaffected.
    pub fn with_nulls_last(mut self, nulls_last: bool) -> Self {
        self.set_nulls_last(nulls_last);
        self
    }

    pub fn set_nulls_last(&mut self, nulls_last: bool) -> &mut Self {
        if self.nulls_last != nulls_last {
            self.nulls_last = nulls_last;
            self.install_defaults();
        }
        self
    }

    /// Uses `comparator` as the whole-instance ordering when this value is
    /// itself used as a [`Comparator<T>`]. Attribute diffs are unaffected.
    pub fn with_base_comparator<C: Comparator<T> + 'static>(mut self, comparator: C) -> Self {
        self.base = Some(Arc::new(comparator));
        self
    }

    pub fn set_base_comparator(&mut self, comparator: Arc<dyn Comparator<T>>) -> &mut Self {
        self.base = Some(comparator);
        self
    }

    /// Adds names to the include set and recomputes the active set.
    ///
    /// Once the include set is non-empty only included attributes are
    /// compared. Duplicates collapse; names the type does not have are
    /// ignored.
    pub fn include_properties<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added = self.filter.add_include(names);
        self.log_unknown("include", &added);
        self.recompute();
        self
    }

    /// Adds names to the exclude set and recomputes the active set.
    ///
    /// Exclusion always wins over inclusion.
    pub fn exclude_properties<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let added = self.filter.add_exclude(names);
        self.log_unknown("exclude", &added);
        self.recompute();
        self
    }

    /// Installs a typed comparator for one attribute, replacing the default.
    ///
    /// The comparator's operand type is not checked against the attribute's
    /// declared kind here; a mismatch fails the comparison with
    /// [`CompareError::IncomparableValue`](crate::error::CompareError::IncomparableValue).
    ///
    /// # Examples
    ///
    /// ```
    /// use attrdiff::comparator::{comparing, NullSafe};
    /// use attrdiff::{DiffComparator, TypeDescriptor, ValueKind};
    /// use std::cmp::Ordering;
    ///
    /// struct Account {
    ///     balance: f64,
    /// }
    ///
    /// let mut comparator = DiffComparator::with_resolver(
    ///     TypeDescriptor::<Account>::new("Account")
    ///         .attribute("balance", ValueKind::Double, |a: &Account| a.balance),
    /// );
    /// comparator.set_comparator::<f64, _>(
    ///     "balance",
    ///     NullSafe::new(
    ///         comparing(|a: &f64, b: &f64| {
    ///             if (a - b).abs() <= 0.0001 { Ordering::Equal } else { a.total_cmp(b) }
    ///         }),
    ///         false,
    ///     ),
    /// );
    ///
    /// let first = Account { balance: 1.0000547 };
    /// let last = Account { balance: 1.0000567 };
    /// assert!(comparator.diff_compare(&first, &last).unwrap().is_empty());
    /// ```
    pub fn set_comparator<V, C>(&mut self, name: impl Into<String>, comparator: C) -> &mut Self
    where
        V: AttributeValue + ?Sized + 'static,
        C: Comparator<V> + 'static,
    {
        self.set_value_comparator(name, typed::<V, C>(comparator))
    }

    /// Installs a comparator that works on attribute values directly.
    pub fn set_value_comparator(
        &mut self,
        name: impl Into<String>,
        comparator: ValueComparator,
    ) -> &mut Self {
        let name = name.into();
        if !self.is_resolved(&name) {
            debug!(
                type_name = %self.type_name(),
                attribute = %name,
                "Installing comparator for unresolved attribute"
            );
        }
        self.overrides.insert(name, comparator);
        self
    }

    /// Compares two instances and returns one entry per differing attribute,
    /// in discovery order.
    ///
    /// An attribute that cannot be read is logged and skipped. A comparator
    /// failure aborts the comparison.
    pub fn diff_compare(&self, first: &T, last: &T) -> Result<Vec<DiffEntry>, DiffError> {
        if std::ptr::eq(first, last) {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for (name, pair) in self.active.iter().zip(self.read_pairs(first, last)) {
            let Some((first_value, last_value)) = pair else {
                continue;
            };

            let ordering = self
                .compare_values(name, &first_value, &last_value)
                .map_err(|source| DiffError::compare(name.as_str(), source))?;

            if ordering != Ordering::Equal {
                entries.push(DiffEntry::new(name.as_str(), first_value, last_value));
            }
        }

        debug!(
            type_name = %self.type_name(),
            compared = self.active.len(),
            differences = entries.len(),
            "Compared instances"
        );
        Ok(entries)
    }

    /// Like [`diff_compare`](Self::diff_compare), for callers holding
    /// optional instances. A missing instance is an invalid argument.
    pub fn diff_compare_optional(
        &self,
        first: Option<&T>,
        last: Option<&T>,
    ) -> Result<Vec<DiffEntry>, DiffError> {
        match (first, last) {
            (Some(first), Some(last)) => self.diff_compare(first, last),
            (None, _) => Err(DiffError::invalid_argument(format!(
                "first {} instance is missing",
                self.type_name()
            ))),
            (_, None) => Err(DiffError::invalid_argument(format!(
                "last {} instance is missing",
                self.type_name()
            ))),
        }
    }

    pub fn type_name(&self) -> &str {
        self.resolver.type_name()
    }

    /// Attributes compared by `diff_compare`, in discovery order.
    pub fn active_properties(&self) -> &[String] {
        &self.active
    }

    /// Every comparable attribute the resolver discovered.
    pub fn resolved_properties(&self) -> Vec<String> {
        self.resolved.iter().map(|a| a.name.clone()).collect()
    }

    pub fn filter(&self) -> &PropertyFilter {
        &self.filter
    }

    pub fn nulls_last(&self) -> bool {
        self.nulls_last
    }

    fn comparator(&self, name: &str) -> &dyn Comparator<Value> {
        let comparator = self
            .overrides
            .get(name)
            .or_else(|| self.defaults.get(name))
            .unwrap_or(&self.fallback);
        &**comparator
    }

    fn compare_values(&self, name: &str, first: &Value, last: &Value) -> CompareResult {
        self.comparator(name).compare(first.present(), last.present())
    }

    /// Reads every active attribute off both instances, one resolver pass per
    /// instance. Unreadable attributes come back as `None`.
    fn read_pairs(&self, first: &T, last: &T) -> Vec<Option<(Value, Value)>> {
        let firsts = self.resolver.read_many(first, &self.active);
        let lasts = self.resolver.read_many(last, &self.active);
        self.active
            .iter()
            .zip(firsts.into_iter().zip(lasts))
            .map(|(name, (first, last))| match pair(first, last) {
                Ok(pair) => Some(pair),
                Err(error) => {
                    warn!(
                        type_name = %self.type_name(),
                        attribute = %name,
                        error = %error,
                        "Skipping unreadable attribute"
                    );
                    None
                }
            })
            .collect()
    }

    fn install_defaults(&mut self) {
        self.fallback = library::fallback(self.nulls_last);
        self.defaults = self
            .resolved
            .iter()
            .map(|a| (a.name.clone(), library::for_kind(&a.kind, self.nulls_last)))
            .collect();
    }

    fn recompute(&mut self) {
        self.active = self.filter.apply(&self.resolved_properties());
        debug!(
            type_name = %self.type_name(),
            active = ?self.active,
            "Recomputed active attributes"
        );
    }

    fn is_resolved(&self, name: &str) -> bool {
        self.resolved.iter().any(|a| a.name == name)
    }

    fn log_unknown(&self, set: &str, names: &[String]) {
        for name in names.iter().filter(|n| !self.is_resolved(n)) {
            debug!(
                type_name = %self.type_name(),
                attribute = %name,
                set,
                "Ignoring unknown attribute name"
            );
        }
    }
}

fn pair(
    first: Result<Value, AttributeError>,
    last: Result<Value, AttributeError>,
) -> Result<(Value, Value), AttributeError> {
    Ok((first?, last?))
}

/// Orders whole instances: by the base comparator when one is set, otherwise
/// by the first active attribute that differs. Absent instances follow the
/// null policy.
impl<T: ?Sized + 'static> Comparator<T> for DiffComparator<T> {
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        if let Some(base) = &self.base {
            return base.compare(first, last);
        }

        let absent_first = if self.nulls_last {
            Ordering::Greater
        } else {
            Ordering::Less
        };
        let (first, last) = match (first, last) {
            (None, None) => return Ok(Ordering::Equal),
            (None, Some(_)) => return Ok(absent_first),
            (Some(_), None) => return Ok(absent_first.reverse()),
            (Some(first), Some(last)) => (first, last),
        };
        if std::ptr::eq(first, last) {
            return Ok(Ordering::Equal);
        }

        for (name, pair) in self.active.iter().zip(self.read_pairs(first, last)) {
            let Some((first_value, last_value)) = pair else {
                continue;
            };
            match self.compare_values(name, &first_value, &last_value)? {
                Ordering::Equal => continue,
                decided => return Ok(decided),
            }
        }
        Ok(Ordering::Equal)
    }
}

impl<T: ?Sized + 'static> fmt::Debug for DiffComparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overrides: Vec<&String> = self.overrides.keys().collect();
        overrides.sort();
        f.debug_struct("DiffComparator")
            .field("type_name", &self.type_name())
            .field("resolved", &self.resolved)
            .field("filter", &self.filter)
            .field("active", &self.active)
            .field("overrides", &overrides)
            .field("has_base", &self.base.is_some())
            .field("nulls_last", &self.nulls_last)
            .finish()
    }
}
