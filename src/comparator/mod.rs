//! Null-safe comparators.
//!
//! A [`Comparator`] orders two possibly-absent operands and returns a
//! [`CompareResult`]. Absence is modelled with `Option`: comparators that are
//! not null-tolerant ([`NaturalOrder`], [`FloatOrder`], closures wrapped with
//! [`comparing`]) fail with [`CompareError::IncomparableValue`] when handed
//! `None`, and [`NullSafe`] settles absence before delegating to them.
//!
//! # Examples
//!
//! ```
//! use attrdiff::comparator::{Comparator, NaturalOrder, NullSafe};
//! use std::cmp::Ordering;
//!
//! let cmp = NullSafe::new(NaturalOrder, false);
//! assert_eq!(cmp.compare(None, Some(&5)).unwrap(), Ordering::Less);
//! assert_eq!(cmp.compare(None::<&i32>, None).unwrap(), Ordering::Equal);
//! ```

pub mod library;
pub mod map;
pub mod sequence;
pub mod value;

use crate::error::{CompareError, CompareResult};
use crate::value::{AttributeValue, Value};
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::Arc;

pub use map::{MapEntryComparator, MapValueComparator};
pub use sequence::{IterableComparator, LengthFirst, Lexicographic, ObjectArrayComparator};
pub use value::ValueOrder;

/// A three-way comparison over two possibly-absent values.
pub trait Comparator<T: ?Sized>: Send + Sync {
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult;

    /// Compares two present values.
    fn compare_present(&self, first: &T, last: &T) -> CompareResult {
        self.compare(Some(first), Some(last))
    }

    /// Breaks ties of this comparator with `next`.
    fn then<C>(self, next: C) -> Chain<Self, C>
    where
        Self: Sized,
        C: Comparator<T>,
    {
        Chain { first: self, next }
    }

    fn reversed(self) -> Reversed<Self>
    where
        Self: Sized,
    {
        Reversed { inner: self }
    }
}

impl<T: ?Sized, C: Comparator<T> + ?Sized> Comparator<T> for Arc<C> {
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        (**self).compare(first, last)
    }
}

impl<T: ?Sized, C: Comparator<T> + ?Sized> Comparator<T> for Box<C> {
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        (**self).compare(first, last)
    }
}

/// Natural order of any `Ord` type. Not null-tolerant.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        match (first, last) {
            (Some(a), Some(b)) => Ok(a.cmp(b)),
            _ => Err(CompareError::absent(std::any::type_name::<T>())),
        }
    }
}

/// Total order of floating point numbers (`-0.0 < 0.0`, NaN sorts last).
/// Not null-tolerant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatOrder;

impl Comparator<f32> for FloatOrder {
    fn compare(&self, first: Option<&f32>, last: Option<&f32>) -> CompareResult {
        match (first, last) {
            (Some(a), Some(b)) => Ok(a.total_cmp(b)),
            _ => Err(CompareError::absent("f32")),
        }
    }
}

impl Comparator<f64> for FloatOrder {
    fn compare(&self, first: Option<&f64>, last: Option<&f64>) -> CompareResult {
        match (first, last) {
            (Some(a), Some(b)) => Ok(a.total_cmp(b)),
            _ => Err(CompareError::absent("f64")),
        }
    }
}

/// Wraps a comparator with an absence policy.
///
/// Two absent operands are equal. When exactly one operand is absent it sorts
/// before the present one if `nulls_last` is false and after it if
/// `nulls_last` is true; the wrapped comparator only ever sees present values.
#[derive(Debug, Clone, Copy)]
pub struct NullSafe<C> {
    inner: C,
    nulls_last: bool,
}

impl<C> NullSafe<C> {
    pub fn new(inner: C, nulls_last: bool) -> Self {
        Self { inner, nulls_last }
    }

    pub fn nulls_last(&self) -> bool {
        self.nulls_last
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl NullSafe<NaturalOrder> {
    pub fn natural(nulls_last: bool) -> Self {
        Self::new(NaturalOrder, nulls_last)
    }
}

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for NullSafe<C> {
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        let absent_first = if self.nulls_last {
            Ordering::Greater
        } else {
            Ordering::Less
        };
        match (first, last) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(absent_first),
            (Some(_), None) => Ok(absent_first.reverse()),
            (Some(a), Some(b)) => self.inner.compare(Some(a), Some(b)),
        }
    }
}

/// A comparator built from a closure over present values. Not null-tolerant.
pub struct FnComparator<T: ?Sized, F> {
    compare: F,
    _marker: PhantomData<fn(&T)>,
}

/// Builds a comparator from a closure over present values.
///
/// ```
/// use attrdiff::comparator::{comparing, Comparator};
/// use std::cmp::Ordering;
///
/// let within = comparing(|a: &f64, b: &f64| {
///     if (a - b).abs() <= 1e-4 { Ordering::Equal } else { a.total_cmp(b) }
/// });
/// assert_eq!(within.compare_present(&1.00005, &1.00006).unwrap(), Ordering::Equal);
/// assert!(within.compare(None, Some(&1.0)).is_err());
/// ```
pub fn comparing<T: ?Sized, F>(compare: F) -> FnComparator<T, F>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    FnComparator {
        compare,
        _marker: PhantomData,
    }
}

impl<T: ?Sized, F> Comparator<T> for FnComparator<T, F>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        match (first, last) {
            (Some(a), Some(b)) => Ok((self.compare)(a, b)),
            _ => Err(CompareError::absent(std::any::type_name::<T>())),
        }
    }
}

/// A comparator built from a closure that sees absence itself.
pub struct NullableFn<T: ?Sized, F> {
    compare: F,
    _marker: PhantomData<fn(&T)>,
}

pub fn from_fn<T: ?Sized, F>(compare: F) -> NullableFn<T, F>
where
    F: Fn(Option<&T>, Option<&T>) -> CompareResult + Send + Sync,
{
    NullableFn {
        compare,
        _marker: PhantomData,
    }
}

impl<T: ?Sized, F> Comparator<T> for NullableFn<T, F>
where
    F: Fn(Option<&T>, Option<&T>) -> CompareResult + Send + Sync,
{
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        (self.compare)(first, last)
    }
}

/// Orders composite values by a borrowed key.
pub struct ByKey<T: ?Sized, K: ?Sized, F, C> {
    key: F,
    comparator: C,
    _marker: PhantomData<fn(&T) -> &K>,
}

/// Orders values by the key `key` extracts, using `comparator` on the keys.
/// Absence passes through to `comparator` unchanged.
pub fn by_key<T: ?Sized, K: ?Sized, F, C>(key: F, comparator: C) -> ByKey<T, K, F, C>
where
    F: Fn(&T) -> &K + Send + Sync,
    C: Comparator<K>,
{
    ByKey {
        key,
        comparator,
        _marker: PhantomData,
    }
}

/// Orders values by the natural order of the key `key` extracts.
pub fn comparing_key<T: ?Sized, K: Ord + ?Sized, F>(key: F) -> ByKey<T, K, F, NaturalOrder>
where
    F: Fn(&T) -> &K + Send + Sync,
{
    by_key(key, NaturalOrder)
}

impl<T: ?Sized, K: ?Sized, F, C> Comparator<T> for ByKey<T, K, F, C>
where
    F: Fn(&T) -> &K + Send + Sync,
    C: Comparator<K>,
{
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        let first = first.map(|value| (self.key)(value));
        let last = last.map(|value| (self.key)(value));
        self.comparator.compare(first, last)
    }
}

/// `first`, then `next` on ties.
#[derive(Debug, Clone, Copy)]
pub struct Chain<A, B> {
    first: A,
    next: B,
}

impl<T: ?Sized, A: Comparator<T>, B: Comparator<T>> Comparator<T> for Chain<A, B> {
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        match self.first.compare(first, last)? {
            Ordering::Equal => self.next.compare(first, last),
            decided => Ok(decided),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Reversed<C> {
    inner: C,
}

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    fn compare(&self, first: Option<&T>, last: Option<&T>) -> CompareResult {
        self.inner.compare(first, last).map(Ordering::reverse)
    }
}

/// Runs a typed comparator against dynamically typed attribute values.
///
/// `Value::Null` reaches the wrapped comparator as `None`; a present value of
/// the wrong kind fails with [`CompareError::IncomparableValue`].
pub struct TypedComparator<V: ?Sized, C> {
    inner: C,
    _marker: PhantomData<fn(&V)>,
}

impl<V: AttributeValue + ?Sized, C: Comparator<V>> TypedComparator<V, C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    fn extract<'a>(&self, value: Option<&'a Value>) -> Result<Option<&'a V>, CompareError> {
        match value.and_then(Value::present) {
            None => Ok(None),
            Some(present) => V::from_value(present)
                .map(Some)
                .ok_or_else(|| CompareError::incomparable(V::kind_name(), present.type_name())),
        }
    }
}

impl<V: AttributeValue + ?Sized, C: Comparator<V>> Comparator<Value> for TypedComparator<V, C> {
    fn compare(&self, first: Option<&Value>, last: Option<&Value>) -> CompareResult {
        let first = self.extract(first)?;
        let last = self.extract(last)?;
        self.inner.compare(first, last)
    }
}

/// Boxes a typed comparator as a comparator over attribute values.
pub fn typed<V, C>(comparator: C) -> Arc<dyn Comparator<Value>>
where
    V: AttributeValue + ?Sized + 'static,
    C: Comparator<V> + 'static,
{
    Arc::new(TypedComparator::<V, C>::new(comparator))
}
