//! Constructors for null-safe comparators, one per value kind.
//!
//! Every constructor takes a `nulls_last` flag: with `false` an absent value
//! sorts before a present one, with `true` after it. Two absent values are
//! always equal.
//!
//! # Examples
//!
//! ```
//! use attrdiff::comparator::{library, Comparator};
//! use std::cmp::Ordering;
//!
//! let cmp = library::int_array(false);
//! let shorter: &[i32] = &[3, 6, 2, 6];
//! let longer: &[i32] = &[3, 6, 2, 6, 7];
//! assert_eq!(cmp.compare_present(shorter, longer).unwrap(), Ordering::Less);
//! assert_eq!(cmp.compare(None, Some(longer)).unwrap(), Ordering::Less);
//! ```

use super::map::{MapEntryComparator, MapValueComparator};
use super::sequence::{IterableComparator, LengthFirst, Lexicographic, ObjectArrayComparator};
use super::{by_key, typed, Comparator, FloatOrder, NaturalOrder, NullSafe, ValueOrder};
use crate::value::{Locale, Value, ValueKind};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use std::hash::Hash;
use std::sync::Arc;

/// Wraps `comparator` with the given absence policy.
pub fn null_safe<T: ?Sized, C: Comparator<T>>(comparator: C, nulls_last: bool) -> NullSafe<C> {
    NullSafe::new(comparator, nulls_last)
}

/// Natural order of any `Ord` type, null-safe.
pub fn natural<T: Ord + ?Sized>(nulls_last: bool) -> impl Comparator<T> {
    NullSafe::new(NaturalOrder, nulls_last)
}

pub fn booleans(nulls_last: bool) -> impl Comparator<bool> {
    natural(nulls_last)
}

pub fn bytes(nulls_last: bool) -> impl Comparator<i8> {
    natural(nulls_last)
}

pub fn shorts(nulls_last: bool) -> impl Comparator<i16> {
    natural(nulls_last)
}

pub fn chars(nulls_last: bool) -> impl Comparator<char> {
    natural(nulls_last)
}

pub fn ints(nulls_last: bool) -> impl Comparator<i32> {
    natural(nulls_last)
}

pub fn longs(nulls_last: bool) -> impl Comparator<i64> {
    natural(nulls_last)
}

pub fn floats(nulls_last: bool) -> impl Comparator<f32> {
    NullSafe::new(FloatOrder, nulls_last)
}

pub fn doubles(nulls_last: bool) -> impl Comparator<f64> {
    NullSafe::new(FloatOrder, nulls_last)
}

pub fn strings(nulls_last: bool) -> impl Comparator<String> {
    natural(nulls_last)
}

/// Strings ordered by a custom comparator over `str`.
pub fn strings_by<C: Comparator<str>>(comparator: C, nulls_last: bool) -> impl Comparator<String> {
    NullSafe::new(by_key(String::as_str, comparator), nulls_last)
}

/// Locales ordered by their language tag.
pub fn locales(nulls_last: bool) -> impl Comparator<Locale> {
    natural(nulls_last)
}

pub fn decimals(nulls_last: bool) -> impl Comparator<BigDecimal> {
    natural(nulls_last)
}

pub fn timestamps(nulls_last: bool) -> impl Comparator<DateTime<Utc>> {
    natural(nulls_last)
}

/// Boxed values of any `Ord` type.
pub fn objects<T: Ord + Send + Sync>(nulls_last: bool) -> impl Comparator<T> {
    natural(nulls_last)
}

pub fn bool_array(nulls_last: bool) -> impl Comparator<[bool]> {
    NullSafe::new(Lexicographic::new(NaturalOrder), nulls_last)
}

pub fn byte_array(nulls_last: bool) -> impl Comparator<[i8]> {
    NullSafe::new(Lexicographic::new(NaturalOrder), nulls_last)
}

pub fn short_array(nulls_last: bool) -> impl Comparator<[i16]> {
    NullSafe::new(Lexicographic::new(NaturalOrder), nulls_last)
}

pub fn char_array(nulls_last: bool) -> impl Comparator<[char]> {
    NullSafe::new(Lexicographic::new(NaturalOrder), nulls_last)
}

pub fn int_array(nulls_last: bool) -> impl Comparator<[i32]> {
    NullSafe::new(Lexicographic::new(NaturalOrder), nulls_last)
}

pub fn long_array(nulls_last: bool) -> impl Comparator<[i64]> {
    NullSafe::new(Lexicographic::new(NaturalOrder), nulls_last)
}

pub fn float_array(nulls_last: bool) -> impl Comparator<[f32]> {
    NullSafe::new(Lexicographic::new(FloatOrder), nulls_last)
}

pub fn double_array(nulls_last: bool) -> impl Comparator<[f64]> {
    NullSafe::new(Lexicographic::new(FloatOrder), nulls_last)
}

/// Arrays ordered by a custom element comparator.
pub fn array<T, C: Comparator<T>>(element: C, nulls_last: bool) -> impl Comparator<[T]> {
    NullSafe::new(Lexicographic::new(element), nulls_last)
}

/// Arrays ordered by length first, then element by element.
pub fn length_first_array<T, C: Comparator<T>>(
    element: C,
    nulls_last: bool,
) -> impl Comparator<[T]> {
    NullSafe::new(LengthFirst::new(element), nulls_last)
}

/// Object arrays whose elements may be absent.
///
/// Element absence is handed to `element`: a comparator that is not
/// null-tolerant fails when only one side holds an absent element.
pub fn object_array<T, C: Comparator<T>>(
    element: C,
    nulls_last: bool,
) -> impl Comparator<[Option<T>]> {
    NullSafe::new(ObjectArrayComparator::new(element), nulls_last)
}

/// Lists of attribute values; `Value::Null` elements count as absent.
pub fn list<C: Comparator<Value>>(element: C, nulls_last: bool) -> impl Comparator<[Value]> {
    NullSafe::new(ObjectArrayComparator::new(element), nulls_last)
}

/// Any collection iterable by reference, such as `Vec<T>` or `BTreeSet<T>`.
pub fn iterable<T, I, C>(element: C, nulls_last: bool) -> impl Comparator<I>
where
    I: ?Sized,
    for<'a> &'a I: IntoIterator<Item = &'a T>,
    C: Comparator<T>,
{
    NullSafe::new(IterableComparator::<T, C>::new(element), nulls_last)
}

/// Keys ordered by the ranking value `ranking` maps them to.
pub fn map_values<K, R>(ranking: impl IntoIterator<Item = (K, R)>) -> MapValueComparator<K, R>
where
    K: Eq + Hash,
{
    MapValueComparator::new(ranking)
}

/// Key/value pairs ordered by key, then value.
pub fn map_entries() -> MapEntryComparator {
    MapEntryComparator::natural()
}

/// The default comparator for an attribute of the given kind.
///
/// Kinds without a dedicated comparator fall back to [`ValueOrder`].
pub fn for_kind(kind: &ValueKind, nulls_last: bool) -> Arc<dyn Comparator<Value>> {
    match kind {
        ValueKind::Bool => typed::<bool, _>(booleans(nulls_last)),
        ValueKind::Byte => typed::<i8, _>(bytes(nulls_last)),
        ValueKind::Short => typed::<i16, _>(shorts(nulls_last)),
        ValueKind::Char => typed::<char, _>(chars(nulls_last)),
        ValueKind::Int => typed::<i32, _>(ints(nulls_last)),
        ValueKind::Long => typed::<i64, _>(longs(nulls_last)),
        ValueKind::Float => typed::<f32, _>(floats(nulls_last)),
        ValueKind::Double => typed::<f64, _>(doubles(nulls_last)),
        ValueKind::String => typed::<String, _>(strings(nulls_last)),
        ValueKind::Decimal => typed::<BigDecimal, _>(decimals(nulls_last)),
        ValueKind::Locale => typed::<Locale, _>(locales(nulls_last)),
        ValueKind::Timestamp => typed::<DateTime<Utc>, _>(timestamps(nulls_last)),
        ValueKind::BoolArray => typed::<[bool], _>(bool_array(nulls_last)),
        ValueKind::ByteArray => typed::<[i8], _>(byte_array(nulls_last)),
        ValueKind::ShortArray => typed::<[i16], _>(short_array(nulls_last)),
        ValueKind::CharArray => typed::<[char], _>(char_array(nulls_last)),
        ValueKind::IntArray => typed::<[i32], _>(int_array(nulls_last)),
        ValueKind::LongArray => typed::<[i64], _>(long_array(nulls_last)),
        ValueKind::FloatArray => typed::<[f32], _>(float_array(nulls_last)),
        ValueKind::DoubleArray => typed::<[f64], _>(double_array(nulls_last)),
        ValueKind::List => typed::<[Value], _>(list(ValueOrder, nulls_last)),
        ValueKind::Map | ValueKind::Record(_) | ValueKind::Any => fallback(nulls_last),
    }
}

/// Natural order over attribute values of any kind, null-safe.
pub fn fallback(nulls_last: bool) -> Arc<dyn Comparator<Value>> {
    typed::<Value, _>(NullSafe::new(ValueOrder, nulls_last))
}
