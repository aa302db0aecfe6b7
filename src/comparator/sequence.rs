//! Lexicographic comparators over arrays, slices and iterables.
//!
//! Sequences are compared element by element up to the length of the shorter
//! one; when that shared prefix is equal the shorter sequence sorts first.
//! Two absent elements are equal. Any other pair is handed to the element
//! comparator, so a comparator that is not null-tolerant fails on an element
//! that is absent on one side only. Absence of a whole sequence is not handled
//! here; wrap these in [`NullSafe`](super::NullSafe) for that.

use super::Comparator;
use crate::error::{CompareError, CompareResult};
use crate::value::Value;
use std::cmp::Ordering;
use std::marker::PhantomData;

/// Compares two sequences of possibly-absent elements lexicographically.
pub fn lexicographic<'a, T, C, I, J>(first: I, last: J, element: &C) -> CompareResult
where
    T: ?Sized + 'a,
    C: Comparator<T> + ?Sized,
    I: IntoIterator<Item = Option<&'a T>>,
    J: IntoIterator<Item = Option<&'a T>>,
{
    let mut first = first.into_iter();
    let mut last = last.into_iter();

    loop {
        match (first.next(), last.next()) {
            (None, None) => return Ok(Ordering::Equal),
            (None, Some(_)) => return Ok(Ordering::Less),
            (Some(_), None) => return Ok(Ordering::Greater),
            (Some(a), Some(b)) => {
                let ordering = match (a, b) {
                    (None, None) => Ordering::Equal,
                    _ => element.compare(a, b)?,
                };
                if ordering != Ordering::Equal {
                    return Ok(ordering);
                }
            }
        }
    }
}

fn present_pair<'a, T: ?Sized>(
    first: Option<&'a T>,
    last: Option<&'a T>,
    expected: &str,
) -> Result<(&'a T, &'a T), CompareError> {
    match (first, last) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(CompareError::absent(expected)),
    }
}

/// Lexicographic order over slices of present elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicographic<C> {
    element: C,
}

impl<C> Lexicographic<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<T, C: Comparator<T>> Comparator<[T]> for Lexicographic<C> {
    fn compare(&self, first: Option<&[T]>, last: Option<&[T]>) -> CompareResult {
        let (a, b) = present_pair(first, last, "array")?;
        lexicographic(a.iter().map(Some), b.iter().map(Some), &self.element)
    }
}

/// Orders slices by length first, then lexicographically.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthFirst<C> {
    element: C,
}

impl<C> LengthFirst<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<T, C: Comparator<T>> Comparator<[T]> for LengthFirst<C> {
    fn compare(&self, first: Option<&[T]>, last: Option<&[T]>) -> CompareResult {
        let (a, b) = present_pair(first, last, "array")?;
        match a.len().cmp(&b.len()) {
            Ordering::Equal => lexicographic(a.iter().map(Some), b.iter().map(Some), &self.element),
            decided => Ok(decided),
        }
    }
}

/// Lexicographic order over object arrays, whose elements may be absent.
///
/// Implemented for `[Option<T>]` and for `[Value]`, where `Value::Null`
/// elements count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectArrayComparator<C> {
    element: C,
}

impl<C> ObjectArrayComparator<C> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<T, C: Comparator<T>> Comparator<[Option<T>]> for ObjectArrayComparator<C> {
    fn compare(&self, first: Option<&[Option<T>]>, last: Option<&[Option<T>]>) -> CompareResult {
        let (a, b) = present_pair(first, last, "object array")?;
        lexicographic(
            a.iter().map(Option::as_ref),
            b.iter().map(Option::as_ref),
            &self.element,
        )
    }
}

impl<C: Comparator<Value>> Comparator<[Value]> for ObjectArrayComparator<C> {
    fn compare(&self, first: Option<&[Value]>, last: Option<&[Value]>) -> CompareResult {
        let (a, b) = present_pair(first, last, "list")?;
        lexicographic(
            a.iter().map(Value::present),
            b.iter().map(Value::present),
            &self.element,
        )
    }
}

/// Lexicographic order over any collection iterable by reference, such as
/// `Vec<T>`, `VecDeque<T>` or `BTreeSet<T>`.
pub struct IterableComparator<T, C> {
    element: C,
    _marker: PhantomData<fn(&T)>,
}

impl<T, C> IterableComparator<T, C> {
    pub fn new(element: C) -> Self {
        Self {
            element,
            _marker: PhantomData,
        }
    }
}

impl<T, C, I> Comparator<I> for IterableComparator<T, C>
where
    I: ?Sized,
    for<'a> &'a I: IntoIterator<Item = &'a T>,
    C: Comparator<T>,
{
    fn compare(&self, first: Option<&I>, last: Option<&I>) -> CompareResult {
        let (a, b) = present_pair(first, last, "iterable")?;
        lexicographic(
            a.into_iter().map(Some),
            b.into_iter().map(Some),
            &self.element,
        )
    }
}
