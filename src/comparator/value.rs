//! Natural order over dynamic attribute values.

use super::map::MapEntryComparator;
use super::sequence::lexicographic;
use super::{from_fn, Comparator, FloatOrder, NaturalOrder, NullSafe};
use crate::error::{CompareError, CompareResult};
use crate::value::{Record, Value};
use bigdecimal::BigDecimal;
use std::cmp::Ordering;

/// The last-resort comparator for attributes of any kind.
///
/// Values compare only against values of the same kind; anything else is an
/// [`CompareError::IncomparableValue`]. `Long` and `Decimal` count as one
/// numeric kind. Lists compare lexicographically and
/// fail on an element that is `Null` on one side only. Maps compare entry by
/// entry. Records of the same type compare field by field, with `Null` fields
/// sorting first.
///
/// Two absent operands are equal; a single absent operand is an error, so
/// callers that expect absence wrap this in [`NullSafe`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueOrder;

impl Comparator<Value> for ValueOrder {
    fn compare(&self, first: Option<&Value>, last: Option<&Value>) -> CompareResult {
        match (first.and_then(Value::present), last.and_then(Value::present)) {
            (None, None) => Ok(Ordering::Equal),
            (Some(a), Some(b)) => natural(a, b),
            (Some(present), None) | (None, Some(present)) => {
                Err(CompareError::absent(present.type_name()))
            }
        }
    }
}

fn natural(first: &Value, last: &Value) -> CompareResult {
    use Value::*;

    match (first, last) {
        (Bool(a), Bool(b)) => Ok(a.cmp(b)),
        (Byte(a), Byte(b)) => Ok(a.cmp(b)),
        (Short(a), Short(b)) => Ok(a.cmp(b)),
        (Char(a), Char(b)) => Ok(a.cmp(b)),
        (Int(a), Int(b)) => Ok(a.cmp(b)),
        (Long(a), Long(b)) => Ok(a.cmp(b)),
        (Float(a), Float(b)) => Ok(a.total_cmp(b)),
        (Double(a), Double(b)) => Ok(a.total_cmp(b)),
        (String(a), String(b)) => Ok(a.cmp(b)),
        (Decimal(a), Decimal(b)) => Ok(a.cmp(b)),
        // Integers past i64::MAX arrive as decimals from JSON.
        (Long(a), Decimal(b)) => Ok(BigDecimal::from(*a).cmp(b)),
        (Decimal(a), Long(b)) => Ok(a.cmp(&BigDecimal::from(*b))),
        (Locale(a), Locale(b)) => Ok(a.cmp(b)),
        (Timestamp(a), Timestamp(b)) => Ok(a.cmp(b)),
        // Vec ordering is already lexicographic with the shorter prefix first.
        (BoolArray(a), BoolArray(b)) => Ok(a.cmp(b)),
        (ByteArray(a), ByteArray(b)) => Ok(a.cmp(b)),
        (ShortArray(a), ShortArray(b)) => Ok(a.cmp(b)),
        (CharArray(a), CharArray(b)) => Ok(a.cmp(b)),
        (IntArray(a), IntArray(b)) => Ok(a.cmp(b)),
        (LongArray(a), LongArray(b)) => Ok(a.cmp(b)),
        (FloatArray(a), FloatArray(b)) => {
            lexicographic(a.iter().map(Some), b.iter().map(Some), &FloatOrder)
        }
        (DoubleArray(a), DoubleArray(b)) => {
            lexicographic(a.iter().map(Some), b.iter().map(Some), &FloatOrder)
        }
        (List(a), List(b)) => lexicographic(
            a.iter().map(Value::present),
            b.iter().map(Value::present),
            &ValueOrder,
        ),
        (Map(a), Map(b)) => {
            let entries = MapEntryComparator::new(ValueOrder, from_fn(nulls_first));
            lexicographic(a.iter().map(Some), b.iter().map(Some), &entries)
        }
        (Value::Record(a), Value::Record(b)) => records(a, b),
        _ => Err(CompareError::incomparable(
            first.type_name(),
            last.type_name(),
        )),
    }
}

/// Nested values: `Null` sorts before anything present.
fn nulls_first(first: Option<&Value>, last: Option<&Value>) -> CompareResult {
    NullSafe::new(ValueOrder, false).compare(
        first.and_then(Value::present),
        last.and_then(Value::present),
    )
}

fn records(first: &Record, last: &Record) -> CompareResult {
    if first.type_name() != last.type_name() {
        return Err(CompareError::incomparable(
            first.type_name(),
            last.type_name(),
        ));
    }
    let fields = MapEntryComparator::new(NaturalOrder, from_fn(nulls_first));
    lexicographic(
        first.fields().iter().map(Some),
        last.fields().iter().map(Some),
        &fields,
    )
}
