//! Map-derived comparators.

use super::{Comparator, NaturalOrder};
use crate::error::{CompareError, CompareResult};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Orders keys by the ranking value a backing map assigns them.
///
/// The map is expected to be one-to-one. A key missing from the map is a
/// lookup failure ([`CompareError::KeyNotFound`]), never a null ranking.
///
/// # Examples
///
/// ```
/// use attrdiff::comparator::{Comparator, MapValueComparator};
/// use std::cmp::Ordering;
///
/// let priority = MapValueComparator::new([("low", 1), ("high", 9)]);
/// assert_eq!(priority.compare_present(&"high", &"low").unwrap(), Ordering::Greater);
/// assert!(priority.compare_present(&"urgent", &"low").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MapValueComparator<K, R, C = NaturalOrder> {
    ranking: HashMap<K, R>,
    comparator: C,
}

impl<K: Eq + Hash, R> MapValueComparator<K, R, NaturalOrder> {
    pub fn new(ranking: impl IntoIterator<Item = (K, R)>) -> Self {
        Self::with_comparator(ranking, NaturalOrder)
    }
}

impl<K: Eq + Hash, R, C> MapValueComparator<K, R, C> {
    pub fn with_comparator(ranking: impl IntoIterator<Item = (K, R)>, comparator: C) -> Self {
        Self {
            ranking: ranking.into_iter().collect(),
            comparator,
        }
    }

    fn rank(&self, key: &K) -> Result<&R, CompareError>
    where
        K: Debug,
    {
        self.ranking
            .get(key)
            .ok_or_else(|| CompareError::key_not_found(key))
    }
}

impl<K, R, C> Comparator<K> for MapValueComparator<K, R, C>
where
    K: Eq + Hash + Debug + Send + Sync,
    R: Send + Sync,
    C: Comparator<R>,
{
    fn compare(&self, first: Option<&K>, last: Option<&K>) -> CompareResult {
        match (first, last) {
            (Some(a), Some(b)) => {
                let a = self.rank(a)?;
                let b = self.rank(b)?;
                self.comparator.compare(Some(a), Some(b))
            }
            _ => Err(CompareError::absent("map key")),
        }
    }
}

/// Orders key/value pairs by key, then by value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapEntryComparator<KC = NaturalOrder, VC = NaturalOrder> {
    key: KC,
    value: VC,
}

impl MapEntryComparator {
    pub fn natural() -> Self {
        Self::new(NaturalOrder, NaturalOrder)
    }
}

impl<KC, VC> MapEntryComparator<KC, VC> {
    pub fn new(key: KC, value: VC) -> Self {
        Self { key, value }
    }
}

impl<K, V, KC, VC> Comparator<(K, V)> for MapEntryComparator<KC, VC>
where
    KC: Comparator<K>,
    VC: Comparator<V>,
{
    fn compare(&self, first: Option<&(K, V)>, last: Option<&(K, V)>) -> CompareResult {
        let (a, b) = match (first, last) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(CompareError::absent("map entry")),
        };
        match self.key.compare(Some(&a.0), Some(&b.0))? {
            Ordering::Equal => self.value.compare(Some(&a.1), Some(&b.1)),
            decided => Ok(decided),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking() -> MapValueComparator<String, i32> {
        MapValueComparator::new(
            [("aa", 1), ("ab", 12), ("sd", 37), ("ww", 56)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v)),
        )
    }

    #[test]
    fn test_ranks_by_mapped_value() {
        let cmp = ranking();
        let result = cmp
            .compare_present(&"ww".to_string(), &"aa".to_string())
            .unwrap();
        assert_eq!(result, Ordering::Greater);
    }

    #[test]
    fn test_missing_key_is_lookup_failure() {
        let cmp = ranking();
        let err = cmp
            .compare_present(&"w".to_string(), &"aa".to_string())
            .unwrap_err();
        assert!(matches!(err, CompareError::KeyNotFound { .. }));
    }

    #[test]
    fn test_entry_key_decides_before_value() {
        let cmp = MapEntryComparator::natural();
        let first = ("aa".to_string(), 56);
        let last = ("ww".to_string(), 1);
        assert_eq!(cmp.compare_present(&first, &last).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_entry_absent_operand_fails() {
        let cmp = MapEntryComparator::natural();
        let last = ("ww".to_string(), 1);
        assert!(cmp.compare(None, Some(&last)).is_err());
    }
}
