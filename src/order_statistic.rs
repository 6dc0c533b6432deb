/// A zero-based position in the sorted order of a map's keys.
///
/// Indexing a [`BstMap`](crate::BstMap) by `Rank(i)` yields the value whose key
/// [`select`](crate::BstMap::select) would return for `i`.
///
/// # Examples
///
/// ```
/// use ordered_bst::{BstMap, Rank};
///
/// let mut map = BstMap::new();
/// map.add("b", 20);
/// map.add("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// assert_eq!(map[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
