use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::error::TreeError;
use crate::raw::RawBstMap;

mod order_statistic;

pub use crate::Rank;

/// An ordered map based on an unbalanced [binary search tree].
///
/// Given a key type with a [total order], the map keeps its entries arranged so that every
/// key in a node's left subtree is smaller than the node's key and every key in its right
/// subtree is larger. Each node also caches the number of entries below it, which is what
/// makes [`rank`](BstMap::rank) and [`select`](BstMap::select) cost O(depth) instead of O(n).
///
/// The tree never rebalances. Its depth depends on insertion order: random orders give
/// O(log n) on average, sorted orders give a list and O(n) operations.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. The behavior
/// resulting from such a logic error is not specified, but will be encapsulated to the `BstMap`
/// that observed the logic error and not result in undefined behavior.
///
/// # Stack depth
///
/// [`add`](BstMap::add), [`delete`](BstMap::delete), [`delete_min`](BstMap::delete_min) and
/// [`delete_max`](BstMap::delete_max) recurse once per level of the search path, so their stack
/// use grows with the depth of the tree. A list-shaped tree, such as one built from sorted keys,
/// can overflow a small thread stack: an unoptimized build on a 2 MiB thread fails somewhere past
/// 10 000 sorted insertions. Shuffle keys before bulk insertion, or run on a thread with a larger
/// stack, when the input may be ordered.
///
/// Lookups, order statistics, `clone` and `drop` use loops or an explicit heap stack and
/// handle trees of any depth.
///
/// # Examples
///
/// ```
/// use ordered_bst::BstMap;
///
/// let mut table = BstMap::new();
/// table.add('f', "f");
/// table.add('g', "g");
/// table.add('k', "k");
///
/// assert_eq!(table.get(&'f'), Some(&"f"));
/// assert_eq!(table.floor(&'i'), Some(&"g"));
/// assert_eq!(table.select(2), Some(&'k'));
///
/// table.delete_min().unwrap();
/// assert_eq!(table.get(&'f'), None);
/// assert_eq!(table.size(), 2);
/// ```
///
/// A `BstMap` with a known list of items can be initialized from an array:
///
/// ```
/// use ordered_bst::BstMap;
///
/// let solar_distance = BstMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.size(), 4);
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
pub struct BstMap<K, V> {
    raw: RawBstMap<K, V>,
}

impl<K, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.add(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        BstMap { raw: RawBstMap::new() }
    }

    /// Returns the number of entries in the map.
    ///
    /// This is the root's cached subtree size; no traversal happens.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert_eq!(a.size(), 0);
    /// a.add(1, "a");
    /// assert_eq!(a.size(), 1);
    /// ```
    #[must_use]
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert!(a.is_empty());
    /// a.add(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.add(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// An empty map has height 0. Since the tree is not balanced, the height ranges from
    /// about log2(n) to n depending on insertion order.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let balanced = BstMap::from([(2, ()), (1, ()), (3, ())]);
    /// assert_eq!(balanced.height(), 2);
    ///
    /// let skewed = BstMap::from([(1, ()), (2, ()), (3, ())]);
    /// assert_eq!(skewed.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the entry with the smallest key, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the entry with the largest key, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.last_key_value(), Some((&2, &"b")));
    /// ```
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Removes the entry with the smallest key and returns it.
    ///
    /// Every ancestor of the removed node has its cached size refreshed on the way back up.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::{BstMap, TreeError};
    ///
    /// let mut map = BstMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.delete_min(), Ok((1, "a")));
    /// assert_eq!(map.delete_min(), Ok((2, "b")));
    /// assert_eq!(map.delete_min(), Err(TreeError::EmptyTree));
    /// ```
    pub fn delete_min(&mut self) -> Result<(K, V), TreeError> {
        self.raw.pop_first().ok_or(TreeError::EmptyTree)
    }

    /// Removes the entry with the largest key and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyTree`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::{BstMap, TreeError};
    ///
    /// let mut map = BstMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.delete_max(), Ok((2, "b")));
    /// assert_eq!(map.size(), 1);
    /// map.delete_max().unwrap();
    /// assert_eq!(map.delete_max(), Err(TreeError::EmptyTree));
    /// ```
    pub fn delete_max(&mut self) -> Result<(K, V), TreeError> {
        self.raw.pop_last().ok_or(TreeError::EmptyTree)
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.add(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.add(1, "a");
    /// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(map.get_key_value(&2), None);
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.add(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.add(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).is_some()
    }

    /// Adds a key-value pair to the map.
    ///
    /// If the map did not have this key present, a new leaf is attached and `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place and the old value is
    /// returned. The key is not updated and the shape of the tree does not change.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.add(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.add(37, "b");
    /// assert_eq!(map.add(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map. Removing an absent key leaves the map unchanged.
    ///
    /// A node with two children is replaced by its in-order successor (Hibbard deletion).
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.add(1, "a");
    /// assert_eq!(map.delete(&1), Some("a"));
    /// assert_eq!(map.delete(&1), None);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.add(1, "a");
    /// assert_eq!(map.delete_entry(&1), Some((1, "a")));
    /// assert_eq!(map.delete_entry(&1), None);
    /// ```
    pub fn delete_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }
}

impl<K: Clone, V: Clone> Clone for BstMap<K, V> {
    fn clone(&self) -> Self {
        BstMap { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BstMap<K, V> {
    /// Two maps are equal when they hold the same entries, whatever their shapes.
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.raw.in_order().eq(other.raw.in_order())
    }
}

impl<K: Eq, V: Eq> Eq for BstMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.raw.in_order()).finish()
    }
}

impl<K, V> Default for BstMap<K, V> {
    fn default() -> Self {
        BstMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl<K, Q, V> Index<&Q> for BstMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `BstMap`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    /// Builds the map by adding the entries in array order, which fixes the tree's shape.
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn debug_lists_entries_in_key_order() {
        let map = BstMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b', 3: 'c'}");
    }

    #[test]
    fn equality_ignores_shape() {
        let a = BstMap::from([(1, ()), (2, ()), (3, ())]);
        let b = BstMap::from([(2, ()), (3, ()), (1, ())]);
        assert_ne!(a.height(), b.height());
        assert_eq!(a, b);

        let c = BstMap::from([(1, ()), (2, ())]);
        assert_ne!(a, c);
    }

    #[test]
    fn borrowed_lookups() {
        let mut map: BstMap<String, usize> = BstMap::new();
        map.add(String::from("kiwi"), 4);
        map.add(String::from("fig"), 3);

        assert_eq!(map.get("fig"), Some(&3));
        assert_eq!(map["kiwi"], 4);
        assert_eq!(map.delete("fig"), Some(3));
        assert!(!map.contains_key("fig"));
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn index_missing_key_panics() {
        let map: BstMap<i32, i32> = BstMap::new();
        let _value = map[&0];
    }

    #[test]
    fn clone_is_independent() {
        let mut original = BstMap::from([(1, 10), (2, 20)]);
        let copy = original.clone();
        original.add(3, 30);
        *original.get_mut(&1).unwrap() = 11;

        assert_eq!(copy.size(), 2);
        assert_eq!(copy.get(&1), Some(&10));
        original.raw.validate_invariants();
        copy.raw.validate_invariants();
    }
}
