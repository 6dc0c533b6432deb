use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::BstMap;
use crate::Rank;
use crate::error::TreeError;

impl<K: Ord, V> BstMap<K, V> {
    /// Returns the value of the greatest key less than or equal to `key`.
    ///
    /// Returns `None` if every key in the map is greater than `key`.
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
    /// let map = BstMap::from([('f', 1), ('g', 2), ('k', 3)]);
    /// assert_eq!(map.floor(&'i'), Some(&2));
    /// assert_eq!(map.floor(&'f'), Some(&1));
    /// assert_eq!(map.floor(&'a'), None);
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key).map(|(_, v)| v)
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let map = BstMap::from([(10, "a"), (20, "b")]);
    /// assert_eq!(map.floor_key_value(&15), Some((&10, &"a")));
    /// ```
    pub fn floor_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key)
    }

    /// Returns the value of the smallest key greater than or equal to `key`.
    ///
    /// Returns `None` if every key in the map is less than `key`.
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
    /// let map = BstMap::from([('f', 1), ('g', 2), ('k', 3)]);
    /// assert_eq!(map.ceiling(&'h'), Some(&3));
    /// assert_eq!(map.ceiling(&'k'), Some(&3));
    /// assert_eq!(map.ceiling(&'z'), None);
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key).map(|(_, v)| v)
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let map = BstMap::from([(10, "a"), (20, "b")]);
    /// assert_eq!(map.ceiling_key_value(&15), Some((&20, &"b")));
    /// ```
    pub fn ceiling_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key)
    }

    /// Returns the number of keys in the map strictly less than `key`.
    ///
    /// `key` need not be present: the result is then the position at which it would be
    /// added. For a present key this is its zero-based position, so
    /// `map.select(map.rank(&k)) == Some(&k)`.
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
    /// let map = BstMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank(&10), 0);
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }
}

impl<K, V> BstMap<K, V> {
    /// Returns the key with exactly `index` smaller keys in the map.
    ///
    /// The index is zero-based. Returns `None` if `index` is out of bounds, which includes
    /// every index on an empty map.
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
    /// let map = BstMap::from([('f', 1), ('g', 2), ('k', 3)]);
    /// assert_eq!(map.select(1), Some(&'g'));
    /// assert_eq!(map.select(2), Some(&'k'));
    /// assert_eq!(map.select(3), None);
    /// ```
    #[must_use]
    pub fn select(&self, index: usize) -> Option<&K> {
        self.raw.get_by_rank(index).map(|(k, _)| k)
    }

    /// Like [`select`](BstMap::select), but reports why no key was found.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyTree`] on an empty map and
    /// [`TreeError::IndexOutOfRange`] when `index >= self.size()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::{BstMap, TreeError};
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.try_select(0), Err(TreeError::EmptyTree));
    ///
    /// map.add("a", 1);
    /// assert_eq!(map.try_select(0), Ok(&"a"));
    /// assert_eq!(map.try_select(1), Err(TreeError::IndexOutOfRange { index: 1, size: 1 }));
    /// ```
    pub fn try_select(&self, index: usize) -> Result<&K, TreeError> {
        if self.is_empty() {
            return Err(TreeError::EmptyTree);
        }
        self.select(index).ok_or(TreeError::IndexOutOfRange {
            index,
            size: self.size(),
        })
    }

    /// Returns the entry at position `index` in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let map = BstMap::from([("a", 10), ("c", 30), ("b", 20)]);
    /// assert_eq!(map.select_key_value(1), Some((&"b", &20)));
    /// assert!(map.select_key_value(3).is_none());
    /// ```
    #[must_use]
    pub fn select_key_value(&self, index: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(index)
    }

    /// Returns the key and a mutable reference to the value at position `index`
    /// in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::BstMap;
    ///
    /// let mut map = BstMap::from([(10, "a"), (5, "b")]);
    /// if let Some((key, value)) = map.select_key_value_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn select_key_value_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        self.raw.get_by_rank_mut(index)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<K, V> Index<Rank> for BstMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select_key_value(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use ordered_bst::{BstMap, Rank};
///
/// let mut map = BstMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for BstMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.select_key_value_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
