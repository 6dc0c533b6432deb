use alloc::boxed::Box;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use smallvec::SmallVec;

use super::node::{Link, Node};

/// Explicit stack for the iterative walks. Spills to the heap only for deep trees.
type Stack<T> = SmallVec<[T; 32]>;

/// The core BST implementation backing `BstMap`.
///
/// Mutations recurse along the search path: each level takes ownership of a child link,
/// hands it to the recursive call and re-attaches whatever subtree comes back before
/// recomputing its own count. Read-only queries are plain loops.
pub(crate) struct RawBstMap<K, V> {
    /// Root of the tree, if the tree is non-empty.
    root: Link<K, V>,
}

impl<K, V> RawBstMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        Node::size(&self.root)
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(size = self.len(), "clear");

        drop_subtree(self.root.take());
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut pending: Stack<(&Node<K, V>, usize)> = self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        let mut height = 0;

        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            pending.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            pending.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Returns an in-order walk over the entries.
    pub(crate) fn in_order(&self) -> InOrder<'_, K, V> {
        InOrder::new(self.root.as_deref())
    }

    /// Returns the entry with the smallest key.
    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Removes and returns the entry with the smallest key.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (rest, min) = Self::detach_min(root);
        self.root = rest;

        #[cfg(feature = "tracing")]
        tracing::trace!(size = self.len(), "delete_min");

        Some(min.into_parts().0)
    }

    /// Removes and returns the entry with the largest key.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (rest, max) = Self::detach_max(root);
        self.root = rest;

        #[cfg(feature = "tracing")]
        tracing::trace!(size = self.len(), "delete_max");

        Some(max.into_parts().0)
    }

    /// Splices the leftmost node out of `node`'s subtree.
    ///
    /// Returns the remaining subtree and the detached node, which comes back childless with a
    /// count of one.
    fn detach_min(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
        match node.left.take() {
            None => {
                let rest = node.right.take();
                node.update_count();
                (rest, node)
            }
            Some(left) => {
                let (rest, min) = Self::detach_min(left);
                node.left = rest;
                node.update_count();
                (Some(node), min)
            }
        }
    }

    /// Splices the rightmost node out of `node`'s subtree. Mirror of [`Self::detach_min`].
    fn detach_max(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
        match node.right.take() {
            None => {
                let rest = node.left.take();
                node.update_count();
                (rest, node)
            }
            Some(right) => {
                let (rest, max) = Self::detach_max(right);
                node.right = rest;
                node.update_count();
                (Some(node), max)
            }
        }
    }

    /// Gets an element by its rank (0-indexed position in sorted order).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        if rank >= self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left_size = node.left_size();
            match remaining.cmp(&left_size) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = node.right.as_deref();
                }
            }
        }

        panic!("get_by_rank: tree size invariant violated - rank {rank} not found (tree size: {})", self.len());
    }

    /// Gets a mutable element by its rank.
    pub(crate) fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let len = self.len();
        if rank >= len {
            return None;
        }

        let mut remaining = rank;
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            let left_size = node.left_size();
            match remaining.cmp(&left_size) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Equal => return Some((&node.key, &mut node.value)),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = node.right.as_deref_mut();
                }
            }
        }

        panic!("get_by_rank_mut: tree size invariant violated - rank {rank} not found (tree size: {len})");
    }
}

impl<K: Ord, V> RawBstMap<K, V> {
    /// Searches for a key and returns its node if found.
    fn search<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|node| &node.value)
    }

    /// Returns the key-value pair corresponding to the key.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|node| (&node.key, &node.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present; the stored key is kept.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        self.root = Some(Self::insert_at(self.root.take(), key, value, &mut replaced));
        replaced
    }

    fn insert_at(link: Link<K, V>, key: K, value: V, replaced: &mut Option<V>) -> Box<Node<K, V>> {
        let Some(mut node) = link else {
            return Node::new(key, value);
        };

        match key.cmp(&node.key) {
            Ordering::Less => node.left = Some(Self::insert_at(node.left.take(), key, value, replaced)),
            Ordering::Greater => node.right = Some(Self::insert_at(node.right.take(), key, value, replaced)),
            Ordering::Equal => *replaced = Some(mem::replace(&mut node.value, value)),
        }

        node.update_count();
        node
    }

    /// Removes a key from the tree, returning the stored key and value if present.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut removed = None;
        self.root = Self::remove_at(self.root.take(), key, &mut removed);

        #[cfg(feature = "tracing")]
        tracing::trace!(size = self.len(), found = removed.is_some(), "delete");

        removed
    }

    /// Hibbard deletion on the subtree rooted at `link`.
    fn remove_at<Q>(link: Link<K, V>, key: &Q, removed: &mut Option<(K, V)>) -> Link<K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut node = link?;

        match key.cmp(node.key.borrow()) {
            Ordering::Less => node.left = Self::remove_at(node.left.take(), key, removed),
            Ordering::Greater => node.right = Self::remove_at(node.right.take(), key, removed),
            Ordering::Equal => {
                let (entry, left, right) = node.into_parts();
                *removed = Some(entry);

                let Some(right) = right else {
                    return left;
                };

                // The successor takes the deleted node's place.
                let (rest, mut successor) = Self::detach_min(right);
                successor.left = left;
                successor.right = rest;
                successor.update_count();
                return Some(successor);
            }
        }

        node.update_count();
        Some(node)
    }

    /// Returns the number of keys strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    rank += node.left_size() + 1;
                    current = node.right.as_deref();
                }
                Ordering::Equal => return rank + node.left_size(),
            }
        }
        rank
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // Last node we stepped right from: its key is below `key`.
        let mut candidate = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    candidate = Some(node);
                    current = node.right.as_deref();
                }
                Ordering::Equal => return Some((&node.key, &node.value)),
            }
        }
        candidate.map(|node| (&node.key, &node.value))
    }

    /// Returns the entry with the smallest key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut candidate = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => {
                    candidate = Some(node);
                    current = node.left.as_deref();
                }
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
            }
        }
        candidate.map(|node| (&node.key, &node.value))
    }
}

impl<K, V> Drop for RawBstMap<K, V> {
    fn drop(&mut self) {
        drop_subtree(self.root.take());
    }
}

/// Frees a subtree without recursing, so a degenerate tree of any depth can be dropped.
fn drop_subtree<K, V>(link: Link<K, V>) {
    let mut pending: Stack<Box<Node<K, V>>> = link.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

impl<K: Clone, V: Clone> Clone for RawBstMap<K, V> {
    /// Clones the tree node for node, preserving its shape.
    ///
    /// Copies are built bottom-up in post-order, so stack use does not depend on depth.
    fn clone(&self) -> Self {
        // (source node, children already scheduled)
        let mut pending: Stack<(&Node<K, V>, bool)> = self.root.as_deref().map(|root| (root, false)).into_iter().collect();
        let mut built: Stack<Box<Node<K, V>>> = SmallVec::new();

        while let Some((node, expanded)) = pending.pop() {
            if !expanded {
                pending.push((node, true));
                pending.extend(node.right.as_deref().map(|right| (right, false)));
                pending.extend(node.left.as_deref().map(|left| (left, false)));
                continue;
            }

            // The left copy finished first, so the right copy is on top.
            let right = if node.right.is_some() { built.pop() } else { None };
            let left = if node.left.is_some() { built.pop() } else { None };

            let mut copy = Node::new(node.key.clone(), node.value.clone());
            copy.left = left;
            copy.right = right;
            copy.update_count();
            built.push(copy);
        }

        Self { root: built.pop() }
    }
}

/// In-order walk over a tree's entries, driven by an explicit stack of pending ancestors.
pub(crate) struct InOrder<'a, K, V> {
    stack: Stack<&'a Node<K, V>>,
}

impl<'a, K, V> InOrder<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>) -> Self {
        let mut walk = Self { stack: SmallVec::new() };
        walk.push_left_spine(root);
        walk
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}


#[cfg(all(test, feature = "tracing"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tracing_tests {
    use super::*;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Metadata, Subscriber};

    /// Counts the events emitted by this module and ignores everything else.
    struct EventCounter(Arc<AtomicUsize>);

    impl Subscriber for EventCounter {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.target().starts_with(module_path!().trim_end_matches("::tracing_tests"))
        }

        fn new_span(&self, _span: &Attributes<'_>) -> Id {
            Id::from_u64(1)
        }

        fn record(&self, _span: &Id, _values: &Record<'_>) {}

        fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

        fn event(&self, _event: &Event<'_>) {
            self.0.fetch_add(1, AtomicOrdering::SeqCst);
        }

        fn enter(&self, _span: &Id) {}

        fn exit(&self, _span: &Id) {}
    }

    #[test]
    fn structural_deletes_emit_trace_events() {
        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = EventCounter(Arc::clone(&events));

        tracing::subscriber::with_default(subscriber, || {
            let mut tree = RawBstMap::new();
            for key in [5, 3, 8, 1, 4, 9] {
                tree.insert(key, ());
            }
            assert_eq!(events.load(AtomicOrdering::SeqCst), 0, "inserts are silent");

            assert_eq!(tree.remove_entry(&3), Some((3, ())));
            assert_eq!(tree.remove_entry(&7), None);
            assert_eq!(tree.pop_first(), Some((1, ())));
            assert_eq!(tree.pop_last(), Some((9, ())));
            tree.clear();
        });

        assert_eq!(events.load(AtomicOrdering::SeqCst), 5);
    }

    #[test]
    fn empty_pops_emit_nothing() {
        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = EventCounter(Arc::clone(&events));

        tracing::subscriber::with_default(subscriber, || {
            let mut tree: RawBstMap<i32, ()> = RawBstMap::new();
            assert!(tree.pop_first().is_none());
            assert!(tree.pop_last().is_none());
        });

        assert_eq!(events.load(AtomicOrdering::SeqCst), 0);
    }
}
