use alloc::boxed::Box;

/// An owned, possibly empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A BST node owning its children and caching the size of its subtree.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    // Nodes in the subtree rooted here, this one included.
    count: usize,
}

impl<K, V> Node<K, V> {
    /// Creates a leaf with a count of one.
    pub(crate) fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            count: 1,
        })
    }

    /// Returns the number of nodes in the subtree rooted at `link`.
    #[inline]
    pub(crate) fn size(link: &Link<K, V>) -> usize {
        link.as_ref().map_or(0, |node| node.count())
    }

    /// Returns the cached subtree size.
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Returns the size of the left subtree, i.e. the rank of this key within its subtree.
    #[inline]
    pub(crate) fn left_size(&self) -> usize {
        Self::size(&self.left)
    }

    /// Recomputes the cached count from the children.
    ///
    /// Must be called on every node whose `left` or `right` link was re-attached.
    #[inline]
    pub(crate) fn update_count(&mut self) {
        self.count = 1 + Self::size(&self.left) + Self::size(&self.right);
    }

    /// Consumes the node, returning its entry and its two subtrees.
    pub(crate) fn into_parts(self: Box<Self>) -> ((K, V), Link<K, V>, Link<K, V>) {
        let Node {
            key,
            value,
            left,
            right,
            ..
        } = *self;
        ((key, value), left, right)
    }
}
