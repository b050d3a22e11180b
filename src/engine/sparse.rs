//! Sparse sets of state indices with O(1) insertion, membership and clear.
//! See <https://research.swtch.com/sparse>.

#[derive(Clone, Debug)]
pub(crate) struct SparseSet {
    len: usize,
    /// Members in insertion order.
    dense: Vec<usize>,
    /// `sparse[id]` is the position of `id` in `dense` when `id` is a member.
    sparse: Vec<usize>,
}

impl SparseSet {
    /// Creates a set for indices in `0..capacity`.
    pub(crate) fn new(capacity: usize) -> Self {
        SparseSet {
            len: 0,
            dense: vec![0; capacity],
            sparse: vec![0; capacity],
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` was not already present.
    #[inline]
    pub(crate) fn insert(&mut self, id: usize) -> bool {
        if self.contains(id) {
            return false;
        }
        self.dense[self.len] = id;
        self.sparse[id] = self.len;
        self.len += 1;
        true
    }

    #[inline]
    pub(crate) fn contains(&self, id: usize) -> bool {
        let idx = self.sparse[id];
        idx < self.len && self.dense[idx] == id
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.dense[..self.len].iter().copied()
    }
}
