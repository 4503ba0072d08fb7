use allocator_api2::alloc::Allocator;

use crate::VectorMap;

/// `Cursor` points to a slot of a [`VectorMap`]. Not like Iterator, it can move to next or prev
/// and can be handed back to the map for hinted insertion or erasure.
///
/// A cursor is just an offset into the sorted buffer, `map.len()` being the end position. Unlike
/// tree map cursors it does not follow its entry: **every insertion or erasure, anywhere in the
/// map, invalidates every cursor obtained before it**, because entries after the mutation point
/// shift and the buffer may be reallocated. Re-derive cursors with a fresh lookup after each
/// mutation. A stale cursor is still memory safe, it simply reads whatever entry now sits at its
/// offset, or nothing.
///
/// # Example
/// ```rust
/// use vector_map::VectorMap;
///
/// let map = VectorMap::from([(1, "a"), (3, "c"), (5, "e")]);
///
/// let cursor = map.find(&3);
/// assert_eq!(cursor.key(&map), Some(&3));
/// assert_eq!(cursor.next().value(&map), Some(&"e"));
/// assert_eq!(cursor.prev().unwrap().key(&map), Some(&1));
/// assert!(cursor.next().next().is_end(&map));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    #[inline(always)]
    pub(crate) fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Slot index of the cursor in ascending key order.
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Cursor to the following slot. Moving past the end is not checked, the result simply
    /// reads as nothing.
    #[inline]
    pub fn next(self) -> Self {
        Self::new(self.offset + 1)
    }

    /// Cursor to the preceding slot, `None` at the first slot.
    #[inline]
    pub fn prev(self) -> Option<Self> {
        self.offset.checked_sub(1).map(Self::new)
    }

    /// Returns true if the cursor is at, or past, the end of `map`.
    #[inline]
    pub fn is_end<K, V, C, A: Allocator>(&self, map: &VectorMap<K, V, C, A>) -> bool {
        self.offset >= map.len()
    }

    /// Key-value pair under the cursor.
    #[inline]
    pub fn entry<'b, K, V, C, A: Allocator>(
        &self,
        map: &'b VectorMap<K, V, C, A>,
    ) -> Option<(&'b K, &'b V)> {
        map.as_slice().get(self.offset).map(|(k, v)| (k, v))
    }

    /// Key under the cursor.
    #[inline]
    pub fn key<'b, K, V, C, A: Allocator>(&self, map: &'b VectorMap<K, V, C, A>) -> Option<&'b K> {
        self.entry(map).map(|(k, _)| k)
    }

    /// Value under the cursor.
    #[inline]
    pub fn value<'b, K, V, C, A: Allocator>(
        &self,
        map: &'b VectorMap<K, V, C, A>,
    ) -> Option<&'b V> {
        self.entry(map).map(|(_, v)| v)
    }

    /// Mutable value under the cursor. The key stays read only so the order can't be broken.
    #[inline]
    pub fn value_mut<'b, K, V, C, A: Allocator>(
        &self,
        map: &'b mut VectorMap<K, V, C, A>,
    ) -> Option<&'b mut V> {
        map.entries_mut().get_mut(self.offset).map(|(_, v)| v)
    }
}
