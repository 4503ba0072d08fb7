use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, Index, RangeBounds};

use allocator_api2::alloc::{Allocator, Global};
use allocator_api2::vec::Vec;

use crate::error::{self, Error};
use crate::iterator::{IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};
use crate::key_search::{self, HintCheck};
use crate::{Compare, Cursor, Natural, ValueCompare};

/// Ordered map with unique keys, stored as one contiguous vector of `(K, V)` sorted by key.
///
/// Lookups are binary searches. Insertions and removals shift the entries after the touched
/// slot, except appends of ascending keys which are amortised O(1). See the crate docs for the
/// memory/time tradeoff against tree maps.
///
/// `C` is the key comparator (see [`Compare`]), `A` the allocator of the buffer.
///
/// # Example
/// ```rust
/// use vector_map::VectorMap;
///
/// let mut map = VectorMap::<char, i32>::new();
/// map.insert('c', 30);
/// map.insert('a', 10);
/// map.insert('b', 20);
///
/// let kvs = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
/// assert_eq!(kvs, vec![('a', 10), ('b', 20), ('c', 30)]);
///
/// // duplicate keys keep the first value
/// let (cursor, inserted) = map.insert('a', 99);
/// assert!(!inserted);
/// assert_eq!(cursor.value(&map), Some(&10));
/// ```
pub struct VectorMap<K, V, C = Natural, A: Allocator = Global> {
    entries: Vec<(K, V), A>,
    comparator: C,
}

impl<K, V> VectorMap<K, V> {
    /// Create a new empty map, ordered by `Ord`, in the global allocator.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let map = VectorMap::<i32, i32>::new();
    ///
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_comparator_in(Natural, Global)
    }

    /// Create an empty map with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Natural, Global)
    }
}

impl<K, V, C> VectorMap<K, V, C> {
    /// Create an empty map ordered by `comparator`.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::{Reversed, Natural, VectorMap};
    ///
    /// let mut map = VectorMap::with_comparator(Reversed(Natural));
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    ///
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 1]);
    /// ```
    #[inline]
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_in(comparator, Global)
    }

    /// Build a map from `iter` ordered by `comparator`. When several entries have equivalent
    /// keys the first one is kept.
    pub fn from_iter_with<I>(iter: I, comparator: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        C: Compare<K>,
    {
        Self::from_iter_in(iter, comparator, Global)
    }
}

impl<K, V, A: Allocator> VectorMap<K, V, Natural, A> {
    /// Create an empty map, ordered by `Ord`, whose buffer lives in `alloc`.
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Self::with_comparator_in(Natural, alloc)
    }
}

impl<K, V, C, A: Allocator> VectorMap<K, V, C, A> {
    /// Create an empty map ordered by `comparator` whose buffer lives in `alloc`.
    #[inline]
    pub fn with_comparator_in(comparator: C, alloc: A) -> Self {
        Self {
            entries: Vec::new_in(alloc),
            comparator,
        }
    }

    /// Create an empty map with room for `capacity` entries.
    #[inline]
    pub fn with_capacity_in(capacity: usize, comparator: C, alloc: A) -> Self {
        Self {
            entries: Vec::with_capacity_in(capacity, alloc),
            comparator,
        }
    }

    /// Build a map from `iter`. When several entries have equivalent keys the first one is kept.
    ///
    /// The entries are collected, stable sorted and deduplicated, which is O(n log n) instead of
    /// the O(n²) worst case of inserting one by one.
    pub fn from_iter_in<I>(iter: I, comparator: C, alloc: A) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        C: Compare<K>,
    {
        let iter = iter.into_iter();
        let mut entries = Vec::with_capacity_in(iter.size_hint().0, alloc);
        entries.extend(iter);
        Self::from_unsorted(entries, comparator)
    }

    fn from_unsorted(mut entries: Vec<(K, V), A>, comparator: C) -> Self
    where
        C: Compare<K>,
    {
        // stable, so the earliest of equivalent entries comes first and survives the dedup
        entries.sort_by(|a, b| comparator.ordering(&a.0, &b.0));
        entries.dedup_by(|later, earlier| comparator.equivalent(&later.0, &earlier.0));

        let me = Self {
            entries,
            comparator,
        };

        #[cfg(test)]
        me.validate();

        me
    }

    /// Returns item count in the map
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map contains no item
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries the buffer holds without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Upper bound on the number of entries a map of this type can hold.
    #[inline]
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / std::mem::size_of::<(K, V)>().max(1)
    }

    /// Grow the buffer so at least `additional` more entries fit without reallocation.
    ///
    /// Worth calling before a bulk load of known size: it removes every intermediate
    /// reallocation, leaving only the shifting cost of each insertion.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut map = VectorMap::<u16, u16>::new();
    /// map.reserve(100);
    /// let capacity = map.capacity();
    /// for i in 0..100 {
    ///     map.insert(i, i);
    /// }
    /// assert_eq!(map.capacity(), capacity);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let before = self.entries.capacity();
        self.entries.reserve(additional);
        self.log_growth(before);
    }

    /// Like [`Self::reserve`], but reports allocation failure instead of aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let before = self.entries.capacity();
        self.entries
            .try_reserve(additional)
            .map_err(|_| Error::Reserve { additional })?;
        self.log_growth(before);
        Ok(())
    }

    fn log_growth(&self, before: usize) {
        let after = self.entries.capacity();
        if after != before {
            log::debug!("vector map capacity grew from {before} to {after}");
        }
    }

    /// Release unused capacity.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }

    /// Remove all entries, keeping the allocated buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The entries in ascending key order.
    #[inline]
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Crate internal, keys must not be modified through it.
    #[inline]
    pub(crate) fn entries_mut(&mut self) -> &mut [(K, V)] {
        &mut self.entries
    }

    /// Returns an iterator over the map, in ascending key order.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut map = VectorMap::<i32, i32>::new();
    /// map.insert(2, 3);
    /// map.insert(1, 2);
    ///
    /// let kvs = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
    /// assert_eq!(kvs, vec![(1, 2), (2, 3)]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.entries)
    }

    /// Iterator with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.entries.iter(),
        }
    }

    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.entries.iter_mut(),
        }
    }

    #[inline]
    pub fn into_keys(self) -> IntoKeys<K, V, A> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    #[inline]
    pub fn into_values(self) -> IntoValues<K, V, A> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Entries from `first` up to, not including, `last`.
    ///
    /// # Panics
    /// If `first` is after `last` or `last` is past the end.
    pub fn iter_between(&self, first: Cursor, last: Cursor) -> Iter<'_, K, V> {
        Iter::new(&self.entries[first.offset()..last.offset()])
    }

    /// Cursor to the smallest key, equal to `end()` for an empty map.
    #[inline]
    pub fn begin(&self) -> Cursor {
        Cursor::new(0)
    }

    /// The past-the-end cursor.
    #[inline]
    pub fn end(&self) -> Cursor {
        Cursor::new(self.len())
    }

    /// Returns first key-value pair in the map.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(k, v)| (k, v))
    }

    /// Returns last key-value pair in the map.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.entries.last().map(|(k, v)| (k, v))
    }

    /// Removes the entry with the smallest key. Shifts every other entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Removes the entry with the largest key.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.entries.pop()
    }

    /// Removes the entry under `position` and returns the cursor of the entry that takes its
    /// slot, which is `position` itself.
    ///
    /// # Panics
    /// If `position` is the end cursor or past it.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut map = VectorMap::from([(3, 'c'), (4, 'd'), (5, 'e')]);
    /// let next = map.erase_at(map.find(&4));
    /// assert_eq!(next.key(&map), Some(&5));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn erase_at(&mut self, position: Cursor) -> Cursor {
        self.entries.remove(position.offset());
        position
    }

    /// Removes the entries from `first` up to, not including, `last`. Returns the cursor of the
    /// entry that now sits at `first`.
    ///
    /// # Panics
    /// If `first` is after `last` or `last` is past the end.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Cursor {
        self.entries.drain(first.offset()..last.offset());
        first
    }

    /// Keeps only the entries for which `f` returns true. Runs in a single pass.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.entries.retain_mut(|(k, v)| f(k, v));
    }

    /// Exchange the contents, comparators included, of two maps. No entry is moved.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Move the contents out, leaving `self` empty with the same comparator and allocator.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut source = VectorMap::from([(1, 1), (2, 2)]);
    /// let target = source.take();
    ///
    /// assert!(source.is_empty());
    /// assert_eq!(target.len(), 2);
    /// ```
    pub fn take(&mut self) -> Self
    where
        C: Clone,
        A: Clone,
    {
        let empty =
            Self::with_comparator_in(self.comparator.clone(), self.entries.allocator().clone());
        std::mem::replace(self, empty)
    }

    /// Move every entry into a buffer allocated from `alloc`. The order is kept, no comparison
    /// is made.
    pub fn move_in<B: Allocator>(self, alloc: B) -> VectorMap<K, V, C, B> {
        let Self {
            entries: old,
            comparator,
        } = self;

        let mut entries = Vec::with_capacity_in(old.len(), alloc);
        entries.extend(old);

        VectorMap {
            entries,
            comparator,
        }
    }

    /// Deep copy into a buffer allocated from `alloc`.
    pub fn clone_in<B: Allocator>(&self, alloc: B) -> VectorMap<K, V, C, B>
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        let mut entries = Vec::with_capacity_in(self.entries.len(), alloc);
        entries.extend(self.entries.iter().cloned());

        VectorMap {
            entries,
            comparator: self.comparator.clone(),
        }
    }

    /// The key comparator.
    #[inline]
    pub fn key_comp(&self) -> &C {
        &self.comparator
    }

    /// Comparator over stored `(K, V)` entries, comparing keys only.
    #[inline]
    pub fn value_comp(&self) -> ValueCompare<'_, C> {
        ValueCompare::new(&self.comparator)
    }

    /// The allocator of the buffer.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.entries.allocator()
    }

    /// Cursor to the entry whose key is equivalent to `k`, or `end()`.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let map = VectorMap::from([(1, 'a'), (2, 'b')]);
    /// assert_eq!(map.find(&2).value(&map), Some(&'b'));
    /// assert_eq!(map.find(&3), map.end());
    /// ```
    pub fn find<Q: ?Sized>(&self, k: &Q) -> Cursor
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        match key_search::locate(&self.entries, &self.comparator, k) {
            Ok(idx) => Cursor::new(idx),
            Err(_) => self.end(),
        }
    }

    /// Number of entries with a key equivalent to `k`, either 0 or 1.
    #[inline]
    pub fn count<Q: ?Sized>(&self, k: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        usize::from(self.contains_key(k))
    }

    #[inline]
    pub fn contains_key<Q: ?Sized>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        key_search::locate(&self.entries, &self.comparator, k).is_ok()
    }

    /// Cursor to the first entry whose key is not less than `k`.
    #[inline]
    pub fn lower_bound<Q: ?Sized>(&self, k: &Q) -> Cursor
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        Cursor::new(key_search::lower_bound(&self.entries, &self.comparator, k))
    }

    /// Cursor to the first entry whose key is greater than `k`.
    #[inline]
    pub fn upper_bound<Q: ?Sized>(&self, k: &Q) -> Cursor
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        Cursor::new(key_search::upper_bound(&self.entries, &self.comparator, k))
    }

    /// `(lower_bound(k), upper_bound(k))`, which spans one entry if `k` is stored and none
    /// otherwise.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let map = VectorMap::from([(10, ()), (20, ()), (30, ())]);
    ///
    /// let (first, last) = map.equal_range(&20);
    /// assert_eq!(map.iter_between(first, last).count(), 1);
    ///
    /// let (first, last) = map.equal_range(&25);
    /// assert_eq!(first, last);
    /// assert_eq!(first.key(&map), Some(&30));
    /// ```
    pub fn equal_range<Q: ?Sized>(&self, k: &Q) -> (Cursor, Cursor)
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        (self.lower_bound(k), self.upper_bound(k))
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut map = VectorMap::<String, i32>::new();
    /// map.insert("one".to_string(), 1);
    ///
    /// assert_eq!(map.get("one"), Some(&1));
    /// assert!(map.get("two").is_none());
    /// ```
    #[inline]
    pub fn get<Q: ?Sized>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.get_key_value(k).map(|(_, v)| v)
    }

    /// Returns a mut reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut<Q: ?Sized>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        let idx = key_search::locate(&self.entries, &self.comparator, k).ok()?;
        Some(&mut self.entries[idx].1)
    }

    pub fn get_key_value<Q: ?Sized>(&self, k: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        let idx = key_search::locate(&self.entries, &self.comparator, k).ok()?;
        let (key, value) = &self.entries[idx];
        Some((key, value))
    }

    /// Value for `k`, which must be present.
    ///
    /// # Panics
    /// If `k` is missing. With the `abort-on-missing-key` feature the process aborts instead.
    /// Use [`Self::try_at`] or [`Self::get`] for a recoverable lookup.
    pub fn at<Q: ?Sized>(&self, k: &Q) -> &V
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        match self.get(k) {
            Some(v) => v,
            None => error::key_not_found(),
        }
    }

    /// Mutable value for `k`, which must be present. Fails like [`Self::at`].
    pub fn at_mut<Q: ?Sized>(&mut self, k: &Q) -> &mut V
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        match self.get_mut(k) {
            Some(v) => v,
            None => error::key_not_found(),
        }
    }

    /// Value for `k`, or [`Error::KeyNotFound`].
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::{Error, VectorMap};
    ///
    /// let map = VectorMap::from([(1, 2)]);
    /// assert_eq!(map.try_at(&1), Ok(&2));
    /// assert_eq!(map.try_at(&5), Err(Error::KeyNotFound));
    /// ```
    pub fn try_at<Q: ?Sized>(&self, k: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.get(k).ok_or(Error::KeyNotFound)
    }

    pub fn try_at_mut<Q: ?Sized>(&mut self, k: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.get_mut(k).ok_or(Error::KeyNotFound)
    }

    /// Entries whose keys fall into `range`. Empty when the start bound is after the end bound.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let map: VectorMap<i32, i32> = (0..10).map(|i| (i, i * i)).collect();
    /// let squares = map.range(3..=5).map(|(_, v)| *v).collect::<Vec<_>>();
    /// assert_eq!(squares, vec![9, 16, 25]);
    /// ```
    pub fn range<Q: ?Sized, R>(&self, range: R) -> Iter<'_, K, V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
        R: RangeBounds<Q>,
    {
        let start = match range.start_bound() {
            Bound::Included(k) => self.lower_bound(k).offset(),
            Bound::Excluded(k) => self.upper_bound(k).offset(),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(k) => self.upper_bound(k).offset(),
            Bound::Excluded(k) => self.lower_bound(k).offset(),
            Bound::Unbounded => self.len(),
        };

        Iter::new(&self.entries[start..end.max(start)])
    }

    /// Removes the entry for `k` and returns how many were removed, 0 or 1.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut map = VectorMap::from([(1, 2)]);
    /// assert_eq!(map.erase(&1), 1);
    /// assert_eq!(map.erase(&1), 0);
    /// ```
    #[inline]
    pub fn erase<Q: ?Sized>(&mut self, k: &Q) -> usize
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        usize::from(self.remove_entry(k).is_some())
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in the map.
    #[inline]
    pub fn remove<Q: ?Sized>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        self.remove_entry(k).map(|(_, v)| v)
    }

    pub fn remove_entry<Q: ?Sized>(&mut self, k: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Compare<Q>,
    {
        let idx = key_search::locate(&self.entries, &self.comparator, k).ok()?;
        Some(self.entries.remove(idx))
    }

    #[cfg(test)]
    fn validate(&self)
    where
        C: Compare<K>,
    {
        for pair in self.entries.windows(2) {
            assert!(
                self.comparator.less(&pair[0].0, &pair[1].0),
                "entries out of order"
            );
        }
    }
}

impl<K, V, C: Compare<K>, A: Allocator> VectorMap<K, V, C, A> {
    /// Slot for `k`, checking the last entry first so ascending appends skip the search.
    #[inline]
    fn locate_for_insert(&self, k: &K) -> Result<usize, usize> {
        match self.entries.last() {
            Some((last, _)) if self.comparator.less(last, k) => Err(self.entries.len()),
            _ => key_search::locate(&self.entries, &self.comparator, k),
        }
    }

    /// Insert `k` if no equivalent key is stored.
    ///
    /// Returns the cursor of the entry for `k` and whether it was inserted. An existing entry is
    /// left untouched and `v` is dropped.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut map = VectorMap::<i32, i32>::new();
    /// let (cursor, inserted) = map.insert(1, 2);
    /// assert!(inserted);
    /// assert_eq!(cursor.key(&map), Some(&1));
    ///
    /// let (_, inserted) = map.insert(1, 3);
    /// assert!(!inserted);
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, k: K, v: V) -> (Cursor, bool) {
        let result = match self.locate_for_insert(&k) {
            Ok(idx) => (Cursor::new(idx), false),
            Err(idx) => {
                self.entries.insert(idx, (k, v));
                (Cursor::new(idx), true)
            }
        };

        #[cfg(test)]
        self.validate();

        result
    }

    /// Insert with a position hint, the cursor the new entry should end up at.
    ///
    /// The hint is checked against both of its neighbours. A good hint skips the binary search,
    /// a bad one costs a search, never correctness. Returns the cursor of the entry for `k`,
    /// whether it was inserted or already present.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut map = VectorMap::<i32, i32>::new();
    /// let mut hint = map.end();
    /// for i in 0..10 {
    ///     hint = map.insert_hint(hint, i, i).next();
    /// }
    /// assert_eq!(map.len(), 10);
    ///
    /// // a wrong hint still lands in the right slot
    /// let cursor = map.insert_hint(map.begin(), 20, 20);
    /// assert_eq!(cursor, map.find(&20));
    /// ```
    pub fn insert_hint(&mut self, hint: Cursor, k: K, v: V) -> Cursor {
        let check = key_search::check_hint(&self.entries, &self.comparator, hint.offset(), &k);
        let cursor = match check {
            HintCheck::Vacant(idx) => {
                self.entries.insert(idx, (k, v));
                Cursor::new(idx)
            }
            HintCheck::Occupied(idx) => Cursor::new(idx),
            HintCheck::Miss => {
                log::trace!(
                    "insert hint {} rejected, falling back to search",
                    hint.offset()
                );
                return self.insert(k, v).0;
            }
        };

        #[cfg(test)]
        self.validate();

        cursor
    }

    /// Build the entry from `args`, then insert it like [`Self::insert`].
    ///
    /// The entry is always fully constructed, even when the key turns out to be present already,
    /// in which case it is dropped.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut map = VectorMap::<i32, i32>::new();
    /// let (cursor, inserted) = map.emplace((15, 30));
    /// assert!(inserted);
    ///
    /// let (again, inserted) = map.emplace((15, 0));
    /// assert!(!inserted);
    /// assert_eq!(again, cursor);
    /// assert_eq!(map.at(&15), &30);
    /// ```
    #[inline]
    pub fn emplace<E>(&mut self, args: E) -> (Cursor, bool)
    where
        E: Into<(K, V)>,
    {
        let (k, v) = args.into();
        self.insert(k, v)
    }

    /// Hinted [`Self::emplace`]. Returns the cursor of the entry for the key, wherever it
    /// actually lives, also when the hint was wrong.
    #[inline]
    pub fn emplace_hint<E>(&mut self, hint: Cursor, args: E) -> Cursor
    where
        E: Into<(K, V)>,
    {
        let (k, v) = args.into();
        self.insert_hint(hint, k, v)
    }

    /// Mutable value for `k`, inserting the value built by `f` first if `k` is missing. `f` only
    /// runs when an insertion happens.
    pub fn get_or_insert_with<F>(&mut self, k: K, f: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let idx = match self.locate_for_insert(&k) {
            Ok(idx) => idx,
            Err(idx) => {
                self.entries.insert(idx, (k, f()));
                idx
            }
        };

        #[cfg(test)]
        self.validate();

        &mut self.entries[idx].1
    }

    /// Mutable value for `k`, inserting `V::default()` first if `k` is missing.
    ///
    /// # Examples
    /// ```rust
    /// use vector_map::VectorMap;
    ///
    /// let mut counts = VectorMap::<&str, u32>::new();
    /// for word in ["b", "a", "b"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts.get("b"), Some(&2));
    /// assert_eq!(counts.get("a"), Some(&1));
    /// ```
    #[inline]
    pub fn get_or_insert_default(&mut self, k: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(k, V::default)
    }

    /// Insert every entry of `iter` in turn, same as [`Extend::extend`].
    #[inline]
    pub fn insert_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.extend(iter);
    }

    /// Replace the contents with the entries of `iter`, first occurrence of a key wins.
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.entries.clear();
        self.extend(iter);
    }
}

/// ensure VectorMap is send for send key and value
fn _ensure_send<K: Send, V: Send>() {
    fn _assert_send<T: Send>() {}
    _assert_send::<VectorMap<K, V>>();
}

impl<K, V, C: Default, A: Allocator + Default> Default for VectorMap<K, V, C, A> {
    fn default() -> Self {
        Self::with_comparator_in(C::default(), A::default())
    }
}

impl<K, V, C, A> Clone for VectorMap<K, V, C, A>
where
    K: Clone,
    V: Clone,
    C: Clone,
    A: Allocator + Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            comparator: self.comparator.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.entries.clone_from(&source.entries);
        self.comparator = source.comparator.clone();
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, A: Allocator> fmt::Debug for VectorMap<K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, A> FromIterator<(K, V)> for VectorMap<K, V, C, A>
where
    C: Compare<K> + Default,
    A: Allocator + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_iter_in(iter, C::default(), A::default())
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for VectorMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_iter_in(entries, Natural, Global)
    }
}

impl<K, V, C: Compare<K>, A: Allocator> Extend<(K, V)> for VectorMap<K, V, C, A> {
    /// Inserts one entry at a time, so the first occurrence of a key wins.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C, A> Extend<(&'a K, &'a V)> for VectorMap<K, V, C, A>
where
    K: Copy + 'a,
    V: Copy + 'a,
    C: Compare<K>,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(k, v)| (*k, *v)));
    }
}

impl<K, V, C, A: Allocator> IntoIterator for VectorMap<K, V, C, A> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, K, V, C, A: Allocator> IntoIterator for &'a VectorMap<K, V, C, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C, A: Allocator> IntoIterator for &'a mut VectorMap<K, V, C, A> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, Q: ?Sized, V, C, A> Index<&Q> for VectorMap<K, V, C, A>
where
    K: Borrow<Q>,
    C: Compare<Q>,
    A: Allocator,
{
    type Output = V;

    /// Same as [`VectorMap::at`], fails hard when the key is missing.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.at(key)
    }
}

impl<K, V, C, A> PartialEq for VectorMap<K, V, C, A>
where
    V: PartialEq,
    C: Compare<K>,
    A: Allocator,
{
    /// Sizes first, then pairwise: keys equivalent under the comparator of `self`, values equal.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((lk, lv), (rk, rv))| self.comparator.equivalent(lk, rk) && lv == rv)
    }
}

impl<K, V: Eq, C: Compare<K>, A: Allocator> Eq for VectorMap<K, V, C, A> {}

impl<K, V, C, A> PartialOrd for VectorMap<K, V, C, A>
where
    V: PartialOrd,
    C: Compare<K>,
    A: Allocator,
{
    /// Lexicographic over the entries, keys by the comparator of `self` and values breaking ties.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut lhs = self.iter();
        let mut rhs = other.iter();
        loop {
            let ((lk, lv), (rk, rv)) = match (lhs.next(), rhs.next()) {
                (None, None) => return Some(Ordering::Equal),
                (None, Some(_)) => return Some(Ordering::Less),
                (Some(_), None) => return Some(Ordering::Greater),
                (Some(l), Some(r)) => (l, r),
            };

            match self.comparator.ordering(lk, rk) {
                Ordering::Equal => {}
                ord => return Some(ord),
            }
            match lv.partial_cmp(rv)? {
                Ordering::Equal => {}
                ord => return Some(ord),
            }
        }
    }
}

impl<K, V: Ord, C: Compare<K>, A: Allocator> Ord for VectorMap<K, V, C, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut lhs = self.iter();
        let mut rhs = other.iter();
        loop {
            let ((lk, lv), (rk, rv)) = match (lhs.next(), rhs.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(l), Some(r)) => (l, r),
            };

            match self.comparator.ordering(lk, rk).then_with(|| lv.cmp(rv)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
    }
}

/// Only for `Natural` order, where key equivalence agrees with `Eq` and so with `Hash`.
impl<K: Hash + Ord, V: Hash, A: Allocator> Hash for VectorMap<K, V, Natural, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}
