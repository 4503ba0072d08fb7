//! Binary search primitives over a slice of entries sorted by key.
//!
//! All functions take the comparator by reference and never touch values, so they work for
//! any `(K, V)` slice that satisfies the sortedness invariant.

use std::borrow::Borrow;

use crate::Compare;

/// Index of the first entry whose key is not less than `k`.
#[inline]
pub(crate) fn lower_bound<K, V, Q, C>(entries: &[(K, V)], comparator: &C, k: &Q) -> usize
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<Q>,
{
    entries.partition_point(|(key, _)| comparator.less(key.borrow(), k))
}

/// Index of the first entry whose key is strictly greater than `k`.
#[inline]
pub(crate) fn upper_bound<K, V, Q, C>(entries: &[(K, V)], comparator: &C, k: &Q) -> usize
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<Q>,
{
    entries.partition_point(|(key, _)| !comparator.less(k, key.borrow()))
}

/// Same contract as `slice::binary_search`: `Ok(idx)` when an equivalent key is stored at
/// `idx`, `Err(idx)` with the sorted insertion slot otherwise.
#[inline]
pub(crate) fn locate<K, V, Q, C>(entries: &[(K, V)], comparator: &C, k: &Q) -> Result<usize, usize>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Compare<Q>,
{
    let idx = lower_bound(entries, comparator, k);
    match entries.get(idx) {
        // key at idx is not less than k, so it is equivalent unless k is less than it
        Some((key, _)) if !comparator.less(k, key.borrow()) => Ok(idx),
        _ => Err(idx),
    }
}

/// Outcome of checking a caller supplied insertion hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HintCheck {
    /// `k` sorts strictly between the neighbours of the hint, insert at the hint.
    Vacant(usize),
    /// An equivalent key sits right at, or right before, the hint.
    Occupied(usize),
    /// The hint is out of range or on the wrong side of `k`.
    Miss,
}

/// Validates `hint` as the insertion slot for `k` against both neighbours.
pub(crate) fn check_hint<K, V, C>(
    entries: &[(K, V)],
    comparator: &C,
    hint: usize,
    k: &K,
) -> HintCheck
where
    C: Compare<K>,
{
    if hint > entries.len() {
        return HintCheck::Miss;
    }

    if hint > 0 {
        let prev = &entries[hint - 1].0;
        if !comparator.less(prev, k) {
            return if comparator.less(k, prev) {
                HintCheck::Miss
            } else {
                HintCheck::Occupied(hint - 1)
            };
        }
    }

    if let Some((next, _)) = entries.get(hint) {
        if !comparator.less(k, next) {
            return if comparator.less(next, k) {
                HintCheck::Miss
            } else {
                HintCheck::Occupied(hint)
            };
        }
    }

    HintCheck::Vacant(hint)
}
