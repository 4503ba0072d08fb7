use std::cmp::Ordering;

/// A strict weak order over `T`.
///
/// The map only ever asks "is `a` less than `b`". Two keys are equivalent when neither is
/// less than the other, `Eq` on the key type is never consulted.
///
/// Any `Fn(&T, &T) -> bool` closure is a comparator.
///
/// # Examples
/// ```rust
/// use vector_map::{Compare, Natural, Reversed};
///
/// assert!(Natural.less(&1, &2));
/// assert!(Reversed(Natural).less(&2, &1));
///
/// let by_len = |a: &&str, b: &&str| a.len() < b.len();
/// assert!(by_len.equivalent(&"ab", &"cd"));
/// ```
pub trait Compare<T: ?Sized> {
    /// Returns true if `a` is ordered strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Returns true if neither key is ordered before the other.
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }

    /// Three way comparison derived from `less`.
    #[inline]
    fn ordering(&self, a: &T, b: &T) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Ascending order by `Ord`, the default comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Flips the wrapped comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reversed<C> {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.0.less(b, a)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders stored entries by their key only, see [`crate::VectorMap::value_comp`].
pub struct ValueCompare<'a, C> {
    comparator: &'a C,
}

impl<'a, C> ValueCompare<'a, C> {
    pub(crate) fn new(comparator: &'a C) -> Self {
        Self { comparator }
    }

    /// The key comparator this entry comparator projects onto.
    pub fn key_comp(&self) -> &'a C {
        self.comparator
    }

    /// Returns true if the key of `a` is ordered before the key of `b`. Values are ignored.
    #[inline]
    pub fn less<K, V>(&self, a: &(K, V), b: &(K, V)) -> bool
    where
        C: Compare<K>,
    {
        self.comparator.less(&a.0, &b.0)
    }
}

impl<'a, C> Clone for ValueCompare<'a, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, C> Copy for ValueCompare<'a, C> {}
