use std::iter::FusedIterator;
use std::slice;

use allocator_api2::alloc::{Allocator, Global};
use allocator_api2::vec;

/// A borrowed iterator over the entries of a `VectorMap`, in ascending key order.
pub struct Iter<'a, K, V> {
    pub(crate) inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(entries: &'a [(K, V)]) -> Self {
        Self {
            inner: entries.iter(),
        }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n).map(|(k, v)| (k, v))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// Iterator handing out mutable values. Keys stay shared so the order can't be broken.
pub struct IterMut<'a, K, V> {
    pub(crate) inner: slice::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (&*k, v))
    }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}
impl<'a, K, V> FusedIterator for IterMut<'a, K, V> {}

/// Owning iterator, produced by `VectorMap::into_iter`.
pub struct IntoIter<K, V, A: Allocator = Global> {
    pub(crate) inner: vec::IntoIter<(K, V), A>,
}

impl<K, V, A: Allocator> Iterator for IntoIter<K, V, A> {
    type Item = (K, V);

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<K, V, A: Allocator> DoubleEndedIterator for IntoIter<K, V, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoIter<K, V, A> {}
impl<K, V, A: Allocator> FusedIterator for IntoIter<K, V, A> {}

macro_rules! projection_iter {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $item:ty, |$e:pat_param| $project:expr) => {
        $(#[$meta])*
        pub struct $name<'a, K, V> {
            pub(crate) inner: $inner,
        }

        impl<'a, K, V> Iterator for $name<'a, K, V> {
            type Item = $item;

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.inner.size_hint()
            }

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.inner.next().map(|$e| $project)
            }
        }

        impl<'a, K, V> DoubleEndedIterator for $name<'a, K, V> {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.inner.next_back().map(|$e| $project)
            }
        }

        impl<'a, K, V> ExactSizeIterator for $name<'a, K, V> {}
        impl<'a, K, V> FusedIterator for $name<'a, K, V> {}
    };
}

projection_iter!(
    /// Keys in ascending order.
    Keys,
    slice::Iter<'a, (K, V)>,
    &'a K,
    |(k, _)| k
);

projection_iter!(
    /// Values in ascending key order.
    Values,
    slice::Iter<'a, (K, V)>,
    &'a V,
    |(_, v)| v
);

projection_iter!(
    /// Mutable values in ascending key order.
    ValuesMut,
    slice::IterMut<'a, (K, V)>,
    &'a mut V,
    |(_, v)| v
);

/// Owning iterator over the keys.
pub struct IntoKeys<K, V, A: Allocator = Global> {
    pub(crate) inner: IntoIter<K, V, A>,
}

impl<K, V, A: Allocator> Iterator for IntoKeys<K, V, A> {
    type Item = K;

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K, V, A: Allocator> DoubleEndedIterator for IntoKeys<K, V, A> {
    #[inline]
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoKeys<K, V, A> {}
impl<K, V, A: Allocator> FusedIterator for IntoKeys<K, V, A> {}

/// Owning iterator over the values.
pub struct IntoValues<K, V, A: Allocator = Global> {
    pub(crate) inner: IntoIter<K, V, A>,
}

impl<K, V, A: Allocator> Iterator for IntoValues<K, V, A> {
    type Item = V;

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K, V, A: Allocator> DoubleEndedIterator for IntoValues<K, V, A> {
    #[inline]
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoValues<K, V, A> {}
impl<K, V, A: Allocator> FusedIterator for IntoValues<K, V, A> {}
