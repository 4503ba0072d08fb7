//! An ordered map with unique keys, stored as a single sorted vector of `(K, V)` pairs.
//!
//! [`VectorMap`] trades insertion speed for memory and locality. There is no per-entry node
//! overhead, iteration walks contiguous memory and lookups are binary searches. In exchange
//! every insertion or erasure shifts the entries after the touched slot, so it is O(n), apart
//! from appends of ascending keys. It pays off for maps that are built once, or grow mostly at
//! the end, and are then read a lot.
//!
//! A [`Cursor`] is an offset into the vector. Any insertion or erasure invalidates every cursor
//! obtained before it, see the [`Cursor`] docs.
//!
//! Keys are ordered by a [`Compare`] implementation, [`Natural`] (`Ord`) by default, and the
//! buffer can live in any [`allocator_api2::alloc::Allocator`].

mod compare;
pub use compare::{Compare, Natural, Reversed, ValueCompare};

mod cursor;
pub use cursor::Cursor;

mod error;
pub use error::Error;

pub mod iterator;

// sorted slice search
mod key_search;

mod map;
pub use map::VectorMap;

#[cfg(feature = "serde")]
mod serde_impl;
