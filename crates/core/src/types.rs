//! Canonical type aliases
//!
//! - Index: size/index type used wherever a value crosses a module boundary
//! - OrderedMap / OrderedSet: the framework's associative containers
//!
//! The containers are tree-based rather than hash-based. Some accelerator
//! toolchains have not handled hash maps reliably, and maps are rarely on a
//! hot path, so the framework accepts the lookup cost. Change the aliases
//! here if that trade-off is revisited; nothing downstream names
//! `BTreeMap` directly.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Index/size type, wide enough for the largest dense or sparse array
pub type Index = i64;

/// Ordered key -> value mapping; iteration follows key order
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// Ordered set; iteration follows value order
pub type OrderedSet<T> = BTreeSet<T>;

/// Convert a native size into an [`Index`]
///
/// # Errors
/// Returns `Error::IndexOutOfRange` if `n` exceeds `Index::MAX`.
pub fn to_index(n: usize) -> Result<Index> {
    Index::try_from(n).map_err(|_| Error::IndexOutOfRange(format!("{} exceeds Index::MAX", n)))
}

/// Convert an [`Index`] back into a native size
///
/// # Errors
/// Returns `Error::IndexOutOfRange` if `i` is negative or does not fit `usize`.
pub fn to_usize(i: Index) -> Result<usize> {
    usize::try_from(i).map_err(|_| Error::IndexOutOfRange(format!("{} is not a valid size", i)))
}
