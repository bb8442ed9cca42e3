//! A persistent hash map based on a CHAMP trie.
//!
//! CHAMP (Compressed Hash-Array Mapped Prefix-tree) is a refined HAMT that
//! splits each interior node's bitmap into a data map and a node map,
//! packing inline entries and child subtrees into two dense side-by-side
//! vectors instead of one combined sparse array.
//!
//! # Key properties
//!
//! - **Structural sharing**: every write returns a new [`ChampMap`] that
//!   shares all untouched subtrees with the map it was derived from; the
//!   original remains valid and unchanged.
//! - **Transient batches**: [`ChampMap::with_mutations`] authorizes a scoped
//!   sequence of writes to edit nodes in place instead of path-copying,
//!   without breaking the persistent guarantee for every other handle.
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`.
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cursor;
pub mod dynamic;
pub mod error;
pub mod hash;
pub mod iter;

mod map;
mod merge;
mod node;
mod ops;
mod owner;
mod update_in;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use dynamic::Dynamic;
pub use error::ChampError;
pub use map::ChampMap;
