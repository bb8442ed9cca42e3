//! Recursive trie operations, one module per operation.

pub mod get;
pub mod insert;
pub mod iterate;
pub mod remove;
