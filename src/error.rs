//! Error types surfaced by the core.

/// Errors raised by this crate's fallible operations.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChampError {
    /// A key could not be hashed.
    ///
    /// Reserved for API completeness: this crate requires every key type to
    /// implement [`HashValue`](crate::hash::HashValue) at compile time, so
    /// no value of any accepted key type reaches `update_in` or `merge`
    /// without already having a well-defined hash.
    #[error("key could not be hashed")]
    UnhashableKey,

    /// `update_in` descended through a path component that named a leaf
    /// value instead of a nested map, or reached an empty path where a
    /// nested map was required.
    #[error("key path does not resolve to a nested map")]
    InvalidKeyPath,
}
