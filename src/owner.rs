//! Identity token authorizing in-place node edits during a batch.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Unique, unforgeable token minted once per `with_mutations`/`as_mutable` call.
///
/// Two tokens are equal only if they are the same token. A node tagged with
/// a token may be edited in place by whoever holds a matching, uniquely-held
/// `Rc`; everyone else treats the node as immutable.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Mints a fresh token, distinct from every token minted before it.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }
}
