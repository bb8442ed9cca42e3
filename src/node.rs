//! CHAMP trie node types and bitmap helpers.

use std::fmt;
use std::rc::Rc;

use crate::owner::OwnerId;

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Last shift at which a 32-bit hash still has unconsumed bits.
pub const MAX_SHIFT: u32 = 30;

/// Inline entry storing a key-value pair with its precomputed hash.
pub struct Entry<K, V> {
    /// Precomputed 32-bit hash of the key.
    pub hash: u32,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

impl<K: Clone, V: Clone> Clone for Entry<K, V> {
    fn clone(&self) -> Self {
        Self { hash: self.hash, key: self.key.clone(), value: self.value.clone() }
    }
}

/// A node of the trie.
///
/// Two variants, matching the spec's `BitmapIndexedNode` / `HashCollisionNode`:
/// - [`Inner`](Self::Inner) — bitmap-compressed node at depth `d`.
/// - [`Collision`](Self::Collision) — linear node for full hash collisions.
pub enum Node<K, V> {
    /// Bitmap-compressed inner node.
    ///
    /// Invariant: `data_map & node_map == 0` (disjoint positions).
    Inner {
        /// Bitmap of positions occupied by inline entries.
        data_map: u32,
        /// Bitmap of positions occupied by child subtrees.
        node_map: u32,
        /// Inline entries, packed in ascending bit-position order.
        entries: Vec<Entry<K, V>>,
        /// Child subtrees, packed in ascending bit-position order.
        children: Vec<Rc<Node<K, V>>>,
        /// Batch this node may be edited in place under, if any.
        owner: Option<OwnerId>,
    },
    /// Collision node for keys that share a full hash.
    ///
    /// Invariant: `entries.len() >= 2`.
    Collision {
        /// The shared hash value.
        hash: u32,
        /// All entries sharing `hash`; keys are pairwise distinct under `Eq`.
        entries: Vec<(K, V)>,
        /// Batch this node may be edited in place under, if any.
        owner: Option<OwnerId>,
    },
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & 0x1F
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`: the number of set
/// bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Node accessors
// ---------------------------------------------------------------------------

impl<K, V> Node<K, V> {
    /// Returns the owner token this node may be edited under, if any.
    #[must_use]
    pub const fn owner_tag(&self) -> Option<OwnerId> {
        match self {
            Self::Inner { owner, .. } | Self::Collision { owner, .. } => *owner,
        }
    }

    /// Returns the number of inline data entries.
    #[must_use]
    pub fn data_len(&self) -> usize {
        match self {
            Self::Inner { data_map, .. } => data_map.count_ones() as usize,
            Self::Collision { entries, .. } => entries.len(),
        }
    }

    /// Returns the number of child subtrees (always 0 for collision nodes).
    #[must_use]
    pub fn children_len(&self) -> usize {
        match self {
            Self::Inner { node_map, .. } => node_map.count_ones() as usize,
            Self::Collision { .. } => 0,
        }
    }
}

impl<K: Clone, V: Clone> Node<K, V> {
    /// Shallow-clones this node's contents, tagging the copy with `owner`.
    ///
    /// Entries are deep-cloned (they own `K`/`V` data); children are cheap
    /// `Rc` clones, not recursively copied — this is the path-copy step,
    /// not a deep copy of the subtree.
    #[must_use]
    pub fn shallow_clone(&self, owner: Option<OwnerId>) -> Self {
        match self {
            Self::Inner { data_map, node_map, entries, children, .. } => Self::Inner {
                data_map: *data_map,
                node_map: *node_map,
                entries: entries.clone(),
                children: children.clone(),
                owner,
            },
            Self::Collision { hash, entries, .. } => {
                Self::Collision { hash: *hash, entries: entries.clone(), owner }
            }
        }
    }
}

/// Ensures `*slot` is uniquely held and tagged with `owner`, then returns a
/// mutable reference into it so the caller can edit fields directly.
///
/// `slot` is a mutable *reference* into wherever the `Rc` lives (a field, a
/// `Vec` element) rather than an owned `Rc` passed by value: taking it by
/// reference, and recursing the same way into child slots, means the only
/// strong reference this function ever sees is the one already sitting in
/// that slot — callers never hold a second clone alongside it. That is what
/// lets `Rc::strong_count(slot) == 1` actually hold when a node is uniquely
/// owned by the current batch, so the in-place branch below is reachable
/// rather than dead code.
///
/// If the node is shared, or tagged for a different (or no) batch, `*slot`
/// is replaced with a freshly tagged shallow copy first.
pub fn make_editable<'a, K: Clone, V: Clone>(
    slot: &'a mut Rc<Node<K, V>>,
    owner: Option<OwnerId>,
) -> &'a mut Node<K, V> {
    let eligible = owner.is_some() && slot.owner_tag() == owner && Rc::strong_count(slot) == 1;
    if !eligible {
        *slot = Rc::new(slot.shallow_clone(owner));
    }
    Rc::get_mut(slot).expect("node is uniquely held immediately after the check above")
}

impl<K, V> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner { data_map, node_map, .. } => f
                .debug_struct("Inner")
                .field("data_map", &format_args!("{data_map:#034b}"))
                .field("node_map", &format_args!("{node_map:#034b}"))
                .finish_non_exhaustive(),
            Self::Collision { hash, entries, .. } => f
                .debug_struct("Collision")
                .field("hash", hash)
                .field("len", &entries.len())
                .finish_non_exhaustive(),
        }
    }
}
