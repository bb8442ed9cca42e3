//! Recursive nesting vehicle for `update_in` and the deep-merge family.
//!
//! A dynamically-typed host language can treat "a plain value" and "a map
//! of more values of the same shape" as the same kind of thing at runtime.
//! A statically-typed port cannot, without naming the sum type explicitly
//! once: every nested structure `update_in`/`merge_deep` walk is built out
//! of `Dynamic<K, V>` values.

use std::fmt;

use crate::map::ChampMap;

/// Either a plain value, or a nested map of more `Dynamic` values.
pub enum Dynamic<K, V> {
    /// A terminal value.
    Leaf(V),
    /// A nested map.
    Map(ChampMap<K, Dynamic<K, V>>),
}

impl<K, V> Dynamic<K, V> {
    /// Returns the leaf value, if this is [`Dynamic::Leaf`].
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&V> {
        match self {
            Self::Leaf(v) => Some(v),
            Self::Map(_) => None,
        }
    }

    /// Returns the nested map, if this is [`Dynamic::Map`].
    #[must_use]
    pub const fn as_map(&self) -> Option<&ChampMap<K, Self>> {
        match self {
            Self::Map(m) => Some(m),
            Self::Leaf(_) => None,
        }
    }

    /// Consumes `self`, returning the nested map if it was [`Dynamic::Map`].
    #[must_use]
    pub fn into_map(self) -> Option<ChampMap<K, Self>> {
        match self {
            Self::Map(m) => Some(m),
            Self::Leaf(_) => None,
        }
    }
}

impl<K, V> Clone for Dynamic<K, V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(v) => Self::Leaf(v.clone()),
            Self::Map(m) => Self::Map(m.clone()),
        }
    }
}

impl<K, V> PartialEq for Dynamic<K, V>
where
    K: crate::hash::HashValue + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<K, V> fmt::Debug for Dynamic<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(v) => f.debug_tuple("Leaf").field(v).finish(),
            Self::Map(m) => f.debug_tuple("Map").field(m).finish(),
        }
    }
}
