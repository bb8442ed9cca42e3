//! The user-facing persistent map handle.

use std::fmt;
use std::ops;
use std::rc::Rc;

use crate::hash::HashValue;
use crate::iter::Iter;
use crate::node::Node;
use crate::ops::{get, insert, iterate, remove};
use crate::owner::OwnerId;

/// A persistent (or, between [`as_mutable`](Self::as_mutable) and
/// [`as_immutable`](Self::as_immutable), transient) hash map based on a
/// CHAMP trie.
///
/// Cloning is O(1): clones share the same interior `Rc` nodes. Every write
/// method takes `&self` and returns a new handle; the receiver is left
/// untouched and remains valid, sharing all subtrees the write did not
/// touch with the handle it returned.
pub struct ChampMap<K, V> {
    root: Option<Rc<Node<K, V>>>,
    size: usize,
    owner: Option<OwnerId>,
}

impl<K, V> Clone for ChampMap<K, V> {
    fn clone(&self) -> Self {
        Self { root: self.root.clone(), size: self.size, owner: self.owner }
    }
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> ChampMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, size: 0, owner: None }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if `self` and `other` currently share the same root
    /// node — a stronger, cheaper check than structural equality.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns an iterator over `(&K, &V)` pairs, in ascending DFS order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_ref())
    }

    /// Visits every entry in true slot-index order, optionally reversed,
    /// stopping early if `f` returns `false`.
    ///
    /// Returns `true` iff the traversal ran to completion.
    pub fn iterate(&self, reverse: bool, f: impl FnMut(&K, &V) -> bool) -> bool {
        iterate::iterate(self.root.as_ref(), reverse, f)
    }

    /// Exposes the root `Rc` for structural-sharing assertions in this
    /// crate's own test suite; not part of the public API.
    #[cfg(test)]
    pub(crate) fn root_node(&self) -> Option<&Rc<Node<K, V>>> {
        self.root.as_ref()
    }
}

impl<K, V> Default for ChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: HashValue + Eq
// ---------------------------------------------------------------------------

impl<K: HashValue + Eq, V> ChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let node = self.root.as_deref()?;
        get::get_recursive(node, key.hash_value(), key, 0)
    }

    /// Returns the value associated with `key`, or `default` if absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: HashValue + Eq + Clone, V: Clone + PartialEq
// ---------------------------------------------------------------------------

impl<K: HashValue + Eq + Clone, V: Clone + PartialEq> ChampMap<K, V> {
    /// Returns a map with `(key, value)` bound.
    ///
    /// If the map already binds `key` to an equal `value`, returns a handle
    /// whose root is pointer-identical to the receiver's.
    #[must_use]
    pub fn set(&self, key: K, value: V) -> Self {
        let mut new = self.clone();
        new.set_mut(key, value);
        new
    }

    /// Mutates this handle in place, binding `(key, value)`.
    ///
    /// Outside a batch this still never disturbs the receiver's own
    /// structure — [`set`](Self::set) calls it on a fresh clone, which
    /// shares `self`'s root `Rc` and so never passes the uniqueness check
    /// below. Inside a [`with_mutations`](Self::with_mutations) batch,
    /// where the handle genuinely is the only reference to its root, the
    /// edit lands in the trie in place instead of path-copying.
    pub fn set_mut(&mut self, key: K, value: V) {
        let hash = key.hash_value();
        if let Some(node) = self.root.as_deref() {
            if get::get_recursive(node, hash, &key, 0) == Some(&value) {
                return;
            }
        }
        let mut did_add_leaf = false;
        insert::insert_at_root(&mut self.root, self.owner, hash, key, value, &mut did_add_leaf);
        self.size += usize::from(did_add_leaf);
    }

    /// Returns `set(key, f(get(&key)))`.
    #[must_use]
    pub fn update(&self, key: K, f: impl FnOnce(Option<&V>) -> V) -> Self {
        let new_value = f(self.get(&key));
        self.set(key, new_value)
    }

    /// Mutates this handle in place with `set_mut(key, f(get(&key)))`.
    pub fn update_mut(&mut self, key: K, f: impl FnOnce(Option<&V>) -> V) {
        let new_value = f(self.get(&key));
        self.set_mut(key, new_value);
    }

    /// Returns the empty map (persistent), or a cleared transient handle
    /// sharing this batch's owner token.
    #[must_use]
    pub fn clear(&self) -> Self {
        if self.size == 0 {
            return self.clone();
        }
        Self { root: None, size: 0, owner: self.owner }
    }

    /// Clears this handle in place.
    pub fn clear_mut(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// Promotes this handle to a transient: subsequent writes on the
    /// returned handle (and any clone of it) may edit nodes in place.
    #[must_use]
    pub fn as_mutable(&self) -> Self {
        if self.owner.is_some() {
            self.clone()
        } else {
            Self { root: self.root.clone(), size: self.size, owner: Some(OwnerId::fresh()) }
        }
    }

    /// Demotes this handle back to persistent. Existing interior nodes keep
    /// their batch tag, but since no handle will ever present that token
    /// again, they are unreachable as an edit target from this point on.
    #[must_use]
    pub fn as_immutable(&self) -> Self {
        Self { root: self.root.clone(), size: self.size, owner: None }
    }

    /// Runs `f` over a transient view of this map, then freezes the result.
    ///
    /// `f` receives `&mut Self` rather than consuming and returning a plain
    /// `Self`: a batch's in-place-edit optimization depends on the handle
    /// being edited having no live alias of its own root, and a `Self -> Self`
    /// closure signature cannot guarantee that (the old binding stays alive
    /// for the whole call). Threading `&mut Self` instead — the same shape
    /// `examples/Toughee-rpds`'s `insert_mut`/`remove_mut` use around
    /// `SharedPointer::make_mut` — means the closure body mutates the one
    /// live handle directly via `set_mut`/`delete_mut` and friends.
    ///
    /// Nested calls (when the receiver is already transient) share the
    /// outer batch's owner token instead of minting a new one.
    #[must_use]
    pub fn with_mutations(&self, f: impl FnOnce(&mut Self)) -> Self {
        if self.owner.is_some() {
            let mut transient = self.clone();
            f(&mut transient);
            transient
        } else {
            let mut transient = self.as_mutable();
            f(&mut transient);
            transient.as_immutable()
        }
    }
}

// ---------------------------------------------------------------------------
// Delete — K: HashValue + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K: HashValue + Eq + Clone, V: Clone> ChampMap<K, V> {
    /// Returns a map without `key`. Absent key returns a pointer-identical
    /// handle; deleting the last entry returns the empty map.
    #[must_use]
    pub fn delete(&self, key: &K) -> Self {
        let mut new = self.clone();
        new.delete_mut(key);
        new
    }

    /// Mutates this handle in place, removing `key` if present. See
    /// [`set_mut`](Self::set_mut) for when this actually edits in place
    /// rather than path-copying.
    pub fn delete_mut(&mut self, key: &K) {
        let hash = key.hash_value();
        let Some(node) = self.root.as_deref() else { return };
        if get::get_recursive(node, hash, key, 0).is_none() {
            return;
        }
        let mut did_remove_leaf = false;
        remove::delete_at_root(&mut self.root, self.owner, hash, key, &mut did_remove_leaf);
        self.size -= usize::from(did_remove_leaf);
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> fmt::Debug for ChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChampMap").field("len", &self.size).finish_non_exhaustive()
    }
}

impl<K: HashValue + Eq, V: PartialEq> PartialEq for ChampMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && other.iter().all(|(k, v)| self.get(k) == Some(v))
    }
}

impl<K: HashValue + Eq + Clone, V: Clone + PartialEq> Extend<(K, V)> for ChampMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        *self = self.with_mutations(|m| {
            for (k, v) in iter {
                m.set_mut(k, v);
            }
        });
    }
}

impl<K: HashValue + Eq + Clone, V: Clone + PartialEq> FromIterator<(K, V)> for ChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: HashValue + Eq, V> ops::Index<&K> for ChampMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V> IntoIterator for &'a ChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
