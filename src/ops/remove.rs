//! Deletion operation — path-copy (or in-place, inside a batch) delete.
//!
//! Deliberately does not canonicalize: a child that becomes a single-leaf
//! subtree after a deletion is left in place rather than inlined back into
//! its parent (see the crate's design notes on single-child collapse). A
//! node that becomes *entirely* empty (no entries, no children) is still
//! removed from its parent — invariant 2 forbids a fully-empty node from
//! ever being materialized.
//!
//! As in `ops::insert`, every function here takes the node it edits as
//! `&mut Rc<Node<K, V>>` — a reference into the slot the `Rc` already lives
//! in — and recurses the same way into child slots, so the only strong
//! reference alive during an edit is the one already sitting in that slot.

use std::rc::Rc;

use crate::node::{self, Node, make_editable};
use crate::owner::OwnerId;

/// Deletes `key` from `*root`, if present, clearing `*root` to `None` if
/// the whole tree becomes empty.
///
/// `did_remove_leaf` is set to `true` iff a binding was actually removed.
pub fn delete_at_root<K, V>(
    root: &mut Option<Rc<Node<K, V>>>,
    owner: Option<OwnerId>,
    hash: u32,
    key: &K,
    did_remove_leaf: &mut bool,
) where
    K: Eq + Clone,
    V: Clone,
{
    let Some(slot) = root else { return };
    if delete(slot, owner, 0, hash, key, did_remove_leaf) {
        *root = None;
    }
}

/// Removes `key` from `*slot`. Returns `true` if `*slot`'s node became
/// empty and must be dropped from its parent (or clear the root).
fn delete<K, V>(
    slot: &mut Rc<Node<K, V>>,
    owner: Option<OwnerId>,
    shift: u32,
    hash: u32,
    key: &K,
    did_remove_leaf: &mut bool,
) -> bool
where
    K: Eq + Clone,
    V: Clone,
{
    if matches!(&**slot, Node::Collision { .. }) {
        delete_collision(slot, owner, key, did_remove_leaf)
    } else {
        delete_inner(slot, owner, shift, hash, key, did_remove_leaf)
    }
}

fn delete_inner<K, V>(
    slot: &mut Rc<Node<K, V>>,
    owner: Option<OwnerId>,
    shift: u32,
    hash: u32,
    key: &K,
    did_remove_leaf: &mut bool,
) -> bool
where
    K: Eq + Clone,
    V: Clone,
{
    let (data_map, node_map) = match &**slot {
        Node::Inner { data_map, node_map, .. } => (*data_map, *node_map),
        Node::Collision { .. } => unreachable!("delete_inner called on a collision node"),
    };
    let frag = node::fragment(hash, shift);
    let bit = node::mask(frag);

    if data_map & bit != 0 {
        let pos = node::index(data_map, bit);
        let key_matches = match &**slot {
            Node::Inner { entries, .. } => entries[pos].key == *key,
            Node::Collision { .. } => unreachable!(),
        };
        if !key_matches {
            return false;
        }

        *did_remove_leaf = true;
        let new_data_map = data_map & !bit;
        if new_data_map == 0 && node_map == 0 {
            return true;
        }

        let node = make_editable(slot, owner);
        if let Node::Inner { data_map: dm, entries, .. } = node {
            entries.remove(pos);
            *dm = new_data_map;
        }
        false
    } else if node_map & bit != 0 {
        let pos = node::index(node_map, bit);
        let node = make_editable(slot, owner);
        let Node::Inner { data_map: dm, node_map: nm, children, .. } = node else { unreachable!() };
        let child_emptied =
            delete(&mut children[pos], owner, shift + node::BITS_PER_LEVEL, hash, key, did_remove_leaf);

        if !child_emptied {
            return false;
        }

        children.remove(pos);
        *nm &= !bit;
        *dm == 0 && *nm == 0
    } else {
        false
    }
}

fn delete_collision<K, V>(
    slot: &mut Rc<Node<K, V>>,
    owner: Option<OwnerId>,
    key: &K,
    did_remove_leaf: &mut bool,
) -> bool
where
    K: Eq + Clone,
    V: Clone,
{
    let pos = match &**slot {
        Node::Collision { entries, .. } => entries.iter().position(|(k, _)| k == key),
        Node::Inner { .. } => unreachable!("delete_collision called on an inner node"),
    };
    let Some(pos) = pos else { return false };

    *did_remove_leaf = true;
    let len = match &**slot {
        Node::Collision { entries, .. } => entries.len(),
        Node::Inner { .. } => unreachable!(),
    };
    if len == 1 {
        return true;
    }

    let node = make_editable(slot, owner);
    if let Node::Collision { entries, .. } = node {
        entries.remove(pos);
    }
    false
}
