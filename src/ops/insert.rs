//! Insertion operation — path-copy (or in-place, inside a batch) insert.
//!
//! Every function here takes the node it edits as `&mut Rc<Node<K, V>>` — a
//! mutable reference into the slot the `Rc` already lives in (a field, a
//! `Vec` element) — and recurses the same way into child slots. No function
//! in this module ever clones an `Rc` just to hold it alongside the one
//! being edited, which is what lets `make_editable`'s uniqueness check
//! actually succeed during a batch.
//!
//! Callers are expected to have already established that the insert changes
//! the map (see [`crate::map::ChampMap::set_mut`]'s up-front equality
//! check); the entry point here always performs at least one edit.

use std::rc::Rc;

use crate::node::{self, Entry, Node, make_editable};
use crate::owner::OwnerId;

/// Inserts `(key, value)` into `*root`, creating a fresh single-leaf root
/// if the map was empty.
///
/// `did_add_leaf` is set to `true` iff this call bound a key that was not
/// previously present.
pub fn insert_at_root<K, V>(
    root: &mut Option<Rc<Node<K, V>>>,
    owner: Option<OwnerId>,
    hash: u32,
    key: K,
    value: V,
    did_add_leaf: &mut bool,
) where
    K: Eq + Clone,
    V: Clone,
{
    match root {
        Some(slot) => set(slot, owner, 0, hash, key, value, did_add_leaf),
        None => {
            *did_add_leaf = true;
            let bit = node::mask(node::fragment(hash, 0));
            *root = Some(Rc::new(Node::Inner {
                data_map: bit,
                node_map: 0,
                entries: vec![Entry { hash, key, value }],
                children: vec![],
                owner,
            }));
        }
    }
}

fn set<K, V>(
    slot: &mut Rc<Node<K, V>>,
    owner: Option<OwnerId>,
    shift: u32,
    hash: u32,
    key: K,
    value: V,
    did_add_leaf: &mut bool,
) where
    K: Eq + Clone,
    V: Clone,
{
    if matches!(&**slot, Node::Collision { .. }) {
        let node_hash = match &**slot {
            Node::Collision { hash, .. } => *hash,
            Node::Inner { .. } => unreachable!(),
        };
        set_collision(slot, owner, node_hash, hash, key, value, did_add_leaf);
    } else {
        set_inner(slot, owner, shift, hash, key, value, did_add_leaf);
    }
}

#[allow(clippy::too_many_lines)]
fn set_inner<K, V>(
    slot: &mut Rc<Node<K, V>>,
    owner: Option<OwnerId>,
    shift: u32,
    hash: u32,
    key: K,
    value: V,
    did_add_leaf: &mut bool,
) where
    K: Eq + Clone,
    V: Clone,
{
    let (data_map, node_map) = match &**slot {
        Node::Inner { data_map, node_map, .. } => (*data_map, *node_map),
        Node::Collision { .. } => unreachable!("set_inner called on a collision node"),
    };
    let frag = node::fragment(hash, shift);
    let bit = node::mask(frag);

    if data_map & bit != 0 {
        let pos = node::index(data_map, bit);
        let key_matches = match &**slot {
            Node::Inner { entries, .. } => entries[pos].key == key,
            Node::Collision { .. } => unreachable!(),
        };

        if key_matches {
            let node = make_editable(slot, owner);
            if let Node::Inner { entries, .. } = node {
                entries[pos].value = value;
                entries[pos].hash = hash;
            }
            return;
        }

        *did_add_leaf = true;
        let (existing_hash, existing_key, existing_value) = match &**slot {
            Node::Inner { entries, .. } => {
                let e = &entries[pos];
                (e.hash, e.key.clone(), e.value.clone())
            }
            Node::Collision { .. } => unreachable!(),
        };

        let new_data_map = data_map & !bit;
        let new_node_map = node_map | bit;
        let child_pos = node::index(new_node_map, bit);

        let new_child = if existing_hash == hash {
            Rc::new(Node::Collision {
                hash,
                entries: vec![(existing_key, existing_value), (key, value)],
                owner,
            })
        } else {
            create_subtree(
                owner,
                existing_hash,
                existing_key,
                existing_value,
                hash,
                key,
                value,
                shift + node::BITS_PER_LEVEL,
            )
        };

        let node = make_editable(slot, owner);
        if let Node::Inner { data_map: dm, node_map: nm, entries, children, .. } = node {
            entries.remove(pos);
            children.insert(child_pos, new_child);
            *dm = new_data_map;
            *nm = new_node_map;
        }
    } else if node_map & bit != 0 {
        let pos = node::index(node_map, bit);
        let node = make_editable(slot, owner);
        let Node::Inner { children, .. } = node else { unreachable!() };
        set(&mut children[pos], owner, shift + node::BITS_PER_LEVEL, hash, key, value, did_add_leaf);
    } else {
        *did_add_leaf = true;
        let new_data_map = data_map | bit;
        let insert_at = node::index(new_data_map, bit);

        let node = make_editable(slot, owner);
        if let Node::Inner { data_map: dm, entries, .. } = node {
            entries.insert(insert_at, Entry { hash, key, value });
            *dm = new_data_map;
        }
    }
}

fn set_collision<K, V>(
    slot: &mut Rc<Node<K, V>>,
    owner: Option<OwnerId>,
    node_hash: u32,
    hash: u32,
    key: K,
    value: V,
    did_add_leaf: &mut bool,
) where
    K: Eq + Clone,
    V: Clone,
{
    debug_assert_eq!(hash, node_hash, "collision node reached at mismatched hash");

    let pos = match &**slot {
        Node::Collision { entries, .. } => entries.iter().position(|(k, _)| *k == key),
        Node::Inner { .. } => unreachable!("set_collision called on an inner node"),
    };

    let node = make_editable(slot, owner);
    let Node::Collision { entries, .. } = node else { unreachable!() };
    match pos {
        Some(i) => entries[i] = (key, value),
        None => {
            *did_add_leaf = true;
            entries.push((key, value));
        }
    }
}

/// Builds a subtree holding two entries whose hashes diverge at or after
/// `shift`, descending one level at a time until the fragments differ or
/// the hash is exhausted (at which point both land in a collision node).
#[allow(clippy::too_many_arguments)]
fn create_subtree<K, V>(
    owner: Option<OwnerId>,
    h1: u32,
    k1: K,
    v1: V,
    h2: u32,
    k2: K,
    v2: V,
    shift: u32,
) -> Rc<Node<K, V>>
where
    K: Clone,
    V: Clone,
{
    if shift > node::MAX_SHIFT {
        return Rc::new(Node::Collision { hash: h1, entries: vec![(k1, v1), (k2, v2)], owner });
    }

    let f1 = node::fragment(h1, shift);
    let f2 = node::fragment(h2, shift);

    if f1 == f2 {
        let child = create_subtree(owner, h1, k1, v1, h2, k2, v2, shift + node::BITS_PER_LEVEL);
        Rc::new(Node::Inner {
            data_map: 0,
            node_map: node::mask(f1),
            entries: vec![],
            children: vec![child],
            owner,
        })
    } else {
        let (e1, e2) = if f1 < f2 {
            (Entry { hash: h1, key: k1, value: v1 }, Entry { hash: h2, key: k2, value: v2 })
        } else {
            (Entry { hash: h2, key: k2, value: v2 }, Entry { hash: h1, key: k1, value: v1 })
        };
        Rc::new(Node::Inner {
            data_map: node::mask(f1) | node::mask(f2),
            node_map: 0,
            entries: vec![e1, e2],
            children: vec![],
            owner,
        })
    }
}
