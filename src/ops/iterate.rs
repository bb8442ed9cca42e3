//! Visitor-style traversal in true slot-index order.
//!
//! Unlike a DFS that walks all data entries before all children, this walks
//! the union of `data_map`/`node_map` bit positions in a single ascending
//! (or, when `reverse`, descending) pass — entries and children interleave
//! exactly as their slots are ordered.

use std::rc::Rc;

use crate::node::{self, Node};

/// Visits every `(key, value)` reachable from `root`, in slot-index order.
///
/// Returns `true` if the traversal ran to completion, `false` if `f`
/// requested an early exit by returning `false`.
pub fn iterate<K, V>(root: Option<&Rc<Node<K, V>>>, reverse: bool, mut f: impl FnMut(&K, &V) -> bool) -> bool {
    match root {
        None => true,
        Some(node) => visit(node, reverse, &mut f),
    }
}

fn visit<K, V>(node: &Node<K, V>, reverse: bool, f: &mut dyn FnMut(&K, &V) -> bool) -> bool {
    match node {
        Node::Inner { data_map, node_map, entries, children, .. } => {
            let combined = data_map | node_map;
            let positions: Vec<u32> = (0..32).filter(|i| combined & (1 << i) != 0).collect();

            let visit_one = |i: u32, f: &mut dyn FnMut(&K, &V) -> bool| -> bool {
                let bit = node::mask(i);
                if data_map & bit != 0 {
                    let pos = node::index(*data_map, bit);
                    let entry = &entries[pos];
                    f(&entry.key, &entry.value)
                } else {
                    let pos = node::index(*node_map, bit);
                    visit(&children[pos], reverse, f)
                }
            };

            if reverse {
                positions.into_iter().rev().all(|i| visit_one(i, f))
            } else {
                positions.into_iter().all(|i| visit_one(i, f))
            }
        }
        Node::Collision { entries, .. } => {
            if reverse {
                entries.iter().rev().all(|(k, v)| f(k, v))
            } else {
                entries.iter().all(|(k, v)| f(k, v))
            }
        }
    }
}
