//! Lookup operation — traverses the trie to find a key.

use crate::node::{self, Node};

/// Searches for `key` in the subtree rooted at `node`.
pub fn get_recursive<'a, K, V>(node: &'a Node<K, V>, hash: u32, key: &K, shift: u32) -> Option<&'a V>
where
    K: Eq,
{
    match node {
        Node::Inner { data_map, node_map, entries, children, .. } => {
            let frag = node::fragment(hash, shift);
            let bit = node::mask(frag);

            if data_map & bit != 0 {
                let pos = node::index(*data_map, bit);
                let entry = &entries[pos];
                if entry.hash == hash && entry.key == *key { Some(&entry.value) } else { None }
            } else if node_map & bit != 0 {
                let pos = node::index(*node_map, bit);
                get_recursive(&children[pos], hash, key, shift + node::BITS_PER_LEVEL)
            } else {
                None
            }
        }
        Node::Collision { hash: node_hash, entries, .. } => {
            if hash != *node_hash {
                return None;
            }
            entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
        }
    }
}
