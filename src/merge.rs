//! `merge` / `merge_with` / `merge_deep` / `merge_deep_with`.

use crate::dynamic::Dynamic;
use crate::hash::HashValue;
use crate::map::ChampMap;

impl<K: HashValue + Eq + Clone, V: Clone + PartialEq> ChampMap<K, V> {
    /// Folds a sequence of entry-providing inputs into the receiver.
    /// A later occurrence of a key wins over an earlier one.
    #[must_use]
    pub fn merge<I, J>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (K, V)>,
    {
        self.with_mutations(|m| {
            for (k, v) in others.into_iter().flatten() {
                m.set_mut(k, v);
            }
        })
    }

    /// Like [`merge`](Self::merge), but a key present in both the receiver
    /// and an input resolves via `f(existing, incoming)` instead of the
    /// incoming value winning outright.
    #[must_use]
    pub fn merge_with<I, J, F>(&self, f: F, others: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (K, V)>,
        F: Fn(&V, &V) -> V,
    {
        self.with_mutations(|m| {
            for (k, v) in others.into_iter().flatten() {
                let new_value = match m.get(&k) {
                    Some(existing) => f(existing, &v),
                    None => v,
                };
                m.set_mut(k, new_value);
            }
        })
    }
}

impl<K: HashValue + Eq + Clone, V: Clone + PartialEq> ChampMap<K, Dynamic<K, V>> {
    /// Deep-merges a sequence of entry-providing inputs: where both the
    /// existing and incoming value at a key are nested maps, merges them
    /// recursively; otherwise the incoming value replaces the existing one.
    #[must_use]
    pub fn merge_deep<I, J>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (K, Dynamic<K, V>)>,
    {
        self.with_mutations(|m| {
            for (k, incoming) in others.into_iter().flatten() {
                m.merge_deep_one_mut(k, incoming);
            }
        })
    }

    /// Like [`merge_deep`](Self::merge_deep), but a leaf-vs-leaf collision
    /// resolves via `f(existing, incoming)` instead of the incoming leaf
    /// winning outright.
    #[must_use]
    pub fn merge_deep_with<I, J, F>(&self, f: &F, others: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (K, Dynamic<K, V>)>,
        F: Fn(&V, &V) -> V,
    {
        self.with_mutations(|m| {
            for (k, incoming) in others.into_iter().flatten() {
                m.merge_deep_with_one_mut(k, incoming, f);
            }
        })
    }

    fn merge_deep_one_mut(&mut self, key: K, incoming: Dynamic<K, V>) {
        match (self.get(&key), &incoming) {
            (Some(Dynamic::Map(existing_map)), Dynamic::Map(_)) => {
                let existing_map = existing_map.clone();
                let Dynamic::Map(incoming_map) = incoming else { unreachable!() };
                let incoming_entries: Vec<_> =
                    incoming_map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                let merged = existing_map.merge_deep(std::iter::once(incoming_entries));
                self.set_mut(key, Dynamic::Map(merged));
            }
            _ => self.set_mut(key, incoming),
        }
    }

    fn merge_deep_with_one_mut<F>(&mut self, key: K, incoming: Dynamic<K, V>, f: &F)
    where
        F: Fn(&V, &V) -> V,
    {
        match (self.get(&key), &incoming) {
            (Some(Dynamic::Map(existing_map)), Dynamic::Map(_)) => {
                let existing_map = existing_map.clone();
                let Dynamic::Map(incoming_map) = incoming else { unreachable!() };
                let incoming_entries: Vec<_> =
                    incoming_map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                let merged = existing_map.merge_deep_with(f, std::iter::once(incoming_entries));
                self.set_mut(key, Dynamic::Map(merged));
            }
            (Some(Dynamic::Leaf(existing_v)), Dynamic::Leaf(incoming_v)) => {
                let merged_leaf = f(existing_v, incoming_v);
                self.set_mut(key, Dynamic::Leaf(merged_leaf));
            }
            _ => self.set_mut(key, incoming),
        }
    }
}
