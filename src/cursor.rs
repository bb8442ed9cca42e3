//! Localized subtree view with change notification.

use crate::dynamic::Dynamic;
use crate::error::ChampError;
use crate::hash::HashValue;
use crate::map::ChampMap;

/// A handle onto the subtree at a fixed path within a map, with an optional
/// callback fired whenever [`update`](Self::update) actually changes that
/// subtree.
pub struct Cursor<K, V> {
    map: ChampMap<K, Dynamic<K, V>>,
    path: Vec<K>,
    on_change: Option<Box<dyn FnMut(&ChampMap<K, Dynamic<K, V>>, &ChampMap<K, Dynamic<K, V>>, &[K])>>,
}

impl<K: HashValue + Eq + Clone, V: Clone + PartialEq> Cursor<K, V> {
    /// Creates a cursor over `map` rooted at `path`.
    ///
    /// `on_change(new_map, old_map, path)` fires after [`update`](Self::update)
    /// whenever the write actually altered the subtree at `path`.
    #[must_use]
    pub fn new(
        map: &ChampMap<K, Dynamic<K, V>>,
        path: Vec<K>,
        on_change: Option<Box<dyn FnMut(&ChampMap<K, Dynamic<K, V>>, &ChampMap<K, Dynamic<K, V>>, &[K])>>,
    ) -> Self {
        Self { map: map.clone(), path, on_change }
    }

    /// Returns the value currently at this cursor's path, if any.
    #[must_use]
    pub fn get(&self) -> Option<&Dynamic<K, V>> {
        self.map.get_in(&self.path)
    }

    /// Returns the full map this cursor is a view onto.
    #[must_use]
    pub fn root(&self) -> &ChampMap<K, Dynamic<K, V>> {
        &self.map
    }

    /// Applies `f` to the value at this cursor's path and writes the result
    /// back, notifying `on_change` if the write actually changed anything.
    pub fn update(&mut self, f: impl FnOnce(Option<&Dynamic<K, V>>) -> Dynamic<K, V>) -> Result<(), ChampError> {
        let old_map = self.map.clone();
        let new_map = self.map.update_in(&self.path, f)?;
        if !new_map.ptr_eq(&old_map) {
            if let Some(on_change) = &mut self.on_change {
                on_change(&new_map, &old_map, &self.path);
            }
        }
        self.map = new_map;
        Ok(())
    }
}
