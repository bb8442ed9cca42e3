//! Nested-path update over [`Dynamic`] values.

use crate::dynamic::Dynamic;
use crate::error::ChampError;
use crate::hash::HashValue;
use crate::map::ChampMap;

impl<K: HashValue + Eq + Clone, V: Clone + PartialEq> ChampMap<K, Dynamic<K, V>> {
    /// Applies `f` to the value found by walking `path`, writing the result
    /// back at that path and returning the updated map.
    ///
    /// An empty path applies `f` to the receiver itself (wrapped as a
    /// `Dynamic::Map`) and requires the result to still be a map. A path
    /// that descends through a `Dynamic::Leaf` before reaching its end
    /// fails with [`ChampError::InvalidKeyPath`].
    pub fn update_in(
        &self,
        path: &[K],
        f: impl FnOnce(Option<&Dynamic<K, V>>) -> Dynamic<K, V>,
    ) -> Result<Self, ChampError> {
        let Some((key, rest)) = path.split_first() else {
            let result = f(Some(&Dynamic::Map(self.clone())));
            return result.into_map().ok_or(ChampError::InvalidKeyPath);
        };

        let nested = self.get(key);

        if rest.is_empty() {
            let new_value = f(nested);
            return Ok(self.set(key.clone(), new_value));
        }

        let nested_map = match nested {
            Some(Dynamic::Map(m)) => m.clone(),
            Some(Dynamic::Leaf(_)) => return Err(ChampError::InvalidKeyPath),
            None => ChampMap::new(),
        };

        let new_nested = nested_map.update_in(rest, f)?;
        Ok(self.set(key.clone(), Dynamic::Map(new_nested)))
    }

    /// Reads the value found by walking `path`, without modifying anything.
    ///
    /// An empty path has no value to return at the top level (the receiver
    /// is a map, not a `Dynamic`) and yields `None`.
    #[must_use]
    pub fn get_in(&self, path: &[K]) -> Option<&Dynamic<K, V>> {
        let (key, rest) = path.split_first()?;
        let value = self.get(key)?;
        if rest.is_empty() {
            Some(value)
        } else {
            match value {
                Dynamic::Map(m) => m.get_in(rest),
                Dynamic::Leaf(_) => None,
            }
        }
    }
}
