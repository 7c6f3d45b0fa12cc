//! Persisted set of completed module identifiers

use crate::store::KeyValueStore;

/// Insertion-ordered set of completed module ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: Vec<String>,
}

impl CompletionSet {
    /// Load the set stored under `key`
    ///
    /// Absent or malformed data yields an empty set. Ids for which `is_known`
    /// returns false are dropped so the set always matches the loaded guide.
    pub fn load(store: &impl KeyValueStore, key: &str, is_known: impl Fn(&str) -> bool) -> Self {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read completion state: {}", e);
                return Self::default();
            }
        };

        let stored: Vec<String> = match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::debug!("Ignoring malformed completion state: {}", e);
                return Self::default();
            }
        };

        let mut set = Self::default();
        for id in stored {
            if is_known(&id) {
                set.insert(&id);
            } else {
                tracing::debug!(id = %id, "Dropping unknown module from completion state");
            }
        }
        set
    }

    /// Persist the set as a JSON array under `key`
    ///
    /// Failures are logged, never returned.
    pub fn save(&self, store: &mut impl KeyValueStore, key: &str) {
        let json = match serde_json::to_string(&self.ids) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize completion state: {}", e);
                return;
            }
        };
        if let Err(e) = store.set(key, &json) {
            tracing::warn!("Failed to save completion state: {}", e);
        }
    }

    /// Whether `id` is completed
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Mark `id` completed, returns false if it already was
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Unmark `id`, returns false if it was not completed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        self.ids.len() < before
    }

    /// Flip the completed flag, returns the new value
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.insert(id)
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of completed modules
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is completed
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in completion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const KEY: &str = "completedModules";

    fn any_known(_: &str) -> bool {
        true
    }

    #[test]
    fn absent_value_is_empty() {
        let store = MemoryStore::new();
        assert!(CompletionSet::load(&store, KEY, any_known).is_empty());
    }

    #[test]
    fn malformed_value_is_empty() {
        for raw in ["not json", "{\"a\":1}", "[1,2]", "null", ""] {
            let store = MemoryStore::with_entry(KEY, raw);
            assert!(CompletionSet::load(&store, KEY, any_known).is_empty(), "{raw}");
        }
    }

    #[test]
    fn unknown_ids_are_dropped() {
        let store = MemoryStore::with_entry(KEY, r#"["a","stale","b"]"#);
        let set = CompletionSet::load(&store, KEY, |id| id != "stale");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn duplicate_ids_collapse() {
        let store = MemoryStore::with_entry(KEY, r#"["a","a"]"#);
        assert_eq!(CompletionSet::load(&store, KEY, any_known).len(), 1);
    }

    #[test]
    fn save_writes_ordered_array() {
        let mut set = CompletionSet::default();
        set.insert("b");
        set.insert("a");

        let mut store = MemoryStore::new();
        set.save(&mut store, KEY);
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some(r#"["b","a"]"#));
    }

    #[test]
    fn toggle_flips_membership() {
        let mut set = CompletionSet::default();
        assert!(set.toggle("a"));
        assert!(set.contains("a"));
        assert!(!set.toggle("a"));
        assert!(!set.contains("a"));
    }

    proptest! {
        #[test]
        fn save_then_load_round_trips(ids in proptest::collection::vec("[a-z]{1,6}", 0..12)) {
            let mut set = CompletionSet::default();
            for id in &ids {
                set.insert(id);
            }

            let mut store = MemoryStore::new();
            set.save(&mut store, KEY);
            let loaded = CompletionSet::load(&store, KEY, any_known);

            prop_assert_eq!(loaded, set);
        }
    }
}
