//! Begrenzter Modell-Cache mit Verdrängung nach Einfügereihenfolge.

use super::ModelMesh;
use indexmap::IndexMap;
use std::sync::Arc;

/// Standard-Kapazität des Modell-Caches.
pub const MODEL_CACHE_CAPACITY: usize = 3;

/// Cache geladener Modelle, verdrängt den ältesten eingefügten Schlüssel
/// (kein LRU nach Zugriff).
#[derive(Debug)]
pub struct ModelCache {
    entries: IndexMap<String, Arc<ModelMesh>>,
    capacity: usize,
}

impl ModelCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Liefert einen geteilten Klon des gecachten Meshes.
    pub fn get(&self, key: &str) -> Option<Arc<ModelMesh>> {
        self.entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Schafft Platz für einen weiteren Eintrag. Liefert den verdrängten Schlüssel.
    pub fn make_room(&mut self) -> Option<String> {
        if self.entries.len() < self.capacity {
            return None;
        }
        self.entries.shift_remove_index(0).map(|(key, _)| key)
    }

    /// Fügt ein Modell ein; ein vorhandener Schlüssel behält seine Position.
    pub fn insert(&mut self, key: impl Into<String>, mesh: Arc<ModelMesh>) -> Option<String> {
        let key = key.into();
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = mesh;
            return None;
        }
        let evicted = self.make_room();
        self.entries.insert(key, mesh);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new(MODEL_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MeshBuilder;

    fn mesh() -> Arc<ModelMesh> {
        Arc::new(MeshBuilder::new().build())
    }

    #[test]
    fn evicts_oldest_inserted_not_least_recently_used() {
        let mut cache = ModelCache::new(3);
        cache.insert("ground", mesh());
        cache.insert("second", mesh());
        cache.insert("third", mesh());

        // Zugriff ändert die Reihenfolge nicht
        assert!(cache.get("ground").is_some());

        let evicted = cache.insert("main", mesh());
        assert_eq!(evicted.as_deref(), Some("ground"));
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["second", "third", "main"]);
    }

    #[test]
    fn reinserting_existing_key_does_not_evict() {
        let mut cache = ModelCache::new(2);
        cache.insert("a", mesh());
        cache.insert("b", mesh());
        assert!(cache.insert("a", mesh()).is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn make_room_only_when_full() {
        let mut cache = ModelCache::new(2);
        cache.insert("a", mesh());
        assert!(cache.make_room().is_none());
        cache.insert("b", mesh());
        assert_eq!(cache.make_room().as_deref(), Some("a"));
        assert_eq!(cache.len(), 1);
    }
}
