//! In-Memory-Backend für Tests und den Offline-Betrieb.
//!
//! Zählt Aufrufe pro Dienst, damit Tests Cache- und Debounce-Verhalten
//! prüfen können, und kann Fehler gezielt simulieren.

use super::{
    BlacklistEntry, BlacklistStore, DownloadProgress, MetadataLookup, MetadataStore, ModelSource,
    PresetStore, SaveOutcome, ServiceError,
};
use crate::core::{CameraViewpoint, ElementId, MeshAsset, ModelMesh, PresetSlot, PresetSlots, SlotIndex};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Aufrufzähler pro Dienstfunktion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub model_fetches: usize,
    pub metadata_lookups: usize,
    pub blacklist_loads: usize,
    pub blacklist_adds: usize,
    pub preset_lists: usize,
    pub preset_gets: usize,
    pub preset_mutations: usize,
}

#[derive(Default)]
struct Inner {
    models: HashMap<String, MeshAsset>,
    metadata: HashMap<(String, u32), serde_json::Map<String, serde_json::Value>>,
    blacklist: BTreeMap<(u32, String), BlacklistEntry>,
    presets: HashMap<String, PresetSlots>,
    /// Erzwungener Fehlerstatus für Metadaten-Abfragen
    metadata_failure: Option<ServiceError>,
    /// Erzwungener Fehler für Preset-Aufrufe
    preset_failure: Option<ServiceError>,
    /// Erzwungener Fehler für das Laden der Blacklist
    blacklist_failure: Option<ServiceError>,
    calls: CallCounts,
}

/// Dienste-Implementierung ohne Netzwerk.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, ServiceError> {
        self.inner
            .lock()
            .map_err(|_| ServiceError::Unavailable("In-Memory-Backend gesperrt".into()))
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        match self.inner.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    /// Hinterlegt ein Modell-Asset.
    pub fn insert_model(&self, key: &str, asset: MeshAsset) {
        self.with(|inner| {
            inner.models.insert(key.to_string(), asset);
        });
    }

    /// Hinterlegt einen Metadaten-Datensatz.
    pub fn insert_metadata(
        &self,
        model: &str,
        element: u32,
        record: serde_json::Map<String, serde_json::Value>,
    ) {
        self.with(|inner| {
            inner.metadata.insert((model.to_string(), element), record);
        });
    }

    /// Belegt einen Preset-Slot direkt.
    pub fn insert_preset(&self, model: &str, slot: PresetSlot) {
        self.with(|inner| inner.presets.entry(model.to_string()).or_default().set(slot));
    }

    /// Simuliert Fehler bei Metadaten-Abfragen (`None` = normal).
    pub fn fail_metadata(&self, failure: Option<ServiceError>) {
        self.with(|inner| inner.metadata_failure = failure);
    }

    /// Simuliert Fehler bei Preset-Aufrufen (`None` = normal).
    pub fn fail_presets(&self, failure: Option<ServiceError>) {
        self.with(|inner| inner.preset_failure = failure);
    }

    /// Simuliert Fehler beim Laden der Blacklist (`None` = normal).
    pub fn fail_blacklist(&self, failure: Option<ServiceError>) {
        self.with(|inner| inner.blacklist_failure = failure);
    }

    pub fn calls(&self) -> CallCounts {
        self.with(|inner| inner.calls)
    }

    /// Anzahl Blacklist-Einträge für ein Element (über alle Modelle).
    pub fn blacklist_entries_for(&self, element: u32) -> usize {
        self.with(|inner| inner.blacklist.keys().filter(|(id, _)| *id == element).count())
    }

    pub fn preset(&self, model: &str, slot: SlotIndex) -> Option<PresetSlot> {
        self.with(|inner| inner.presets.get(model).and_then(|s| s.get(slot).cloned()))
    }

    /// Backend mit einfachen Quader-Modellen für alle Schlüssel (Offline-Betrieb).
    pub fn with_demo_models(keys: &[&str]) -> Self {
        let backend = Self::new();
        for (floor, key) in keys.iter().enumerate() {
            backend.insert_model(key, demo_asset(floor as u32));
        }
        backend
    }
}

/// Ein Geschoss aus Bodenplatte, vier Wänden und Stützen.
fn demo_asset(floor: u32) -> MeshAsset {
    use crate::core::{ElementProperties, MeshBuilder};
    use glam::Vec3;

    const SLAB: [f32; 4] = [0.55, 0.55, 0.58, 1.0];
    const WALL: [f32; 4] = [0.82, 0.80, 0.74, 1.0];
    const COLUMN: [f32; 4] = [0.62, 0.66, 0.72, 1.0];

    let base = floor * 100;
    let named = |name: &str, kind: &str| ElementProperties {
        name: Some(name.to_string()),
        object_type: Some(kind.to_string()),
        ..Default::default()
    };

    let mut builder = MeshBuilder::new()
        .add_box(base + 1, Vec3::new(-10.0, -0.3, -8.0), Vec3::new(10.0, 0.0, 8.0), SLAB)
        .with_properties(base + 1, named("Bodenplatte", "Slab"));

    let walls = [
        (Vec3::new(-10.0, 0.0, -8.0), Vec3::new(10.0, 3.0, -7.7)),
        (Vec3::new(-10.0, 0.0, 7.7), Vec3::new(10.0, 3.0, 8.0)),
        (Vec3::new(-10.0, 0.0, -7.7), Vec3::new(-9.7, 3.0, 7.7)),
        (Vec3::new(9.7, 0.0, -7.7), Vec3::new(10.0, 3.0, 7.7)),
    ];
    for (i, (min, max)) in walls.into_iter().enumerate() {
        let raw = base + 10 + i as u32;
        builder = builder
            .add_box(raw, min, max, WALL)
            .with_properties(raw, named(&format!("Außenwand {}", i + 1), "Basic Wall"));
    }

    for (i, x) in [-5.0_f32, 0.0, 5.0].into_iter().enumerate() {
        let raw = base + 20 + i as u32;
        builder = builder
            .add_box(raw, Vec3::new(x - 0.2, 0.0, -0.2), Vec3::new(x + 0.2, 3.0, 0.2), COLUMN)
            .with_properties(raw, named(&format!("Stütze {}", i + 1), "Column"));
    }

    builder.into_asset()
}

impl ModelSource for MemoryBackend {
    fn fetch_model(
        &self,
        key: &str,
        progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<ModelMesh, ServiceError> {
        let asset = {
            let mut inner = self.lock()?;
            inner.calls.model_fetches += 1;
            inner.models.get(key).cloned()
        };
        let asset = asset.ok_or_else(|| ServiceError::Asset(format!("Modell '{key}' unbekannt")))?;
        let size = asset.positions.len() as u64;
        progress(DownloadProgress {
            loaded: size,
            total: Some(size),
        });
        Ok(ModelMesh::from_asset(asset))
    }
}

impl MetadataStore for MemoryBackend {
    fn lookup(&self, model: &str, element: ElementId) -> Result<MetadataLookup, ServiceError> {
        let mut inner = self.lock()?;
        inner.calls.metadata_lookups += 1;
        if let Some(err) = inner.metadata_failure.clone() {
            return Err(err);
        }
        Ok(inner
            .metadata
            .get(&(model.to_string(), element.get()))
            .cloned()
            .map_or(MetadataLookup::NotFound, MetadataLookup::Found))
    }
}

impl BlacklistStore for MemoryBackend {
    fn load_all(&self) -> Result<Vec<BlacklistEntry>, ServiceError> {
        let mut inner = self.lock()?;
        inner.calls.blacklist_loads += 1;
        if let Some(err) = inner.blacklist_failure.clone() {
            return Err(err);
        }
        Ok(inner.blacklist.values().cloned().collect())
    }

    fn add(&self, entry: &BlacklistEntry) -> Result<(), ServiceError> {
        let mut inner = self.lock()?;
        inner.calls.blacklist_adds += 1;
        // Insert-or-Ignore auf (Element, Modell)
        inner
            .blacklist
            .entry((entry.element.get(), entry.model.clone()))
            .or_insert_with(|| entry.clone());
        Ok(())
    }
}

impl MemoryBackend {
    fn preset_guard(&self) -> Result<MutexGuard<'_, Inner>, ServiceError> {
        let inner = self.lock()?;
        if let Some(err) = inner.preset_failure.clone() {
            return Err(err);
        }
        Ok(inner)
    }
}

impl PresetStore for MemoryBackend {
    fn list(&self, model: &str) -> Result<Vec<PresetSlot>, ServiceError> {
        let mut inner = self.preset_guard()?;
        inner.calls.preset_lists += 1;
        Ok(inner
            .presets
            .get(model)
            .map(|slots| slots.iter().filter_map(|(_, s)| s.cloned()).collect())
            .unwrap_or_default())
    }

    fn get(&self, model: &str, slot: SlotIndex) -> Result<Option<PresetSlot>, ServiceError> {
        let mut inner = self.preset_guard()?;
        inner.calls.preset_gets += 1;
        Ok(inner.presets.get(model).and_then(|s| s.get(slot).cloned()))
    }

    fn upsert(
        &self,
        model: &str,
        slot: SlotIndex,
        label: &str,
        viewpoint: CameraViewpoint,
    ) -> Result<SaveOutcome, ServiceError> {
        let mut inner = self.preset_guard()?;
        inner.calls.preset_mutations += 1;
        let slots = inner.presets.entry(model.to_string()).or_default();
        let previous = slots.get(slot).cloned();
        slots.set(PresetSlot {
            index: slot,
            label: label.to_string(),
            viewpoint,
            created_at: previous.as_ref().and_then(|p| p.created_at.clone()),
            updated_at: None,
        });
        Ok(SaveOutcome {
            was_insert: previous.is_none(),
        })
    }

    fn delete(&self, model: &str, slot: SlotIndex) -> Result<bool, ServiceError> {
        let mut inner = self.preset_guard()?;
        inner.calls.preset_mutations += 1;
        Ok(inner
            .presets
            .get_mut(model)
            .and_then(|slots| slots.clear(slot))
            .is_some())
    }

    fn rename(&self, model: &str, slot: SlotIndex, label: &str) -> Result<bool, ServiceError> {
        let mut inner = self.preset_guard()?;
        inner.calls.preset_mutations += 1;
        let Some(slots) = inner.presets.get_mut(model) else {
            return Ok(false);
        };
        let Some(mut existing) = slots.get(slot).cloned() else {
            return Ok(false);
        };
        existing.label = label.to_string();
        slots.set(existing);
        Ok(true)
    }

    fn count(&self, model: &str) -> Result<usize, ServiceError> {
        let inner = self.preset_guard()?;
        Ok(inner.presets.get(model).map_or(0, PresetSlots::occupied_count))
    }
}
