//! Externe Dienste: Modellquelle, Metadaten, Blacklist und Preset-Speicher.
//!
//! Alle Aufrufe sind blockierend und laufen in Worker-Threads des
//! Task-Runners. Nicht gefundene Einträge sind eigene Ergebniswerte,
//! Transportfehler kommen als `ServiceError`.

mod error;
pub mod files;
pub mod http;
pub mod memory;

pub use error::ServiceError;
pub use files::FileModelSource;
pub use http::{HttpBackend, HttpModelSource};
pub use memory::MemoryBackend;

use crate::core::{CameraViewpoint, ElementId, ModelMesh, PresetSlot, SlotIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Download-Fortschritt eines Modell-Assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Anteil in `[0, 1]`, falls die Gesamtgröße bekannt ist.
    pub fn fraction(&self) -> Option<f32> {
        match self.total {
            Some(total) if total > 0 => Some((self.loaded as f32 / total as f32).min(1.0)),
            _ => None,
        }
    }
}

/// Liefert Modell-Meshes anhand ihres Schlüssels.
pub trait ModelSource: Send + Sync {
    fn fetch_model(
        &self,
        key: &str,
        progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<ModelMesh, ServiceError>;
}

/// Ergebnis einer Metadaten-Abfrage.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataLookup {
    /// Datensatz als Feldname → Wert
    Found(serde_json::Map<String, serde_json::Value>),
    /// Kein BIM-Datensatz für dieses Element
    NotFound,
}

/// BIM-Metadaten pro (Modell, Element).
pub trait MetadataStore: Send + Sync {
    fn lookup(&self, model: &str, element: ElementId) -> Result<MetadataLookup, ServiceError>;
}

/// Persistierter Blacklist-Eintrag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlacklistEntry {
    pub element: ElementId,
    pub model: String,
    pub subobject_name: String,
}

/// Persistente Blacklist (Insert-or-Ignore je Element und Modell).
pub trait BlacklistStore: Send + Sync {
    fn load_all(&self) -> Result<Vec<BlacklistEntry>, ServiceError>;
    fn add(&self, entry: &BlacklistEntry) -> Result<(), ServiceError>;
}

/// Ergebnis eines Upserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// `true` bei neuem Slot, `false` bei Überschreiben
    pub was_insert: bool,
}

/// Preset-Speicher, adressiert über (Modell, Slot).
pub trait PresetStore: Send + Sync {
    /// Alle belegten Slots eines Modells.
    fn list(&self, model: &str) -> Result<Vec<PresetSlot>, ServiceError>;
    /// Ein Slot; `None` bei leerem Slot.
    fn get(&self, model: &str, slot: SlotIndex) -> Result<Option<PresetSlot>, ServiceError>;
    fn upsert(
        &self,
        model: &str,
        slot: SlotIndex,
        label: &str,
        viewpoint: CameraViewpoint,
    ) -> Result<SaveOutcome, ServiceError>;
    /// `false`, wenn der Slot bereits leer war.
    fn delete(&self, model: &str, slot: SlotIndex) -> Result<bool, ServiceError>;
    /// `false`, wenn der Slot leer ist.
    fn rename(&self, model: &str, slot: SlotIndex, label: &str) -> Result<bool, ServiceError>;
    fn count(&self, model: &str) -> Result<usize, ServiceError>;
}

/// Bündel aller Dienste, das dem Controller übergeben wird.
#[derive(Clone)]
pub struct Services {
    pub models: Arc<dyn ModelSource>,
    pub metadata: Arc<dyn MetadataStore>,
    pub blacklist: Arc<dyn BlacklistStore>,
    pub presets: Arc<dyn PresetStore>,
}

impl Services {
    /// Alle Dienste aus einem In-Memory-Backend.
    pub fn in_memory(backend: Arc<MemoryBackend>) -> Self {
        Self {
            models: backend.clone(),
            metadata: backend.clone(),
            blacklist: backend.clone(),
            presets: backend,
        }
    }

    /// HTTP-Backend; Modelle optional aus einem lokalen Verzeichnis.
    pub fn http(base_url: &str, model_dir: Option<std::path::PathBuf>) -> Self {
        let backend = Arc::new(HttpBackend::new(base_url));
        let models: Arc<dyn ModelSource> = match model_dir {
            Some(dir) => Arc::new(FileModelSource::new(dir)),
            None => Arc::new(HttpModelSource::new(base_url)),
        };
        Self {
            models,
            metadata: backend.clone(),
            blacklist: backend.clone(),
            presets: backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_fraction_needs_total() {
        let p = DownloadProgress {
            loaded: 50,
            total: Some(200),
        };
        assert_eq!(p.fraction(), Some(0.25));
        let unknown = DownloadProgress {
            loaded: 50,
            total: None,
        };
        assert_eq!(unknown.fraction(), None);
    }
}
