use crate::app::tasks::Generation;
use crate::core::PresetSlots;
use std::collections::HashMap;

/// Cache der Preset-Listen pro Modell.
///
/// Jede Invalidierung erhöht die Revision des Modells. Ein Listen-Ergebnis
/// wird nur übernommen, wenn seine Revision noch aktuell ist; so überschreibt
/// eine vor einer Mutation gestartete Abfrage nicht den neueren Stand.
#[derive(Debug, Clone, Default)]
pub struct PresetCache {
    entries: HashMap<String, PresetSlots>,
    revisions: HashMap<String, u64>,
}

impl PresetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, model: &str) -> Option<&PresetSlots> {
        self.entries.get(model)
    }

    pub fn revision(&self, model: &str) -> u64 {
        self.revisions.get(model).copied().unwrap_or(0)
    }

    /// Übernimmt ein Ergebnis, falls `revision` noch aktuell ist.
    pub fn insert_if_current(&mut self, model: &str, revision: u64, slots: PresetSlots) -> bool {
        if revision != self.revision(model) {
            return false;
        }
        self.entries.insert(model.to_string(), slots);
        true
    }

    /// Verwirft den Eintrag eines Modells.
    pub fn invalidate(&mut self, model: &str) {
        self.entries.remove(model);
        *self.revisions.entry(model.to_string()).or_insert(0) += 1;
    }

    /// Verwirft alle Einträge.
    pub fn clear(&mut self) {
        let mut models: Vec<String> = self.entries.keys().cloned().collect();
        models.extend(self.revisions.keys().cloned());
        models.sort();
        models.dedup();
        for model in models {
            self.invalidate(&model);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Preset-Zustand des aktiven Modells
#[derive(Debug, Clone, Default)]
pub struct PresetState {
    /// Slots für das Preset-Panel
    pub slots: PresetSlots,
    /// Modell, zu dem `slots` gehört
    pub slots_model: Option<String>,
    /// Anzahl belegter Slots laut Server
    pub count: Option<usize>,
    pub cache: PresetCache,
    /// Token der letzten Viewpoint-Anforderung (Laden oder Default-Kette)
    pub request: Generation,
}

impl PresetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gecachte Slot-Liste eines Modells.
    pub fn cached(&self, model: &str) -> Option<&PresetSlots> {
        self.cache.get(model)
    }

    /// Setzt die Panel-Anzeige auf ein neues Modell zurück.
    pub fn reset_for(&mut self, model: &str) {
        self.slots = self.cache.get(model).cloned().unwrap_or_default();
        self.slots_model = Some(model.to_string());
        self.count = None;
    }
}
