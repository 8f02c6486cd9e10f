use crate::core::{ElementId, IgnoreSet, IgnoreStats, NodeId};
use std::collections::{BTreeSet, HashMap};

/// Blacklist- und Hide-Zustand
#[derive(Debug, Clone, Default)]
pub struct IgnoreState {
    /// Ignore-Menge des aktiven Modells (Picker-Prädikat)
    pub set: IgnoreSet,
    /// Bestätigte Blacklist-Einträge aller Modelle
    pub entries: BTreeSet<(String, ElementId)>,
    /// Blacklist vom Server geladen; vorher wird keine Interaktion verarbeitet
    pub loaded: bool,
    /// Ladeauftrag läuft
    pub loading: bool,
    /// Unsichtbare Platzhalter-Knoten der ausgeblendeten Elemente
    pub placeholders: HashMap<ElementId, NodeId>,
}

impl IgnoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut die Blacklist-Hälfte der Ignore-Menge für ein Modell neu auf.
    pub fn activate_model(&mut self, model: &str) {
        let ids: Vec<ElementId> = self
            .entries
            .iter()
            .filter(|(m, _)| m == model)
            .map(|(_, id)| *id)
            .collect();
        self.set.replace_blacklist(ids);
    }

    pub fn stats(&self) -> IgnoreStats {
        self.set.stats()
    }
}
