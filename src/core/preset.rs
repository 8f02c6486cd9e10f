//! Kamera-Presets: Slot-Index, Viewpoint und Slot-Liste pro Modell.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Anzahl Preset-Slots pro Modell (systemweit fest).
pub const MAX_PRESETS: usize = 20;
/// Maximale Label-Länge in Zeichen.
pub const MAX_LABEL_CHARS: usize = 100;

/// Verstöße gegen den Preset-Vertrag (werden vor jedem I/O abgewiesen).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetContractError {
    #[error("Slot-Index {0} außerhalb von 0..{MAX_PRESETS}")]
    SlotOutOfRange(usize),
    #[error("Preset-Label darf nicht leer sein")]
    EmptyLabel,
    #[error("Preset-Label hat {0} Zeichen (max. {MAX_LABEL_CHARS})")]
    LabelTooLong(usize),
}

/// Validierter Slot-Index in `[0, MAX_PRESETS)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SlotIndex(usize);

impl SlotIndex {
    pub fn new(index: usize) -> Result<Self, PresetContractError> {
        if index < MAX_PRESETS {
            Ok(Self(index))
        } else {
            Err(PresetContractError::SlotOutOfRange(index))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Alle gültigen Slots in aufsteigender Reihenfolge.
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..MAX_PRESETS).map(SlotIndex)
    }

    /// Standard-Label eines leeren Slots ("Preset 1" für Slot 0).
    pub fn default_label(self) -> String {
        format!("Preset {}", self.0 + 1)
    }
}

impl TryFrom<usize> for SlotIndex {
    type Error = PresetContractError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlotIndex> for usize {
    fn from(value: SlotIndex) -> Self {
        value.0
    }
}

/// Prüft und normalisiert ein Label (getrimmt, nicht leer, max. 100 Zeichen).
pub fn validate_label(label: &str) -> Result<String, PresetContractError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(PresetContractError::EmptyLabel);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_LABEL_CHARS {
        return Err(PresetContractError::LabelTooLong(chars));
    }
    Ok(trimmed.to_string())
}

/// Kamerazustand: Position und Target absolut, Zoom relativ zur Baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraViewpoint {
    pub position: Vec3,
    pub target: Vec3,
    /// `baseline_distance / aktueller Abstand`
    pub zoom: f32,
}

impl CameraViewpoint {
    pub fn new(position: Vec3, target: Vec3, zoom: f32) -> Self {
        Self {
            position,
            target,
            zoom,
        }
    }
}

/// Belegter Preset-Slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetSlot {
    pub index: SlotIndex,
    pub label: String,
    pub viewpoint: CameraViewpoint,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Alle Slots eines Modells; leere Slots sind `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetSlots {
    slots: Vec<Option<PresetSlot>>,
}

impl PresetSlots {
    /// 20 leere Slots.
    pub fn empty() -> Self {
        Self {
            slots: vec![None; MAX_PRESETS],
        }
    }

    /// Verteilt Zeilen anhand ihres Slot-Index.
    pub fn from_rows(rows: impl IntoIterator<Item = PresetSlot>) -> Self {
        let mut slots = Self::empty();
        for row in rows {
            slots.set(row);
        }
        slots
    }

    pub fn get(&self, index: SlotIndex) -> Option<&PresetSlot> {
        self.slots.get(index.get()).and_then(Option::as_ref)
    }

    /// Belegt einen Slot (überschreibt).
    pub fn set(&mut self, slot: PresetSlot) {
        let i = slot.index.get();
        self.slots[i] = Some(slot);
    }

    /// Leert einen Slot, andere Slots bleiben unberührt.
    pub fn clear(&mut self, index: SlotIndex) -> Option<PresetSlot> {
        self.slots[index.get()].take()
    }

    /// Anzeige-Label (gespeichert oder Standard).
    pub fn label(&self, index: SlotIndex) -> String {
        self.get(index)
            .map(|s| s.label.clone())
            .unwrap_or_else(|| index.default_label())
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, Option<&PresetSlot>)> {
        SlotIndex::all().map(move |i| (i, self.get(i)))
    }
}

impl Default for PresetSlots {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: usize, label: &str) -> PresetSlot {
        PresetSlot {
            index: SlotIndex::new(index).expect("gültig"),
            label: label.into(),
            viewpoint: CameraViewpoint::new(Vec3::splat(index as f32), Vec3::ZERO, 1.0),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn slot_index_range_is_enforced() {
        assert!(SlotIndex::new(0).is_ok());
        assert!(SlotIndex::new(19).is_ok());
        assert_eq!(
            SlotIndex::new(20),
            Err(PresetContractError::SlotOutOfRange(20))
        );
    }

    #[test]
    fn label_validation() {
        assert_eq!(validate_label("  Eingang "), Ok("Eingang".to_string()));
        assert_eq!(validate_label("   "), Err(PresetContractError::EmptyLabel));
        let long = "x".repeat(101);
        assert_eq!(validate_label(&long), Err(PresetContractError::LabelTooLong(101)));
        assert!(validate_label(&"ü".repeat(100)).is_ok());
    }

    #[test]
    fn clearing_a_slot_keeps_other_indices() {
        let mut slots = PresetSlots::from_rows((0..MAX_PRESETS).map(|i| slot(i, &format!("L{i}"))));
        let five = SlotIndex::new(5).expect("gültig");
        slots.clear(five);

        for (index, entry) in slots.iter() {
            if index == five {
                assert!(entry.is_none());
                assert_eq!(slots.label(index), "Preset 6");
            } else {
                assert_eq!(entry.map(|s| s.label.as_str()), Some(format!("L{}", index.get()).as_str()));
            }
        }
        assert_eq!(slots.occupied_count(), MAX_PRESETS - 1);
    }

    #[test]
    fn slot_index_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<SlotIndex>("3").is_ok());
        assert!(serde_json::from_str::<SlotIndex>("25").is_err());
    }
}
