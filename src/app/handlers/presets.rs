//! Handler für Kamera-Presets.

use crate::app::use_cases;
use crate::app::AppState;

/// Speichert den aktuellen Kamerazustand und propagiert Vertragsverletzungen.
pub fn save(state: &mut AppState, slot: usize, label: &str) -> anyhow::Result<()> {
    use_cases::presets::save(state, slot, label)
}

pub fn load(state: &mut AppState, slot: usize) -> anyhow::Result<()> {
    use_cases::presets::load(state, slot)
}

pub fn delete(state: &mut AppState, slot: usize) -> anyhow::Result<()> {
    use_cases::presets::delete(state, slot)
}

pub fn rename(state: &mut AppState, slot: usize, label: &str) -> anyhow::Result<()> {
    use_cases::presets::rename(state, slot, label)
}

/// Fordert die Slot-Liste an (Cache oder entprellter Abruf).
pub fn request_list(state: &mut AppState) {
    use_cases::presets::request_list(state);
}

pub fn refresh_count(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::presets::refresh_count(state)
}

/// Startet die Standard-Viewpoint-Kette.
pub fn load_default_viewpoint(state: &mut AppState) {
    use_cases::presets::load_default_viewpoint(state);
}

pub fn clear_cache(state: &mut AppState) {
    use_cases::presets::clear_cache(state);
}
