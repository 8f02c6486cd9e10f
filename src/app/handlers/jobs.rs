//! Handler für Ergebnisse von Hintergrund-Jobs.

use crate::app::tasks::JobEvent;
use crate::app::use_cases;
use crate::app::AppState;

/// Wendet ein Job-Ergebnis auf den State an.
pub fn apply(state: &mut AppState, event: JobEvent) {
    match event {
        // === Modell ===
        JobEvent::ModelProgress {
            generation,
            progress,
        } => use_cases::model_loading::apply_progress(state, generation, progress),
        JobEvent::ModelFetched {
            generation,
            key,
            result,
        } => use_cases::model_loading::apply_fetched(state, generation, key, result),

        // === Blacklist ===
        JobEvent::BlacklistLoaded { result } => use_cases::ignore_list::apply_loaded(state, result),
        JobEvent::BlacklistAdded { entry, result } => {
            use_cases::ignore_list::apply_added(state, entry, result)
        }

        // === Metadaten ===
        JobEvent::MetadataFetched {
            generation,
            selection,
            element,
            result,
        } => use_cases::metadata::apply_result(state, generation, selection, element, result),

        // === Presets ===
        JobEvent::PresetFetched {
            generation,
            model,
            slot,
            purpose,
            result,
        } => use_cases::presets::apply_fetched(state, generation, model, slot, purpose, result),
        JobEvent::PresetSaved {
            model,
            slot,
            label,
            result,
        } => use_cases::presets::apply_saved(state, model, slot, label, result),
        JobEvent::PresetDeleted {
            model,
            slot,
            result,
        } => use_cases::presets::apply_deleted(state, model, slot, result),
        JobEvent::PresetRenamed {
            model,
            slot,
            label,
            result,
        } => use_cases::presets::apply_renamed(state, model, slot, label, result),
        JobEvent::PresetsListed {
            model,
            revision,
            result,
        } => use_cases::presets::apply_listed(state, model, revision, result),
        JobEvent::PresetCount { model, result } => {
            use_cases::presets::apply_count(state, model, result)
        }
    }
}
