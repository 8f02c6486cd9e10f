//! Kamera-Presets: Speichern, Laden, Löschen, Umbenennen und die
//! Standard-Viewpoint-Kette.
//!
//! Vertragsverletzungen (Slot außerhalb 0..20, leeres oder zu langes Label,
//! unbekanntes Modell) werden vor jedem Dienstaufruf abgewiesen.

use super::camera;
use crate::app::scheduler::TimerKind;
use crate::app::tasks::{Generation, Job, PresetPurpose};
use crate::app::AppState;
use crate::core::{validate_label, PresetSlot, PresetSlots, SlotIndex};
use crate::services::{SaveOutcome, ServiceError};

/// Reihenfolge der Slots beim Laden des Standard-Viewpoints.
pub const DEFAULT_VIEWPOINT_SLOTS: [usize; 5] = [0, 1, 2, 3, 4];

/// Aktives, geladenes und in der Modellliste bekanntes Modell.
fn preset_model(state: &AppState) -> anyhow::Result<String> {
    let Some(model) = state.model.loaded_key() else {
        anyhow::bail!("Kein Modell geladen");
    };
    if !state.options.is_known_model(model) {
        anyhow::bail!("Unbekanntes Modell '{}' für Presets", model);
    }
    Ok(model.to_string())
}

fn next_request(state: &mut AppState) -> Generation {
    state.presets.request = state.presets.request.next();
    state.presets.request
}

/// Speichert den aktuellen Kamerazustand in einen Slot.
pub fn save(state: &mut AppState, slot: usize, label: &str) -> anyhow::Result<()> {
    let slot = SlotIndex::new(slot)?;
    let label = validate_label(label)?;
    let model = preset_model(state)?;
    let viewpoint = camera::current_camera_state(state);
    state.submit(Job::SavePreset {
        model,
        slot,
        label,
        viewpoint,
    });
    Ok(())
}

/// Lädt einen Slot und wendet ihn animiert an.
pub fn load(state: &mut AppState, slot: usize) -> anyhow::Result<()> {
    let slot = SlotIndex::new(slot)?;
    let model = preset_model(state)?;
    let generation = next_request(state);
    state.submit(Job::FetchPreset {
        generation,
        model,
        slot,
        purpose: PresetPurpose::Apply,
    });
    Ok(())
}

pub fn delete(state: &mut AppState, slot: usize) -> anyhow::Result<()> {
    let slot = SlotIndex::new(slot)?;
    let model = preset_model(state)?;
    state.submit(Job::DeletePreset { model, slot });
    Ok(())
}

pub fn rename(state: &mut AppState, slot: usize, label: &str) -> anyhow::Result<()> {
    let slot = SlotIndex::new(slot)?;
    let label = validate_label(label)?;
    let model = preset_model(state)?;
    state.submit(Job::RenamePreset { model, slot, label });
    Ok(())
}

/// Fragt die Anzahl belegter Slots des aktiven Modells ab.
pub fn refresh_count(state: &mut AppState) -> anyhow::Result<()> {
    let model = preset_model(state)?;
    state.submit(Job::CountPresets { model });
    Ok(())
}

/// Fordert die Slot-Liste an: aus dem Cache oder entprellt vom Dienst.
pub fn request_list(state: &mut AppState) {
    let Some(model) = state.model.loaded_key().map(str::to_string) else {
        return;
    };
    if let Some(cached) = state.presets.cached(&model).cloned() {
        state.presets.slots = cached;
        state.presets.slots_model = Some(model);
        return;
    }
    let delay = state.options.preset_list_debounce();
    state.schedule_in(delay, TimerKind::PresetListDue { model });
}

/// Fälliger Listen-Timer: Cache prüfen, sonst abrufen.
pub fn list_due(state: &mut AppState, model: String) {
    if let Some(cached) = state.presets.cached(&model).cloned() {
        if state.model.is_active(&model) {
            state.presets.slots = cached;
            state.presets.slots_model = Some(model);
        }
        return;
    }
    let revision = state.presets.cache.revision(&model);
    state.submit(Job::ListPresets { model, revision });
}

pub fn clear_cache(state: &mut AppState) {
    state.presets.cache.clear();
    log::info!("Preset-Cache geleert");
}

/// Startet die Kette Slot 0, dann 1 bis 4, dann Zentrieren auf das Modell.
pub fn load_default_viewpoint(state: &mut AppState) {
    let Some(model) = state.model.loaded_key().map(str::to_string) else {
        log::debug!("Standard-Viewpoint ohne geladenes Modell ignoriert");
        return;
    };
    let generation = next_request(state);
    request_chain_slot(state, generation, model, 0);
}

fn request_chain_slot(state: &mut AppState, generation: Generation, model: String, attempt: usize) {
    let Some(slot) = DEFAULT_VIEWPOINT_SLOTS
        .get(attempt)
        .and_then(|&s| SlotIndex::new(s).ok())
    else {
        camera::center_on_model(state);
        return;
    };
    state.submit(Job::FetchPreset {
        generation,
        model,
        slot,
        purpose: PresetPurpose::DefaultChain { attempt },
    });
}

/// Ergebnis eines Preset-Abrufs (Laden oder Default-Kette).
pub fn apply_fetched(
    state: &mut AppState,
    generation: Generation,
    model: String,
    slot: SlotIndex,
    purpose: PresetPurpose,
    result: Result<Option<PresetSlot>, ServiceError>,
) {
    if generation != state.presets.request || !state.model.is_active(&model) {
        log::debug!("Veraltetes Preset-Ergebnis für Slot {} verworfen", slot.get());
        return;
    }
    match (purpose, result) {
        (_, Ok(Some(preset))) => {
            log::info!("Preset '{}' (Slot {}) angewendet", preset.label, slot.get());
            camera::apply_viewpoint(state, preset.viewpoint, true);
        }
        (PresetPurpose::Apply, Ok(None)) => {
            state
                .ui
                .set_status(format!("Slot {} ist leer", slot.get() + 1));
        }
        (PresetPurpose::DefaultChain { attempt }, Ok(None)) => {
            request_chain_slot(state, generation, model, attempt + 1);
        }
        (PresetPurpose::Apply, Err(err)) => {
            log::warn!("Preset {} nicht ladbar: {}", slot.get(), err);
            state.ui.set_status(format!(
                "Preset {} nicht geladen. {}",
                slot.get() + 1,
                err.user_message()
            ));
        }
        (PresetPurpose::DefaultChain { .. }, Err(err)) => {
            log::warn!("Standard-Viewpoint nicht abrufbar, zentriere: {}", err);
            camera::center_on_model(state);
        }
    }
}

/// Nach jeder erfolgreichen Mutation: Cache verwerfen, Anzeige und Zähler auffrischen.
fn after_mutation(state: &mut AppState, model: &str) {
    state.presets.cache.invalidate(model);
    if state.model.is_active(model) {
        state.submit(Job::CountPresets {
            model: model.to_string(),
        });
        request_list(state);
    }
}

pub fn apply_saved(
    state: &mut AppState,
    model: String,
    slot: SlotIndex,
    label: String,
    result: Result<SaveOutcome, ServiceError>,
) {
    match result {
        Ok(outcome) => {
            let verb = if outcome.was_insert { "gespeichert" } else { "überschrieben" };
            log::info!("Preset '{}' in Slot {} {} ({})", label, slot.get(), verb, model);
            state.ui.set_status(format!("Preset '{}' {}", label, verb));
            after_mutation(state, &model);
        }
        Err(err) => {
            log::warn!("Preset {} nicht gespeichert: {}", slot.get(), err);
            state
                .ui
                .set_status(format!("Preset nicht gespeichert. {}", err.user_message()));
        }
    }
}

pub fn apply_deleted(
    state: &mut AppState,
    model: String,
    slot: SlotIndex,
    result: Result<bool, ServiceError>,
) {
    match result {
        Ok(existed) => {
            if state.presets.slots_model.as_deref() == Some(model.as_str()) {
                state.presets.slots.clear(slot);
            }
            if existed {
                log::info!("Preset-Slot {} gelöscht ({})", slot.get(), model);
            } else {
                state.ui.set_status(format!("Slot {} war bereits leer", slot.get() + 1));
            }
            after_mutation(state, &model);
        }
        Err(err) => {
            log::warn!("Preset {} nicht gelöscht: {}", slot.get(), err);
            state
                .ui
                .set_status(format!("Preset nicht gelöscht. {}", err.user_message()));
        }
    }
}

pub fn apply_renamed(
    state: &mut AppState,
    model: String,
    slot: SlotIndex,
    label: String,
    result: Result<bool, ServiceError>,
) {
    match result {
        Ok(true) => {
            if state.presets.slots_model.as_deref() == Some(model.as_str()) {
                if let Some(mut preset) = state.presets.slots.get(slot).cloned() {
                    preset.label = label.clone();
                    state.presets.slots.set(preset);
                }
            }
            log::info!("Preset-Slot {} umbenannt in '{}'", slot.get(), label);
            after_mutation(state, &model);
        }
        Ok(false) => {
            state
                .ui
                .set_status(format!("Slot {} ist leer, nichts umbenannt", slot.get() + 1));
        }
        Err(err) => {
            log::warn!("Preset {} nicht umbenannt: {}", slot.get(), err);
            state
                .ui
                .set_status(format!("Preset nicht umbenannt. {}", err.user_message()));
        }
    }
}

pub fn apply_listed(
    state: &mut AppState,
    model: String,
    revision: u64,
    result: Result<Vec<PresetSlot>, ServiceError>,
) {
    match result {
        Ok(rows) => {
            let slots = PresetSlots::from_rows(rows);
            if !state.presets.cache.insert_if_current(&model, revision, slots.clone()) {
                log::debug!("Preset-Liste für '{}' veraltet, verworfen", model);
                return;
            }
            if state.model.is_active(&model) {
                state.presets.count = Some(slots.occupied_count());
                state.presets.slots = slots;
                state.presets.slots_model = Some(model);
            }
        }
        Err(err) => {
            log::warn!("Preset-Liste für '{}' nicht abrufbar: {}", model, err);
            state
                .ui
                .set_status(format!("Presets nicht geladen. {}", err.user_message()));
        }
    }
}

pub fn apply_count(state: &mut AppState, model: String, result: Result<usize, ServiceError>) {
    match result {
        Ok(count) if state.model.is_active(&model) => state.presets.count = Some(count),
        Ok(_) => {}
        Err(err) => log::warn!("Preset-Anzahl für '{}' nicht abrufbar: {}", model, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_state(model: &str) -> AppState {
        let mut state = AppState::new();
        state.model.active_key = Some(model.to_string());
        state.model.loaded = true;
        state
    }

    #[test]
    fn out_of_range_slot_is_rejected_before_io() {
        let mut state = loaded_state("ground");
        assert!(save(&mut state, 20, "Eingang").is_err());
        assert!(load(&mut state, 25).is_err());
        assert!(state.pending_jobs.is_empty());
    }

    #[test]
    fn invalid_labels_are_rejected_before_io() {
        let mut state = loaded_state("ground");
        assert!(save(&mut state, 0, "   ").is_err());
        assert!(rename(&mut state, 0, &"x".repeat(101)).is_err());
        assert!(state.pending_jobs.is_empty());
    }

    #[test]
    fn unknown_model_is_rejected() {
        let mut state = loaded_state("attic");
        assert!(save(&mut state, 0, "Eingang").is_err());
        assert!(state.pending_jobs.is_empty());
    }

    #[test]
    fn cached_list_is_served_without_timer() {
        let mut state = loaded_state("ground");
        let revision = state.presets.cache.revision("ground");
        state
            .presets
            .cache
            .insert_if_current("ground", revision, PresetSlots::empty());

        request_list(&mut state);
        assert!(state.scheduler.is_empty());
        assert_eq!(state.presets.slots_model.as_deref(), Some("ground"));
    }

    #[test]
    fn list_requests_are_debounced_into_one_timer() {
        let mut state = loaded_state("ground");
        request_list(&mut state);
        request_list(&mut state);
        let due = state
            .scheduler
            .take_due(state.now + state.options.preset_list_debounce());
        assert_eq!(due.len(), 1);
    }

    #[test]
    fn stale_chain_result_is_ignored() {
        let mut state = loaded_state("ground");
        load_default_viewpoint(&mut state);
        let stale = state.presets.request;
        load_default_viewpoint(&mut state);
        state.pending_jobs.clear();

        apply_fetched(
            &mut state,
            stale,
            "ground".into(),
            SlotIndex::new(0).expect("gültig"),
            PresetPurpose::DefaultChain { attempt: 0 },
            Ok(None),
        );
        assert!(state.pending_jobs.is_empty());
    }
}
