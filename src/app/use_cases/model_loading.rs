//! Laden und Wechseln von Modellen mit Fortschrittsanzeige.
//!
//! Jede Ladeanforderung erhöht die Modell-Generation. Ergebnisse älterer
//! Generationen werden verworfen, so dass nur das zuletzt angeforderte
//! Modell in die Szene gelangt.

use super::{camera, ignore_list, presets, selection};
use crate::app::scheduler::TimerKind;
use crate::app::state::LoadingStage;
use crate::app::tasks::{Generation, Job};
use crate::app::AppState;
use crate::core::{ModelMesh, NodeKind};
use crate::services::{DownloadProgress, ServiceError};
use std::sync::Arc;

/// Fortschrittsbereich, auf den der Download abgebildet wird.
const DOWNLOAD_RANGE: (f32, f32) = (15.0, 40.0);

/// Lädt ein Modell (aus dem Cache oder vom Dienst) und ersetzt das aktive.
pub fn load_model(state: &mut AppState, key: &str) -> anyhow::Result<()> {
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Leerer Modellschlüssel");
    }
    if state.model.is_active(key) && (state.model.loaded || state.model.is_loading()) {
        log::debug!("Modell '{}' bereits aktiv, nichts zu tun", key);
        return Ok(());
    }
    if !state.options.is_known_model(key) {
        log::warn!("Modell '{}' ist nicht in der Modellauswahl", key);
    }

    begin_switch(state, key);

    if let Some(mesh) = state.model.cache.get(key) {
        log::info!("Modell '{}' aus dem Cache", key);
        state.model.set_progress(80.0, LoadingStage::FromCache);
        attach(state, key, mesh);
        state.model.set_progress(90.0, LoadingStage::AdjustingCamera);
        camera::frame_model(state);
        finish(state);
        return Ok(());
    }

    if let Some(evicted) = state.model.cache.make_room() {
        log::info!("Modell '{}' aus dem Cache verdrängt", evicted);
    }
    state.model.set_progress(DOWNLOAD_RANGE.0, LoadingStage::Fetching);
    state.submit(Job::FetchModel {
        generation: state.model.generation,
        key: key.to_string(),
    });
    Ok(())
}

/// Räumt den Zustand des bisherigen Modells ab.
fn begin_switch(state: &mut AppState, key: &str) {
    state.model.generation = state.model.generation.next();
    state.presets.request = state.presets.request.next();

    selection::reset_all(state);
    state.view.transition = None;
    if let Some(root) = state.model.root_node.take() {
        state.scene.remove(root);
    }
    state.model.mesh = None;
    ignore_list::reset_hidden(state);
    state.ignore.activate_model(key);
    state.presets.reset_for(key);
    state.scheduler.cancel(|k| {
        matches!(
            k,
            TimerKind::LoadingSettled { .. }
                | TimerKind::LoadingFailureCleared { .. }
                | TimerKind::PresetListDue { .. }
        )
    });

    state.model.active_key = Some(key.to_string());
    state.model.loaded = false;
    state.model.progress = None;
    state.model.set_progress(5.0, LoadingStage::Preparing);
    log::info!(
        "Lade Modell '{}' (Generation {})",
        key,
        state.model.generation.value()
    );
}

fn attach(state: &mut AppState, key: &str, mesh: Arc<ModelMesh>) {
    let root = state.scene.add(NodeKind::Model {
        key: key.to_string(),
        mesh: mesh.clone(),
    });
    state.model.root_node = Some(root);
    state.model.mesh = Some(mesh);
}

/// Interaktion freigeben, Presets anstoßen, Anzeige ausblenden lassen.
fn finish(state: &mut AppState) {
    state.model.loaded = true;
    state.model.set_progress(85.0, LoadingStage::LoadingPresets);
    presets::load_default_viewpoint(state);
    presets::request_list(state);
    if let Err(e) = presets::refresh_count(state) {
        log::debug!("Preset-Anzahl nicht abgefragt: {:#}", e);
    }
    state.model.set_progress(95.0, LoadingStage::Done);
    let generation = state.model.generation;
    let delay = state.options.loading_settle();
    state.schedule_in(delay, TimerKind::LoadingSettled { generation });
}

/// Download-Fortschritt der aktuellen Generation.
pub fn apply_progress(state: &mut AppState, generation: Generation, progress: DownloadProgress) {
    if generation != state.model.generation {
        return;
    }
    let Some(fraction) = progress.fraction() else {
        return;
    };
    let (from, to) = DOWNLOAD_RANGE;
    state
        .model
        .set_progress(from + (to - from) * fraction, LoadingStage::Fetching);
}

/// Ergebnis eines Modell-Downloads.
pub fn apply_fetched(
    state: &mut AppState,
    generation: Generation,
    key: String,
    result: Result<Arc<ModelMesh>, ServiceError>,
) {
    if generation != state.model.generation || !state.model.is_active(&key) {
        log::debug!(
            "Veraltetes Modell '{}' (Generation {}) verworfen",
            key,
            generation.value()
        );
        return;
    }
    match result {
        Ok(mesh) => {
            state.model.set_progress(50.0, LoadingStage::Processing);
            log::info!(
                "Modell '{}' geladen: {} Elemente, {} Dreiecke",
                key,
                mesh.element_count(),
                mesh.triangle_count()
            );
            attach(state, &key, mesh.clone());
            state.model.set_progress(70.0, LoadingStage::AdjustingCamera);
            camera::frame_model(state);
            if let Some(evicted) = state.model.cache.insert(key.as_str(), mesh) {
                log::info!("Modell '{}' aus dem Cache verdrängt", evicted);
            }
            finish(state);
        }
        Err(err) => {
            log::error!("Modell '{}' konnte nicht geladen werden: {}", key, err);
            state.model.loaded = false;
            state.model.set_progress(0.0, LoadingStage::Failed);
            state.ui.set_status(format!(
                "Modell '{}' nicht geladen. {}",
                state.options.model_label(&key),
                err.user_message()
            ));
            let delay = state.options.loading_failure_clear();
            state.schedule_in(delay, TimerKind::LoadingFailureCleared { generation });
        }
    }
}

/// Blendet die Ladeanzeige aus, sofern die Generation noch aktuell ist.
pub fn clear_progress(state: &mut AppState, generation: Generation) {
    if generation == state.model.generation {
        state.model.progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MeshBuilder;
    use glam::Vec3;

    fn mesh() -> Arc<ModelMesh> {
        Arc::new(
            MeshBuilder::new()
                .add_box(1, Vec3::ZERO, Vec3::ONE, [1.0; 4])
                .build(),
        )
    }

    #[test]
    fn empty_key_is_rejected() {
        let mut state = AppState::new();
        assert!(load_model(&mut state, "  ").is_err());
        assert!(state.pending_jobs.is_empty());
    }

    #[test]
    fn fresh_load_submits_fetch_and_shows_progress() {
        let mut state = AppState::new();
        load_model(&mut state, "ground").expect("Laden startet");

        assert!(matches!(
            state.pending_jobs.as_slice(),
            [Job::FetchModel { key, .. }] if key == "ground"
        ));
        let progress = state.model.progress.clone().expect("Anzeige aktiv");
        assert_eq!(progress.stage, LoadingStage::Fetching);
        assert!(state.model.is_loading());

        // Zweite Anforderung desselben Modells während des Ladens
        load_model(&mut state, "ground").expect("No-op");
        assert_eq!(state.pending_jobs.len(), 1);
    }

    #[test]
    fn cached_model_loads_without_fetch() {
        let mut state = AppState::new();
        state.model.cache.insert("ground", mesh());
        load_model(&mut state, "ground").expect("Laden aus Cache");

        assert!(state.model.loaded);
        assert!(state.model.root_node.is_some());
        assert!(!state
            .pending_jobs
            .iter()
            .any(|j| matches!(j, Job::FetchModel { .. })));
        assert_eq!(
            state.model.progress.as_ref().map(|p| p.stage),
            Some(LoadingStage::Done)
        );
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut state = AppState::new();
        load_model(&mut state, "ground").expect("Laden startet");
        let first = state.model.generation;
        load_model(&mut state, "main").expect("Laden startet");

        apply_fetched(&mut state, first, "ground".into(), Ok(mesh()));
        assert!(state.model.mesh.is_none());
        assert!(!state.model.loaded);
        assert_eq!(state.model.active_key.as_deref(), Some("main"));
    }

    #[test]
    fn failure_marks_progress_and_schedules_clear() {
        let mut state = AppState::new();
        load_model(&mut state, "ground").expect("Laden startet");
        let generation = state.model.generation;

        apply_fetched(
            &mut state,
            generation,
            "ground".into(),
            Err(ServiceError::Asset("ground.json fehlt".into())),
        );
        assert!(state.model.progress.as_ref().is_some_and(|p| p.failed()));
        assert!(!state.model.loaded);
        assert!(state
            .scheduler
            .is_scheduled(|k| matches!(k, TimerKind::LoadingFailureCleared { .. })));

        clear_progress(&mut state, generation);
        assert!(state.model.progress.is_none());
    }

    #[test]
    fn download_progress_maps_into_fetch_range() {
        let mut state = AppState::new();
        load_model(&mut state, "ground").expect("Laden startet");
        let generation = state.model.generation;
        apply_progress(
            &mut state,
            generation,
            DownloadProgress {
                loaded: 50,
                total: Some(100),
            },
        );
        let percent = state.model.progress.as_ref().map(|p| p.percent);
        assert_eq!(percent, Some(27.5));
    }
}
