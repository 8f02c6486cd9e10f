//! Handler für Modellauswahl und Lebenszyklus.

use crate::app::use_cases;
use crate::app::AppState;

/// Lädt ein Modell und propagiert Fehler an den Aufrufer.
pub fn load(state: &mut AppState, key: &str) -> anyhow::Result<()> {
    use_cases::model_loading::load_model(state, key)
}

/// Gibt alle Szenen-Ressourcen frei und beendet die Anwendung.
pub fn shutdown(state: &mut AppState) {
    use_cases::visual_effects::release_all(state);
    state.scene.dispose_all();
    state.model.root_node = None;
    state.ignore.placeholders.clear();
    state.view.transition = None;
    state.view.render_loop_active = false;
    state.scheduler = Default::default();
    state.pending_jobs.clear();
    state.should_exit = true;
    log::info!("Viewer beendet, Szene freigegeben");
}
