//! Handler für Panel-Sichtbarkeit.

use crate::app::use_cases;
use crate::app::AppState;

/// Schaltet das Metadaten-Panel um (lädt beim Einschalten nach).
pub fn toggle_metadata(state: &mut AppState) {
    use_cases::metadata::toggle_panel(state);
}

pub fn toggle_presets(state: &mut AppState) {
    state.ui.show_preset_panel = !state.ui.show_preset_panel;
}

pub fn toggle_hidden_list(state: &mut AppState) {
    state.ui.show_hidden_list = !state.ui.show_hidden_list;
}
