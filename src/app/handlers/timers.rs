//! Handler für fällige Timer.

use crate::app::scheduler::TimerKind;
use crate::app::use_cases;
use crate::app::AppState;

/// Führt einen fälligen Timer aus.
pub fn fire(state: &mut AppState, timer: TimerKind) {
    match timer {
        TimerKind::LoadingSettled { generation }
        | TimerKind::LoadingFailureCleared { generation } => {
            use_cases::model_loading::clear_progress(state, generation)
        }
        TimerKind::VisualEffectsSync => use_cases::visual_effects::sync_selection(state),
        TimerKind::PresetListDue { model } => use_cases::presets::list_due(state, model),
    }
}
