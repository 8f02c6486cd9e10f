//! Handler für Hover, Selektion und Kontextmenü.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::ElementId;
use glam::Vec2;

pub fn update_hover(state: &mut AppState, screen_pos: Vec2) {
    use_cases::selection::update_hover(state, screen_pos);
}

pub fn clear_hover(state: &mut AppState) {
    use_cases::selection::clear_hover(state);
}

/// Bestätigt die Auswahl an einer Bildschirmposition (Doppelklick).
pub fn confirm_pick(state: &mut AppState, screen_pos: Vec2) -> anyhow::Result<()> {
    use_cases::selection::confirm_pick(state, screen_pos)
}

/// Selektiert ein Element direkt über seinen Identifier.
pub fn select(state: &mut AppState, element: ElementId) -> anyhow::Result<()> {
    use_cases::selection::select_element(state, element)
}

/// Hebt die Selektion auf.
pub fn clear(state: &mut AppState) {
    use_cases::selection::clear_selection(state);
}

pub fn open_context_menu(state: &mut AppState, screen_pos: Vec2) {
    use_cases::selection::open_context_menu(state, screen_pos);
}

pub fn close_context_menu(state: &mut AppState) {
    use_cases::selection::close_context_menu(state);
}
