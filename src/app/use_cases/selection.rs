//! Use-Cases für Hover, Selektion und Kontextmenü.

use super::{camera, metadata, picking, presets, visual_effects};
use crate::app::state::{ContextMenuState, CursorHint};
use crate::app::AppState;
use crate::core::ElementId;
use glam::Vec2;

/// Aktualisiert das Hover-Element unter dem Zeiger.
pub fn update_hover(state: &mut AppState, screen_pos: Vec2) {
    let picked = picking::resolve(state, screen_pos);
    set_hover(state, picked);
}

/// Entfernt Hover-Element und Hover-Overlay.
pub fn clear_hover(state: &mut AppState) {
    set_hover(state, None);
}

fn set_hover(state: &mut AppState, element: Option<ElementId>) {
    if state.hover.element == element {
        return;
    }
    visual_effects::set_hover(state, element);
    state.hover.element = element;
    state.ui.cursor = if element.is_some() {
        CursorHint::Interactive
    } else {
        CursorHint::Default
    };
}

/// Bestätigungsaktion (Doppelklick) an einer Bildschirmposition.
///
/// Ein Treffer wählt das Element aus. Leerer Raum oder ein ignoriertes
/// Element heben die Selektion auf und laden den Standard-Viewpoint.
pub fn confirm_pick(state: &mut AppState, screen_pos: Vec2) -> anyhow::Result<()> {
    if !state.interaction_ready() {
        log::debug!("Bestätigung ignoriert: Blacklist oder Modell nicht bereit");
        return Ok(());
    }
    match picking::resolve(state, screen_pos) {
        Some(element) => select_element(state, element),
        None => {
            clear_selection(state);
            presets::load_default_viewpoint(state);
            Ok(())
        }
    }
}

/// Vollständige Selektions-Pipeline (auch für ein bereits selektiertes Element).
pub fn select_element(state: &mut AppState, element: ElementId) -> anyhow::Result<()> {
    if !state.interaction_ready() {
        log::debug!("Selektion von {} ignoriert: nicht bereit", element);
        return Ok(());
    }
    if state.ignore.set.should_ignore(element) {
        log::debug!("Element {} wird ignoriert, keine Selektion", element);
        return Ok(());
    }
    let Some(mesh) = state.model.mesh.clone() else {
        return Ok(());
    };
    let Some(bounds) = mesh.element_bounds(element) else {
        anyhow::bail!("Element {} existiert im aktiven Modell nicht", element);
    };

    let (primary, secondary) = mesh.display_names(element);
    state
        .selection
        .select(element, bounds.top_center(), primary, secondary);
    log::info!(
        "Element {} ausgewählt: {}",
        element,
        state.selection.primary_name
    );

    visual_effects::schedule_sync(state);

    let zoom = state.options.focus_zoom_factor;
    let duration = state.options.camera_transition();
    camera::animate_to_target(state, bounds.center(), zoom, duration);

    metadata::request_for_selection(state);
    Ok(())
}

/// Hebt die Selektion auf; Overlays folgen nach der Entprellzeit.
pub fn clear_selection(state: &mut AppState) {
    if state.selection.element.is_none() && !state.selection.visible {
        return;
    }
    state.selection.clear();
    metadata::clear(state);
    visual_effects::schedule_sync(state);
}

/// Öffnet das Kontextmenü für das Element unter dem Zeiger.
pub fn open_context_menu(state: &mut AppState, screen_pos: Vec2) {
    if !state.interaction_ready() {
        return;
    }
    state.context_menu = picking::resolve(state, screen_pos).map(|element| {
        let name = state
            .model
            .mesh
            .as_ref()
            .map(|mesh| mesh.display_names(element).0)
            .unwrap_or_else(|| crate::core::UNKNOWN_ELEMENT_NAME.to_string());
        ContextMenuState {
            screen_pos,
            element,
            name,
        }
    });
}

pub fn close_context_menu(state: &mut AppState) {
    state.context_menu = None;
}

/// Entfernt Hover und Selektion eines Elements, das ignoriert werden soll.
pub fn drop_element(state: &mut AppState, element: ElementId) {
    if state.hover.element == Some(element) {
        clear_hover(state);
    }
    if state.selection.element == Some(element) {
        clear_selection(state);
    }
    if state.context_menu.as_ref().map(|m| m.element) == Some(element) {
        close_context_menu(state);
    }
}

/// Setzt Hover, Selektion und Kontextmenü vollständig zurück (Modellwechsel).
pub fn reset_all(state: &mut AppState) {
    state.hover.element = None;
    state.ui.cursor = CursorHint::Default;
    state.context_menu = None;
    state.selection.clear();
    metadata::clear(state);
    visual_effects::release_all(state);
}
