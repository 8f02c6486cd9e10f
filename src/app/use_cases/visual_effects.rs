//! Selektions- und Hover-Overlays im Szenengraph.
//!
//! Pro Art existiert höchstens ein Overlay. Vor jedem Neuaufbau werden die
//! Knoten des vorherigen Overlays (samt Geometrie und Material) entfernt.

use crate::app::scheduler::TimerKind;
use crate::app::state::{HoverVisual, SelectionVisual};
use crate::app::AppState;
use crate::core::{ElementId, NodeKind};

/// Plant den Abgleich der Selektions-Overlays (entprellt).
pub fn schedule_sync(state: &mut AppState) {
    let delay = state.options.visual_effects_debounce();
    state.schedule_in(delay, TimerKind::VisualEffectsSync);
}

/// Gleicht die Selektions-Overlays mit dem Selektionszustand ab.
pub fn sync_selection(state: &mut AppState) {
    let desired = state.selection.selected();
    let current = state.effects.visualized();

    if desired == current {
        return;
    }

    release_selection(state);

    if let Some(element) = desired {
        build_selection(state, element);
    }
}

fn build_selection(state: &mut AppState, element: ElementId) {
    let Some(bounds) = state
        .model
        .mesh
        .as_ref()
        .and_then(|mesh| mesh.element_bounds(element))
    else {
        log::debug!("Keine Hüllbox für Element {}, kein Overlay", element);
        return;
    };

    let box_node = state.scene.add(NodeKind::SelectionBox {
        element,
        segments: bounds.edges().to_vec(),
        color: state.options.selection_box_color,
    });
    let line_node = state.scene.add(NodeKind::CenterLine {
        element,
        segment: bounds.center_line(),
        color: state.options.center_line_color,
    });
    state.effects.selection = Some(SelectionVisual {
        element,
        box_node,
        line_node,
    });
}

/// Entfernt Box und Mittellinie der Selektion.
pub fn release_selection(state: &mut AppState) {
    if let Some(visual) = state.effects.selection.take() {
        state.scene.remove(visual.box_node);
        state.scene.remove(visual.line_node);
    }
}

/// Ersetzt das Hover-Overlay. `None` entfernt es nur.
pub fn set_hover(state: &mut AppState, element: Option<ElementId>) {
    if state.effects.hover.map(|h| h.element) == element {
        return;
    }
    release_hover(state);

    let (Some(element), Some(mesh)) = (element, state.model.mesh.clone()) else {
        return;
    };
    if !mesh.contains_element(element) {
        return;
    }
    let node = state.scene.add(NodeKind::HoverHighlight {
        mesh,
        element,
        color: state.options.hover_color,
    });
    state.effects.hover = Some(HoverVisual { element, node });
}

pub fn release_hover(state: &mut AppState) {
    if let Some(visual) = state.effects.hover.take() {
        state.scene.remove(visual.node);
    }
}

/// Entfernt sämtliche Overlays sofort (Modellwechsel, Teardown).
pub fn release_all(state: &mut AppState) {
    release_selection(state);
    release_hover(state);
    state
        .scheduler
        .cancel(|k| matches!(k, TimerKind::VisualEffectsSync));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MeshBuilder, NodeKind};
    use glam::Vec3;
    use std::sync::Arc;

    fn id(raw: u32) -> ElementId {
        ElementId::new(raw).expect("gültig")
    }

    fn state_with_two_elements() -> AppState {
        let mut state = AppState::new();
        let mesh = MeshBuilder::new()
            .add_box(1, Vec3::ZERO, Vec3::ONE, [1.0; 4])
            .add_box(2, Vec3::splat(2.0), Vec3::splat(3.0), [1.0; 4])
            .build();
        let mesh = Arc::new(mesh);
        state.scene.add(NodeKind::Model {
            key: "ground".into(),
            mesh: mesh.clone(),
        });
        state.model.mesh = Some(mesh);
        state
    }

    fn select(state: &mut AppState, element: ElementId) {
        state
            .selection
            .select(element, Vec3::ZERO, String::new(), String::new());
    }

    #[test]
    fn reselecting_replaces_overlay_without_leaks() {
        let mut state = state_with_two_elements();
        let baseline = state.scene.resource_count();

        select(&mut state, id(1));
        sync_selection(&mut state);
        select(&mut state, id(2));
        sync_selection(&mut state);

        assert_eq!(state.scene.count(|k| matches!(k, NodeKind::SelectionBox { .. })), 1);
        assert_eq!(state.scene.count(|k| matches!(k, NodeKind::CenterLine { .. })), 1);
        assert_eq!(state.effects.visualized(), Some(id(2)));
        // Box + Linie mit je Geometrie und Material
        assert_eq!(state.scene.resource_count(), baseline + 4);
    }

    #[test]
    fn same_element_is_not_rebuilt() {
        let mut state = state_with_two_elements();
        select(&mut state, id(1));
        sync_selection(&mut state);
        let revision = state.scene.revision();

        select(&mut state, id(1));
        sync_selection(&mut state);
        assert_eq!(state.scene.revision(), revision);
    }

    #[test]
    fn clearing_selection_releases_overlay() {
        let mut state = state_with_two_elements();
        let baseline = state.scene.resource_count();
        select(&mut state, id(1));
        sync_selection(&mut state);

        state.selection.clear();
        sync_selection(&mut state);
        assert_eq!(state.scene.resource_count(), baseline);
        assert!(state.effects.selection.is_none());
    }

    #[test]
    fn hover_overlay_is_replaced_not_accumulated() {
        let mut state = state_with_two_elements();
        set_hover(&mut state, Some(id(1)));
        set_hover(&mut state, Some(id(2)));
        assert_eq!(state.scene.count(|k| matches!(k, NodeKind::HoverHighlight { .. })), 1);

        set_hover(&mut state, None);
        assert_eq!(state.scene.count(|k| matches!(k, NodeKind::HoverHighlight { .. })), 0);
    }
}
