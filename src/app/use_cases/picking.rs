//! Auflösung von Bildschirmpositionen auf Element-Identifier.
//!
//! Ausgeblendete Elemente werden nicht gezeichnet und lassen den Strahl
//! durch. Blacklist-Elemente bleiben sichtbar, verdecken also weiterhin,
//! liefern aber kein Ergebnis. Jeder Fehlerfall ergibt `None`.

use crate::app::AppState;
use crate::core::{ElementId, IgnoreSet, ModelMesh, OrbitCamera};
use glam::Vec2;

/// Element unter der Bildschirmposition, gefiltert durch die Ignore-Menge.
/// Vor dem Laden der Blacklist ist nichts auswählbar.
pub fn resolve(state: &AppState, screen_pos: Vec2) -> Option<ElementId> {
    if !state.interaction_ready() {
        return None;
    }
    let mesh = state.model.mesh.as_deref()?;
    resolve_in(
        mesh,
        &state.view.camera,
        state.view.viewport(),
        &state.ignore.set,
        screen_pos,
    )
}

/// Picking gegen ein Mesh ohne App-Zustand.
pub fn resolve_in(
    mesh: &ModelMesh,
    camera: &OrbitCamera,
    viewport: Vec2,
    ignore: &IgnoreSet,
    screen_pos: Vec2,
) -> Option<ElementId> {
    if !screen_pos.is_finite() {
        return None;
    }
    let ray = camera.ray_from_screen(screen_pos, viewport)?;
    let hit = mesh.raycast_where(&ray, |raw| {
        ElementId::new(raw).is_some_and(|id| ignore.is_hidden(id))
    })?;
    let id = ElementId::new(mesh.element_at_triangle(hit.triangle))?;
    if ignore.should_ignore(id) {
        return None;
    }
    Some(id)
}
