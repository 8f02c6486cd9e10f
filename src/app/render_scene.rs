//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::core::NodeKind;
use crate::shared::{HighlightDraw, LineDraw, MeshDraw, RenderScene};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    // Ausgeblendete Elemente über ihre Platzhalter-Knoten
    let hidden: BTreeSet<u32> = state
        .scene
        .nodes()
        .filter_map(|node| match &node.kind {
            NodeKind::HiddenPlaceholder { element } => Some(element.get()),
            _ => None,
        })
        .collect();
    let hidden = Arc::new(hidden);

    let mut meshes = Vec::new();
    let mut highlights = Vec::new();
    let mut lines = Vec::new();

    for node in state.scene.nodes().filter(|n| n.visible) {
        match &node.kind {
            NodeKind::Model { mesh, .. } => meshes.push(MeshDraw {
                geometry: node.geometry,
                mesh: mesh.clone(),
                hidden: hidden.clone(),
            }),
            NodeKind::HoverHighlight {
                mesh,
                element,
                color,
            } => {
                if !hidden.contains(&element.get()) {
                    highlights.push(HighlightDraw {
                        geometry: node.geometry,
                        mesh: mesh.clone(),
                        element: *element,
                        color: *color,
                    });
                }
            }
            NodeKind::SelectionBox {
                segments, color, ..
            } => lines.push(LineDraw {
                geometry: node.geometry,
                segments: segments.clone(),
                color: *color,
            }),
            NodeKind::CenterLine { segment, color, .. } => lines.push(LineDraw {
                geometry: node.geometry,
                segments: vec![*segment],
                color: *color,
            }),
            NodeKind::HiddenPlaceholder { .. } => {}
        }
    }

    RenderScene {
        view_projection: state.view.camera.view_projection(),
        camera_position: state.view.camera.position,
        viewport_size: state.view.viewport_size,
        background_color: state.options.background_color,
        meshes,
        highlights,
        lines,
        revision: state.scene.revision(),
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::use_cases::ignore_list;
    use crate::app::AppState;
    use crate::core::{ElementId, MeshBuilder, NodeKind};
    use glam::Vec3;
    use std::sync::Arc;

    #[test]
    fn hidden_elements_are_passed_to_mesh_draw() {
        let mut state = AppState::new();
        let mesh = Arc::new(
            MeshBuilder::new()
                .add_box(3, Vec3::ZERO, Vec3::ONE, [1.0; 4])
                .build(),
        );
        state.scene.add(NodeKind::Model {
            key: "ground".into(),
            mesh,
        });
        ignore_list::hide(&mut state, ElementId::new(3).expect("gültig"));

        let scene = build(&state);
        assert_eq!(scene.meshes.len(), 1);
        assert!(scene.meshes[0].hidden.contains(&3));
        // Platzhalter werden nicht gezeichnet
        assert_eq!(scene.geometries().count(), 1);
    }
}
