//! CPU-seitige Vertex- und Index-Erzeugung für die Szenen-Draws.

use super::types::ColorVertex;
use crate::core::{ElementId, ModelMesh};
use glam::Vec3;
use std::collections::BTreeSet;

/// Ein Vertex pro Modell-Vertex mit seiner Vertexfarbe.
pub(crate) fn model_vertices(mesh: &ModelMesh) -> Vec<ColorVertex> {
    mesh.positions()
        .iter()
        .zip(mesh.colors())
        .map(|(p, c)| ColorVertex::new(*p, *c))
        .collect()
}

/// Indizes aller Dreiecke, deren Element nicht ausgeblendet ist.
/// Dreiecke mit ungültigen Indizes werden übersprungen.
pub(crate) fn visible_indices(mesh: &ModelMesh, hidden: &BTreeSet<u32>) -> Vec<u32> {
    let vertex_count = mesh.vertex_count() as u32;
    mesh.indices()
        .chunks_exact(3)
        .enumerate()
        .filter(|(tri, face)| {
            face.iter().all(|&i| i < vertex_count)
                && !hidden.contains(&mesh.element_at_triangle(*tri))
        })
        .flat_map(|(_, face)| face.iter().copied())
        .collect()
}

/// Nicht-indizierte Dreiecke eines Elements in einer Einheitsfarbe.
pub(crate) fn highlight_vertices(
    mesh: &ModelMesh,
    element: ElementId,
    color: [f32; 4],
) -> Vec<ColorVertex> {
    let positions = mesh.positions();
    let indices = mesh.indices();
    let mut vertices = Vec::new();
    for &tri in mesh.element_triangles(element) {
        let base = tri as usize * 3;
        let Some(face) = indices.get(base..base + 3) else {
            continue;
        };
        for &i in face {
            if let Some(p) = positions.get(i as usize) {
                vertices.push(ColorVertex::new(*p, color));
            }
        }
    }
    vertices
}

/// Zwei Vertices pro Segment (LineList).
pub(crate) fn line_vertices(segments: &[[Vec3; 2]], color: [f32; 4]) -> Vec<ColorVertex> {
    segments
        .iter()
        .flat_map(|[a, b]| [ColorVertex::new(*a, color), ColorVertex::new(*b, color)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MeshBuilder;

    fn two_boxes() -> ModelMesh {
        MeshBuilder::new()
            .add_box(1, Vec3::ZERO, Vec3::ONE, [1.0; 4])
            .add_box(2, Vec3::splat(2.0), Vec3::splat(3.0), [0.5; 4])
            .build()
    }

    #[test]
    fn hidden_element_triangles_are_dropped() {
        let mesh = two_boxes();
        let all = visible_indices(&mesh, &BTreeSet::new());
        assert_eq!(all.len(), mesh.indices().len());

        let without_one = visible_indices(&mesh, &BTreeSet::from([1]));
        assert_eq!(without_one.len(), mesh.indices().len() / 2);
    }

    #[test]
    fn highlight_covers_all_triangles_of_element() {
        let mesh = two_boxes();
        let id = ElementId::new(2).expect("gültig");
        let vertices = highlight_vertices(&mesh, id, [1.0, 1.0, 0.0, 0.3]);
        assert_eq!(vertices.len(), mesh.element_triangles(id).len() * 3);
        assert!(vertices.iter().all(|v| v.color == [1.0, 1.0, 0.0, 0.3]));
    }

    #[test]
    fn line_vertices_come_in_pairs() {
        let segments = [[Vec3::ZERO, Vec3::X], [Vec3::Y, Vec3::Z]];
        assert_eq!(line_vertices(&segments, [1.0; 4]).len(), 4);
    }
}
