//! Tesselliertes Modell-Mesh mit Element-Identifier pro Dreieck.
//!
//! Das Mesh wird einmal aus dem Asset aufgebaut und danach nur noch gelesen
//! (Picking, Bounding-Boxen, Rendering). Fehlerhafte Indizes oder fehlende
//! Attribute führen nie zu Fehlern, sondern zu Dreiecken ohne Element (`0`).

use super::{Aabb, ElementId, ElementProperties, Ray};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standardfarbe für Vertices ohne Farbattribut (RGBA).
pub const DEFAULT_VERTEX_COLOR: [f32; 4] = [0.75, 0.75, 0.78, 1.0];

/// Serialisierbares Mesh-Asset, wie es von der Modellquelle geliefert wird.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshAsset {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// Element-Identifier pro Vertex
    pub element_ids: Vec<u32>,
    /// Optionale Vertexfarben (RGBA)
    #[serde(default)]
    pub colors: Option<Vec<[f32; 4]>>,
    /// IFC-Attribute pro Element-Identifier
    #[serde(default)]
    pub properties: HashMap<u32, ElementProperties>,
}

/// Treffer eines Strahls auf dem Mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Dreiecksindex (Face)
    pub triangle: usize,
    /// Abstand entlang des Strahls
    pub distance: f32,
    /// Schnittpunkt in Weltkoordinaten
    pub point: Vec3,
}

/// Alle Dreiecke eines Elements plus deren Hüllbox (Vorfilter beim Picking).
#[derive(Debug, Clone)]
struct ElementChunk {
    element: u32,
    bounds: Aabb,
    triangles: Vec<u32>,
}

/// Geladenes Modell-Mesh
#[derive(Debug, Clone)]
pub struct ModelMesh {
    positions: Vec<Vec3>,
    colors: Vec<[f32; 4]>,
    vertex_elements: Vec<u32>,
    indices: Vec<u32>,
    triangle_elements: Vec<u32>,
    chunks: Vec<ElementChunk>,
    chunk_by_element: HashMap<u32, usize>,
    element_bounds: HashMap<ElementId, Aabb>,
    properties: HashMap<ElementId, ElementProperties>,
    bounds: Option<Aabb>,
}

impl ModelMesh {
    /// Parst ein JSON-Asset.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let asset: MeshAsset = serde_json::from_slice(bytes)?;
        Ok(Self::from_asset(asset))
    }

    /// Baut das Mesh inklusive Element-Index auf.
    pub fn from_asset(asset: MeshAsset) -> Self {
        let positions: Vec<Vec3> = asset.positions.iter().map(|p| Vec3::from_array(*p)).collect();
        let vertex_count = positions.len();

        let mut vertex_elements = asset.element_ids;
        vertex_elements.resize(vertex_count, 0);

        let colors = match asset.colors {
            Some(mut c) => {
                c.resize(vertex_count, DEFAULT_VERTEX_COLOR);
                c
            }
            None => vec![DEFAULT_VERTEX_COLOR; vertex_count],
        };

        // Element-Bounds über alle Vertices mit diesem Identifier
        let mut element_bounds: HashMap<ElementId, Aabb> = HashMap::new();
        for (pos, raw) in positions.iter().zip(&vertex_elements) {
            if let Some(id) = ElementId::new(*raw) {
                element_bounds.entry(id).or_insert(Aabb::EMPTY).extend(*pos);
            }
        }

        let indices = asset.indices;
        let triangle_count = indices.len() / 3;
        let mut triangle_elements = Vec::with_capacity(triangle_count);
        let mut chunks: Vec<ElementChunk> = Vec::new();
        let mut chunk_by_element: HashMap<u32, usize> = HashMap::new();

        for (tri, face) in indices.chunks_exact(3).enumerate() {
            let valid = face.iter().all(|&i| (i as usize) < vertex_count);
            if !valid {
                triangle_elements.push(0);
                continue;
            }
            let raw = vertex_elements[face[0] as usize];
            triangle_elements.push(raw);

            let idx = *chunk_by_element.entry(raw).or_insert_with(|| {
                chunks.push(ElementChunk {
                    element: raw,
                    bounds: Aabb::EMPTY,
                    triangles: Vec::new(),
                });
                chunks.len() - 1
            });
            let chunk = &mut chunks[idx];
            for &i in face {
                chunk.bounds.extend(positions[i as usize]);
            }
            chunk.triangles.push(tri as u32);
        }

        let bounds = Aabb::from_points(positions.iter().copied());

        let properties = asset
            .properties
            .into_iter()
            .filter_map(|(raw, props)| ElementId::new(raw).map(|id| (id, props)))
            .collect();

        Self {
            positions,
            colors,
            vertex_elements,
            indices,
            triangle_elements,
            chunks,
            chunk_by_element,
            element_bounds,
            properties,
            bounds,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Element-Identifier pro Vertex (Rohwerte, `0` = kein Element).
    pub fn vertex_elements(&self) -> &[u32] {
        &self.vertex_elements
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_elements.len()
    }

    /// Anzahl unterschiedlicher Elemente mit Geometrie.
    pub fn element_count(&self) -> usize {
        self.element_bounds.len()
    }

    /// Hüllbox des gesamten Modells (`None` bei leerem Mesh).
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Rohwert des Identifiers für ein Dreieck. Unbekannte Dreiecke liefern `0`.
    pub fn element_at_triangle(&self, triangle: usize) -> u32 {
        self.triangle_elements.get(triangle).copied().unwrap_or(0)
    }

    /// Hüllbox aller Vertices eines Elements.
    pub fn element_bounds(&self, id: ElementId) -> Option<Aabb> {
        self.element_bounds.get(&id).copied()
    }

    /// Dreiecksindizes eines Elements (für Hover-Subsets).
    pub fn element_triangles(&self, id: ElementId) -> &[u32] {
        self.chunk_by_element
            .get(&id.get())
            .and_then(|&i| self.chunks.get(i))
            .map(|c| c.triangles.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_element(&self, id: ElementId) -> bool {
        self.element_bounds.contains_key(&id)
    }

    pub fn properties(&self, id: ElementId) -> Option<&ElementProperties> {
        self.properties.get(&id)
    }

    /// Primär- und Sekundärname eines Elements (mit Fallbacks).
    pub fn display_names(&self, id: ElementId) -> (String, String) {
        match self.properties(id) {
            Some(props) => (props.primary_name(), props.secondary_name()),
            None => (super::element::UNKNOWN_ELEMENT_NAME.to_string(), String::new()),
        }
    }

    /// Nächster Schnittpunkt des Strahls mit dem Mesh.
    ///
    /// Element-Hüllboxen dienen als Vorfilter; Dreiecke werden nur getestet,
    /// wenn die Box näher liegt als der bisher beste Treffer.
    pub fn raycast(&self, ray: &Ray) -> Option<MeshHit> {
        self.raycast_where(ray, |_| false)
    }

    /// Wie `raycast`, überspringt aber Elemente, für die `skip` zutrifft.
    /// Übersprungene Elemente verdecken nichts.
    pub fn raycast_where(&self, ray: &Ray, skip: impl Fn(u32) -> bool) -> Option<MeshHit> {
        let model_bounds = self.bounds?;
        ray.intersect_aabb(&model_bounds)?;

        let mut best: Option<(usize, f32)> = None;
        for chunk in &self.chunks {
            if skip(chunk.element) {
                continue;
            }
            let Some(t_box) = ray.intersect_aabb(&chunk.bounds) else {
                continue;
            };
            if best.is_some_and(|(_, t)| t_box > t) {
                continue;
            }
            for &tri in &chunk.triangles {
                let Some([a, b, c]) = self.triangle_vertices(tri as usize) else {
                    continue;
                };
                if let Some(t) = ray.intersect_triangle(a, b, c) {
                    if best.is_none_or(|(_, best_t)| t < best_t) {
                        best = Some((tri as usize, t));
                    }
                }
            }
        }

        best.map(|(triangle, distance)| MeshHit {
            triangle,
            distance,
            point: ray.at(distance),
        })
    }

    fn triangle_vertices(&self, triangle: usize) -> Option<[Vec3; 3]> {
        let face = self.indices.get(triangle * 3..triangle * 3 + 3)?;
        let a = *self.positions.get(face[0] as usize)?;
        let b = *self.positions.get(face[1] as usize)?;
        let c = *self.positions.get(face[2] as usize)?;
        Some([a, b, c])
    }
}

/// Baut Test- und Demo-Meshes aus achsenparallelen Quadern.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    asset: MeshAsset,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen Quader für `raw_id` hinzu (12 Dreiecke).
    pub fn add_box(mut self, raw_id: u32, min: Vec3, max: Vec3, color: [f32; 4]) -> Self {
        let base = self.asset.positions.len() as u32;
        for corner in Aabb::new(min, max).corners() {
            self.asset.positions.push(corner.to_array());
            self.asset.element_ids.push(raw_id);
            self.asset.colors.get_or_insert_with(Vec::new).push(color);
        }
        // Eckenindex: Bit 0 = x, Bit 1 = y, Bit 2 = z
        const FACES: [[u32; 6]; 6] = [
            [0, 2, 1, 1, 2, 3], // -z
            [4, 5, 6, 5, 7, 6], // +z
            [0, 1, 4, 1, 5, 4], // -y
            [2, 6, 3, 3, 6, 7], // +y
            [0, 4, 2, 2, 4, 6], // -x
            [1, 3, 5, 3, 7, 5], // +x
        ];
        for face in FACES {
            self.asset.indices.extend(face.iter().map(|i| base + i));
        }
        self
    }

    /// Hinterlegt IFC-Attribute für ein Element.
    pub fn with_properties(mut self, raw_id: u32, props: ElementProperties) -> Self {
        self.asset.properties.insert(raw_id, props);
        self
    }

    pub fn into_asset(self) -> MeshAsset {
        self.asset
    }

    pub fn build(self) -> ModelMesh {
        ModelMesh::from_asset(self.asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_boxes() -> ModelMesh {
        MeshBuilder::new()
            .add_box(7, Vec3::new(0.0, -1.0, 2.0), Vec3::new(2.0, 5.0, 4.0), [1.0; 4])
            .add_box(9, Vec3::new(0.0, 0.0, 10.0), Vec3::new(2.0, 2.0, 12.0), [1.0; 4])
            .build()
    }

    #[test]
    fn element_bounds_cover_all_vertices_of_element() {
        let mesh = two_boxes();
        let id = ElementId::new(7).expect("gültig");
        let bounds = mesh.element_bounds(id).expect("Element vorhanden");
        assert_relative_eq!(bounds.center().x, 1.0);
        assert_relative_eq!(bounds.center().y, 2.0);
        assert_relative_eq!(bounds.center().z, 3.0);
        assert_eq!(mesh.element_triangles(id).len(), 12);
        assert_eq!(mesh.element_count(), 2);
    }

    #[test]
    fn raycast_returns_nearest_triangle() {
        let mesh = two_boxes();
        let ray = Ray::new(Vec3::new(1.0, 1.0, 50.0), Vec3::NEG_Z).expect("gültige Richtung");
        let hit = mesh.raycast(&ray).expect("Treffer");
        assert_eq!(mesh.element_at_triangle(hit.triangle), 9);
        assert_relative_eq!(hit.distance, 38.0, epsilon = 1e-4);
    }

    #[test]
    fn skipped_elements_do_not_occlude() {
        let mesh = two_boxes();
        let ray = Ray::new(Vec3::new(1.0, 1.0, 50.0), Vec3::NEG_Z).expect("gültige Richtung");
        let hit = mesh.raycast_where(&ray, |raw| raw == 9).expect("Treffer dahinter");
        assert_eq!(mesh.element_at_triangle(hit.triangle), 7);
        assert!(mesh.raycast_where(&ray, |_| true).is_none());
    }

    #[test]
    fn raycast_misses_empty_space() {
        let mesh = two_boxes();
        let ray = Ray::new(Vec3::new(50.0, 50.0, 50.0), Vec3::Y).expect("gültige Richtung");
        assert!(mesh.raycast(&ray).is_none());
    }

    #[test]
    fn malformed_indices_degrade_to_no_element() {
        let asset = MeshAsset {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            indices: vec![0, 1, 2, 0, 1, 99],
            element_ids: vec![5],
            ..Default::default()
        };
        let mesh = ModelMesh::from_asset(asset);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.element_at_triangle(0), 5);
        assert_eq!(mesh.element_at_triangle(1), 0);
        assert_eq!(mesh.element_at_triangle(1000), 0);
    }

    #[test]
    fn parses_json_asset_with_string_keyed_properties() {
        let json = r#"{
            "positions": [[0,0,0],[1,0,0],[0,1,0]],
            "indices": [0,1,2],
            "element_ids": [3,3,3],
            "properties": {"3": {"Name": "Stütze", "ObjectType": "Beton"}}
        }"#;
        let mesh = ModelMesh::from_json_slice(json.as_bytes()).expect("gültiges Asset");
        let id = ElementId::new(3).expect("gültig");
        assert_eq!(mesh.display_names(id), ("Stütze".to_string(), "Beton".to_string()));
    }
}
