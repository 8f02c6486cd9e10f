//! Szenengraph mit expliziter Ressourcenverwaltung.
//!
//! Jeder Knoten besitzt genau ein Geometrie- und ein Material-Handle. Der
//! Renderer hält GPU-Puffer pro Geometrie-Handle und gibt sie frei, sobald
//! das Handle nicht mehr lebendig ist. Knoten werden ausschließlich über
//! `remove`/`dispose_all` entfernt, damit kein Handle verwaist.

use super::{ElementId, ModelMesh};
use glam::Vec3;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Identität eines Szenenknotens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// Handle auf eine (GPU-seitige) Geometrie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(u64);

impl GeometryHandle {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Handle auf ein Material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(u64);

/// Inhalt eines Szenenknotens.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Wurzel eines geladenen Modells
    Model { key: String, mesh: Arc<ModelMesh> },
    /// Transparente Einfärbung der Dreiecke eines Elements
    HoverHighlight {
        mesh: Arc<ModelMesh>,
        element: ElementId,
        color: [f32; 4],
    },
    /// Wireframe-Box um das selektierte Element
    SelectionBox {
        element: ElementId,
        segments: Vec<[Vec3; 2]>,
        color: [f32; 4],
    },
    /// Vertikale Mittellinie des selektierten Elements
    CenterLine {
        element: ElementId,
        segment: [Vec3; 2],
        color: [f32; 4],
    },
    /// Unsichtbarer Platzhalter für ausgeblendete Elemente
    HiddenPlaceholder { element: ElementId },
}

/// Knoten im Szenengraph
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub visible: bool,
}

/// Szenengraph (Einfügereihenfolge = Zeichenreihenfolge)
#[derive(Debug, Default)]
pub struct Scene {
    nodes: IndexMap<NodeId, SceneNode>,
    next_handle: u64,
    live_geometries: HashSet<GeometryHandle>,
    live_materials: HashSet<MaterialHandle>,
    revision: u64,
}

impl Scene {
    /// Erstellt einen leeren Szenengraph.
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Fügt einen Knoten hinzu und allokiert seine Ressourcen.
    pub fn add(&mut self, kind: NodeKind) -> NodeId {
        let visible = !matches!(kind, NodeKind::HiddenPlaceholder { .. });
        let id = NodeId(self.next());
        let geometry = GeometryHandle(self.next());
        let material = MaterialHandle(self.next());
        self.live_geometries.insert(geometry);
        self.live_materials.insert(material);
        self.nodes.insert(
            id,
            SceneNode {
                id,
                kind,
                geometry,
                material,
                visible,
            },
        );
        self.revision += 1;
        id
    }

    /// Entfernt einen Knoten und gibt Geometrie und Material frei.
    /// Liefert `false`, wenn der Knoten nicht (mehr) existiert.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.shift_remove(&id) else {
            return false;
        };
        self.live_geometries.remove(&node.geometry);
        self.live_materials.remove(&node.material);
        self.revision += 1;
        true
    }

    /// Entfernt alle Knoten, auf die das Prädikat zutrifft. Liefert die Anzahl.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&NodeKind) -> bool) -> usize {
        let ids: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|n| predicate(&n.kind))
            .map(|n| n.id)
            .collect();
        ids.into_iter().filter(|id| self.remove(*id)).count()
    }

    /// Gibt sämtliche Knoten und Ressourcen frei (Teardown).
    pub fn dispose_all(&mut self) {
        let disposed = self.nodes.len();
        self.nodes.clear();
        self.live_geometries.clear();
        self.live_materials.clear();
        self.revision += 1;
        log::debug!("Szene geleert: {} Knoten freigegeben", disposed);
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Anzahl Knoten einer Art.
    pub fn count(&self, predicate: impl Fn(&NodeKind) -> bool) -> usize {
        self.nodes.values().filter(|n| predicate(&n.kind)).count()
    }

    /// Anzahl lebendiger Ressourcen (Geometrien + Materialien).
    pub fn resource_count(&self) -> usize {
        self.live_geometries.len() + self.live_materials.len()
    }

    pub fn is_geometry_live(&self, handle: GeometryHandle) -> bool {
        self.live_geometries.contains(&handle)
    }

    /// Änderungszähler für den Renderer-Abgleich.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(raw: u32) -> NodeKind {
        NodeKind::HiddenPlaceholder {
            element: ElementId::new(raw).expect("gültig"),
        }
    }

    #[test]
    fn add_and_remove_balance_resources() {
        let mut scene = Scene::new();
        let baseline = scene.resource_count();
        let a = scene.add(placeholder(1));
        let b = scene.add(placeholder(2));
        assert_eq!(scene.resource_count(), baseline + 4);

        assert!(scene.remove(a));
        assert!(!scene.remove(a));
        assert_eq!(scene.resource_count(), baseline + 2);
        assert!(scene.contains(b));
    }

    #[test]
    fn placeholders_are_invisible() {
        let mut scene = Scene::new();
        let id = scene.add(placeholder(3));
        assert!(!scene.get(id).expect("Knoten").visible);
    }

    #[test]
    fn dispose_all_releases_everything() {
        let mut scene = Scene::new();
        let node = scene.add(placeholder(1));
        let geometry = scene.get(node).expect("Knoten").geometry;
        scene.add(placeholder(2));
        let rev = scene.revision();

        scene.dispose_all();

        assert!(scene.is_empty());
        assert_eq!(scene.resource_count(), 0);
        assert!(!scene.is_geometry_live(geometry));
        assert!(scene.revision() > rev);
    }

    #[test]
    fn remove_where_counts_removed_nodes() {
        let mut scene = Scene::new();
        scene.add(placeholder(1));
        scene.add(placeholder(2));
        let removed = scene.remove_where(|k| {
            matches!(k, NodeKind::HiddenPlaceholder { element } if element.get() == 2)
        });
        assert_eq!(removed, 1);
        assert_eq!(scene.len(), 1);
    }
}
