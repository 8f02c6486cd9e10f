//! Render-Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und `render` sie konsumiert.

use crate::core::{ElementId, GeometryHandle, ModelMesh};
use glam::{Mat4, Vec3};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Modell-Mesh mit den im aktuellen Frame ausgeblendeten Elementen.
#[derive(Clone)]
pub struct MeshDraw {
    pub geometry: GeometryHandle,
    pub mesh: Arc<ModelMesh>,
    /// Rohwerte der ausgeblendeten Element-Identifier
    pub hidden: Arc<BTreeSet<u32>>,
}

/// Transparente Einfärbung der Dreiecke eines Elements.
#[derive(Clone)]
pub struct HighlightDraw {
    pub geometry: GeometryHandle,
    pub mesh: Arc<ModelMesh>,
    pub element: ElementId,
    pub color: [f32; 4],
}

/// Liniensegmente in Weltkoordinaten (Selektionsbox, Mittellinie).
#[derive(Clone)]
pub struct LineDraw {
    pub geometry: GeometryHandle,
    pub segments: Vec<[Vec3; 2]>,
    pub color: [f32; 4],
}

/// Read-only Daten für einen Render-Frame.
#[derive(Clone)]
pub struct RenderScene {
    /// Projektion × View der Kamera
    pub view_projection: Mat4,
    pub camera_position: Vec3,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
    pub background_color: [f32; 4],
    pub meshes: Vec<MeshDraw>,
    pub highlights: Vec<HighlightDraw>,
    pub lines: Vec<LineDraw>,
    /// Revision des Szenengraphs (ändert sich bei jedem Hinzufügen/Entfernen)
    pub revision: u64,
}

impl RenderScene {
    /// Gibt zurück, ob ein Modell für Rendering vorhanden ist.
    pub fn has_model(&self) -> bool {
        !self.meshes.is_empty()
    }

    /// Alle Geometrie-Handles, die in diesem Frame gezeichnet werden.
    pub fn geometries(&self) -> impl Iterator<Item = GeometryHandle> + '_ {
        self.meshes
            .iter()
            .map(|m| m.geometry)
            .chain(self.highlights.iter().map(|h| h.geometry))
            .chain(self.lines.iter().map(|l| l.geometry))
    }
}
