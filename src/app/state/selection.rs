use crate::app::tasks::Generation;
use crate::core::ElementId;
use glam::{Vec2, Vec3};

/// Zustand der Einzelselektion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub visible: bool,
    /// Oberkante-Mitte der Element-Hüllbox (Anker des Info-Overlays)
    pub anchor: Option<Vec3>,
    pub element: Option<ElementId>,
    pub primary_name: String,
    pub secondary_name: String,
    /// Wird bei jeder Änderung erhöht; veraltete Metadaten werden verworfen
    pub generation: Generation,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuell selektiertes Element (nur wenn sichtbar).
    pub fn selected(&self) -> Option<ElementId> {
        if self.visible {
            self.element
        } else {
            None
        }
    }

    /// Setzt eine neue Selektion.
    pub fn select(&mut self, element: ElementId, anchor: Vec3, primary: String, secondary: String) {
        self.visible = true;
        self.anchor = Some(anchor);
        self.element = Some(element);
        self.primary_name = primary;
        self.secondary_name = secondary;
        self.generation = self.generation.next();
    }

    /// Hebt die Selektion auf.
    pub fn clear(&mut self) {
        self.visible = false;
        self.anchor = None;
        self.element = None;
        self.primary_name.clear();
        self.secondary_name.clear();
        self.generation = self.generation.next();
    }
}

/// Element unter dem Mauszeiger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    pub element: Option<ElementId>,
}

/// Offenes Kontextmenü
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuState {
    /// Position relativ zum Viewport (Pixel)
    pub screen_pos: Vec2,
    pub element: ElementId,
    pub name: String,
}
