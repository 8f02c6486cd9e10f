use crate::core::{ElementId, NodeId};

/// Live-Overlay der Selektion: Wireframe-Box plus Mittellinie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionVisual {
    pub element: ElementId,
    pub box_node: NodeId,
    pub line_node: NodeId,
}

/// Live-Overlay des Hover-Elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverVisual {
    pub element: ElementId,
    pub node: NodeId,
}

/// Höchstens eine Generation Selektions- und Hover-Overlays.
#[derive(Debug, Clone, Default)]
pub struct VisualEffectsState {
    pub selection: Option<SelectionVisual>,
    pub hover: Option<HoverVisual>,
}

impl VisualEffectsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element, für das aktuell eine Selektions-Box existiert.
    pub fn visualized(&self) -> Option<ElementId> {
        self.selection.map(|v| v.element)
    }
}
