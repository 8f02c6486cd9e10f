use crate::core::ElementId;

/// Inhalt des BIM-Metadaten-Panels.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MetadataContent {
    #[default]
    Empty,
    Loading {
        element: ElementId,
    },
    Loaded {
        element: ElementId,
        record: serde_json::Map<String, serde_json::Value>,
    },
    /// Kein Datensatz für dieses Element
    NotFound {
        element: ElementId,
    },
    /// Transportfehler; `status` bei HTTP-Fehlern
    Error {
        element: ElementId,
        status: Option<u16>,
        message: String,
        remedy: &'static str,
    },
}

/// Zustand des Metadaten-Panels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataPanelState {
    pub enabled: bool,
    pub content: MetadataContent,
}

impl MetadataPanelState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            content: MetadataContent::Empty,
        }
    }
}
