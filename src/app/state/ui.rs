/// Cursor-Hinweis für den Viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    /// Über einem auswählbaren Element
    Interactive,
}

/// UI-bezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub cursor: CursorHint,
    /// Letzte Statusmeldung (Statusleiste)
    pub status_message: Option<String>,
    pub show_preset_panel: bool,
    pub show_hidden_list: bool,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand.
    pub fn new() -> Self {
        Self {
            cursor: CursorHint::Default,
            status_message: None,
            show_preset_panel: true,
            show_hidden_list: false,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
