//! UI-Komponenten: Toolbar, Panels, Overlays, Input-Handling.

mod context_menu;
pub mod hidden_list;
pub mod input;
pub mod metadata_panel;
/// UI-Layer mit egui
///
/// Panels und Overlays lesen ausschließlich den AppState und liefern
/// `AppIntent`s zurück; Mutationen laufen über den Controller.
pub mod overlay;
pub mod presets_panel;
pub mod status;
pub mod toolbar;

pub use context_menu::render_context_menu;
pub use hidden_list::render_hidden_list;
pub use input::InputState;
pub use metadata_panel::render_metadata_panel;
pub use overlay::{render_loading, render_selection_info};
pub use presets_panel::{render_presets_panel, PresetPanelState};
pub use status::render_status_bar;
pub use toolbar::render_toolbar;
