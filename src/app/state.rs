//! Application State: zentrale Datenhaltung.
//!
//! Der Zustand ist in Teilbereiche pro Komponente gegliedert. Mutationen
//! laufen ausschließlich über Handler und Use-Cases des Controllers.

mod app_state;
mod effects;
mod ignore;
mod metadata;
mod model;
mod presets;
mod selection;
mod ui;
mod view;

pub use app_state::AppState;
pub use effects::{HoverVisual, SelectionVisual, VisualEffectsState};
pub use ignore::IgnoreState;
pub use metadata::{MetadataContent, MetadataPanelState};
pub use model::{LoadingProgress, LoadingStage, ModelState};
pub use presets::{PresetCache, PresetState};
pub use selection::{ContextMenuState, HoverState, SelectionState};
pub use ui::{CursorHint, UiState};
pub use view::ViewState;
