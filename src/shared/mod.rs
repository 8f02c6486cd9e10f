//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und `render` geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod render_scene;

pub use options::{ModelEntry, ViewerOptions};
pub use render_scene::{HighlightDraw, LineDraw, MeshDraw, RenderScene};
