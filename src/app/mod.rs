//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod render_scene;
pub mod scheduler;
/// Application State
///
/// Dieses Modul verwaltet den Zustand des Viewers (Modell, Kamera,
/// Selektion, Ignore-Liste, Presets, Panels).
pub mod state;
pub mod tasks;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use render_scene::build as build_render_scene;
pub use state::{AppState, SelectionState, UiState, ViewState};
pub use tasks::{ExecutionMode, Generation};
