//! BIM-Viewer Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod render;
pub mod services;
pub mod shared;
pub mod ui;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, ExecutionMode, Generation, SelectionState,
    UiState, ViewState,
};
pub use core::{
    Aabb, CameraViewpoint, ElementId, IgnoreSet, MeshAsset, MeshBuilder, ModelMesh, OrbitCamera,
    PresetSlot, Ray, Scene, SlotIndex,
};
pub use services::{MemoryBackend, ServiceError, Services};
pub use shared::{ModelEntry, RenderScene, ViewerOptions};
