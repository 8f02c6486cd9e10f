//! Core-Domänentypen: Elemente, Mesh, Picking-Geometrie, Kamera, Szenengraph.

pub mod animation;
pub mod bounds;
pub mod camera;
pub mod element;
pub mod ignore;
/// Modell-Mesh mit Element-Index
///
/// Dieses Modul bildet die geladene Geometrie ab:
/// - MeshAsset: serialisierbares Asset der Modellquelle
/// - ModelMesh: Dreiecke, Element-Identifier pro Dreieck, Bounds pro Element
/// - MeshBuilder: Quader-Meshes für Tests und Demo-Daten
pub mod mesh;
pub mod model_cache;
pub mod preset;
pub mod ray;
pub mod scene;

pub use animation::{ease_in_out_cubic, CameraPose, CameraTransition};
pub use bounds::Aabb;
pub use camera::OrbitCamera;
pub use element::{ElementId, ElementProperties, UNKNOWN_ELEMENT_NAME};
pub use ignore::{IgnoreSet, IgnoreStats};
pub use mesh::{MeshAsset, MeshBuilder, MeshHit, ModelMesh};
pub use model_cache::{ModelCache, MODEL_CACHE_CAPACITY};
pub use preset::{
    validate_label, CameraViewpoint, PresetContractError, PresetSlot, PresetSlots, SlotIndex,
    MAX_LABEL_CHARS, MAX_PRESETS,
};
pub use ray::Ray;
pub use scene::{GeometryHandle, MaterialHandle, NodeId, NodeKind, Scene, SceneNode};
