//! Use-Cases der Application-Layer-Orchestrierung.

pub mod camera;
pub mod ignore_list;
pub mod metadata;
pub mod model_loading;
pub mod picking;
pub mod presets;
pub mod selection;
pub mod viewport;
pub mod visual_effects;
