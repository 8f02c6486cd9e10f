use crate::core::{CameraViewpoint, ElementId};
use glam::Vec2;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // ── Lebenszyklus ────────────────────────────────────────────
    Shutdown,
    SetViewportSize { size: [f32; 2] },

    // ── Modelle ─────────────────────────────────────────────────
    LoadModel { key: String },

    // ── Picking & Selektion ─────────────────────────────────────
    UpdateHover { screen_pos: Vec2 },
    ClearHover,
    ConfirmPick { screen_pos: Vec2 },
    SelectElement { element: ElementId },
    ClearSelection,
    OpenContextMenu { screen_pos: Vec2 },
    CloseContextMenu,

    // ── Ignore-Liste ────────────────────────────────────────────
    LoadBlacklist,
    HideElement { element: ElementId },
    BlacklistElement { element: ElementId, name: String },
    ShowElement { element: ElementId },
    ShowAllHidden,

    // ── Kamera ──────────────────────────────────────────────────
    OrbitCamera { delta: Vec2 },
    PanCamera { delta: Vec2 },
    DollyCamera { factor: f32 },
    SetCameraState {
        viewpoint: CameraViewpoint,
        animate: bool,
    },
    SetZoom { factor: f32, animate: bool },
    ResetCamera,

    // ── Presets ─────────────────────────────────────────────────
    SavePreset { slot: usize, label: String },
    LoadPreset { slot: usize },
    DeletePreset { slot: usize },
    RenamePreset { slot: usize, label: String },
    RequestPresetList,
    RefreshPresetCount,
    LoadDefaultViewpoint,
    ClearPresetCache,

    // ── Panels ──────────────────────────────────────────────────
    ToggleMetadataPanel,
    TogglePresetPanel,
    ToggleHiddenList,
}
