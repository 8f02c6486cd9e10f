use crate::core::{CameraViewpoint, ElementId};
use glam::Vec2;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
/// Bildschirmpositionen sind Pixel relativ zur linken oberen Viewport-Ecke.
#[derive(Debug, Clone)]
pub enum AppIntent {
    // ── Lebenszyklus ────────────────────────────────────────────
    /// Erster Frame: Blacklist und Standardmodell laden
    StartupRequested,
    /// Anwendung beenden (Render-Loop stoppen, Ressourcen freigeben)
    ShutdownRequested,
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },

    // ── Zeiger ──────────────────────────────────────────────────
    /// Mauszeiger bewegt (bereits gedrosselt)
    PointerMoved { screen_pos: Vec2 },
    /// Mauszeiger hat den Viewport verlassen
    PointerLeft,
    /// Doppelklick: Element unter dem Zeiger auswählen
    ConfirmRequested { screen_pos: Vec2 },
    /// Rechtsklick: Kontextmenü öffnen
    ContextRequested { screen_pos: Vec2 },

    // ── Kontextmenü ─────────────────────────────────────────────
    ContextMenuDismissed,
    ContextUnselectRequested,
    ContextHideRequested,
    ContextBlacklistRequested,

    // ── Selektion & Ignore-Liste ────────────────────────────────
    UnselectRequested,
    /// Element programmatisch auswählen
    SelectElementRequested { element: ElementId },
    /// Ausgeblendetes Element wieder einblenden
    ShowHiddenRequested { element: ElementId },
    ShowAllHiddenRequested,
    /// Blacklist erneut vom Server laden (nach Fehler)
    BlacklistReloadRequested,

    // ── Navigation ──────────────────────────────────────────────
    /// Primäre Maustaste gezogen (Pixel-Delta)
    OrbitDragged { delta: Vec2 },
    /// Sekundäre Maustaste gezogen (Pixel-Delta)
    PanDragged { delta: Vec2 },
    /// Mausrad (positive Werte = hinein)
    DollyScrolled { scroll: f32 },

    // ── Modelle ─────────────────────────────────────────────────
    ModelSelected { key: String },

    // ── Presets ─────────────────────────────────────────────────
    PresetSaveRequested { slot: usize, label: String },
    PresetLoadRequested { slot: usize },
    PresetDeleteRequested { slot: usize },
    PresetRenameRequested { slot: usize, label: String },
    /// Preset-Liste des aktiven Modells anfordern (entprellt, gecacht)
    PresetListRequested,
    PresetCountRequested,
    DefaultViewpointRequested,
    ClearPresetCacheRequested,

    // ── Kamera-API ──────────────────────────────────────────────
    SetCameraStateRequested {
        viewpoint: CameraViewpoint,
        animate: bool,
    },
    SetZoomRequested { factor: f32, animate: bool },
    ResetCameraRequested,

    // ── Panels ──────────────────────────────────────────────────
    MetadataPanelToggled,
    PresetPanelToggled,
    HiddenListToggled,
}
