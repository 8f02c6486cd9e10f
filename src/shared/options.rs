//! Zentrale Konfiguration für den BIM-Viewer.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ── Backend ─────────────────────────────────────────────────────────

/// Basis-URL des Backends. Leer = Offline-Betrieb mit Demo-Modellen.
pub const BACKEND_URL: &str = "";
/// Modell, das beim Start geladen wird.
pub const DEFAULT_MODEL: &str = "ground";

// ── Kamera ──────────────────────────────────────────────────────────

/// Startposition der Kamera.
pub const CAMERA_DEFAULT_POSITION: [f32; 3] = [30.0, 30.0, 30.0];
/// Vertikaler Öffnungswinkel in Grad.
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 1000.0;
/// Hintergrundfarbe (RGBA, 0x1b2029).
pub const BACKGROUND_COLOR: [f32; 4] = [0.106, 0.125, 0.161, 1.0];
/// Kamera-Offset zum Modellzentrum, wenn kein Preset vorhanden ist.
pub const FALLBACK_CAMERA_OFFSET: [f32; 3] = [30.0, 30.0, 30.0];

// ── Navigation ──────────────────────────────────────────────────────

pub const ROTATE_SPEED: f32 = 2.0;
pub const PAN_SPEED: f32 = 5.0;
pub const ZOOM_SPEED: f32 = 2.0;

// ── Animation ───────────────────────────────────────────────────────

/// Zoom-Faktor relativ zur Baseline beim Fokussieren eines Elements.
pub const FOCUS_ZOOM_FACTOR: f32 = 3.0;
/// Dauer von Kamera-Übergängen in Sekunden.
pub const CAMERA_TRANSITION_SECS: f32 = 0.8;

// ── Zeitverhalten ───────────────────────────────────────────────────

/// Debounce für den Abgleich der Selektions-Overlays.
pub const VISUAL_EFFECTS_DEBOUNCE_MS: u64 = 50;
/// Debounce für das Laden der Preset-Liste.
pub const PRESET_LIST_DEBOUNCE_MS: u64 = 300;
/// Mindestabstand zwischen zwei Hover-Picks.
pub const POINTER_MOVE_THROTTLE_MS: u64 = 16;
/// Verzögerung, bis die Ladeanzeige nach Erfolg verschwindet.
pub const LOADING_SETTLE_MS: u64 = 300;
/// Verzögerung, bis eine Fehlermeldung beim Laden verschwindet.
pub const LOADING_FAILURE_CLEAR_MS: u64 = 2000;

// ── Overlays ────────────────────────────────────────────────────────

/// Farbe der Wireframe-Box (RGBA: Gelb).
pub const SELECTION_BOX_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
/// Farbe der Mittellinie (RGBA: Weiß).
pub const CENTER_LINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Hover-Einfärbung (RGBA: Gelb, 30 % Deckkraft).
pub const HOVER_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 0.3];

/// Eintrag der Modell-Auswahl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub key: String,
    pub label: String,
}

fn default_models() -> Vec<ModelEntry> {
    [
        ("third", "Third Fl."),
        ("second", "Second Fl."),
        ("ground", "Ground"),
        ("main", "Main"),
        ("machine", "Machine"),
    ]
    .into_iter()
    .map(|(key, label)| ModelEntry {
        key: key.into(),
        label: label.into(),
    })
    .collect()
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `bim_viewer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    // ── Backend ─────────────────────────────────────────────────
    /// Basis-URL des REST-Backends (leer = Offline-Demo)
    pub backend_url: String,
    /// Lokales Verzeichnis mit `{key}.json`-Assets (statt HTTP)
    pub model_dir: Option<String>,
    /// Modell beim Start
    pub default_model: String,

    // ── Kamera ──────────────────────────────────────────────────
    pub camera_default_position: [f32; 3],
    pub camera_fov_deg: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub background_color: [f32; 4],
    /// Offset zum Modellzentrum für den Preset-Fallback
    pub fallback_camera_offset: [f32; 3],

    // ── Navigation ──────────────────────────────────────────────
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,

    // ── Animation ───────────────────────────────────────────────
    /// Zoom-Faktor beim Fokussieren eines selektierten Elements
    pub focus_zoom_factor: f32,
    /// Dauer von Kamera-Übergängen (Sekunden)
    pub camera_transition_secs: f32,

    // ── Zeitverhalten ───────────────────────────────────────────
    pub visual_effects_debounce_ms: u64,
    pub preset_list_debounce_ms: u64,
    pub pointer_move_throttle_ms: u64,
    pub loading_settle_ms: u64,
    pub loading_failure_clear_ms: u64,

    // ── Cache ───────────────────────────────────────────────────
    pub model_cache_capacity: usize,

    // ── Overlays ────────────────────────────────────────────────
    pub selection_box_color: [f32; 4],
    pub center_line_color: [f32; 4],
    pub hover_color: [f32; 4],

    // ── Panels ──────────────────────────────────────────────────
    /// BIM-Metadaten-Panel beim Start aktiv
    pub metadata_panel_enabled: bool,

    // ── Modelle ─────────────────────────────────────────────────
    /// Auswählbare Modelle (als Tabellen-Array am Ende der Datei)
    pub models: Vec<ModelEntry>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            model_dir: None,
            default_model: DEFAULT_MODEL.to_string(),
            camera_default_position: CAMERA_DEFAULT_POSITION,
            camera_fov_deg: CAMERA_FOV_DEG,
            camera_near: CAMERA_NEAR,
            camera_far: CAMERA_FAR,
            background_color: BACKGROUND_COLOR,
            fallback_camera_offset: FALLBACK_CAMERA_OFFSET,
            rotate_speed: ROTATE_SPEED,
            pan_speed: PAN_SPEED,
            zoom_speed: ZOOM_SPEED,
            focus_zoom_factor: FOCUS_ZOOM_FACTOR,
            camera_transition_secs: CAMERA_TRANSITION_SECS,
            visual_effects_debounce_ms: VISUAL_EFFECTS_DEBOUNCE_MS,
            preset_list_debounce_ms: PRESET_LIST_DEBOUNCE_MS,
            pointer_move_throttle_ms: POINTER_MOVE_THROTTLE_MS,
            loading_settle_ms: LOADING_SETTLE_MS,
            loading_failure_clear_ms: LOADING_FAILURE_CLEAR_MS,
            model_cache_capacity: crate::core::MODEL_CACHE_CAPACITY,
            selection_box_color: SELECTION_BOX_COLOR,
            center_line_color: CENTER_LINE_COLOR,
            hover_color: HOVER_COLOR,
            metadata_panel_enabled: true,
            models: default_models(),
        }
    }
}

impl ViewerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Gibt Default zurück, falls nicht vorhanden.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("bim_viewer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("bim_viewer.toml")
    }

    /// `true`, wenn der Schlüssel in der Modell-Auswahl vorkommt.
    pub fn is_known_model(&self, key: &str) -> bool {
        self.models.iter().any(|m| m.key == key)
    }

    /// Anzeigename eines Modells (Fallback: Schlüssel).
    pub fn model_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.models
            .iter()
            .find(|m| m.key == key)
            .map_or(key, |m| m.label.as_str())
    }

    pub fn camera_transition(&self) -> Duration {
        Duration::from_secs_f32(self.camera_transition_secs.max(0.0))
    }

    pub fn visual_effects_debounce(&self) -> Duration {
        Duration::from_millis(self.visual_effects_debounce_ms)
    }

    pub fn preset_list_debounce(&self) -> Duration {
        Duration::from_millis(self.preset_list_debounce_ms)
    }

    pub fn pointer_move_throttle(&self) -> Duration {
        Duration::from_millis(self.pointer_move_throttle_ms)
    }

    pub fn loading_settle(&self) -> Duration {
        Duration::from_millis(self.loading_settle_ms)
    }

    pub fn loading_failure_clear(&self) -> Duration {
        Duration::from_millis(self.loading_failure_clear_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let opts: ViewerOptions =
            toml::from_str("backend_url = \"http://localhost:3000/api\"\nfocus_zoom_factor = 5.0\n")
                .expect("gültiges TOML");
        assert_eq!(opts.backend_url, "http://localhost:3000/api");
        assert_eq!(opts.focus_zoom_factor, 5.0);
        assert_eq!(opts.models.len(), 5);
        assert_eq!(opts.preset_list_debounce_ms, PRESET_LIST_DEBOUNCE_MS);
    }

    #[test]
    fn roundtrip_through_toml() {
        let opts = ViewerOptions::default();
        let text = toml::to_string_pretty(&opts).expect("serialisierbar");
        let back: ViewerOptions = toml::from_str(&text).expect("lesbar");
        assert_eq!(back.models, opts.models);
        assert_eq!(back.hover_color, opts.hover_color);
    }

    #[test]
    fn model_labels() {
        let opts = ViewerOptions::default();
        assert!(opts.is_known_model("machine"));
        assert!(!opts.is_known_model("attic"));
        assert_eq!(opts.model_label("third"), "Third Fl.");
        assert_eq!(opts.model_label("attic"), "attic");
    }
}
