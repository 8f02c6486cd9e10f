use crate::app::scheduler::{Scheduler, TimerKind};
use crate::app::tasks::Job;
use crate::app::CommandLog;
use crate::core::Scene;
use crate::shared::ViewerOptions;
use std::time::{Duration, Instant};

use super::{
    ContextMenuState, HoverState, IgnoreState, MetadataPanelState, ModelState, PresetState,
    SelectionState, UiState, ViewState, VisualEffectsState,
};

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Kamera, Viewport und laufende Animation
    pub view: ViewState,
    /// Aktives Modell, Ladefortschritt und Modell-Cache
    pub model: ModelState,
    pub selection: SelectionState,
    pub hover: HoverState,
    pub context_menu: Option<ContextMenuState>,
    /// Live-Overlays im Szenengraph
    pub effects: VisualEffectsState,
    pub ignore: IgnoreState,
    pub presets: PresetState,
    pub metadata: MetadataPanelState,
    pub ui: UiState,
    /// Szenengraph mit Ressourcenverwaltung
    pub scene: Scene,
    /// Debounce- und Verzögerungs-Timer
    pub scheduler: Scheduler,
    /// Von Use-Cases erzeugte Jobs; der Controller gibt sie an den Task-Runner
    pub pending_jobs: Vec<Job>,
    /// Laufzeit-Optionen
    pub options: ViewerOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Zeitstempel des aktuellen Frames
    pub now: Instant,
    /// Signalisiert, dass die Anwendung beendet werden soll
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standardoptionen.
    pub fn new() -> Self {
        Self::with_options(ViewerOptions::default())
    }

    /// Erstellt einen App-State mit gegebenen Optionen.
    pub fn with_options(options: ViewerOptions) -> Self {
        Self {
            view: ViewState::from_options(&options),
            model: ModelState::new(options.model_cache_capacity),
            selection: SelectionState::new(),
            hover: HoverState::default(),
            context_menu: None,
            effects: VisualEffectsState::new(),
            ignore: IgnoreState::new(),
            presets: PresetState::new(),
            metadata: MetadataPanelState::new(options.metadata_panel_enabled),
            ui: UiState::new(),
            scene: Scene::new(),
            scheduler: Scheduler::new(),
            pending_jobs: Vec::new(),
            options,
            command_log: CommandLog::new(),
            now: Instant::now(),
            should_exit: false,
        }
    }

    /// Zeiger- und Klick-Ereignisse dürfen erst verarbeitet werden, wenn
    /// die Blacklist geladen und ein Modell aktiv ist.
    pub fn interaction_ready(&self) -> bool {
        self.ignore.loaded && self.model.loaded
    }

    /// Reiht einen Hintergrund-Job ein.
    pub fn submit(&mut self, job: Job) {
        self.pending_jobs.push(job);
    }

    /// Plant einen Timer relativ zum aktuellen Frame.
    pub fn schedule_in(&mut self, delay: Duration, kind: TimerKind) {
        self.scheduler.schedule(self.now + delay, kind);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
