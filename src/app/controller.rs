//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::tasks::{ExecutionMode, TaskRunner};
use super::{AppCommand, AppIntent, AppState};
use crate::core::CameraViewpoint;
use crate::services::Services;
use crate::shared::RenderScene;
use std::time::Instant;

/// Obergrenze für Abarbeitungsrunden pro Frame (Job → Folgejob → ...).
const MAX_ROUNDS_PER_FRAME: usize = 64;

/// Orchestriert UI-Events, Hintergrund-Jobs und Timer auf den AppState.
pub struct AppController {
    runner: TaskRunner,
}

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new(services: Services, mode: ExecutionMode) -> Self {
        Self {
            runner: TaskRunner::new(services, mode),
        }
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        let result = match command {
            // === Lebenszyklus ===
            AppCommand::Shutdown => {
                handlers::model::shutdown(state);
                Ok(())
            }
            AppCommand::SetViewportSize { size } => {
                handlers::view::set_viewport_size(state, size);
                Ok(())
            }

            // === Modelle ===
            AppCommand::LoadModel { key } => handlers::model::load(state, &key),

            // === Picking & Selektion ===
            AppCommand::UpdateHover { screen_pos } => {
                handlers::selection::update_hover(state, screen_pos);
                Ok(())
            }
            AppCommand::ClearHover => {
                handlers::selection::clear_hover(state);
                Ok(())
            }
            AppCommand::ConfirmPick { screen_pos } => {
                handlers::selection::confirm_pick(state, screen_pos)
            }
            AppCommand::SelectElement { element } => handlers::selection::select(state, element),
            AppCommand::ClearSelection => {
                handlers::selection::clear(state);
                Ok(())
            }
            AppCommand::OpenContextMenu { screen_pos } => {
                handlers::selection::open_context_menu(state, screen_pos);
                Ok(())
            }
            AppCommand::CloseContextMenu => {
                handlers::selection::close_context_menu(state);
                Ok(())
            }

            // === Ignore-Liste ===
            AppCommand::LoadBlacklist => {
                handlers::ignore_list::load_blacklist(state);
                Ok(())
            }
            AppCommand::HideElement { element } => {
                handlers::ignore_list::hide(state, element);
                Ok(())
            }
            AppCommand::BlacklistElement { element, name } => {
                handlers::ignore_list::blacklist(state, element, name)
            }
            AppCommand::ShowElement { element } => {
                handlers::ignore_list::show(state, element);
                Ok(())
            }
            AppCommand::ShowAllHidden => {
                handlers::ignore_list::show_all(state);
                Ok(())
            }

            // === Kamera ===
            AppCommand::OrbitCamera { delta } => {
                handlers::view::orbit(state, delta);
                Ok(())
            }
            AppCommand::PanCamera { delta } => {
                handlers::view::pan(state, delta);
                Ok(())
            }
            AppCommand::DollyCamera { factor } => {
                handlers::view::dolly(state, factor);
                Ok(())
            }
            AppCommand::SetCameraState { viewpoint, animate } => {
                handlers::view::set_camera_state(state, viewpoint, animate);
                Ok(())
            }
            AppCommand::SetZoom { factor, animate } => {
                handlers::view::set_zoom(state, factor, animate)
            }
            AppCommand::ResetCamera => {
                handlers::view::reset_camera(state);
                Ok(())
            }

            // === Presets ===
            AppCommand::SavePreset { slot, label } => handlers::presets::save(state, slot, &label),
            AppCommand::LoadPreset { slot } => handlers::presets::load(state, slot),
            AppCommand::DeletePreset { slot } => handlers::presets::delete(state, slot),
            AppCommand::RenamePreset { slot, label } => {
                handlers::presets::rename(state, slot, &label)
            }
            AppCommand::RequestPresetList => {
                handlers::presets::request_list(state);
                Ok(())
            }
            AppCommand::RefreshPresetCount => handlers::presets::refresh_count(state),
            AppCommand::LoadDefaultViewpoint => {
                handlers::presets::load_default_viewpoint(state);
                Ok(())
            }
            AppCommand::ClearPresetCache => {
                handlers::presets::clear_cache(state);
                Ok(())
            }

            // === Panels ===
            AppCommand::ToggleMetadataPanel => {
                handlers::panels::toggle_metadata(state);
                Ok(())
            }
            AppCommand::TogglePresetPanel => {
                handlers::panels::toggle_presets(state);
                Ok(())
            }
            AppCommand::ToggleHiddenList => {
                handlers::panels::toggle_hidden_list(state);
                Ok(())
            }
        };

        self.flush(state);
        result
    }

    /// Übergibt eingereihte Jobs an den Task-Runner.
    fn flush(&mut self, state: &mut AppState) {
        if state.should_exit {
            state.pending_jobs.clear();
            return;
        }
        for job in state.pending_jobs.drain(..) {
            self.runner.submit(job);
        }
    }

    /// Frame-Tick: Animation, fällige Timer und Job-Ergebnisse.
    ///
    /// Liefert `true`, solange weitere Frames nötig sind (Animation läuft,
    /// Jobs ausstehend oder Timer geplant).
    pub fn update(&mut self, state: &mut AppState, now: Instant) -> bool {
        use super::handlers;

        state.now = now;
        let animating = super::use_cases::camera::advance_animation(state);

        for _ in 0..MAX_ROUNDS_PER_FRAME {
            self.flush(state);
            let timers = state.scheduler.take_due(now);
            let events = self.runner.drain();
            if timers.is_empty() && events.is_empty() {
                break;
            }
            for timer in timers {
                handlers::timers::fire(state, timer);
            }
            for event in events {
                handlers::jobs::apply(state, event);
            }
        }
        self.flush(state);

        animating || state.view.is_animating() || self.is_busy(state)
    }

    /// Jobs in Arbeit oder Timer geplant.
    pub fn is_busy(&self, state: &AppState) -> bool {
        self.runner.in_flight() > 0 || !state.scheduler.is_empty()
    }

    /// Aktueller Kamerazustand (für Presets und externe Aufrufer).
    pub fn current_camera_state(&self, state: &AppState) -> CameraViewpoint {
        super::use_cases::camera::current_camera_state(state)
    }

    /// Baut die Render-Szene aus dem aktuellen AppState.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
