//! BIM-Viewer.
//!
//! Interaktive 3D-Ansicht von Gebäudemodellen mit Element-Picking,
//! BIM-Metadaten, Ignore-Liste und Kamera-Presets (egui + wgpu).

use bim_viewer::app::state::CursorHint;
use bim_viewer::{
    render, ui, AppController, AppIntent, AppState, ExecutionMode, MemoryBackend, Services,
    ViewerOptions,
};
use eframe::egui;
use eframe::egui_wgpu;
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("BIM-Viewer v{} startet...", env!("CARGO_PKG_VERSION"));

        // Tiefenpuffer und MSAA müssen zu den Pipelines im Renderer passen
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 800.0])
                .with_title("BIM-Viewer"),
            renderer: eframe::Renderer::Wgpu,
            multisampling: render::SAMPLE_COUNT as u16,
            depth_buffer: 24,
            ..Default::default()
        };

        eframe::run_native(
            "BIM-Viewer",
            options,
            Box::new(|cc| {
                let render_state = cc.wgpu_render_state.as_ref().ok_or_else(|| {
                    anyhow::anyhow!(
                        "wgpu nicht verfügbar: Renderer konnte nicht initialisiert werden"
                    )
                })?;
                Ok(Box::new(ViewerApp::new(render_state)))
            }),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct ViewerApp {
    state: AppState,
    controller: AppController,
    renderer: Arc<std::sync::Mutex<render::Renderer>>,
    device: eframe::wgpu::Device,
    queue: eframe::wgpu::Queue,
    input: ui::InputState,
    preset_panel: ui::PresetPanelState,
    started: bool,
}

impl ViewerApp {
    fn new(render_state: &egui_wgpu::RenderState) -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = ViewerOptions::config_path();
        let viewer_options = ViewerOptions::load_from_file(&config_path);
        let services = Self::services(&viewer_options);

        Self {
            state: AppState::with_options(viewer_options),
            controller: AppController::new(services, ExecutionMode::Threaded),
            renderer: Arc::new(std::sync::Mutex::new(render::Renderer::new(render_state))),
            device: render_state.device.clone(),
            queue: render_state.queue.clone(),
            input: ui::InputState::new(),
            preset_panel: ui::PresetPanelState::default(),
            started: false,
        }
    }

    /// Ohne Backend-URL läuft der Viewer mit Demo-Modellen im Speicher.
    fn services(options: &ViewerOptions) -> Services {
        if options.backend_url.trim().is_empty() {
            log::info!("Kein Backend konfiguriert, starte mit Demo-Modellen");
            let keys: Vec<&str> = options.models.iter().map(|m| m.key.as_str()).collect();
            Services::in_memory(Arc::new(MemoryBackend::with_demo_models(&keys)))
        } else {
            log::info!("Backend: {}", options.backend_url);
            Services::http(
                &options.backend_url,
                options.model_dir.as_ref().map(std::path::PathBuf::from),
            )
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let mut events = Vec::new();
        if !self.started {
            self.started = true;
            events.push(AppIntent::StartupRequested);
        }
        if ctx.input(|i| i.viewport().close_requested()) {
            events.push(AppIntent::ShutdownRequested);
        }

        events.extend(self.collect_ui_events(ctx));
        self.process_events(events);

        let busy = self.controller.update(&mut self.state, Instant::now());
        self.apply_cursor(ctx);
        self.maybe_request_repaint(ctx, busy);
    }
}

impl ViewerApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        events.extend(ui::render_toolbar(ctx, &self.state));
        ui::render_status_bar(ctx, &self.state);
        events.extend(ui::render_presets_panel(
            ctx,
            &self.state,
            &mut self.preset_panel,
        ));
        ui::render_metadata_panel(ctx, &self.state);
        events.extend(ui::render_hidden_list(ctx, &self.state));

        let throttle = self.state.options.pointer_move_throttle();
        let mut origin = egui::Pos2::ZERO;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                origin = rect.min;

                events.extend(self.input.collect_viewport_events(
                    ui,
                    &response,
                    throttle,
                    Instant::now(),
                ));

                let callback = egui_wgpu::Callback::new_paint_callback(
                    rect,
                    render::ViewportPaint::new(
                        self.renderer.clone(),
                        self.controller.build_render_scene(&self.state),
                        self.device.clone(),
                        self.queue.clone(),
                    ),
                );

                ui.painter().add(callback);

                ui::render_selection_info(ui, &self.state, rect);
                ui::render_loading(ui, &self.state, rect);

                if self.state.model.active_key.is_none() {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Kein Modell geladen",
                        egui::FontId::proportional(20.0),
                        egui::Color32::WHITE,
                    );
                }
            });

        events.extend(ui::render_context_menu(ctx, &self.state, origin));
        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
                self.state.ui.set_status(format!("{:#}", e));
            }
        }
    }

    fn apply_cursor(&self, ctx: &egui::Context) {
        if self.state.ui.cursor == CursorHint::Interactive {
            ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
        }
    }

    /// Render-Loop läuft nur, solange Animationen, Jobs oder Timer anstehen.
    fn maybe_request_repaint(&self, ctx: &egui::Context, busy: bool) {
        if self.state.view.is_animating() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.state.scheduler.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        } else if busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        }
    }
}
