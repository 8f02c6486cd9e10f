//! Status-Bar am unteren Bildschirmrand.

use crate::app::AppState;

/// Rendert die Status-Bar
pub fn render_status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            match (state.model.active_key.as_deref(), state.model.mesh.as_ref()) {
                (Some(key), Some(mesh)) => {
                    ui.label(format!(
                        "Modell: {} | Elemente: {} | Dreiecke: {}",
                        state.options.model_label(key),
                        mesh.element_count(),
                        mesh.triangle_count()
                    ));
                }
                (Some(key), None) => {
                    ui.label(format!("Modell: {} (lädt)", state.options.model_label(key)));
                }
                _ => {
                    ui.label("Kein Modell geladen");
                }
            }

            ui.separator();

            let camera = &state.view.camera;
            ui.label(format!(
                "Zoom: {:.2}x | Target: ({:.1}, {:.1}, {:.1})",
                state.view.zoom_factor(),
                camera.target.x,
                camera.target.y,
                camera.target.z
            ));

            ui.separator();

            let stats = state.ignore.stats();
            if state.ignore.loaded {
                ui.label(format!(
                    "Ignoriert: {} (Blacklist {}, ausgeblendet {})",
                    stats.total_ignored, stats.blacklisted, stats.hidden
                ));
            } else {
                ui.label("Blacklist: nicht geladen");
            }

            ui.separator();

            match (state.selection.selected(), state.hover.element) {
                (Some(element), _) => {
                    ui.label(format!(
                        "Ausgewählt: {} ({})",
                        state.selection.primary_name, element
                    ));
                }
                (None, Some(element)) => {
                    ui.label(format!("Hover: {}", element));
                }
                (None, None) => {
                    ui.label("Keine Auswahl");
                }
            }

            if let Some(ref msg) = state.ui.status_message {
                ui.separator();
                ui.label(egui::RichText::new(format!("⚠ {}", msg)).color(egui::Color32::YELLOW));
            }

            // FPS-Anzeige (rechts)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("FPS: {:.0}", ctx.input(|i| 1.0 / i.stable_dt)));
            });
        });
    });
}
