//! Fenster mit ausgeblendeten Elementen und Ignore-Statistik.

use crate::app::{AppIntent, AppState};

/// Rendert die Liste ausgeblendeter Elemente.
pub fn render_hidden_list(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();
    if !state.ui.show_hidden_list {
        return events;
    }

    let mut open = true;
    egui::Window::new("Ausgeblendete Elemente")
        .open(&mut open)
        .default_width(240.0)
        .show(ctx, |ui| {
            let stats = state.ignore.stats();
            ui.label(format!(
                "Blacklist: {} | Ausgeblendet: {} | Gesamt: {}",
                stats.blacklisted, stats.hidden, stats.total_ignored
            ));
            ui.separator();

            let mut hidden: Vec<_> = state.ignore.set.hidden().collect();
            hidden.sort();
            if hidden.is_empty() {
                ui.label("Keine ausgeblendeten Elemente");
            }
            egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                for element in hidden {
                    ui.horizontal(|ui| {
                        let name = state
                            .model
                            .mesh
                            .as_ref()
                            .map(|mesh| mesh.display_names(element).0)
                            .unwrap_or_default();
                        ui.label(format!("{} {}", element, name));
                        if ui.small_button("Einblenden").clicked() {
                            events.push(AppIntent::ShowHiddenRequested { element });
                        }
                    });
                }
            });

            ui.separator();
            if ui
                .add_enabled(stats.hidden > 0, egui::Button::new("Alle einblenden"))
                .clicked()
            {
                events.push(AppIntent::ShowAllHiddenRequested);
            }
        });

    if !open {
        events.push(AppIntent::HiddenListToggled);
    }
    events
}
