//! Kontextmenü für das Element unter dem Rechtsklick.

use crate::app::{AppIntent, AppState};

/// Rendert das Kontextmenü, sofern eines offen ist.
///
/// `origin` ist die linke obere Ecke des Viewports in egui-Koordinaten.
pub fn render_context_menu(
    ctx: &egui::Context,
    state: &AppState,
    origin: egui::Pos2,
) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let Some(menu) = state.context_menu.as_ref() else {
        return events;
    };

    let pos = origin + egui::vec2(menu.screen_pos.x, menu.screen_pos.y);
    let area = egui::Area::new(egui::Id::new("element_context_menu"))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(180.0);
                ui.label(egui::RichText::new(&menu.name).strong());
                ui.label(format!("Element {}", menu.element));
                ui.separator();

                let is_selected = state.selection.selected() == Some(menu.element);
                if ui
                    .add_enabled(is_selected, egui::Button::new("Auswahl aufheben"))
                    .clicked()
                {
                    events.push(AppIntent::ContextUnselectRequested);
                }
                if ui.button("Ausblenden").clicked() {
                    events.push(AppIntent::ContextHideRequested);
                }
                if ui.button("Zur Blacklist hinzufügen").clicked() {
                    events.push(AppIntent::ContextBlacklistRequested);
                }
            });
        });

    // Klick außerhalb schließt das Menü
    if events.is_empty() && area.response.clicked_elsewhere() {
        events.push(AppIntent::ContextMenuDismissed);
    }

    events
}
