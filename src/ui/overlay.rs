//! Overlays über dem Viewport: Info-Label der Selektion und Ladeanzeige.

use crate::app::AppState;
use glam::Vec2;

/// Zeichnet das Info-Label am Anker des selektierten Elements.
pub fn render_selection_info(ui: &egui::Ui, state: &AppState, rect: egui::Rect) {
    if !state.selection.visible {
        return;
    }
    let Some(anchor) = state.selection.anchor else {
        return;
    };
    let viewport = Vec2::new(rect.width(), rect.height());
    let Some(screen) = state.view.camera.world_to_screen(anchor, viewport) else {
        return;
    };
    let pos = rect.min + egui::vec2(screen.x, screen.y);
    if !rect.contains(pos) {
        return;
    }

    let painter = ui.painter_at(rect);
    let mut text = state.selection.primary_name.clone();
    if !state.selection.secondary_name.is_empty() {
        text.push('\n');
        text.push_str(&state.selection.secondary_name);
    }
    let galley = painter.layout_no_wrap(
        text,
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
    let label_rect = egui::Rect::from_min_size(
        pos - egui::vec2(galley.size().x / 2.0, galley.size().y + 12.0),
        galley.size(),
    )
    .expand(4.0);
    painter.rect_filled(label_rect, 4.0, egui::Color32::from_black_alpha(180));
    painter.galley(label_rect.min + egui::vec2(4.0, 4.0), galley, egui::Color32::WHITE);
    painter.circle_filled(pos, 3.0, egui::Color32::YELLOW);
}

/// Zeichnet den Ladefortschritt mittig im Viewport.
pub fn render_loading(ui: &mut egui::Ui, state: &AppState, rect: egui::Rect) {
    let Some(progress) = state.model.progress.as_ref() else {
        return;
    };
    let size = egui::vec2(280.0, 56.0);
    let area = egui::Rect::from_center_size(rect.center(), size);
    let mut child = ui.new_child(egui::UiBuilder::new().max_rect(area));
    egui::Frame::popup(child.style()).show(&mut child, |ui| {
        let model = state
            .model
            .active_key
            .as_deref()
            .map(|key| state.options.model_label(key))
            .unwrap_or_default();
        ui.label(format!("{}: {}", model, progress.stage.label()));
        let mut bar = egui::ProgressBar::new(progress.percent / 100.0).show_percentage();
        if progress.failed() {
            bar = bar.fill(egui::Color32::DARK_RED);
        }
        ui.add(bar);
    });
}
