//! Toolbar mit Modellauswahl, Kamera- und Panel-Schaltern.

use crate::app::{AppIntent, AppState};

/// Rendert die Toolbar und gibt erzeugte Events zurück.
pub fn render_toolbar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Modell:");
            for entry in &state.options.models {
                let active = state.model.is_active(&entry.key);
                if ui.selectable_label(active, &entry.label).clicked() && !active {
                    events.push(AppIntent::ModelSelected {
                        key: entry.key.clone(),
                    });
                }
            }

            ui.separator();

            if ui.button("Kamera zurücksetzen").clicked() {
                events.push(AppIntent::ResetCameraRequested);
            }
            let has_selection = state.selection.selected().is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new("Auswahl aufheben"))
                .clicked()
            {
                events.push(AppIntent::UnselectRequested);
            }

            ui.separator();

            if ui
                .selectable_label(state.ui.show_preset_panel, "Presets")
                .clicked()
            {
                events.push(AppIntent::PresetPanelToggled);
            }
            if ui
                .selectable_label(state.metadata.enabled, "BIM-Daten")
                .clicked()
            {
                events.push(AppIntent::MetadataPanelToggled);
            }
            if ui
                .selectable_label(state.ui.show_hidden_list, "Ausgeblendet")
                .clicked()
            {
                events.push(AppIntent::HiddenListToggled);
            }

            if !state.ignore.loaded && !state.ignore.loading {
                ui.separator();
                if ui.button("Blacklist neu laden").clicked() {
                    events.push(AppIntent::BlacklistReloadRequested);
                }
            }
        });
    });

    events
}
