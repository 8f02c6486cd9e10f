//! Seitenpanel für Kamera-Presets (20 Slots pro Modell).

use crate::app::{AppIntent, AppState};
use crate::core::{SlotIndex, MAX_LABEL_CHARS};

/// UI-lokaler Eingabezustand des Preset-Panels.
#[derive(Debug, Default)]
pub struct PresetPanelState {
    /// Label für den nächsten Speichervorgang
    pub new_label: String,
    /// Slot im Umbenennen-Modus samt Eingabetext
    pub renaming: Option<(usize, String)>,
}

/// Rendert das Preset-Panel und gibt erzeugte Intents zurück.
pub fn render_presets_panel(
    ctx: &egui::Context,
    state: &AppState,
    panel: &mut PresetPanelState,
) -> Vec<AppIntent> {
    let mut events = Vec::new();
    if !state.ui.show_preset_panel {
        return events;
    }

    egui::SidePanel::left("presets_panel")
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Kamera-Presets");

            let Some(model) = state.model.loaded_key() else {
                ui.label("Kein Modell geladen");
                return;
            };
            ui.label(format!(
                "Modell: {} | Belegt: {}",
                state.options.model_label(model),
                state
                    .presets
                    .count
                    .map_or_else(|| "?".to_string(), |c| c.to_string())
            ));

            ui.horizontal(|ui| {
                if ui.button("Standardansicht").clicked() {
                    events.push(AppIntent::DefaultViewpointRequested);
                }
                if ui.button("Aktualisieren").clicked() {
                    events.push(AppIntent::PresetListRequested);
                    events.push(AppIntent::PresetCountRequested);
                }
                if ui.button("Cache leeren").clicked() {
                    events.push(AppIntent::ClearPresetCacheRequested);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Label:");
                ui.add(
                    egui::TextEdit::singleline(&mut panel.new_label)
                        .char_limit(MAX_LABEL_CHARS)
                        .hint_text("Neue Ansicht"),
                );
            });
            ui.separator();

            let slots_current = state.presets.slots_model.as_deref() == Some(model);
            egui::ScrollArea::vertical().show(ui, |ui| {
                for index in SlotIndex::all() {
                    let slot = index.get();
                    let occupied = slots_current && state.presets.slots.get(index).is_some();
                    let label = if slots_current {
                        state.presets.slots.label(index)
                    } else {
                        index.default_label()
                    };

                    ui.horizontal(|ui| {
                        ui.label(format!("{:>2}", slot + 1));

                        match panel.renaming.as_mut() {
                            Some((renaming, text)) if *renaming == slot => {
                                ui.add(
                                    egui::TextEdit::singleline(text)
                                        .char_limit(MAX_LABEL_CHARS)
                                        .desired_width(110.0),
                                );
                                if ui.small_button("OK").clicked() {
                                    events.push(AppIntent::PresetRenameRequested {
                                        slot,
                                        label: text.clone(),
                                    });
                                    panel.renaming = None;
                                } else if ui.small_button("Abbrechen").clicked() {
                                    panel.renaming = None;
                                }
                            }
                            _ => {
                                let text = if occupied {
                                    egui::RichText::new(label.clone())
                                } else {
                                    egui::RichText::new(label.clone()).weak()
                                };
                                if ui
                                    .add_enabled(occupied, egui::Button::new(text))
                                    .clicked()
                                {
                                    events.push(AppIntent::PresetLoadRequested { slot });
                                }
                                if ui.small_button("Speichern").clicked() {
                                    let label = if panel.new_label.trim().is_empty() {
                                        label.clone()
                                    } else {
                                        panel.new_label.clone()
                                    };
                                    events.push(AppIntent::PresetSaveRequested { slot, label });
                                }
                                if ui
                                    .add_enabled(occupied, egui::Button::new("Umbenennen").small())
                                    .clicked()
                                {
                                    panel.renaming = Some((slot, label.clone()));
                                }
                                if ui
                                    .add_enabled(occupied, egui::Button::new("Löschen").small())
                                    .clicked()
                                {
                                    events.push(AppIntent::PresetDeleteRequested { slot });
                                }
                            }
                        }
                    });
                }
            });
        });

    events
}
