//! Seitenpanel mit den BIM-Metadaten des selektierten Elements.

use crate::app::state::MetadataContent;
use crate::app::AppState;

/// Rendert das Metadaten-Panel (nur wenn aktiviert).
pub fn render_metadata_panel(ctx: &egui::Context, state: &AppState) {
    if !state.metadata.enabled {
        return;
    }

    egui::SidePanel::right("metadata_panel")
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("BIM-Daten");
            ui.separator();

            match &state.metadata.content {
                MetadataContent::Empty => {
                    ui.label("Kein Element ausgewählt");
                }
                MetadataContent::Loading { element } => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Lade Daten für Element {}", element));
                    });
                }
                MetadataContent::Loaded { element, record } => {
                    ui.label(egui::RichText::new(&state.selection.primary_name).strong());
                    ui.label(format!("Element {}", element));
                    ui.separator();
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        egui::Grid::new("metadata_grid")
                            .num_columns(2)
                            .striped(true)
                            .show(ui, |ui| {
                                for (key, value) in record {
                                    ui.label(key);
                                    ui.label(display_value(value));
                                    ui.end_row();
                                }
                            });
                    });
                }
                MetadataContent::NotFound { element } => {
                    ui.label(format!("Keine BIM-Daten für Element {}", element));
                }
                MetadataContent::Error {
                    element,
                    status,
                    message,
                    remedy,
                } => {
                    ui.colored_label(
                        egui::Color32::LIGHT_RED,
                        format!("Abfrage für Element {} fehlgeschlagen", element),
                    );
                    if let Some(status) = status {
                        ui.label(format!("Status: {}", status));
                    }
                    ui.label(message);
                    ui.label(egui::RichText::new(*remedy).italics());
                }
            }
        });
}

/// Strings ohne Anführungszeichen, `null` als Strich.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "–".to_string(),
        other => other.to_string(),
    }
}
