//! Use-Cases für Blacklist und ausgeblendete Elemente.

use super::selection;
use crate::app::tasks::Job;
use crate::app::AppState;
use crate::core::{ElementId, NodeKind};
use crate::services::{BlacklistEntry, ServiceError};

/// Startet das einmalige Laden der Blacklist.
pub fn load_blacklist(state: &mut AppState) {
    if state.ignore.loaded || state.ignore.loading {
        log::debug!("Blacklist bereits geladen oder in Arbeit");
        return;
    }
    state.ignore.loading = true;
    state.submit(Job::LoadBlacklist);
}

/// Übernimmt die geladene Blacklist und gibt die Interaktion frei.
pub fn apply_loaded(state: &mut AppState, result: Result<Vec<BlacklistEntry>, ServiceError>) {
    state.ignore.loading = false;
    match result {
        Ok(entries) => {
            state.ignore.entries = entries
                .into_iter()
                .map(|e| (e.model, e.element))
                .collect();
            if let Some(model) = state.model.active_key.clone() {
                state.ignore.activate_model(&model);
            }
            state.ignore.loaded = true;
            log::info!(
                "Blacklist geladen: {} Einträge",
                state.ignore.entries.len()
            );
        }
        Err(err) => {
            // Ohne Blacklist bleibt die Interaktion gesperrt
            log::warn!("Blacklist konnte nicht geladen werden: {}", err);
            state
                .ui
                .set_status(format!("Blacklist nicht geladen. {}", err.user_message()));
        }
    }
}

/// Blendet ein Element aus und legt einen unsichtbaren Platzhalter an.
pub fn hide(state: &mut AppState, element: ElementId) {
    if state.ignore.set.hide(element) {
        let node = state
            .scene
            .add(NodeKind::HiddenPlaceholder { element });
        state.ignore.placeholders.insert(element, node);
        log::info!("Element {} ausgeblendet", element);
    }
    selection::drop_element(state, element);
}

/// Blendet ein Element wieder ein.
pub fn show(state: &mut AppState, element: ElementId) {
    if state.ignore.set.show(element) {
        if let Some(node) = state.ignore.placeholders.remove(&element) {
            state.scene.remove(node);
        }
        log::info!("Element {} eingeblendet", element);
    }
}

/// Blendet alle ausgeblendeten Elemente wieder ein.
pub fn show_all(state: &mut AppState) {
    let shown = state.ignore.set.clear_hidden();
    for element in &shown {
        if let Some(node) = state.ignore.placeholders.remove(element) {
            state.scene.remove(node);
        }
    }
    if !shown.is_empty() {
        log::info!("{} Elemente eingeblendet", shown.len());
    }
}

/// Verwirft alle Platzhalter (Modellwechsel).
pub fn reset_hidden(state: &mut AppState) {
    state.ignore.set.clear_hidden();
    for (_, node) in state.ignore.placeholders.drain() {
        state.scene.remove(node);
    }
}

/// Persistiert ein Element in der Blacklist. Hover und Selektion werden
/// sofort entfernt, die lokale Blacklist folgt erst nach Bestätigung.
pub fn blacklist(state: &mut AppState, element: ElementId, name: String) -> anyhow::Result<()> {
    let Some(model) = state.model.active_key.clone() else {
        anyhow::bail!("Kein aktives Modell für Blacklist-Eintrag");
    };
    selection::drop_element(state, element);
    state.submit(Job::AddToBlacklist {
        entry: BlacklistEntry {
            element,
            model,
            subobject_name: name,
        },
    });
    Ok(())
}

/// Übernimmt einen bestätigten Blacklist-Eintrag.
pub fn apply_added(state: &mut AppState, entry: BlacklistEntry, result: Result<(), ServiceError>) {
    match result {
        Ok(()) => {
            let inserted = state
                .ignore
                .entries
                .insert((entry.model.clone(), entry.element));
            if state.model.is_active(&entry.model) {
                state.ignore.set.blacklist(entry.element);
                selection::drop_element(state, entry.element);
            }
            if inserted {
                log::info!(
                    "Element {} ({}) in Blacklist für '{}'",
                    entry.element,
                    entry.subobject_name,
                    entry.model
                );
            }
        }
        Err(err) => {
            log::warn!("Blacklist-Eintrag für {} fehlgeschlagen: {}", entry.element, err);
            state.ui.set_status(format!(
                "Element {} nicht in Blacklist übernommen. {}",
                entry.element,
                err.user_message()
            ));
        }
    }
}
