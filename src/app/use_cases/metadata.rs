//! BIM-Metadaten des selektierten Elements.

use crate::app::state::MetadataContent;
use crate::app::tasks::{Generation, Job};
use crate::app::AppState;
use crate::core::ElementId;
use crate::services::{MetadataLookup, ServiceError};

/// Startet die Abfrage für die aktuelle Selektion, sofern das Panel aktiv ist.
pub fn request_for_selection(state: &mut AppState) {
    if !state.metadata.enabled {
        return;
    }
    let (Some(element), Some(model)) = (state.selection.selected(), state.model.loaded_key())
    else {
        return;
    };
    let job = Job::LookupMetadata {
        generation: state.model.generation,
        selection: state.selection.generation,
        model: model.to_string(),
        element,
    };
    state.metadata.content = MetadataContent::Loading { element };
    state.submit(job);
}

pub fn clear(state: &mut AppState) {
    state.metadata.content = MetadataContent::Empty;
}

/// Schaltet das Panel um; beim Einschalten wird die Selektion nachgeladen.
pub fn toggle_panel(state: &mut AppState) {
    state.metadata.enabled = !state.metadata.enabled;
    if state.metadata.enabled {
        request_for_selection(state);
    } else {
        clear(state);
    }
}

/// Übernimmt ein Abfrageergebnis, sofern Modell und Selektion noch aktuell sind.
pub fn apply_result(
    state: &mut AppState,
    generation: Generation,
    selection: Generation,
    element: ElementId,
    result: Result<MetadataLookup, ServiceError>,
) {
    if generation != state.model.generation || selection != state.selection.generation {
        log::debug!("Veraltetes Metadaten-Ergebnis für {} verworfen", element);
        return;
    }
    if !state.metadata.enabled {
        return;
    }
    state.metadata.content = match result {
        Ok(MetadataLookup::Found(record)) => MetadataContent::Loaded { element, record },
        Ok(MetadataLookup::NotFound) => MetadataContent::NotFound { element },
        Err(err) => {
            log::warn!("Metadaten für {} nicht abrufbar: {}", element, err);
            MetadataContent::Error {
                element,
                status: err.status(),
                message: err.user_message(),
                remedy: err.remedy(),
            }
        }
    };
}
