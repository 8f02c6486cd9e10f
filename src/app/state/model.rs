use crate::app::tasks::Generation;
use crate::core::{ModelCache, ModelMesh, NodeId};
use std::sync::Arc;

/// Lade-Phase mit festem Fortschrittswert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStage {
    Preparing,
    FromCache,
    Fetching,
    Processing,
    AdjustingCamera,
    LoadingPresets,
    Done,
    Failed,
}

impl LoadingStage {
    /// Anzeigetext der Phase.
    pub fn label(self) -> &'static str {
        match self {
            LoadingStage::Preparing => "Preparing model",
            LoadingStage::FromCache => "Loading from cache",
            LoadingStage::Fetching => "Fetching model",
            LoadingStage::Processing => "Processing model",
            LoadingStage::AdjustingCamera => "Adjusting camera",
            LoadingStage::LoadingPresets => "Loading presets",
            LoadingStage::Done => "Done",
            LoadingStage::Failed => "Load failed",
        }
    }
}

/// Fortschrittsanzeige eines Ladevorgangs.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingProgress {
    /// Prozent in `[0, 100]`, innerhalb einer Generation nie fallend
    pub percent: f32,
    pub stage: LoadingStage,
}

impl LoadingProgress {
    pub fn failed(&self) -> bool {
        self.stage == LoadingStage::Failed
    }
}

/// Zustand des aktiven Modells
#[derive(Debug)]
pub struct ModelState {
    /// Schlüssel des zuletzt angeforderten Modells
    pub active_key: Option<String>,
    /// Mesh des aktiven Modells (erst nach erfolgreichem Laden)
    pub mesh: Option<Arc<ModelMesh>>,
    /// Wurzelknoten des Modells im Szenengraph
    pub root_node: Option<NodeId>,
    /// Token der letzten Ladeanforderung
    pub generation: Generation,
    pub loaded: bool,
    /// `None` = keine Ladeanzeige
    pub progress: Option<LoadingProgress>,
    /// Begrenzter Cache geladener Modelle
    pub cache: ModelCache,
}

impl ModelState {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            active_key: None,
            mesh: None,
            root_node: None,
            generation: Generation::default(),
            loaded: false,
            progress: None,
            cache: ModelCache::new(cache_capacity),
        }
    }

    /// Schlüssel des aktiven Modells, sofern es geladen ist.
    pub fn loaded_key(&self) -> Option<&str> {
        if self.loaded {
            self.active_key.as_deref()
        } else {
            None
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active_key.as_deref() == Some(key)
    }

    /// Lädt gerade (Anzeige aktiv und nicht fehlgeschlagen, noch nicht geladen).
    pub fn is_loading(&self) -> bool {
        !self.loaded && self.progress.as_ref().is_some_and(|p| !p.failed())
    }

    /// Setzt den Fortschritt; Prozentwerte fallen nie unter den bisherigen Stand.
    pub fn set_progress(&mut self, percent: f32, stage: LoadingStage) {
        let floor = self.progress.as_ref().map_or(0.0, |p| p.percent);
        self.progress = Some(LoadingProgress {
            percent: percent.clamp(0.0, 100.0).max(floor),
            stage,
        });
    }
}

impl Default for ModelState {
    fn default() -> Self {
        Self::new(crate::core::MODEL_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_never_decreases() {
        let mut model = ModelState::default();
        model.set_progress(50.0, LoadingStage::Processing);
        model.set_progress(30.0, LoadingStage::Fetching);
        let progress = model.progress.as_ref().expect("Fortschritt gesetzt");
        assert_eq!(progress.percent, 50.0);
        assert_eq!(progress.stage, LoadingStage::Fetching);
    }

    #[test]
    fn loading_flag_ignores_failed_progress() {
        let mut model = ModelState::default();
        model.set_progress(15.0, LoadingStage::Fetching);
        assert!(model.is_loading());
        model.set_progress(15.0, LoadingStage::Failed);
        assert!(!model.is_loading());
    }
}
