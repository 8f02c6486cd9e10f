//! Hintergrund-Jobs für blockierende Dienstaufrufe.
//!
//! Jobs laufen in Worker-Threads (oder im Inline-Modus sofort) und melden
//! ihr Ergebnis über einen Kanal zurück. Der UI-Thread leert den Kanal
//! einmal pro Frame. Jeder Job trägt die Generation, die bei seiner
//! Erzeugung aktuell war; veraltete Ergebnisse werden beim Anwenden verworfen.

use crate::core::{CameraViewpoint, ElementId, ModelMesh, PresetSlot, SlotIndex};
use crate::services::{
    BlacklistEntry, DownloadProgress, MetadataLookup, SaveOutcome, ServiceError, Services,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Monotoner Zähler zur Erkennung veralteter Ergebnisse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// Liefert die nächste Generation.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Zweck eines Preset-Abrufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetPurpose {
    /// Vom Nutzer angefordert, animiert anwenden
    Apply,
    /// Teil der Default-Kette; `attempt` indiziert die Kandidatenliste
    DefaultChain { attempt: usize },
}

/// Auftrag an einen Worker.
#[derive(Debug, Clone)]
pub enum Job {
    FetchModel {
        generation: Generation,
        key: String,
    },
    LoadBlacklist,
    AddToBlacklist {
        entry: BlacklistEntry,
    },
    LookupMetadata {
        generation: Generation,
        selection: Generation,
        model: String,
        element: ElementId,
    },
    FetchPreset {
        generation: Generation,
        model: String,
        slot: SlotIndex,
        purpose: PresetPurpose,
    },
    SavePreset {
        model: String,
        slot: SlotIndex,
        label: String,
        viewpoint: CameraViewpoint,
    },
    DeletePreset {
        model: String,
        slot: SlotIndex,
    },
    RenamePreset {
        model: String,
        slot: SlotIndex,
        label: String,
    },
    ListPresets {
        model: String,
        revision: u64,
    },
    CountPresets {
        model: String,
    },
}

impl Job {
    /// Abschluss-Event mit `err` für einen Job, dessen Worker abgebrochen ist.
    fn failed(self, err: ServiceError) -> JobEvent {
        match self {
            Job::FetchModel { generation, key } => JobEvent::ModelFetched {
                generation,
                key,
                result: Err(err),
            },
            Job::LoadBlacklist => JobEvent::BlacklistLoaded {
                result: Err(err),
            },
            Job::AddToBlacklist { entry } => JobEvent::BlacklistAdded {
                entry,
                result: Err(err),
            },
            Job::LookupMetadata {
                generation,
                selection,
                element,
                ..
            } => JobEvent::MetadataFetched {
                generation,
                selection,
                element,
                result: Err(err),
            },
            Job::FetchPreset {
                generation,
                model,
                slot,
                purpose,
            } => JobEvent::PresetFetched {
                generation,
                model,
                slot,
                purpose,
                result: Err(err),
            },
            Job::SavePreset {
                model, slot, label, ..
            } => JobEvent::PresetSaved {
                model,
                slot,
                label,
                result: Err(err),
            },
            Job::DeletePreset { model, slot } => JobEvent::PresetDeleted {
                model,
                slot,
                result: Err(err),
            },
            Job::RenamePreset { model, slot, label } => JobEvent::PresetRenamed {
                model,
                slot,
                label,
                result: Err(err),
            },
            Job::ListPresets { model, revision } => JobEvent::PresetsListed {
                model,
                revision,
                result: Err(err),
            },
            Job::CountPresets { model } => JobEvent::PresetCount {
                model,
                result: Err(err),
            },
        }
    }
}

/// Rückmeldung eines Workers.
#[derive(Debug, Clone)]
pub enum JobEvent {
    ModelProgress {
        generation: Generation,
        progress: DownloadProgress,
    },
    ModelFetched {
        generation: Generation,
        key: String,
        result: Result<Arc<ModelMesh>, ServiceError>,
    },
    BlacklistLoaded {
        result: Result<Vec<BlacklistEntry>, ServiceError>,
    },
    BlacklistAdded {
        entry: BlacklistEntry,
        result: Result<(), ServiceError>,
    },
    MetadataFetched {
        generation: Generation,
        selection: Generation,
        element: ElementId,
        result: Result<MetadataLookup, ServiceError>,
    },
    PresetFetched {
        generation: Generation,
        model: String,
        slot: SlotIndex,
        purpose: PresetPurpose,
        result: Result<Option<PresetSlot>, ServiceError>,
    },
    PresetSaved {
        model: String,
        slot: SlotIndex,
        label: String,
        result: Result<SaveOutcome, ServiceError>,
    },
    PresetDeleted {
        model: String,
        slot: SlotIndex,
        result: Result<bool, ServiceError>,
    },
    PresetRenamed {
        model: String,
        slot: SlotIndex,
        label: String,
        result: Result<bool, ServiceError>,
    },
    PresetsListed {
        model: String,
        revision: u64,
        result: Result<Vec<PresetSlot>, ServiceError>,
    },
    PresetCount {
        model: String,
        result: Result<usize, ServiceError>,
    },
}

impl JobEvent {
    /// `false` für Zwischenmeldungen (Fortschritt).
    pub fn is_final(&self) -> bool {
        !matches!(self, JobEvent::ModelProgress { .. })
    }
}

/// Ausführungsmodus des Runners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Ein Thread pro Job
    #[default]
    Threaded,
    /// Sofortige Ausführung im aufrufenden Thread (deterministisch, für Tests)
    Inline,
}

/// Führt Jobs aus und sammelt deren Ergebnisse.
pub struct TaskRunner {
    services: Services,
    mode: ExecutionMode,
    tx: Sender<JobEvent>,
    rx: Receiver<JobEvent>,
    in_flight: usize,
}

impl TaskRunner {
    pub fn new(services: Services, mode: ExecutionMode) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            services,
            mode,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Startet einen Job.
    pub fn submit(&mut self, job: Job) {
        self.in_flight += 1;
        match self.mode {
            ExecutionMode::Inline => execute(job, &self.services, &self.tx),
            ExecutionMode::Threaded => {
                let services = self.services.clone();
                let tx = self.tx.clone();
                let spawned = std::thread::Builder::new()
                    .name("bim-viewer-job".into())
                    .spawn(move || execute(job, &services, &tx));
                if let Err(e) = spawned {
                    log::error!("Worker-Thread konnte nicht gestartet werden: {}", e);
                    self.in_flight -= 1;
                }
            }
        }
    }

    /// Holt alle bisher eingetroffenen Ergebnisse ab (nicht blockierend).
    pub fn drain(&mut self) -> Vec<JobEvent> {
        let events: Vec<JobEvent> = self.rx.try_iter().collect();
        let finished = events.iter().filter(|e| e.is_final()).count();
        self.in_flight = self.in_flight.saturating_sub(finished);
        events
    }

    /// Anzahl gestarteter, noch nicht abgeholter Jobs.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

fn send(tx: &Sender<JobEvent>, event: JobEvent) {
    // Empfänger weg = Anwendung beendet
    if tx.send(event).is_err() {
        log::debug!("Job-Ergebnis verworfen: Empfänger geschlossen");
    }
}

/// Führt einen Job aus. Jeder Job liefert genau ein Abschluss-Event,
/// auch wenn der Worker in Panic gerät.
fn execute(job: Job, services: &Services, tx: &Sender<JobEvent>) {
    let fallback = job.clone();
    let event = match panic::catch_unwind(AssertUnwindSafe(|| run(job, services, tx))) {
        Ok(event) => event,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unbekannt".to_string());
            log::error!("Worker abgebrochen ({:?}): {}", fallback, reason);
            fallback.failed(ServiceError::Unavailable(format!(
                "Worker abgebrochen: {reason}"
            )))
        }
    };
    send(tx, event);
}

fn run(job: Job, services: &Services, tx: &Sender<JobEvent>) -> JobEvent {
    match job {
        Job::FetchModel { generation, key } => {
            let progress_tx = tx.clone();
            let mut report = move |progress: DownloadProgress| {
                send(
                    &progress_tx,
                    JobEvent::ModelProgress {
                        generation,
                        progress,
                    },
                )
            };
            let result = services
                .models
                .fetch_model(&key, &mut report)
                .map(Arc::new);
            JobEvent::ModelFetched {
                generation,
                key,
                result,
            }
        }
        Job::LoadBlacklist => JobEvent::BlacklistLoaded {
            result: services.blacklist.load_all(),
        },
        Job::AddToBlacklist { entry } => {
            let result = services.blacklist.add(&entry);
            JobEvent::BlacklistAdded { entry, result }
        }
        Job::LookupMetadata {
            generation,
            selection,
            model,
            element,
        } => JobEvent::MetadataFetched {
            generation,
            selection,
            element,
            result: services.metadata.lookup(&model, element),
        },
        Job::FetchPreset {
            generation,
            model,
            slot,
            purpose,
        } => {
            let result = services.presets.get(&model, slot);
            JobEvent::PresetFetched {
                generation,
                model,
                slot,
                purpose,
                result,
            }
        }
        Job::SavePreset {
            model,
            slot,
            label,
            viewpoint,
        } => {
            let result = services.presets.upsert(&model, slot, &label, viewpoint);
            JobEvent::PresetSaved {
                model,
                slot,
                label,
                result,
            }
        }
        Job::DeletePreset { model, slot } => {
            let result = services.presets.delete(&model, slot);
            JobEvent::PresetDeleted {
                model,
                slot,
                result,
            }
        }
        Job::RenamePreset { model, slot, label } => {
            let result = services.presets.rename(&model, slot, &label);
            JobEvent::PresetRenamed {
                model,
                slot,
                label,
                result,
            }
        }
        Job::ListPresets { model, revision } => {
            let result = services.presets.list(&model);
            JobEvent::PresetsListed {
                model,
                revision,
                result,
            }
        }
        Job::CountPresets { model } => {
            let result = services.presets.count(&model);
            JobEvent::PresetCount { model, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryBackend;

    fn runner(mode: ExecutionMode) -> TaskRunner {
        TaskRunner::new(Services::in_memory(Arc::new(MemoryBackend::new())), mode)
    }

    #[test]
    fn inline_jobs_are_delivered_on_drain() {
        let mut runner = runner(ExecutionMode::Inline);
        runner.submit(Job::CountPresets {
            model: "ground".into(),
        });
        assert_eq!(runner.in_flight(), 1);

        let events = runner.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            JobEvent::PresetCount { result: Ok(0), .. }
        ));
        assert_eq!(runner.in_flight(), 0);
    }

    #[test]
    fn progress_events_do_not_finish_a_job() {
        let backend = Arc::new(MemoryBackend::with_demo_models(&["ground"]));
        let mut runner = TaskRunner::new(Services::in_memory(backend), ExecutionMode::Inline);
        runner.submit(Job::FetchModel {
            generation: Generation::default().next(),
            key: "ground".into(),
        });
        let events = runner.drain();
        assert!(events.iter().any(|e| !e.is_final()));
        assert!(matches!(
            events.last(),
            Some(JobEvent::ModelFetched { result: Ok(_), .. })
        ));
        assert_eq!(runner.in_flight(), 0);
    }

    struct PanickingSource;

    impl crate::services::ModelSource for PanickingSource {
        fn fetch_model(
            &self,
            _key: &str,
            _progress: &mut dyn FnMut(DownloadProgress),
        ) -> Result<ModelMesh, ServiceError> {
            panic!("Asset-Parser defekt")
        }
    }

    #[test]
    fn panicking_worker_reports_failure_and_finishes() {
        let services = Services {
            models: Arc::new(PanickingSource),
            ..Services::in_memory(Arc::new(MemoryBackend::new()))
        };
        let mut runner = TaskRunner::new(services, ExecutionMode::Inline);
        runner.submit(Job::FetchModel {
            generation: Generation::default().next(),
            key: "ground".into(),
        });

        let events = runner.drain();
        assert_eq!(runner.in_flight(), 0);
        match events.last() {
            Some(JobEvent::ModelFetched {
                key,
                result: Err(ServiceError::Unavailable(reason)),
                ..
            }) => {
                assert_eq!(key, "ground");
                assert!(reason.contains("Asset-Parser defekt"));
            }
            other => panic!("Fehler-Event erwartet, erhalten: {:?}", other),
        }
    }

    #[test]
    fn threaded_jobs_eventually_arrive() {
        let mut runner = runner(ExecutionMode::Threaded);
        runner.submit(Job::LoadBlacklist);
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        let mut events = Vec::new();
        while events.is_empty() && std::time::Instant::now() < deadline {
            events = runner.drain();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(matches!(
            events.first(),
            Some(JobEvent::BlacklistLoaded { result: Ok(_) })
        ));
    }
}
