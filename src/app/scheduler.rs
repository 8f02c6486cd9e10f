//! Zeitgesteuerte Aktionen (Debounce, Settle-Delays).
//!
//! Pro Timer-Art existiert höchstens ein ausstehender Timer; erneutes
//! Planen ersetzt den vorherigen (Trailing-Edge-Debounce).

use super::tasks::Generation;
use std::mem::discriminant;
use std::time::Instant;

/// Art eines Timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerKind {
    /// Ladeanzeige nach erfolgreichem Laden ausblenden
    LoadingSettled { generation: Generation },
    /// Fehleranzeige nach fehlgeschlagenem Laden ausblenden
    LoadingFailureCleared { generation: Generation },
    /// Selektions-Overlays mit dem Selektionszustand abgleichen
    VisualEffectsSync,
    /// Preset-Liste eines Modells abrufen
    PresetListDue { model: String },
}

/// Sammlung ausstehender Timer
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<(Instant, TimerKind)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant einen Timer; ein ausstehender Timer derselben Art wird ersetzt.
    pub fn schedule(&mut self, at: Instant, kind: TimerKind) {
        let d = discriminant(&kind);
        self.timers.retain(|(_, k)| discriminant(k) != d);
        self.timers.push((at, kind));
    }

    /// Verwirft alle Timer, auf die das Prädikat zutrifft.
    pub fn cancel(&mut self, predicate: impl Fn(&TimerKind) -> bool) {
        self.timers.retain(|(_, k)| !predicate(k));
    }

    /// Entnimmt alle fälligen Timer in zeitlicher Reihenfolge.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<(Instant, TimerKind)> = Vec::new();
        self.timers.retain(|(at, kind)| {
            if *at <= now {
                due.push((*at, kind.clone()));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, k)| k).collect()
    }

    pub fn is_scheduled(&self, predicate: impl Fn(&TimerKind) -> bool) -> bool {
        self.timers.iter().any(|(_, k)| predicate(k))
    }

    /// Nächster Fälligkeitszeitpunkt (für Repaint-Planung).
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|(at, _)| *at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
