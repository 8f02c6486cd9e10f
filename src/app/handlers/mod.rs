//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.
//! Ergebnisse von Hintergrund-Jobs und fällige Timer laufen über
//! `jobs` bzw. `timers`, nicht über das Command-Log.

pub mod ignore_list;
pub mod jobs;
pub mod model;
pub mod panels;
pub mod presets;
pub mod selection;
pub mod timers;
pub mod view;
