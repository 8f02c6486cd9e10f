//! Zeitbasierte Kamera-Übergänge mit Ease-In-Out.
//!
//! Ein Übergang ist eine reine Funktion der Zeit: `sample(now)` liefert
//! Position und Target, ohne Zustand zu verändern.

use glam::Vec3;
use std::time::{Duration, Instant};

/// Kubisches Ease-In-Out auf `t ∈ [0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Kamerapose aus Position und Target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Lineare Interpolation beider Vektoren.
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

/// Laufender Übergang zwischen zwei Posen.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    pub from: CameraPose,
    pub to: CameraPose,
    pub started: Instant,
    pub duration: Duration,
}

impl CameraTransition {
    pub fn new(from: CameraPose, to: CameraPose, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    /// Fortschritt in `[0, 1]`. Nulldauer gilt sofort als abgeschlossen.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Pose zum Zeitpunkt `now` (geglättet).
    pub fn sample(&self, now: Instant) -> CameraPose {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, ease_in_out_cubic(t))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}
