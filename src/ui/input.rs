//! Viewport-Input-Handling: Maus-Events, Drag, Scroll → AppIntent.

use crate::app::AppIntent;
use glam::Vec2;
use std::time::{Duration, Instant};

/// Verwaltet den Input-Zustand für das Viewport (Zeiger-Drosselung, Hover)
#[derive(Debug, Default)]
pub struct InputState {
    /// Zeitpunkt der zuletzt gemeldeten Zeigerbewegung
    last_pointer_event: Option<Instant>,
    /// Zuletzt gemeldete Zeigerposition (Viewport-Pixel)
    last_pointer_pos: Option<Vec2>,
    /// Zeiger befand sich im letzten Frame über dem Viewport
    pointer_inside: bool,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sammelt Viewport-Events aus egui-Input und gibt AppIntents zurück.
    ///
    /// Zeigerbewegungen werden auf höchstens ein Event pro `throttle`
    /// gedrosselt. Bildschirmpositionen sind relativ zur Viewport-Ecke.
    pub fn collect_viewport_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        throttle: Duration,
        now: Instant,
    ) -> Vec<AppIntent> {
        let mut events = Vec::new();
        let rect = response.rect;

        events.push(AppIntent::ViewportResized {
            size: [rect.width(), rect.height()],
        });

        let to_local = |pos: egui::Pos2| Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y);

        // ── Hover ───────────────────────────────────────────────
        match response.hover_pos() {
            Some(pos) => {
                self.pointer_inside = true;
                let local = to_local(pos);
                if self.pointer_due(local, throttle, now) {
                    self.last_pointer_event = Some(now);
                    self.last_pointer_pos = Some(local);
                    events.push(AppIntent::PointerMoved { screen_pos: local });
                }
            }
            None => {
                if self.pointer_inside {
                    self.pointer_inside = false;
                    self.last_pointer_pos = None;
                    events.push(AppIntent::PointerLeft);
                }
            }
        }

        // ── Klicks ──────────────────────────────────────────────
        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(AppIntent::ConfirmRequested {
                    screen_pos: to_local(pos),
                });
            }
        } else if response.clicked() {
            events.push(AppIntent::ContextMenuDismissed);
        }
        if response.secondary_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(AppIntent::ContextRequested {
                    screen_pos: to_local(pos),
                });
            }
        }

        // ── Drag ────────────────────────────────────────────────
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            let delta = Vec2::new(delta.x, delta.y);
            if response.dragged_by(egui::PointerButton::Primary) {
                events.push(AppIntent::OrbitDragged { delta });
            } else if response.dragged_by(egui::PointerButton::Secondary)
                || response.dragged_by(egui::PointerButton::Middle)
            {
                events.push(AppIntent::PanDragged { delta });
            }
        }

        // ── Scroll ──────────────────────────────────────────────
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                events.push(AppIntent::DollyScrolled { scroll });
            }
        }

        // ── Tastatur ────────────────────────────────────────────
        let (escape, home) = ui.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Home),
            )
        });
        if escape {
            events.push(AppIntent::ContextMenuDismissed);
            events.push(AppIntent::UnselectRequested);
        }
        if home {
            events.push(AppIntent::ResetCameraRequested);
        }

        events
    }

    fn pointer_due(&self, pos: Vec2, throttle: Duration, now: Instant) -> bool {
        if self.last_pointer_pos == Some(pos) {
            return false;
        }
        self.last_pointer_event
            .is_none_or(|last| now.duration_since(last) >= throttle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_are_throttled() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        let throttle = Duration::from_millis(16);
        assert!(input.pointer_due(Vec2::new(1.0, 1.0), throttle, t0));

        input.last_pointer_event = Some(t0);
        input.last_pointer_pos = Some(Vec2::new(1.0, 1.0));
        assert!(!input.pointer_due(Vec2::new(2.0, 2.0), throttle, t0 + Duration::from_millis(5)));
        assert!(input.pointer_due(Vec2::new(2.0, 2.0), throttle, t0 + Duration::from_millis(16)));
        // Gleiche Position löst kein erneutes Picking aus
        assert!(!input.pointer_due(Vec2::new(1.0, 1.0), throttle, t0 + Duration::from_secs(1)));
    }
}
