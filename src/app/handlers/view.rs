//! Handler für Kamera und Viewport.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::CameraViewpoint;
use glam::Vec2;

/// Setzt die Kamera auf den Standardzustand zurück.
pub fn reset_camera(state: &mut AppState) {
    use_cases::camera::reset_camera(state);
}

/// Aktualisiert die Viewport-Größe im State.
pub fn set_viewport_size(state: &mut AppState, size: [f32; 2]) {
    use_cases::viewport::resize(state, size);
}

/// Rotiert die Kamera um ein Bildschirm-Delta (Pixel).
pub fn orbit(state: &mut AppState, delta: Vec2) {
    use_cases::camera::orbit(state, delta);
}

/// Verschiebt die Kamera um ein Bildschirm-Delta (Pixel).
pub fn pan(state: &mut AppState, delta: Vec2) {
    use_cases::camera::pan(state, delta);
}

pub fn dolly(state: &mut AppState, factor: f32) {
    use_cases::camera::dolly(state, factor);
}

/// Wendet einen Kamerazustand an (optional animiert).
pub fn set_camera_state(state: &mut AppState, viewpoint: CameraViewpoint, animate: bool) {
    use_cases::camera::apply_viewpoint(state, viewpoint, animate);
}

/// Setzt den Zoom relativ zur Baseline und propagiert ungültige Faktoren.
pub fn set_zoom(state: &mut AppState, factor: f32, animate: bool) -> anyhow::Result<()> {
    use_cases::camera::set_zoom(state, factor, animate)
}
