//! Use-Case-Funktionen für Viewport-Zustand.

use crate::app::AppState;
use glam::Vec2;

/// Aktualisiert die gespeicherte Viewport-Größe samt Kamera-Seitenverhältnis.
pub fn resize(state: &mut AppState, size: [f32; 2]) {
    if !(size[0] > 0.0 && size[1] > 0.0) {
        log::debug!("Viewport-Größe {:?} ignoriert", size);
        return;
    }
    state.view.viewport_size = size;
    state.view.camera.set_viewport(Vec2::from_array(size));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_viewport_size() {
        let mut state = AppState::new();

        resize(&mut state, [1920.0, 1080.0]);

        assert_eq!(state.view.viewport_size, [1920.0, 1080.0]);
    }

    #[test]
    fn degenerate_size_is_ignored() {
        let mut state = AppState::new();
        resize(&mut state, [800.0, 600.0]);

        resize(&mut state, [0.0, 600.0]);

        assert_eq!(state.view.viewport_size, [800.0, 600.0]);
    }
}
