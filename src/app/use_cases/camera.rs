//! Use-Case-Funktionen für Kamera-Steuerung und Kamera-Animation.

use crate::app::AppState;
use crate::core::{CameraPose, CameraTransition, CameraViewpoint};
use glam::{Vec2, Vec3};
use std::time::Duration;

/// Aktueller Kamerazustand (Zoom relativ zur Baseline).
pub fn current_camera_state(state: &AppState) -> CameraViewpoint {
    CameraViewpoint::new(
        state.view.camera.position,
        state.view.camera.target,
        state.view.zoom_factor(),
    )
}

/// Verwirft ausstehende Preset- und Default-Viewpoint-Ergebnisse.
/// Der jüngste Fokuswunsch gewinnt.
fn supersede_viewpoint_requests(state: &mut AppState) {
    state.presets.request = state.presets.request.next();
}

/// Bricht eine laufende Animation ab (manuelle Navigation gewinnt).
fn cancel_animation(state: &mut AppState) {
    supersede_viewpoint_requests(state);
    if state.view.transition.take().is_some() {
        log::debug!("Kamera-Animation durch Navigation abgebrochen");
    }
}

/// Rotiert um das Target.
pub fn orbit(state: &mut AppState, delta: Vec2) {
    cancel_animation(state);
    let height = state.view.viewport_size[1];
    let speed = state.options.rotate_speed;
    state.view.camera.orbit(delta, height, speed);
}

/// Verschiebt Kamera und Target parallel zur Bildebene.
pub fn pan(state: &mut AppState, delta: Vec2) {
    cancel_animation(state);
    let height = state.view.viewport_size[1];
    let speed = state.options.pan_speed;
    state.view.camera.pan(delta, height, speed);
}

/// Dolly entlang der Blickrichtung.
pub fn dolly(state: &mut AppState, factor: f32) {
    cancel_animation(state);
    state.view.camera.dolly(factor);
}

/// Startet einen Übergang zur Zielpose; ein laufender Übergang wird ersetzt.
pub fn animate_to(state: &mut AppState, to: CameraPose, duration: Duration) {
    let from = state.view.pose();
    state.view.transition = Some(CameraTransition::new(from, to, state.now, duration));
}

/// Fährt auf `center` zu, Blickrichtung bleibt, Endabstand = Baseline / Zoom.
pub fn animate_to_target(state: &mut AppState, center: Vec3, zoom_factor: f32, duration: Duration) {
    let zoom = if zoom_factor.is_finite() && zoom_factor > 0.0 {
        zoom_factor
    } else {
        1.0
    };
    let direction = state.view.camera.view_direction();
    let distance = (state.view.baseline_distance / zoom).max(crate::core::OrbitCamera::MIN_DISTANCE);
    let to = CameraPose::new(center - direction * distance, center);
    supersede_viewpoint_requests(state);
    animate_to(state, to, duration);
}

/// Übernimmt einen Viewpoint (Position/Target absolut), animiert oder sofort.
pub fn apply_viewpoint(state: &mut AppState, viewpoint: CameraViewpoint, animate: bool) {
    let to = CameraPose::new(viewpoint.position, viewpoint.target);
    if animate {
        let duration = state.options.camera_transition();
        animate_to(state, to, duration);
    } else {
        state.view.transition = None;
        state.view.apply_pose(to);
    }
}

/// Setzt den Zoom relativ zur Baseline bei gleicher Blickrichtung.
pub fn set_zoom(state: &mut AppState, factor: f32, animate: bool) -> anyhow::Result<()> {
    if !(factor.is_finite() && factor > 0.0) {
        anyhow::bail!("Ungültiger Zoom-Faktor: {}", factor);
    }
    let target = state.view.camera.target;
    let distance = state.view.baseline_distance / factor;
    let direction = state.view.camera.view_direction();
    let to = CameraPose::new(target - direction * distance, target);
    if animate {
        let duration = state.options.camera_transition();
        animate_to(state, to, duration);
    } else {
        state.view.transition = None;
        state.view.apply_pose(to);
    }
    Ok(())
}

/// Richtet das Target auf das Modellzentrum aus und setzt die Baseline neu.
/// Die Kameraposition bleibt erhalten.
pub fn frame_model(state: &mut AppState) {
    let Some(center) = model_center(state) else {
        return;
    };
    state.view.transition = None;
    state.view.camera.look_at(center);
    state.view.rebaseline();
    log::debug!(
        "Kamera auf Modellzentrum {:?} ausgerichtet, Baseline {:.2}",
        center,
        state.view.baseline_distance
    );
}

/// Zentriert die Kamera mit festem Offset auf die Modell-Hüllbox (Preset-Fallback).
pub fn center_on_model(state: &mut AppState) {
    let center = model_center(state).unwrap_or(Vec3::ZERO);
    let offset = Vec3::from_array(state.options.fallback_camera_offset);
    state.view.transition = None;
    state.view.apply_pose(CameraPose::new(center + offset, center));
    state.view.rebaseline();
    log::info!("Kamera auf Modell zentriert (kein Preset verfügbar)");
}

/// Standardposition, Target = Modellzentrum oder Ursprung, neue Baseline.
pub fn reset_camera(state: &mut AppState) {
    let target = model_center(state).unwrap_or(Vec3::ZERO);
    state.view.transition = None;
    state.view.apply_pose(CameraPose::new(
        Vec3::from_array(state.options.camera_default_position),
        target,
    ));
    state.view.rebaseline();
}

/// Schreibt den Animationsstand für `state.now` in die Kamera.
/// Liefert `true`, solange eine Animation läuft.
pub fn advance_animation(state: &mut AppState) -> bool {
    let Some(transition) = state.view.transition.as_ref() else {
        return false;
    };
    let pose = transition.sample(state.now);
    let finished = transition.is_finished(state.now);
    state.view.apply_pose(pose);
    if finished {
        state.view.transition = None;
    }
    !finished
}

fn model_center(state: &AppState) -> Option<Vec3> {
    state
        .model
        .mesh
        .as_ref()
        .and_then(|mesh| mesh.bounds())
        .map(|b| b.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state_with_baseline(distance: f32) -> AppState {
        let mut state = AppState::new();
        state.view.camera.target = Vec3::ZERO;
        state.view.camera.position = Vec3::new(0.0, 0.0, distance);
        state.view.rebaseline();
        state
    }

    #[test]
    fn set_zoom_divides_baseline_distance() {
        let mut state = state_with_baseline(60.0);
        set_zoom(&mut state, 3.0, false).expect("gültiger Faktor");
        assert_relative_eq!(state.view.camera.distance(), 20.0, epsilon = 1e-4);
        assert_relative_eq!(current_camera_state(&state).zoom, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn set_zoom_rejects_non_positive_factor() {
        let mut state = state_with_baseline(60.0);
        assert!(set_zoom(&mut state, 0.0, false).is_err());
        assert_relative_eq!(state.view.camera.distance(), 60.0);
    }

    #[test]
    fn animation_reaches_target_pose_and_ends() {
        let mut state = state_with_baseline(60.0);
        animate_to_target(&mut state, Vec3::new(1.0, 2.0, 3.0), 3.0, Duration::from_millis(800));
        assert!(state.view.is_animating());

        state.now += Duration::from_millis(400);
        assert!(advance_animation(&mut state));

        state.now += Duration::from_millis(400);
        assert!(!advance_animation(&mut state));
        assert!(!state.view.is_animating());
        assert_relative_eq!(state.view.camera.target.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(state.view.camera.distance(), 20.0, epsilon = 1e-4);
    }

    #[test]
    fn newer_animation_supersedes_running_one() {
        let mut state = state_with_baseline(60.0);
        animate_to_target(&mut state, Vec3::new(10.0, 0.0, 0.0), 1.0, Duration::from_secs(1));
        state.now += Duration::from_millis(100);
        advance_animation(&mut state);
        animate_to_target(&mut state, Vec3::new(-10.0, 0.0, 0.0), 1.0, Duration::from_secs(1));

        state.now += Duration::from_secs(2);
        advance_animation(&mut state);
        assert_relative_eq!(state.view.camera.target.x, -10.0, epsilon = 1e-5);
    }

    #[test]
    fn manual_navigation_cancels_animation() {
        let mut state = state_with_baseline(60.0);
        state.view.viewport_size = [800.0, 600.0];
        animate_to_target(&mut state, Vec3::X, 2.0, Duration::from_secs(1));
        orbit(&mut state, Vec2::new(5.0, 0.0));
        assert!(!state.view.is_animating());
    }

    #[test]
    fn focus_and_navigation_invalidate_pending_viewpoint_requests() {
        let mut state = state_with_baseline(60.0);
        state.view.viewport_size = [800.0, 600.0];
        let pending = state.presets.request;

        animate_to_target(&mut state, Vec3::X, 2.0, Duration::from_secs(1));
        let after_focus = state.presets.request;
        assert_ne!(after_focus, pending);

        pan(&mut state, Vec2::new(3.0, 0.0));
        assert_ne!(state.presets.request, after_focus);
    }
}
