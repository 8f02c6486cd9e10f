use crate::core::{CameraPose, CameraTransition, OrbitCamera};
use crate::shared::ViewerOptions;
use glam::{Vec2, Vec3};

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Perspektivische Orbit-Kamera
    pub camera: OrbitCamera,
    /// Aktuelle Viewport-Größe in Pixel
    pub viewport_size: [f32; 2],
    /// Abstand Kamera → Target direkt nach dem Rahmen des Modells
    pub baseline_distance: f32,
    /// Laufender Kamera-Übergang (neuere ersetzen ältere)
    pub transition: Option<CameraTransition>,
    /// Render-Loop aktiv (endet beim Herunterfahren vor der Freigabe)
    pub render_loop_active: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        let camera = OrbitCamera::new();
        let baseline_distance = camera.distance();
        Self {
            camera,
            viewport_size: [0.0, 0.0],
            baseline_distance,
            transition: None,
            render_loop_active: true,
        }
    }

    /// View-Zustand mit Kamera-Parametern aus den Optionen.
    pub fn from_options(options: &ViewerOptions) -> Self {
        let mut view = Self::new();
        view.camera.position = Vec3::from_array(options.camera_default_position);
        view.camera.fov_y_deg = options.camera_fov_deg;
        view.camera.near = options.camera_near;
        view.camera.far = options.camera_far;
        view.baseline_distance = view.camera.distance();
        view
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::from_array(self.viewport_size)
    }

    /// Aktuelle Pose der Kamera.
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.camera.position, self.camera.target)
    }

    /// Übernimmt eine Pose in die Kamera.
    pub fn apply_pose(&mut self, pose: CameraPose) {
        self.camera.position = pose.position;
        self.camera.target = pose.target;
    }

    /// Zoom relativ zur Baseline (`baseline / aktueller Abstand`).
    pub fn zoom_factor(&self) -> f32 {
        let distance = self.camera.distance();
        if distance <= f32::EPSILON || self.baseline_distance <= f32::EPSILON {
            return 1.0;
        }
        self.baseline_distance / distance
    }

    /// Übernimmt den aktuellen Abstand als neue Baseline.
    pub fn rebaseline(&mut self) {
        self.baseline_distance = self.camera.distance();
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zoom_factor_is_relative_to_baseline() {
        let mut view = ViewState::new();
        view.camera.target = Vec3::ZERO;
        view.camera.position = Vec3::new(0.0, 0.0, 40.0);
        view.rebaseline();
        assert_relative_eq!(view.zoom_factor(), 1.0);

        view.camera.set_distance(10.0);
        assert_relative_eq!(view.zoom_factor(), 4.0, epsilon = 1e-5);
    }
}
