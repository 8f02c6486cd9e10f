//! Perspektivische Orbit-Kamera (Rotieren, Pan, Dolly) und Bildschirm-Transformationen.

use super::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use std::f32::consts::PI;

/// Perspektivische Kamera, die um ein Ziel (Target) kreist.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Kameraposition in Weltkoordinaten
    pub position: Vec3,
    /// Blickziel (Drehpunkt der Orbit-Steuerung)
    pub target: Vec3,
    /// Vertikaler Öffnungswinkel in Grad
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Seitenverhältnis Breite/Höhe des Viewports
    pub aspect: f32,
}

impl OrbitCamera {
    /// Startposition, solange kein Modell gerahmt wurde.
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(30.0, 30.0, 30.0);
    pub const DEFAULT_FOV_Y_DEG: f32 = 45.0;
    pub const DEFAULT_NEAR: f32 = 1.0;
    pub const DEFAULT_FAR: f32 = 1000.0;
    /// Minimaler Abstand zum Target beim Dolly.
    pub const MIN_DISTANCE: f32 = 0.01;
    /// Abstand der Polwinkel-Klemmung zu den Polen (Radiant).
    const POLAR_EPS: f32 = 1e-4;

    /// Erstellt eine Kamera mit Standardwerten.
    pub fn new() -> Self {
        Self {
            position: Self::DEFAULT_POSITION,
            target: Vec3::ZERO,
            fov_y_deg: Self::DEFAULT_FOV_Y_DEG,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
            aspect: 1.0,
        }
    }

    /// Abstand Kamera → Target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Normierte Blickrichtung; bei Position == Target die Standardrichtung.
    pub fn view_direction(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or_else(|| (-Self::DEFAULT_POSITION).normalize())
    }

    /// Aktualisiert das Seitenverhältnis aus der Viewport-Größe.
    pub fn set_viewport(&mut self, size: Vec2) {
        if size.x > 0.0 && size.y > 0.0 {
            self.aspect = size.x / size.y;
        }
    }

    /// Richtet die Kamera auf ein neues Target aus, Position bleibt.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projektion mit Tiefenbereich 0..1 (wgpu).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_deg.to_radians(),
            self.aspect.max(f32::EPSILON),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Strahl von der Kamera durch einen Bildschirmpunkt (Pixel relativ zum Viewport).
    pub fn ray_from_screen(&self, screen_pos: Vec2, viewport: Vec2) -> Option<Ray> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(
            screen_pos.x / viewport.x * 2.0 - 1.0,
            1.0 - screen_pos.y / viewport.y * 2.0,
        );
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        Ray::new(near, far - near)
    }

    /// Projiziert einen Weltpunkt auf den Bildschirm. `None` hinter der Kamera.
    pub fn world_to_screen(&self, world: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }

    /// Rotiert die Kamera um das Target (Pixel-Delta, Viewport-Höhe als Referenz).
    pub fn orbit(&mut self, delta_px: Vec2, viewport_height: f32, rotate_speed: f32) {
        let h = viewport_height.max(1.0);
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta -= 2.0 * PI * delta_px.x / h * rotate_speed;
        phi -= 2.0 * PI * delta_px.y / h * rotate_speed;
        phi = phi.clamp(Self::POLAR_EPS, PI - Self::POLAR_EPS);

        let sin_phi = phi.sin();
        self.position = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
    }

    /// Verschiebt Kamera und Target parallel zur Bildebene.
    pub fn pan(&mut self, delta_px: Vec2, viewport_height: f32, pan_speed: f32) {
        let h = viewport_height.max(1.0);
        let target_distance = self.distance() * (self.fov_y_deg.to_radians() * 0.5).tan();
        let scale = 2.0 * target_distance / h * pan_speed;

        let forward = self.view_direction();
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);

        let shift = (-right * delta_px.x + up * delta_px.y) * scale;
        self.position += shift;
        self.target += shift;
    }

    /// Dolly entlang der Blickrichtung. `factor < 1` nähert an.
    pub fn dolly(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let distance = (self.distance() * factor).clamp(Self::MIN_DISTANCE, self.far);
        self.position = self.target - self.view_direction() * distance;
    }

    /// Setzt den Abstand zum Target bei gleicher Blickrichtung.
    pub fn set_distance(&mut self, distance: f32) {
        let distance = distance.max(Self::MIN_DISTANCE);
        self.position = self.target - self.view_direction() * distance;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
