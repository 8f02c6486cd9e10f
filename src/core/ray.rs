//! Strahl-Tests gegen Boxen und Dreiecke.

use super::Aabb;
use glam::Vec3;

/// Halbgerade mit normierter Richtung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Erstellt einen Strahl. Die Richtung wird normiert; Nullrichtung ergibt `None`.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab-Test. Liefert den Eintrittsabstand (0 wenn der Ursprung innen liegt).
    pub fn intersect_aabb(&self, bounds: &Aabb) -> Option<f32> {
        let inv = self.direction.recip();
        let t1 = (bounds.min - self.origin) * inv;
        let t2 = (bounds.max - self.origin) * inv;
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();
        if t_far.is_nan() || t_near.is_nan() || t_near > t_far || t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }

    /// Möller-Trumbore, beidseitig. Liefert den Abstand entlang des Strahls.
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        const EPS: f32 = 1e-7;
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPS {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(q) * inv_det;
        (t > EPS).then_some(t)
    }
}
