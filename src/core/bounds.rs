//! Achsenparallele Bounding-Box (AABB) und daraus abgeleitete Overlay-Geometrie.

use glam::Vec3;

/// Achsenparallele Bounding-Box in Weltkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Leere Box, die bei `extend` durch den ersten Punkt ersetzt wird.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Erstellt eine Box aus zwei Ecken.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box um eine Punktmenge. `None` bei leerer Menge.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut bounds = Self::EMPTY;
        for p in points {
            bounds.extend(p);
        }
        (!bounds.is_empty()).then_some(bounds)
    }

    /// Erweitert die Box um einen Punkt.
    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Vereinigt zwei Boxen.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// `true`, solange noch kein Punkt aufgenommen wurde.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Ankerpunkt für Info-Overlays: Mitte der Oberseite (center.x, max.y, center.z).
    pub fn top_center(&self) -> Vec3 {
        let c = self.center();
        Vec3::new(c.x, self.max.y, c.z)
    }

    /// Vertikale Mittellinie von der Unter- zur Oberseite.
    pub fn center_line(&self) -> [Vec3; 2] {
        let c = self.center();
        [Vec3::new(c.x, self.min.y, c.z), Vec3::new(c.x, self.max.y, c.z)]
    }

    /// Alle acht Eckpunkte (Bit 0 = x, Bit 1 = y, Bit 2 = z).
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Die zwölf Kanten als Liniensegmente (Wireframe).
    pub fn edges(&self) -> [[Vec3; 2]; 12] {
        const EDGES: [(usize, usize); 12] = [
            (0, 1),
            (2, 3),
            (4, 5),
            (6, 7),
            (0, 2),
            (1, 3),
            (4, 6),
            (5, 7),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        let c = self.corners();
        EDGES.map(|(a, b)| [c[a], c[b]])
    }
}
