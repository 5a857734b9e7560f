/// Axis-aligned bounding boxes
use crate::vector::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    /// An empty box that any expansion will overwrite
    fn default() -> Self {
        Self {
            min: Vec3::repeat(f64::MAX),
            max: Vec3::repeat(f64::MIN),
        }
    }
}

impl Aabb {
    /// Build a box from two opposite corners in any order
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Cube spanning `[corner, corner + size]` on every axis
    pub fn cube(corner: Vec3, size: f64) -> Self {
        Self {
            min: corner,
            max: corner + Vec3::repeat(size),
        }
    }

    /// Smallest box enclosing every point, or `None` for an empty iterator
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut bounds = Self::default();
        for p in points {
            bounds.expand_by_point(p);
        }
        bounds.is_valid().then_some(bounds)
    }

    pub fn expand_by_point(&mut self, p: &Vec3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        (0..3).all(|idx| self.min[idx] <= self.max[idx])
    }
}
