/// Triangle and mesh primitives
use nalgebra::Rotation3;

use crate::bounds::Aabb;
use crate::vector::{Vec3, VectorExt};

/// A triangle face with its facet normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub normal: Vec3,
}

impl Triangle {
    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3, normal: Vec3) -> Self {
        Self {
            vertices: [p1, p2, p3],
            normal,
        }
    }

    /// Triangle whose normal is derived from its winding
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let mut triangle = Self::new(p1, p2, p3, Vec3::zeros());
        triangle.normal = triangle.calculate_normal();
        triangle
    }

    pub fn p1(&self) -> Vec3 {
        self.vertices[0]
    }

    pub fn p2(&self) -> Vec3 {
        self.vertices[1]
    }

    pub fn p3(&self) -> Vec3 {
        self.vertices[2]
    }

    /// Calculate the face normal from the triangle's vertices.
    ///
    /// Degenerate triangles yield the zero vector.
    pub fn calculate_normal(&self) -> Vec3 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];

        let mut normal = edge1.cross(&edge2);
        normal.normalize_in_place();
        normal
    }

    pub fn rotated(&self, rotation: &Rotation3<f64>) -> Self {
        Self {
            vertices: self.vertices.map(|v| rotation * v),
            normal: rotation * self.normal,
        }
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Every vertex of every triangle, in facet order
    pub fn points(&self) -> impl Iterator<Item = &Vec3> {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    /// Bounding box of all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.points())
    }

    /// Rotate every triangle about the origin
    pub fn rotated(&self, rotation: &Rotation3<f64>) -> Self {
        Self {
            triangles: self.triangles.iter().map(|t| t.rotated(rotation)).collect(),
        }
    }

    /// Create an axis-aligned cube mesh centered on the origin
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        let faces: [([[f64; 3]; 4], [f64; 3]); 6] = [
            // Front
            ([[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]], [0.0, 0.0, 1.0]),
            // Back
            ([[-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]], [0.0, 0.0, -1.0]),
            // Top
            ([[-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]], [0.0, 1.0, 0.0]),
            // Bottom
            ([[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]], [0.0, -1.0, 0.0]),
            // Right
            ([[h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]], [1.0, 0.0, 0.0]),
            // Left
            ([[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]], [-1.0, 0.0, 0.0]),
        ];

        for (corners, normal) in faces {
            let [a, b, c, d] = corners.map(Vec3::from);
            let normal = Vec3::from(normal);
            mesh.add_triangle(Triangle::new(a, b, c, normal));
            mesh.add_triangle(Triangle::new(a, c, d, normal));
        }

        mesh
    }
}
