/// Flat vertex, color and normal buffers for external renderers
///
/// Renderers consume plain `f32` arrays with three floats per entry. The
/// [`Primitive`] tag tells them how to group the points.
use crate::stl::StlMesh;
use crate::vector::Vec3;

/// How consecutive points in a buffer should be assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Four points per facet: the triangle plus its first point again
    LineLoop,
    /// Four points per quad, six quads per cube, no index buffer
    Quads,
}

/// Points per facet in a wireframe buffer
pub const LINE_LOOP_POINTS: usize = 4;
/// Normals per facet in a wireframe buffer
pub const LINE_LOOP_NORMALS: usize = 3;
/// Points per cube in a quad buffer
pub const CUBE_POINTS: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffers {
    pub primitive: Primitive,
    pub vertices: Vec<f32>,
    pub colors: Vec<f32>,
    pub normals: Vec<f32>,
}

impl RenderBuffers {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            vertices: Vec::new(),
            colors: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Flatten the loader's wireframe output
    pub fn wireframe(mesh: &StlMesh) -> Self {
        let mut buffers = Self::new(Primitive::LineLoop);
        buffers.vertices.reserve(mesh.vertices.len() * 3);
        buffers.colors.reserve(mesh.colors.len() * 3);
        buffers.normals.reserve(mesh.normals.len() * 3);

        for v in &mesh.vertices {
            push_vec3(&mut buffers.vertices, v);
        }
        for c in &mesh.colors {
            push_vec3(&mut buffers.colors, c);
        }
        for n in &mesh.normals {
            push_vec3(&mut buffers.normals, n);
        }
        buffers
    }

    /// Number of points (three floats each) in the vertex buffer
    pub fn point_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Facets recovered from buffer lengths, for wireframe buffers only
    pub fn facet_count(&self) -> Option<usize> {
        match self.primitive {
            Primitive::LineLoop => Some(self.point_count() / LINE_LOOP_POINTS),
            Primitive::Quads => None,
        }
    }

    /// Cubes recovered from buffer lengths, for quad buffers only
    pub fn cube_count(&self) -> Option<usize> {
        match self.primitive {
            Primitive::Quads => Some(self.point_count() / CUBE_POINTS),
            Primitive::LineLoop => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append one quad with a shared color and face normal
    pub fn push_quad(&mut self, corners: [Vec3; 4], color: &Vec3, normal: &Vec3) {
        for corner in &corners {
            push_vec3(&mut self.vertices, corner);
            push_vec3(&mut self.colors, color);
            push_vec3(&mut self.normals, normal);
        }
    }

    /// Append the six faces of the cube `[origin, origin + size]`
    pub fn push_cube(&mut self, origin: &Vec3, size: f64, color: &Vec3) {
        let (x0, y0, z0) = (origin.x, origin.y, origin.z);
        let (x1, y1, z1) = (x0 + size, y0 + size, z0 + size);
        let p = Vec3::new;

        // Front
        self.push_quad(
            [p(x0, y0, z0), p(x1, y0, z0), p(x1, y1, z0), p(x0, y1, z0)],
            color,
            &-Vec3::z(),
        );
        // Right
        self.push_quad(
            [p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)],
            color,
            &Vec3::x(),
        );
        // Back
        self.push_quad(
            [p(x1, y1, z1), p(x1, y0, z1), p(x0, y0, z1), p(x0, y1, z1)],
            color,
            &Vec3::z(),
        );
        // Left
        self.push_quad(
            [p(x0, y0, z1), p(x0, y1, z1), p(x0, y1, z0), p(x0, y0, z0)],
            color,
            &-Vec3::x(),
        );
        // Top
        self.push_quad(
            [p(x0, y1, z0), p(x1, y1, z0), p(x1, y1, z1), p(x0, y1, z1)],
            color,
            &Vec3::y(),
        );
        // Bottom
        self.push_quad(
            [p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)],
            color,
            &-Vec3::y(),
        );
    }
}

fn push_vec3(buffer: &mut Vec<f32>, v: &Vec3) {
    buffer.extend_from_slice(&[v.x as f32, v.y as f32, v.z as f32]);
}
