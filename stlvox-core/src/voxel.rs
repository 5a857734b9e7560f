/// Bounding-box driven voxelization
///
/// The builder steps a regular grid over the mesh bounds and keeps every cell
/// whose box intersects at least one triangle. Occupancy is a brute-force test
/// of every cell against every triangle, O(cells × triangles).
use std::path::Path;

use log::{debug, info, warn};

use crate::bounds::Aabb;
use crate::buffers::{Primitive, RenderBuffers};
use crate::geometry::Mesh;
use crate::stl::load_mesh;
use crate::vector::Vec3;

/// Where the emitted cube for an occupied cell is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CornerMode {
    /// The grid corner the cell was tested at
    #[default]
    Aligned,
    /// Floor each coordinate, zero it when its magnitude does not exceed the
    /// voxel size, otherwise subtract its remainder modulo the voxel size.
    /// Cubes near the origin can overlap or collapse onto each other.
    LegacySnap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelizeOptions {
    /// Grid step and cube edge length
    pub voxel_size: u32,
    pub corner_mode: CornerMode,
    /// Iterate corners up to and including the maximum bound, adding a layer
    /// of cells past the mesh on every axis where it fits exactly
    pub include_max_boundary: bool,
    /// Color attached to every cube vertex
    pub color: Vec3,
    /// Grids with more cells than this are refused
    pub max_cells: u64,
}

/// Default upper bound on tested cells
pub const DEFAULT_MAX_CELLS: u64 = 1 << 27;

impl Default for VoxelizeOptions {
    fn default() -> Self {
        Self {
            voxel_size: 5,
            corner_mode: CornerMode::Aligned,
            include_max_boundary: false,
            color: Vec3::new(1.0, 0.0, 0.0),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl VoxelizeOptions {
    pub fn with_voxel_size(voxel_size: u32) -> Self {
        Self {
            voxel_size,
            ..Self::default()
        }
    }
}

/// The result of one voxelization request
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    /// Bounds of the mesh, `None` when nothing was loaded
    pub bounds: Option<Aabb>,
    pub voxel_size: u32,
    /// Number of cells tested along x, y and z
    pub dimensions: [usize; 3],
    /// Grid corners of the occupied cells, x outermost and z innermost
    pub occupied: Vec<Vec3>,
    /// Six quads per occupied cell
    pub buffers: RenderBuffers,
}

impl VoxelGrid {
    pub fn empty(voxel_size: u32) -> Self {
        Self {
            bounds: None,
            voxel_size,
            dimensions: [0; 3],
            occupied: Vec::new(),
            buffers: RenderBuffers::new(Primitive::Quads),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn voxel_count(&self) -> usize {
        self.occupied.len()
    }

    /// Flat cube vertex buffer, three floats per point
    pub fn vertices(&self) -> &[f32] {
        &self.buffers.vertices
    }

    pub fn cell_count(&self) -> usize {
        self.dimensions
            .iter()
            .fold(1usize, |total, cells| total.saturating_mul(*cells))
    }
}

pub struct VoxelGridBuilder {
    options: VoxelizeOptions,
}

impl VoxelGridBuilder {
    pub fn new(options: VoxelizeOptions) -> Self {
        Self { options }
    }

    pub fn build(&self, mesh: &Mesh) -> VoxelGrid {
        let size = self.options.voxel_size;
        let mut grid = VoxelGrid::empty(size);

        if size == 0 {
            warn!("voxel size must be positive, nothing to do");
            return grid;
        }
        let Some(bounds) = mesh.bounds() else {
            warn!("mesh has no usable vertices, nothing to voxelize");
            return grid;
        };
        if !bounds.extent().iter().all(|e| e.is_finite()) {
            warn!("mesh bounds are not finite, nothing to voxelize");
            return grid;
        }

        let step = size as f64;
        let Some(dimensions) = self.grid_dimensions(&bounds) else {
            return grid;
        };
        debug!(
            "grid {}x{}x{} over {:?}..{:?} at step {}",
            dimensions[0], dimensions[1], dimensions[2], bounds.min, bounds.max, step
        );

        for i in 0..dimensions[0] {
            for j in 0..dimensions[1] {
                for k in 0..dimensions[2] {
                    let corner = bounds.min + Vec3::new(i as f64, j as f64, k as f64) * step;
                    let cell = Aabb::cube(corner, step);

                    if mesh.triangles.iter().any(|t| cell.intersects_triangle(t)) {
                        let origin = self.cube_origin(&corner);
                        grid.buffers.push_cube(&origin, step, &self.options.color);
                        grid.occupied.push(corner);
                    }
                }
            }
        }

        grid.bounds = Some(bounds);
        grid.dimensions = dimensions;
        info!(
            "{} of {} cells occupied by {} triangles",
            grid.voxel_count(),
            grid.cell_count(),
            mesh.len()
        );
        grid
    }

    /// Cells along each axis, `None` when the grid exceeds `max_cells`
    fn grid_dimensions(&self, bounds: &Aabb) -> Option<[usize; 3]> {
        let step = self.options.voxel_size as f64;
        let extent = bounds.extent();

        let cells = [0usize, 1, 2].map(|axis| {
            let cells = extent[axis] / step;
            if self.options.include_max_boundary {
                cells.floor() + 1.0
            } else {
                cells.ceil().max(1.0)
            }
        });

        // Counted in f64 so huge extents cannot wrap
        let total: f64 = cells.iter().product();
        if total > self.options.max_cells as f64 {
            warn!(
                "grid of {:.3e} cells exceeds the limit of {}, nothing to voxelize",
                total, self.options.max_cells
            );
            return None;
        }
        Some(cells.map(|c| c as usize))
    }

    fn cube_origin(&self, corner: &Vec3) -> Vec3 {
        match self.options.corner_mode {
            CornerMode::Aligned => *corner,
            CornerMode::LegacySnap => corner.map(|c| snap(c, self.options.voxel_size)),
        }
    }
}

fn snap(coordinate: f64, voxel_size: u32) -> f64 {
    let floored = coordinate.floor();
    if floored.abs() > voxel_size as f64 {
        // Truncated remainder keeps the sign of the coordinate
        floored - (floored as i64 % voxel_size as i64) as f64
    } else {
        0.0
    }
}

/// Load an ASCII STL file and voxelize it with default options
///
/// An unreadable file yields an empty grid.
pub fn voxelize<P: AsRef<Path>>(path: P, voxel_size: u32) -> VoxelGrid {
    voxelize_with(path, &VoxelizeOptions::with_voxel_size(voxel_size))
}

pub fn voxelize_with<P: AsRef<Path>>(path: P, options: &VoxelizeOptions) -> VoxelGrid {
    let stl = load_mesh(path);
    VoxelGridBuilder::new(*options).build(&stl.mesh)
}
