/// stlvox core library - STL ingestion and voxelization
///
/// This library reads ASCII STL meshes, tests triangles against axis-aligned
/// boxes with the separating axis theorem, and turns the occupied cells of a
/// regular grid into flat cube geometry for external renderers.

pub mod bounds;
pub mod buffers;
pub mod geometry;
pub mod intersect;
pub mod stl;
pub mod transform;
pub mod vector;
pub mod voxel;

// Re-export commonly used types
pub use bounds::Aabb;
pub use buffers::{Primitive, RenderBuffers};
pub use geometry::{Mesh, Triangle};
pub use intersect::triangle_intersects_box;
pub use stl::{load_mesh, read_mesh, StlError, StlMesh};
pub use transform::{RotationState, Transform};
pub use vector::{Vec3, VectorExt};
pub use voxel::{voxelize, voxelize_with, CornerMode, VoxelGrid, VoxelGridBuilder, VoxelizeOptions};
