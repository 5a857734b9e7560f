use std::fmt::Write as _;
use std::io::Write;

use approx::assert_relative_eq;
use stlvox_core::{
    load_mesh, read_mesh, voxelize, voxelize_with, Mesh, RenderBuffers, RotationState, StlError,
    Transform, Vec3, VoxelizeOptions,
};
use tempfile::NamedTempFile;

fn to_ascii_stl(mesh: &Mesh, name: &str) -> String {
    let mut out = String::new();
    writeln!(out, "solid {}", name).unwrap();
    for t in &mesh.triangles {
        let n = t.normal;
        writeln!(out, "  facet normal {} {} {}", n.x, n.y, n.z).unwrap();
        writeln!(out, "    outer loop").unwrap();
        for v in &t.vertices {
            writeln!(out, "      vertex {} {} {}", v.x, v.y, v.z).unwrap();
        }
        writeln!(out, "    endloop").unwrap();
        writeln!(out, "  endfacet").unwrap();
    }
    writeln!(out, "endsolid {}", name).unwrap();
    out
}

fn write_stl(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_loader_counts_per_facet() {
    let cube = Mesh::cube(10.0);
    let file = write_stl(&to_ascii_stl(&cube, "cube"));

    let stl = load_mesh(file.path());
    let n = cube.len();
    assert_eq!(stl.vertices.len(), 4 * n);
    assert_eq!(stl.colors.len(), 4 * n);
    assert_eq!(stl.normals.len(), 3 * n);
    assert_eq!(stl.mesh, cube);
}

#[test]
fn test_wireframe_round_trip_recovers_facet_count() {
    let cube = Mesh::cube(3.0);
    let file = write_stl(&to_ascii_stl(&cube, "cube"));
    let buffers = RenderBuffers::wireframe(&load_mesh(file.path()));

    assert_eq!(buffers.facet_count(), Some(cube.len()));
    assert_eq!(buffers.normals.len() / 9, cube.len());
    assert_eq!(buffers.colors.len(), buffers.vertices.len());
}

#[test]
fn test_cube_of_voxel_size_gives_one_voxel() {
    let file = write_stl(&to_ascii_stl(&Mesh::cube(20.0), "cube"));
    let grid = voxelize(file.path(), 20);

    assert_eq!(grid.voxel_count(), 1);
    assert_eq!(grid.vertices().len(), 24 * 3);
}

#[test]
fn test_voxelize_is_idempotent() {
    let mesh = Transform::apply(&RotationState::from_degrees(30.0, 15.0, 0.0), &Mesh::cube(20.0));
    let file = write_stl(&to_ascii_stl(&mesh, "tilted"));

    let first = voxelize(file.path(), 5);
    let second = voxelize(file.path(), 5);
    assert!(!first.is_empty());
    assert_eq!(first.vertices(), second.vertices());
    assert_eq!(first, second);
}

#[test]
fn test_unreadable_path_gives_empty_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.stl");

    assert!(voxelize(&missing, 5).vertices().is_empty());
    assert!(load_mesh(&missing).is_empty());
    assert!(matches!(read_mesh(&missing), Err(StlError::Open { .. })));
}

#[test]
fn test_file_without_facets() {
    let file = write_stl("solid empty\nendsolid empty\n");

    assert!(matches!(read_mesh(file.path()), Err(StlError::NoFacets(_))));
    assert!(voxelize(file.path(), 5).is_empty());
}

#[test]
fn test_occupied_cells_lie_within_grid() {
    let file = write_stl(&to_ascii_stl(&Mesh::cube(12.0), "cube"));
    let options = VoxelizeOptions::with_voxel_size(5);
    let grid = voxelize_with(file.path(), &options);
    let bounds = grid.bounds.unwrap();

    assert_eq!(grid.dimensions, [3, 3, 3]);
    for corner in &grid.occupied {
        let offset = (corner - bounds.min) / 5.0;
        for axis in 0..3 {
            assert_relative_eq!(offset[axis], offset[axis].round());
            assert!(offset[axis] >= 0.0 && offset[axis] < 3.0);
        }
    }
    // A 12 unit cube at step 5 has no cell clear of the surface
    assert_eq!(grid.voxel_count(), 26);
    assert!(!grid.occupied.contains(&Vec3::repeat(-1.0)));
}
