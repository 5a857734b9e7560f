/// Colored run summary for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use std::path::PathBuf;
use stlvox_core::{Aabb, RenderBuffers, StlMesh, VoxelGrid};

use crate::Args;

/// What one run produced
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub input: PathBuf,
    pub facets: usize,
    pub dropped_facets: usize,
    pub wireframe_points: usize,
    pub voxel_size: u32,
    pub bounds: Option<Aabb>,
    pub dimensions: [usize; 3],
    pub voxels: usize,
    pub quad_points: usize,
    pub obj: Option<PathBuf>,
}

impl Summary {
    pub fn new(args: &Args, stl: &StlMesh, wireframe: &RenderBuffers, grid: &VoxelGrid) -> Self {
        Self {
            input: args.input.clone(),
            facets: stl.facet_count(),
            dropped_facets: stl.dropped_facets,
            wireframe_points: wireframe.point_count(),
            voxel_size: grid.voxel_size,
            bounds: grid.bounds,
            dimensions: grid.dimensions,
            voxels: grid.voxel_count(),
            quad_points: grid.buffers.point_count(),
            obj: args.obj.clone(),
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        row(writer, "input", self.input.display(), Color::White)?;

        let facet_color = if self.dropped_facets > 0 {
            Color::Yellow
        } else {
            Color::White
        };
        row(
            writer,
            "facets",
            format!("{} ({} dropped)", self.facets, self.dropped_facets),
            facet_color,
        )?;
        row(writer, "wireframe", format!("{} points", self.wireframe_points), Color::Grey)?;

        if let Some(bounds) = &self.bounds {
            row(
                writer,
                "bounds",
                format!(
                    "({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
                    bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
                ),
                Color::Grey,
            )?;
        }

        let [nx, ny, nz] = self.dimensions;
        row(
            writer,
            "grid",
            format!("{}x{}x{} at size {}", nx, ny, nz, self.voxel_size),
            Color::Grey,
        )?;

        let voxel_color = if self.voxels > 0 { Color::Cyan } else { Color::Red };
        row(
            writer,
            "voxels",
            format!("{} ({} quad points)", self.voxels, self.quad_points),
            voxel_color,
        )?;

        if let Some(obj) = &self.obj {
            row(writer, "obj", obj.display(), Color::Green)?;
        }

        writer.flush()
    }
}

fn row<W: Write, T: std::fmt::Display>(
    writer: &mut W,
    label: &str,
    value: T,
    color: Color,
) -> std::io::Result<()> {
    writer.queue(SetForegroundColor(Color::DarkGrey))?;
    writer.queue(Print(format!("{:>10}  ", label)))?;
    writer.queue(SetForegroundColor(color))?;
    writer.queue(Print(value))?;
    writer.queue(ResetColor)?;
    writer.queue(Print('\n'))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use stlvox_core::stl::parse_ascii_str;
    use stlvox_core::{VoxelGridBuilder, VoxelizeOptions};

    #[test]
    fn test_summary_counts() {
        let stl = parse_ascii_str(
            "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 4 0 0\nvertex 0 4 0\nendloop\nendfacet\nendsolid t\n",
        );
        let args = Args::parse_from(["stlvox", "t.stl", "-s", "2"]);
        let grid = VoxelGridBuilder::new(args.options()).build(&stl.mesh);
        let summary = Summary::new(&args, &stl, &RenderBuffers::wireframe(&stl), &grid);

        assert_eq!(summary.facets, 1);
        assert_eq!(summary.wireframe_points, 4);
        assert_eq!(summary.dimensions, [2, 2, 1]);
        assert_eq!(summary.quad_points, summary.voxels * 24);

        let mut out = Vec::new();
        summary.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("voxels"));
        assert!(text.contains("2x2x1 at size 2"));
    }

    #[test]
    fn test_empty_grid_summary() {
        let args = Args::parse_from(["stlvox", "t.stl"]);
        let grid = VoxelGrid::empty(5);
        let stl = StlMesh::default();
        let summary = Summary::new(&args, &stl, &RenderBuffers::wireframe(&stl), &grid);

        assert_eq!(summary.voxels, 0);
        assert!(summary.bounds.is_none());
        assert_eq!(VoxelizeOptions::default().voxel_size, summary.voxel_size);
    }
}
