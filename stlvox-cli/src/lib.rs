/// Command line front end for the stlvox pipeline
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use stlvox_core::{
    read_mesh, CornerMode, RenderBuffers, RotationState, StlMesh, Transform, Vec3, VoxelGrid,
    VoxelGridBuilder, VoxelizeOptions,
};

pub mod export;
pub mod report;

pub use report::Summary;

/// Voxelize an ASCII STL mesh
#[derive(Debug, Clone, Parser)]
#[command(name = "stlvox", version)]
pub struct Args {
    /// ASCII STL file to read
    pub input: PathBuf,

    /// Edge length of each voxel
    #[arg(short = 's', long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub voxel_size: u32,

    /// Place cubes with the legacy corner snapping instead of on the grid
    #[arg(long)]
    pub legacy_corners: bool,

    /// Also test the layer of cells starting at the maximum bound
    #[arg(long)]
    pub inclusive_bounds: bool,

    /// Cube color as R,G,B in 0..1
    #[arg(long, value_parser = parse_triple, default_value = "1,0,0")]
    pub color: Vec3,

    /// Rotate the mesh about the origin by X,Y,Z degrees before voxelizing
    #[arg(long, value_parser = parse_triple)]
    pub rotate: Option<Vec3>,

    /// Write the voxel cubes to a Wavefront OBJ file
    #[arg(long, value_name = "PATH")]
    pub obj: Option<PathBuf>,
}

impl Args {
    pub fn options(&self) -> VoxelizeOptions {
        VoxelizeOptions {
            voxel_size: self.voxel_size,
            corner_mode: if self.legacy_corners {
                CornerMode::LegacySnap
            } else {
                CornerMode::Aligned
            },
            include_max_boundary: self.inclusive_bounds,
            color: self.color,
            ..VoxelizeOptions::default()
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotate
            .map(|r| RotationState::from_degrees(r.x, r.y, r.z))
            .unwrap_or_default()
    }
}

/// Parse three comma separated numbers
pub fn parse_triple(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{}': {}", s, e))?;

    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected three comma separated values, got '{}'", s)),
    }
}

/// Runs one load and voxelize pass
pub struct App {
    args: Args,
}

impl App {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    pub fn run(&self) -> Result<Summary> {
        let stl = read_mesh(&self.args.input)
            .with_context(|| format!("could not load {}", self.args.input.display()))?;

        let grid = self.voxelize(&stl);

        if let Some(path) = &self.args.obj {
            let file = File::create(path)
                .with_context(|| format!("could not create {}", path.display()))?;
            export::write_obj(&grid, BufWriter::new(file))
                .with_context(|| format!("could not write {}", path.display()))?;
            info!("wrote {} cubes to {}", grid.voxel_count(), path.display());
        }

        Ok(Summary::new(&self.args, &stl, &RenderBuffers::wireframe(&stl), &grid))
    }

    fn voxelize(&self, stl: &StlMesh) -> VoxelGrid {
        let mesh = Transform::apply(&self.args.rotation(), &stl.mesh);
        VoxelGridBuilder::new(self.args.options()).build(&mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triple() {
        assert_eq!(parse_triple("1,0.5, -2").unwrap(), Vec3::new(1.0, 0.5, -2.0));
        assert!(parse_triple("1,2").is_err());
        assert!(parse_triple("1,a,3").is_err());
    }

    #[test]
    fn test_args_to_options() {
        let args = Args::parse_from([
            "stlvox",
            "part.stl",
            "--voxel-size",
            "10",
            "--legacy-corners",
            "--color",
            "0,1,0",
        ]);
        let options = args.options();

        assert_eq!(options.voxel_size, 10);
        assert_eq!(options.corner_mode, CornerMode::LegacySnap);
        assert!(!options.include_max_boundary);
        assert_eq!(options.color, Vec3::new(0.0, 1.0, 0.0));
        assert!(args.rotation().is_zero());
    }

    #[test]
    fn test_zero_voxel_size_is_rejected() {
        assert!(Args::try_parse_from(["stlvox", "part.stl", "-s", "0"]).is_err());
    }

    #[test]
    fn test_run_missing_file_fails() {
        let args = Args::parse_from(["stlvox", "/nonexistent/stlvox/part.stl"]);
        assert!(App::new(args).run().is_err());
    }

    #[test]
    fn test_run_writes_obj() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tri.stl");
        let obj = dir.path().join("tri.obj");
        std::fs::write(
            &input,
            "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 4 0 0\nvertex 0 4 0\nendloop\nendfacet\nendsolid t\n",
        )
        .unwrap();

        let argv: Vec<std::ffi::OsString> = vec![
            "stlvox".into(),
            input.clone().into_os_string(),
            "-s".into(),
            "4".into(),
            "--obj".into(),
            obj.clone().into_os_string(),
        ];
        let args = Args::parse_from(argv);
        let summary = App::new(args).run().unwrap();

        assert_eq!(summary.facets, 1);
        assert_eq!(summary.voxels, 1);
        let text = std::fs::read_to_string(&obj).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 6);
    }
}
