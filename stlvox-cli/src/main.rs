/// stlvox - voxelize an ASCII STL mesh
///
/// Loads the mesh, fills a grid of cubes at the requested voxel size and prints
/// a summary. Set RUST_LOG=debug for grid and parser details.
///
/// Usage: stlvox part.stl --voxel-size 5 --obj part-voxels.obj

use anyhow::Result;
use clap::Parser;
use std::io::stdout;
use stlvox_cli::{App, Args};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let summary = App::new(args).run()?;

    summary.draw(&mut stdout())?;
    Ok(())
}
