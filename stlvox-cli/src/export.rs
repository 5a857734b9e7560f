/// Wavefront OBJ export of voxel cubes
use std::io::{self, Write};

use stlvox_core::VoxelGrid;

/// Write every cube quad as an OBJ face
///
/// Points are written unshared, four `v` lines followed by one `f` line per
/// quad, mirroring the unindexed quad buffer.
pub fn write_obj<W: Write>(grid: &VoxelGrid, mut writer: W) -> io::Result<()> {
    writeln!(writer, "# stlvox: {} voxels of size {}", grid.voxel_count(), grid.voxel_size)?;
    writeln!(writer, "o voxels")?;

    let mut index = 1usize;
    for quad in grid.vertices().chunks_exact(12) {
        for point in quad.chunks_exact(3) {
            writeln!(writer, "v {} {} {}", point[0], point[1], point[2])?;
        }
        writeln!(writer, "f {} {} {} {}", index, index + 1, index + 2, index + 3)?;
        index += 4;
    }

    writer.flush()
}
