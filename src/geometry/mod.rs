//! Voxel geometry representation.
//!
//! Provides the input side of the meshing pipeline:
//! - Flat 3D occupancy grid with a fixed linear-index convention
//! - Nearest-neighbor resampling to a target resolution
//! - Mesh vertex type with the (z, y, x) ordering used for deduplication

mod point;
mod voxel_grid;

pub use point::Point3;
pub use voxel_grid::{GridError, GridStatistics, VoxelGrid};
