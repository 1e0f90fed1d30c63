//! Flat 3D occupancy grid.
//!
//! The grid stores one occupancy value per voxel in a flat array with the
//! linear-index convention `x + nx * (y + ny * z)` (x fastest-varying).
//! External per-voxel attribute arrays (velocity, pressure, region tags)
//! use the same convention, so [`VoxelGrid::linear_index`] is the single
//! source of truth for it.

use std::fmt;

use thiserror::Error;

use crate::types::GridDims;

/// Error type for voxel grid operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Flat array length disagrees with the declared dimensions.
    #[error("data length {len} does not match dimensions {dims} ({expected} voxels)")]
    ShapeMismatch {
        /// Length of the supplied array
        len: usize,
        /// Declared dimensions
        dims: GridDims,
        /// Expected length (nx * ny * nz)
        expected: usize,
    },

    /// A zero-sized grid where a resample or build is requested.
    #[error("{context}: grid dimensions {dims} contain a zero extent")]
    EmptyInput {
        /// Operation that rejected the grid
        context: &'static str,
        /// Offending dimensions
        dims: GridDims,
    },

    /// Coordinate lookup outside the grid bounds.
    #[error("coordinate ({x}, {y}, {z}) is outside grid bounds {dims}")]
    IndexOutOfRange {
        /// Requested x-coordinate
        x: usize,
        /// Requested y-coordinate
        y: usize,
        /// Requested z-coordinate
        z: usize,
        /// Grid dimensions
        dims: GridDims,
    },
}

/// A flattened 3D occupancy grid (solid vs. fluid mask).
///
/// Non-zero values mark fluid (occupied) voxels, zero marks solid. The
/// array length always equals `nx * ny * nz`; this invariant is enforced at
/// construction.
///
/// # Example
///
/// ```
/// use hexmesh_rs::geometry::VoxelGrid;
///
/// let grid = VoxelGrid::new(vec![1, 0, 1, 1], 2, 2, 1).unwrap();
/// assert_eq!(grid.at(0, 0, 0), 1);
/// assert_eq!(grid.at(1, 0, 0), 0);
/// assert_eq!(grid.fluid_fraction(), 0.75);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    data: Vec<u8>,
    dims: GridDims,
}

impl VoxelGrid {
    /// Create a grid from a flat occupancy array.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if `data.len() != nx * ny * nz`.
    pub fn new(data: Vec<u8>, nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        let dims = GridDims::new(nx, ny, nz);
        if data.len() != dims.total() {
            return Err(GridError::ShapeMismatch {
                len: data.len(),
                dims,
                expected: dims.total(),
            });
        }
        Ok(Self { data, dims })
    }

    /// Create a grid with every voxel occupied.
    pub fn filled(nx: usize, ny: usize, nz: usize) -> Self {
        let dims = GridDims::new(nx, ny, nz);
        Self {
            data: vec![1; dims.total()],
            dims,
        }
    }

    /// Create a grid with every voxel solid.
    pub fn empty(nx: usize, ny: usize, nz: usize) -> Self {
        let dims = GridDims::new(nx, ny, nz);
        Self {
            data: vec![0; dims.total()],
            dims,
        }
    }

    /// Grid dimensions.
    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Total number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the grid holds no voxels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat array index for a coordinate: `x + nx * (y + ny * z)`.
    ///
    /// Attribute arrays supplied alongside the grid are indexed with the
    /// same convention.
    #[inline]
    pub fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.dims.nx * (y + self.dims.ny * z)
    }

    /// Occupancy value at a coordinate (unchecked in release builds).
    ///
    /// # Panics
    ///
    /// Debug builds panic on out-of-range coordinates; use [`Self::get`]
    /// for a checked lookup.
    #[inline]
    pub fn at(&self, x: usize, y: usize, z: usize) -> u8 {
        debug_assert!(
            x < self.dims.nx && y < self.dims.ny && z < self.dims.nz,
            "coordinate ({}, {}, {}) out of bounds for grid {}",
            x,
            y,
            z,
            self.dims
        );
        self.data[self.linear_index(x, y, z)]
    }

    /// Checked occupancy lookup.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] if the coordinate lies
    /// outside the grid.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<u8, GridError> {
        if x >= self.dims.nx || y >= self.dims.ny || z >= self.dims.nz {
            return Err(GridError::IndexOutOfRange {
                x,
                y,
                z,
                dims: self.dims,
            });
        }
        Ok(self.data[self.linear_index(x, y, z)])
    }

    /// Number of occupied (non-zero) voxels.
    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Fraction of voxels that are fluid (non-zero).
    ///
    /// Returns 0.0 for an empty grid.
    pub fn fluid_fraction(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.occupied_count() as f64 / self.data.len() as f64
    }

    /// Swap the 0/1 occupancy convention in place.
    ///
    /// Some voxelizers mark solids with 1 and fluid with 0; this flips the
    /// grid into the fluid-is-1 convention used here. Values other than 0
    /// and 1 are left untouched.
    pub fn invert_convention(&mut self) {
        for v in &mut self.data {
            match *v {
                0 => *v = 1,
                1 => *v = 0,
                _ => {}
            }
        }
    }

    /// Occupancy statistics for the grid.
    pub fn statistics(&self) -> GridStatistics {
        let occupied = self.occupied_count();
        GridStatistics {
            dims: self.dims,
            total_voxels: self.data.len(),
            occupied_voxels: occupied,
            solid_voxels: self.data.len() - occupied,
            fluid_fraction: self.fluid_fraction(),
        }
    }

    /// Nearest-neighbor resampling to a target resolution.
    ///
    /// The x-axis is scaled to exactly `target_resolution` voxels; the y and
    /// z axes are scaled by the same ratio (preserving the aspect ratio) and
    /// rounded to the nearest integer, but never below 1. Each target voxel
    /// samples the source voxel at `floor((target_index + 0.5) / scale)`,
    /// clamped into the source range.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyInput`] if any source dimension is zero or
    /// `target_resolution` is zero.
    pub fn resample(&self, target_resolution: usize) -> Result<VoxelGrid, GridError> {
        if self.dims.is_empty() {
            return Err(GridError::EmptyInput {
                context: "resample",
                dims: self.dims,
            });
        }
        if target_resolution == 0 {
            return Err(GridError::EmptyInput {
                context: "resample target",
                dims: GridDims::new(target_resolution, 0, 0),
            });
        }

        let scale = target_resolution as f64 / self.dims.nx as f64;
        let new_nx = target_resolution;
        let new_ny = ((self.dims.ny as f64 * scale).round() as usize).max(1);
        let new_nz = ((self.dims.nz as f64 * scale).round() as usize).max(1);

        // Map a target index back to the nearest source index.
        let source_index = |target: usize, source_len: usize| -> usize {
            let raw = ((target as f64 + 0.5) / scale).floor();
            (raw.max(0.0) as usize).min(source_len - 1)
        };

        let mut data = vec![0u8; new_nx * new_ny * new_nz];
        for iz in 0..new_nz {
            let sz = source_index(iz, self.dims.nz);
            for iy in 0..new_ny {
                let sy = source_index(iy, self.dims.ny);
                for ix in 0..new_nx {
                    let sx = source_index(ix, self.dims.nx);
                    data[ix + new_nx * (iy + new_ny * iz)] = self.at(sx, sy, sz);
                }
            }
        }

        VoxelGrid::new(data, new_nx, new_ny, new_nz)
    }

    /// The raw flat occupancy array.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Occupancy statistics for a voxel grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStatistics {
    /// Grid dimensions
    pub dims: GridDims,
    /// Total number of voxels
    pub total_voxels: usize,
    /// Number of occupied (fluid) voxels
    pub occupied_voxels: usize,
    /// Number of solid voxels
    pub solid_voxels: usize,
    /// Occupied fraction (0.0 for an empty grid)
    pub fluid_fraction: f64,
}

impl fmt::Display for GridStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Voxel Grid Statistics:")?;
        writeln!(f, "  Dimensions: {}", self.dims)?;
        writeln!(f, "  Total voxels: {}", self.total_voxels)?;
        writeln!(
            f,
            "  Occupied voxels: {} ({:.1}%)",
            self.occupied_voxels,
            100.0 * self.fluid_fraction
        )?;
        write!(f, "  Solid voxels: {}", self.solid_voxels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch() {
        let err = VoxelGrid::new(vec![1, 0, 1], 2, 2, 1).unwrap_err();
        assert!(matches!(
            err,
            GridError::ShapeMismatch {
                len: 3,
                expected: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_indexing_convention() {
        // x fastest-varying: value at (x, y, z) = x + 2*(y + 2*z)
        let data: Vec<u8> = (0..8).collect();
        let grid = VoxelGrid::new(data, 2, 2, 2).unwrap();
        assert_eq!(grid.at(0, 0, 0), 0);
        assert_eq!(grid.at(1, 0, 0), 1);
        assert_eq!(grid.at(0, 1, 0), 2);
        assert_eq!(grid.at(0, 0, 1), 4);
        assert_eq!(grid.at(1, 1, 1), 7);
    }

    #[test]
    fn test_get_out_of_range() {
        let grid = VoxelGrid::filled(2, 2, 2);
        assert_eq!(grid.get(1, 1, 1).unwrap(), 1);
        let err = grid.get(2, 0, 0).unwrap_err();
        assert!(matches!(err, GridError::IndexOutOfRange { x: 2, .. }));
    }

    #[test]
    fn test_fluid_fraction() {
        let grid = VoxelGrid::new(vec![1, 0, 1, 1], 4, 1, 1).unwrap();
        assert_eq!(grid.fluid_fraction(), 0.75);
        assert_eq!(VoxelGrid::empty(3, 3, 3).fluid_fraction(), 0.0);
    }

    #[test]
    fn test_fluid_fraction_zero_size() {
        let grid = VoxelGrid::new(Vec::new(), 0, 4, 4).unwrap();
        assert_eq!(grid.fluid_fraction(), 0.0);
    }

    #[test]
    fn test_invert_convention() {
        let mut grid = VoxelGrid::new(vec![0, 1, 2, 1], 4, 1, 1).unwrap();
        grid.invert_convention();
        assert_eq!(grid.data(), &[1, 0, 2, 0]);
    }

    #[test]
    fn test_statistics() {
        let grid = VoxelGrid::new(vec![1, 0, 0, 1], 2, 2, 1).unwrap();
        let stats = grid.statistics();
        assert_eq!(stats.total_voxels, 4);
        assert_eq!(stats.occupied_voxels, 2);
        assert_eq!(stats.solid_voxels, 2);
        assert_eq!(stats.fluid_fraction, 0.5);
    }

    #[test]
    fn test_resample_all_ones_stays_all_ones() {
        let grid = VoxelGrid::filled(4, 4, 4);
        for target in [1, 2, 3, 4, 7, 8] {
            let resampled = grid.resample(target).unwrap();
            assert_eq!(resampled.dims().nx, target);
            assert!(
                resampled.data().iter().all(|&v| v == 1),
                "target {} produced non-uniform grid",
                target
            );
        }
    }

    #[test]
    fn test_resample_preserves_aspect_ratio() {
        let grid = VoxelGrid::filled(8, 4, 2);
        let resampled = grid.resample(4).unwrap();
        assert_eq!(resampled.dims(), GridDims::new(4, 2, 1));
    }

    #[test]
    fn test_resample_identity() {
        let data: Vec<u8> = (0..27).map(|i| (i % 2) as u8).collect();
        let grid = VoxelGrid::new(data.clone(), 3, 3, 3).unwrap();
        let same = grid.resample(3).unwrap();
        assert_eq!(same.data(), &data[..]);
    }

    #[test]
    fn test_resample_empty_input() {
        let grid = VoxelGrid::new(Vec::new(), 0, 4, 4).unwrap();
        let err = grid.resample(8).unwrap_err();
        assert!(matches!(err, GridError::EmptyInput { .. }));
    }

    #[test]
    fn test_resample_zero_target() {
        let grid = VoxelGrid::filled(4, 4, 4);
        assert!(grid.resample(0).is_err());
    }

    #[test]
    fn test_resample_round_trip_fluid_fraction() {
        // Half-space occupancy: x < 4 fluid. Downsample then upsample should
        // approximately preserve the fluid fraction.
        let mut data = vec![0u8; 8 * 8 * 8];
        for z in 0..8 {
            for y in 0..8 {
                for x in 0..4 {
                    data[x + 8 * (y + 8 * z)] = 1;
                }
            }
        }
        let grid = VoxelGrid::new(data, 8, 8, 8).unwrap();
        let round_trip = grid.resample(4).unwrap().resample(8).unwrap();
        assert!(
            (round_trip.fluid_fraction() - grid.fluid_fraction()).abs() < 0.05,
            "fluid fraction drifted: {} vs {}",
            round_trip.fluid_fraction(),
            grid.fluid_fraction()
        );
    }
}
