//! Mesh cell data.

use crate::geometry::Point3;
use crate::types::CellRegion;

/// A single hexahedral cell of the mesh.
///
/// A cell corresponds to one occupied voxel. Its dense integer identity is
/// its position in the cell vector and is assigned during enumeration;
/// connectivity filtering may later compact identities, but each cell keeps
/// its original grid coordinate.
///
/// The velocity, pressure, and region fields are sampled from externally
/// supplied flat arrays at enumeration time and default to zero/interior
/// when no arrays are given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Grid coordinate (x, y, z) of the source voxel
    pub coord: [usize; 3],
    /// x-velocity component
    pub u: f64,
    /// y-velocity component
    pub v: f64,
    /// z-velocity component
    pub w: f64,
    /// Pressure
    pub p: f64,
    /// Region membership
    pub region: CellRegion,
}

impl Cell {
    /// Create a cell at a grid coordinate with default attributes.
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self {
            coord: [x, y, z],
            u: 0.0,
            v: 0.0,
            w: 0.0,
            p: 0.0,
            region: CellRegion::Interior,
        }
    }

    /// Physical cell center for a given voxel edge length.
    #[inline]
    pub fn center(&self, voxel_size: f64) -> Point3 {
        let half = voxel_size / 2.0;
        Point3::new(
            self.coord[0] as f64 * voxel_size + half,
            self.coord[1] as f64 * voxel_size + half,
            self.coord[2] as f64 * voxel_size + half,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let cell = Cell::new(1, 2, 3);
        assert_eq!(cell.coord, [1, 2, 3]);
        assert_eq!(cell.u, 0.0);
        assert_eq!(cell.region, CellRegion::Interior);
    }

    #[test]
    fn test_center() {
        let cell = Cell::new(0, 1, 2);
        let c = cell.center(2.0);
        assert_eq!(c, Point3::new(1.0, 3.0, 5.0));
    }
}
