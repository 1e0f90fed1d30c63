//! Finalized hexahedral mesh.

use std::fmt;
use std::ops::Range;

use crate::geometry::Point3;

use super::cell::Cell;

/// A named contiguous range of boundary faces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryPatch {
    /// Patch name (e.g. "inlet", "outlet", "walls")
    pub name: String,
    /// Index of the first face of the patch in the global face list
    pub start_face: usize,
    /// Number of faces in the patch
    pub n_faces: usize,
}

impl BoundaryPatch {
    /// The face-index range covered by this patch.
    #[inline]
    pub fn face_range(&self) -> Range<usize> {
        self.start_face..self.start_face + self.n_faces
    }
}

/// A structured hexahedral finite-volume mesh.
///
/// Produced once by a [`MeshBuilder`](super::MeshBuilder) run and immutable
/// thereafter. The face list is ordered as all internal faces (sorted by
/// owner, then neighbour) followed by all boundary faces grouped by patch.
///
/// Invariants on a finalized mesh:
/// - `owner.len() == faces.len()` and `neighbour.len() == n_internal_faces`
/// - for every internal face `i`: `owner[i] < neighbour[i]`, both in
///   `[0, n_cells)`
/// - boundary patches partition `[n_internal_faces, faces.len())` with no
///   gaps or overlaps
/// - `points` is free of duplicates and sorted by (z, y, x)
#[derive(Clone, Debug, PartialEq)]
pub struct HexMesh {
    /// Global vertex list, deduplicated and sorted by (z, y, x)
    pub points: Vec<Point3>,
    /// Faces as 4 point indices each, in winding order
    pub faces: Vec<[usize; 4]>,
    /// Owner cell identity for every face
    pub owner: Vec<usize>,
    /// Neighbour cell identity for every internal face
    pub neighbour: Vec<usize>,
    /// Number of internal faces (they occupy indices `0..n_internal_faces`)
    pub n_internal_faces: usize,
    /// Boundary patches in their fixed output order
    pub boundary_patches: Vec<BoundaryPatch>,
    /// Cells by dense identity
    pub cells: Vec<Cell>,
    /// Number of cells
    pub n_cells: usize,
}

impl HexMesh {
    /// Total number of faces.
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of boundary faces.
    #[inline]
    pub fn n_boundary_faces(&self) -> usize {
        self.faces.len() - self.n_internal_faces
    }

    /// Number of points.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Look up a boundary patch by name.
    pub fn patch(&self, name: &str) -> Option<&BoundaryPatch> {
        self.boundary_patches.iter().find(|p| p.name == name)
    }

    /// Summary statistics for the mesh.
    pub fn statistics(&self) -> MeshStatistics {
        MeshStatistics {
            n_cells: self.n_cells,
            n_points: self.points.len(),
            n_faces: self.faces.len(),
            n_internal_faces: self.n_internal_faces,
            n_boundary_faces: self.n_boundary_faces(),
            patches: self
                .boundary_patches
                .iter()
                .map(|p| (p.name.clone(), p.n_faces))
                .collect(),
        }
    }
}

/// Summary statistics for a finalized mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshStatistics {
    /// Number of cells
    pub n_cells: usize,
    /// Number of unique points
    pub n_points: usize,
    /// Total number of faces
    pub n_faces: usize,
    /// Number of internal faces
    pub n_internal_faces: usize,
    /// Number of boundary faces
    pub n_boundary_faces: usize,
    /// Patch names with face counts, in output order
    pub patches: Vec<(String, usize)>,
}

impl fmt::Display for MeshStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh Statistics:")?;
        writeln!(f, "  Cells: {}", self.n_cells)?;
        writeln!(f, "  Points: {}", self.n_points)?;
        writeln!(
            f,
            "  Faces: {} ({} internal, {} boundary)",
            self.n_faces, self.n_internal_faces, self.n_boundary_faces
        )?;
        write!(f, "  Patches:")?;
        for (name, count) in &self.patches {
            write!(f, "\n    {}: {} faces", name, count)?;
        }
        Ok(())
    }
}
