//! Mesh construction pipeline.
//!
//! [`MeshBuilder`] turns an occupancy grid into a [`HexMesh`] through a
//! fixed sequence of stages:
//!
//! 1. Cell enumeration (z-outer, y, x-inner scan; this determines the dense
//!    cell identities)
//! 2. Optional connectivity filtering (keep the largest 6-connected
//!    component)
//! 3. Point generation with exact global deduplication
//! 4. Face generation with owner/neighbour classification
//! 5. Optional boundary-patch classification
//!
//! The builder exposes only [`MeshBuilder::build`] and
//! [`MeshBuilder::build_with_report`]; the stages are private methods that
//! each consume the previous stage's output, so they cannot run out of
//! order. Every stage is deterministic: identical input produces a
//! byte-identical mesh.

use std::collections::hash_map::Entry;

use ahash::AHashMap;
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geometry::{GridError, Point3, VoxelGrid};
use crate::types::{CellRegion, FlowAxis};

use super::boundary::classify_boundary_patches;
use super::cell::Cell;
use super::connectivity::{filter_cells, find_largest_component};
use super::hex_mesh::HexMesh;
use super::report::{BuildEvent, BuildReport};
use super::topology::{HEX_CORNER_OFFSETS, HEX_FACE_TABLE, N_HEX_CORNERS};

/// Error type for mesh construction.
///
/// Every variant is fatal for the current build: there is no partial mesh
/// and no retry. The caller must supply corrected input and re-run the
/// pipeline from the start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A face's canonical vertex key is owned by neither 1 nor 2 cells.
    ///
    /// This indicates a defect in point deduplication or in the input
    /// grid's cell adjacency, not a recoverable condition.
    #[error("face {key:?} is associated with {count} cells (expected 1 or 2)")]
    Topology {
        /// Canonical (sorted) point indices of the offending face
        key: [usize; 4],
        /// Number of cells claiming the face
        count: usize,
    },

    /// An attribute array's length disagrees with the grid size.
    #[error("{field} field has length {got}, expected {expected} to match the grid")]
    FieldLength {
        /// Name of the offending field
        field: &'static str,
        /// Expected length (grid voxel count)
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// The input grid was rejected.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Configuration for a mesh build.
///
/// # Example
///
/// ```
/// use hexmesh_rs::mesh::MeshOptions;
/// use hexmesh_rs::types::FlowAxis;
///
/// let options = MeshOptions::new(1e-6)
///     .with_flow_axis(FlowAxis::Z)
///     .with_connectivity_filter(false);
/// assert_eq!(options.voxel_size, 1e-6);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MeshOptions {
    /// Physical edge length of one voxel
    pub voxel_size: f64,
    /// Primary flow axis (controls inlet/outlet patch naming and which
    /// velocity component an external velocity field supplies)
    pub flow_axis: FlowAxis,
    /// Keep only the largest 6-connected component of cells
    pub connectivity_filter: bool,
    /// Classify boundary faces into named patches
    pub classify_boundaries: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            voxel_size: 1.0,
            flow_axis: FlowAxis::X,
            connectivity_filter: true,
            classify_boundaries: true,
        }
    }
}

impl MeshOptions {
    /// Create options with a given voxel edge length.
    ///
    /// # Panics
    ///
    /// Panics if `voxel_size` is not positive.
    pub fn new(voxel_size: f64) -> Self {
        assert!(
            voxel_size > 0.0,
            "voxel size must be positive, got {}",
            voxel_size
        );
        Self {
            voxel_size,
            ..Default::default()
        }
    }

    /// Set the primary flow axis.
    pub fn with_flow_axis(mut self, axis: FlowAxis) -> Self {
        self.flow_axis = axis;
        self
    }

    /// Enable or disable connectivity filtering.
    pub fn with_connectivity_filter(mut self, enabled: bool) -> Self {
        self.connectivity_filter = enabled;
        self
    }

    /// Enable or disable boundary-patch classification.
    pub fn with_boundary_classification(mut self, enabled: bool) -> Self {
        self.classify_boundaries = enabled;
        self
    }
}

/// Optional per-voxel attribute arrays sampled onto cells.
///
/// Each array must have length `nx * ny * nz` and use the grid's linear
/// indexing convention (`x + nx * (y + ny * z)`).
#[derive(Clone, Copy, Debug, Default)]
pub struct CellFields<'a> {
    /// Velocity component along the configured flow axis
    pub velocity: Option<&'a [f64]>,
    /// Pressure
    pub pressure: Option<&'a [f64]>,
    /// Region tags (see [`CellRegion::from_tag`])
    pub region: Option<&'a [i8]>,
}

impl<'a> CellFields<'a> {
    /// No attribute arrays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a velocity array.
    pub fn with_velocity(mut self, velocity: &'a [f64]) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Attach a pressure array.
    pub fn with_pressure(mut self, pressure: &'a [f64]) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Attach a region-tag array.
    pub fn with_region(mut self, region: &'a [i8]) -> Self {
        self.region = Some(region);
        self
    }
}

/// Builder for constructing a [`HexMesh`] from a [`VoxelGrid`].
///
/// # Example
///
/// ```
/// use hexmesh_rs::geometry::VoxelGrid;
/// use hexmesh_rs::mesh::{MeshBuilder, MeshOptions};
///
/// let grid = VoxelGrid::filled(2, 2, 2);
/// let mesh = MeshBuilder::new(&grid, MeshOptions::default())
///     .build()
///     .unwrap();
///
/// assert_eq!(mesh.n_cells, 8);
/// assert_eq!(mesh.n_points(), 27);
/// assert_eq!(mesh.n_internal_faces, 12);
/// assert_eq!(mesh.n_boundary_faces(), 24);
/// ```
pub struct MeshBuilder<'a> {
    grid: &'a VoxelGrid,
    options: MeshOptions,
    fields: CellFields<'a>,
}

impl<'a> MeshBuilder<'a> {
    /// Create a builder for a grid with the given options.
    pub fn new(grid: &'a VoxelGrid, options: MeshOptions) -> Self {
        Self {
            grid,
            options,
            fields: CellFields::default(),
        }
    }

    /// Attach per-voxel attribute arrays.
    pub fn with_fields(mut self, fields: CellFields<'a>) -> Self {
        self.fields = fields;
        self
    }

    /// Run the full pipeline and return the mesh.
    ///
    /// # Errors
    ///
    /// See [`BuildError`]; any failure aborts the build with no partial
    /// result.
    pub fn build(self) -> Result<HexMesh, BuildError> {
        self.build_with_report().map(|(mesh, _)| mesh)
    }

    /// Run the full pipeline and return the mesh together with a
    /// [`BuildReport`] describing what each stage produced.
    pub fn build_with_report(self) -> Result<(HexMesh, BuildReport), BuildError> {
        let mut report = BuildReport::new();
        self.check_inputs()?;

        let mut cells = self.enumerate_cells();
        report.push(BuildEvent::CellsEnumerated { count: cells.len() });

        if self.options.connectivity_filter {
            let keep = find_largest_component(&cells);
            report.push(BuildEvent::ComponentFiltered {
                kept: keep.len(),
                total: cells.len(),
            });
            cells = filter_cells(&cells, &keep);
        }

        let (points, cell_vertices) = self.generate_points(&cells);
        report.push(BuildEvent::PointsGenerated {
            count: points.len(),
        });

        let face_set = generate_faces(&cell_vertices)?;
        report.push(BuildEvent::FacesGenerated {
            internal: face_set.n_internal,
            boundary: face_set.faces.len() - face_set.n_internal,
        });

        let FaceSet {
            faces,
            owner,
            neighbour,
            n_internal,
        } = face_set;

        let (faces, owner, neighbour, boundary_patches) = if self.options.classify_boundaries {
            classify_boundary_patches(
                &points,
                faces,
                owner,
                neighbour,
                n_internal,
                self.options.flow_axis,
                self.options.voxel_size,
                &mut report,
            )
        } else {
            (faces, owner, neighbour, Vec::new())
        };

        let n_cells = cells.len();
        let mesh = HexMesh {
            points,
            faces,
            owner,
            neighbour,
            n_internal_faces: n_internal,
            boundary_patches,
            cells,
            n_cells,
        };
        Ok((mesh, report))
    }

    fn check_inputs(&self) -> Result<(), BuildError> {
        if self.grid.dims().is_empty() {
            return Err(GridError::EmptyInput {
                context: "mesh build",
                dims: self.grid.dims(),
            }
            .into());
        }

        let expected = self.grid.len();
        if let Some(velocity) = self.fields.velocity {
            if velocity.len() != expected {
                return Err(BuildError::FieldLength {
                    field: "velocity",
                    expected,
                    got: velocity.len(),
                });
            }
        }
        if let Some(pressure) = self.fields.pressure {
            if pressure.len() != expected {
                return Err(BuildError::FieldLength {
                    field: "pressure",
                    expected,
                    got: pressure.len(),
                });
            }
        }
        if let Some(region) = self.fields.region {
            if region.len() != expected {
                return Err(BuildError::FieldLength {
                    field: "region",
                    expected,
                    got: region.len(),
                });
            }
        }
        Ok(())
    }

    /// Stage 1: scan the grid in z-outer, y, x-inner order and create one
    /// cell per occupied voxel. The scan order fixes the dense identity
    /// assignment and is externally observable, so it must not change.
    fn enumerate_cells(&self) -> Vec<Cell> {
        let dims = self.grid.dims();
        let mut cells = Vec::new();

        for z in 0..dims.nz {
            for y in 0..dims.ny {
                for x in 0..dims.nx {
                    if self.grid.at(x, y, z) == 0 {
                        continue;
                    }
                    let mut cell = Cell::new(x, y, z);
                    let flat = self.grid.linear_index(x, y, z);
                    if let Some(velocity) = self.fields.velocity {
                        match self.options.flow_axis {
                            FlowAxis::X => cell.u = velocity[flat],
                            FlowAxis::Y => cell.v = velocity[flat],
                            FlowAxis::Z => cell.w = velocity[flat],
                        }
                    }
                    if let Some(pressure) = self.fields.pressure {
                        cell.p = pressure[flat];
                    }
                    if let Some(region) = self.fields.region {
                        cell.region = CellRegion::from_tag(region[flat]);
                    }
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Stage 3: compute every cell's 8 corners, deduplicate them exactly
    /// into the global point list (sorted by (z, y, x)), and record each
    /// cell's global point indices.
    fn generate_points(&self, cells: &[Cell]) -> (Vec<Point3>, Vec<[usize; N_HEX_CORNERS]>) {
        let corner_sets = collect_corner_sets(cells, self.options.voxel_size);

        let mut unique: Vec<Point3> = corner_sets
            .iter()
            .flat_map(|set| set.iter().copied())
            .collect();
        #[cfg(feature = "parallel")]
        unique.par_sort_unstable();
        #[cfg(not(feature = "parallel"))]
        unique.sort_unstable();
        unique.dedup();

        let mut point_index: AHashMap<Point3, usize> = AHashMap::with_capacity(unique.len());
        for (i, point) in unique.iter().enumerate() {
            point_index.insert(*point, i);
        }

        let cell_vertices = corner_sets
            .iter()
            .map(|set| {
                let mut ids = [0usize; N_HEX_CORNERS];
                for (k, point) in set.iter().enumerate() {
                    ids[k] = point_index[point];
                }
                ids
            })
            .collect();

        (unique, cell_vertices)
    }
}

/// The 8 corners of a cell, sorted by (z, y, x).
///
/// All corners lie on the exact half-voxel lattice, so corners shared
/// between adjacent cells are computed bit-identically and deduplicate by
/// plain equality.
fn cell_corners(cell: &Cell, voxel_size: f64) -> [Point3; N_HEX_CORNERS] {
    let half = voxel_size / 2.0;
    let center = cell.center(voxel_size);
    let mut corners = [Point3::default(); N_HEX_CORNERS];
    for (corner, offset) in corners.iter_mut().zip(&HEX_CORNER_OFFSETS) {
        *corner = Point3::new(
            center.x + offset[0] as f64 * half,
            center.y + offset[1] as f64 * half,
            center.z + offset[2] as f64 * half,
        );
    }
    corners.sort_unstable();
    corners
}

#[cfg(feature = "parallel")]
fn collect_corner_sets(cells: &[Cell], voxel_size: f64) -> Vec<[Point3; N_HEX_CORNERS]> {
    cells
        .par_iter()
        .map(|cell| cell_corners(cell, voxel_size))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn collect_corner_sets(cells: &[Cell], voxel_size: f64) -> Vec<[Point3; N_HEX_CORNERS]> {
    cells
        .iter()
        .map(|cell| cell_corners(cell, voxel_size))
        .collect()
}

/// The canonical key of a face: its 4 point indices sorted ascending.
///
/// Two cells generate the same physical face exactly when their keys match.
#[inline]
pub(crate) fn canonical_face_key(face: &[usize; 4]) -> [usize; 4] {
    let mut key = *face;
    key.sort_unstable();
    key
}

/// Face arrays produced by stage 4, before boundary classification.
#[derive(Debug)]
pub(crate) struct FaceSet {
    pub faces: Vec<[usize; 4]>,
    pub owner: Vec<usize>,
    pub neighbour: Vec<usize>,
    pub n_internal: usize,
}

/// Accumulated ownership of one canonical face key.
struct FaceSlot {
    /// Winding-preserving vertex tuple from the first owning cell
    vertices: [usize; 4],
    /// First owning cell identity
    first: usize,
    /// Second owning cell identity (valid when `count == 2`)
    second: usize,
    /// Number of owning cells seen
    count: usize,
}

/// Stage 4: generate 6 faces per cell, detect shared faces by canonical
/// key, and split them into internal (2 owners) and boundary (1 owner)
/// faces.
fn generate_faces(cell_vertices: &[[usize; N_HEX_CORNERS]]) -> Result<FaceSet, BuildError> {
    let mut face_map: AHashMap<[usize; 4], FaceSlot> =
        AHashMap::with_capacity(cell_vertices.len() * 3);

    for (cell_id, verts) in cell_vertices.iter().enumerate() {
        for def in &HEX_FACE_TABLE {
            let face = [verts[def[0]], verts[def[1]], verts[def[2]], verts[def[3]]];
            match face_map.entry(canonical_face_key(&face)) {
                Entry::Vacant(entry) => {
                    entry.insert(FaceSlot {
                        vertices: face,
                        first: cell_id,
                        second: usize::MAX,
                        count: 1,
                    });
                }
                Entry::Occupied(mut entry) => {
                    let slot = entry.get_mut();
                    slot.count += 1;
                    if slot.count == 2 {
                        slot.second = cell_id;
                    }
                }
            }
        }
    }

    let mut internal: Vec<([usize; 4], usize, usize)> = Vec::new();
    let mut boundary: Vec<([usize; 4], usize)> = Vec::new();

    for (key, slot) in &face_map {
        match slot.count {
            1 => boundary.push((slot.vertices, slot.first)),
            2 => internal.push((
                slot.vertices,
                slot.first.min(slot.second),
                slot.first.max(slot.second),
            )),
            count => {
                return Err(BuildError::Topology { key: *key, count });
            }
        }
    }

    internal.sort_unstable_by_key(|&(_, owner, neighbour)| (owner, neighbour));
    // Boundary faces get a fixed order here so the final face list never
    // depends on hash-map iteration order, with or without patch
    // classification.
    boundary.sort_unstable_by_key(|&(verts, owner)| (owner, canonical_face_key(&verts)));

    let n_internal = internal.len();
    let n_total = n_internal + boundary.len();
    let mut faces = Vec::with_capacity(n_total);
    let mut owner = Vec::with_capacity(n_total);
    let mut neighbour = Vec::with_capacity(n_internal);

    for (verts, own, neigh) in internal {
        faces.push(verts);
        owner.push(own);
        neighbour.push(neigh);
    }
    for (verts, own) in boundary {
        faces.push(verts);
        owner.push(own);
    }

    Ok(FaceSet {
        faces,
        owner,
        neighbour,
        n_internal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_corners_sorted_and_on_lattice() {
        let cell = Cell::new(1, 0, 2);
        let corners = cell_corners(&cell, 1.0);
        // Sorted by (z, y, x); first corner is the (-,-,-) one.
        assert_eq!(corners[0], Point3::new(1.0, 0.0, 2.0));
        assert_eq!(corners[7], Point3::new(2.0, 1.0, 3.0));
        for window in corners.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn test_adjacent_cells_share_corner_bits() {
        // Shared corners of adjacent cells must be bit-identical, otherwise
        // deduplication would split them.
        let a = cell_corners(&Cell::new(0, 0, 0), 1.0);
        let b = cell_corners(&Cell::new(1, 0, 0), 1.0);
        let shared = a.iter().filter(|p| b.contains(*p)).count();
        assert_eq!(shared, 4);
    }

    #[test]
    fn test_canonical_face_key_sorts() {
        assert_eq!(canonical_face_key(&[7, 2, 9, 4]), [2, 4, 7, 9]);
    }

    #[test]
    fn test_generate_faces_single_cell() {
        let cell_vertices = [[0, 1, 2, 3, 4, 5, 6, 7]];
        let face_set = generate_faces(&cell_vertices).unwrap();
        assert_eq!(face_set.n_internal, 0);
        assert_eq!(face_set.faces.len(), 6);
        assert_eq!(face_set.owner, vec![0; 6]);
        assert!(face_set.neighbour.is_empty());
    }

    #[test]
    fn test_generate_faces_triple_owner_is_topology_error() {
        // Three coincident cells claim every face key three times.
        let verts = [0, 1, 2, 3, 4, 5, 6, 7];
        let cell_vertices = [verts, verts, verts];
        let err = generate_faces(&cell_vertices).unwrap_err();
        assert!(matches!(err, BuildError::Topology { count: 3, .. }));
    }

    #[test]
    fn test_options_builder() {
        let options = MeshOptions::new(0.5)
            .with_flow_axis(FlowAxis::Y)
            .with_connectivity_filter(false)
            .with_boundary_classification(false);
        assert_eq!(options.voxel_size, 0.5);
        assert_eq!(options.flow_axis, FlowAxis::Y);
        assert!(!options.connectivity_filter);
        assert!(!options.classify_boundaries);
    }

    #[test]
    #[should_panic(expected = "voxel size must be positive")]
    fn test_zero_voxel_size_panics() {
        MeshOptions::new(0.0);
    }
}
