//! Integration tests for connectivity filtering inside the build pipeline.
//!
//! These tests verify:
//! - The largest 6-connected component survives filtering
//! - Kept cells are reindexed to a contiguous range with coordinates intact
//! - Disabled filtering keeps disconnected pockets

use hexmesh_rs::{MeshBuilder, MeshOptions, VoxelGrid};

/// 5x1x1 row with occupancy [1, 0, 1, 1, 1].
fn gapped_row() -> VoxelGrid {
    VoxelGrid::new(vec![1, 0, 1, 1, 1], 5, 1, 1).unwrap()
}

#[test]
fn test_builder_keeps_largest_component() {
    let mesh = MeshBuilder::new(&gapped_row(), MeshOptions::default())
        .build()
        .unwrap();

    // The isolated voxel at x = 0 is dropped; x = 2, 3, 4 survive.
    assert_eq!(mesh.n_cells, 3);
    for (id, cell) in mesh.cells.iter().enumerate() {
        assert_eq!(cell.coord, [id + 2, 0, 0]);
    }
}

#[test]
fn test_filtered_mesh_topology() {
    let mesh = MeshBuilder::new(&gapped_row(), MeshOptions::default())
        .build()
        .unwrap();

    // A row of 3 cells: 2 internal faces, 14 boundary faces.
    assert_eq!(mesh.n_internal_faces, 2);
    assert_eq!(mesh.n_boundary_faces(), 14);
    assert_eq!(mesh.neighbour, vec![1, 2]);
    for i in 0..mesh.n_internal_faces {
        assert!(mesh.owner[i] < mesh.neighbour[i]);
    }
}

#[test]
fn test_filter_disabled_keeps_all_cells() {
    let options = MeshOptions::new(1.0).with_connectivity_filter(false);
    let mesh = MeshBuilder::new(&gapped_row(), options).build().unwrap();

    assert_eq!(mesh.n_cells, 4);
    assert_eq!(mesh.cells[0].coord, [0, 0, 0]);
    // The isolated cell contributes 6 boundary faces of its own.
    assert_eq!(mesh.n_internal_faces, 2);
    assert_eq!(mesh.n_boundary_faces(), 20);
}

#[test]
fn test_two_components_in_three_dimensions() {
    // An isolated corner voxel vs. an L of three voxels.
    let mut data = vec![0u8; 27];
    data[0] = 1; // (0, 0, 0)
    data[2 + 3 * (2 + 3 * 2)] = 1; // (2, 2, 2)
    data[2 + 3 * (1 + 3 * 2)] = 1; // (2, 1, 2)
    data[2 + 3 * (2 + 3 * 1)] = 1; // (2, 2, 1)
    let grid = VoxelGrid::new(data, 3, 3, 3).unwrap();

    let mesh = MeshBuilder::new(&grid, MeshOptions::default())
        .build()
        .unwrap();
    assert_eq!(mesh.n_cells, 3);
    assert!(mesh.cells.iter().all(|c| c.coord[0] == 2));
}

#[test]
fn test_all_solid_grid_yields_empty_mesh() {
    let mesh = MeshBuilder::new(&VoxelGrid::empty(2, 2, 2), MeshOptions::default())
        .build()
        .unwrap();
    assert_eq!(mesh.n_cells, 0);
    assert_eq!(mesh.n_faces(), 0);
}
