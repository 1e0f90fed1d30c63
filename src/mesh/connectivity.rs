//! 6-connected component search over mesh cells.
//!
//! Two cells are neighbors when their grid coordinates differ by exactly one
//! unit along exactly one axis. The search finds the largest connected
//! component so the builder can discard isolated pockets of fluid that would
//! otherwise produce a disconnected mesh.
//!
//! Determinism: components are seeded in ascending identity order and the
//! first-found maximum wins ties, so the kept set depends only on the input
//! ordering, never on hash-map iteration order.

use std::collections::VecDeque;

use ahash::AHashMap;

use super::cell::Cell;

/// Neighbor offsets for 6-connectivity.
const NEIGHBOR_OFFSETS: [[i64; 3]; 6] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];

/// Find the largest 6-connected component of the cell vector.
///
/// Returns the identities (positions in `cells`) of the kept component,
/// sorted ascending. When several components tie for the largest size, the
/// one containing the smallest identity wins. An empty input yields an
/// empty result.
///
/// # Example
///
/// ```
/// use hexmesh_rs::mesh::{Cell, find_largest_component};
///
/// // A row of voxels with a gap: {0} and {1, 2, 3} as components.
/// let cells = vec![
///     Cell::new(0, 0, 0),
///     Cell::new(2, 0, 0),
///     Cell::new(3, 0, 0),
///     Cell::new(4, 0, 0),
/// ];
/// assert_eq!(find_largest_component(&cells), vec![1, 2, 3]);
/// ```
pub fn find_largest_component(cells: &[Cell]) -> Vec<usize> {
    if cells.is_empty() {
        return Vec::new();
    }

    let mut coord_to_id: AHashMap<[usize; 3], usize> = AHashMap::with_capacity(cells.len());
    for (id, cell) in cells.iter().enumerate() {
        coord_to_id.insert(cell.coord, id);
    }

    let mut visited = vec![false; cells.len()];
    let mut largest: Vec<usize> = Vec::new();
    let mut queue: VecDeque<usize> = VecDeque::new();

    for start in 0..cells.len() {
        if visited[start] {
            continue;
        }

        let mut component = Vec::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            component.push(current);
            let coord = cells[current].coord;
            for offset in &NEIGHBOR_OFFSETS {
                let nx = coord[0] as i64 + offset[0];
                let ny = coord[1] as i64 + offset[1];
                let nz = coord[2] as i64 + offset[2];
                if nx < 0 || ny < 0 || nz < 0 {
                    continue;
                }
                if let Some(&neighbor) = coord_to_id.get(&[nx as usize, ny as usize, nz as usize])
                {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        // Strictly-greater keeps the first-found maximum on ties.
        if component.len() > largest.len() {
            largest = component;
        }
    }

    largest.sort_unstable();
    largest
}

/// Keep only the cells named in `keep`, reassigning dense identities.
///
/// `keep` must be sorted ascending (as returned by
/// [`find_largest_component`]); the filtered vector preserves the original
/// relative order, so the new identity of a kept cell is its rank within
/// `keep`.
pub fn filter_cells(cells: &[Cell], keep: &[usize]) -> Vec<Cell> {
    keep.iter().map(|&id| cells[id]).collect()
}
