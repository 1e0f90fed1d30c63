//! Spatial classification of boundary faces into named patches.
//!
//! Boundary faces are matched against six half-voxel-thick slab regions,
//! one per side of the mesh bounding box, in a fixed priority order. The
//! two slabs on the primary flow axis are named "inlet" (low side) and
//! "outlet" (high side); the remaining four keep positional names. Faces
//! matching no slab (interior cavities, concave pockets) fall into a
//! residual "walls" patch.
//!
//! The priority order and the per-patch (owner, face-key) sort are
//! load-bearing for determinism; the final face numbering is consumed by
//! external writers and must reproduce bit-for-bit.

use crate::geometry::Point3;
use crate::types::FlowAxis;

use super::builder::canonical_face_key;
use super::hex_mesh::BoundaryPatch;
use super::report::{BuildEvent, BuildReport};

/// Positional patch names, in slab priority order: low-x, high-x, low-y,
/// high-y, low-z, high-z.
const SLAB_NAMES: [&str; 6] = ["left_x", "right_x", "front_y", "back_y", "bottom_z", "top_z"];

/// Axis-aligned bounding box.
struct Aabb {
    min: [f64; 3],
    max: [f64; 3],
}

impl Aabb {
    fn of_points(points: &[Point3]) -> Self {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in points {
            for axis in 0..3 {
                let c = p.along(axis);
                if c < min[axis] {
                    min[axis] = c;
                }
                if c > max[axis] {
                    max[axis] = c;
                }
            }
        }
        Self { min, max }
    }

    /// A slab hugging one side of this box: the given axis is pinned to
    /// `bound +/- margin`, the other two axes span the full extent plus the
    /// same margin.
    fn slab(&self, axis: usize, high: bool, margin: f64) -> Aabb {
        let mut min = [
            self.min[0] - margin,
            self.min[1] - margin,
            self.min[2] - margin,
        ];
        let mut max = [
            self.max[0] + margin,
            self.max[1] + margin,
            self.max[2] + margin,
        ];
        let bound = if high { self.max[axis] } else { self.min[axis] };
        min[axis] = bound - margin;
        max[axis] = bound + margin;
        Aabb { min, max }
    }

    fn contains(&self, p: &Point3) -> bool {
        (0..3).all(|axis| {
            let c = p.along(axis);
            c >= self.min[axis] && c <= self.max[axis]
        })
    }
}

/// Stage 5: assign every boundary face to a named patch and rebuild the
/// face/owner arrays as internal faces followed by each patch's faces in
/// the fixed patch order. Empty patches are omitted from the table.
#[allow(clippy::too_many_arguments)]
pub(crate) fn classify_boundary_patches(
    points: &[Point3],
    faces: Vec<[usize; 4]>,
    owner: Vec<usize>,
    neighbour: Vec<usize>,
    n_internal: usize,
    flow_axis: FlowAxis,
    voxel_size: f64,
    report: &mut BuildReport,
) -> (Vec<[usize; 4]>, Vec<usize>, Vec<usize>, Vec<BoundaryPatch>) {
    if faces.is_empty() {
        return (faces, owner, neighbour, Vec::new());
    }

    let bounds = Aabb::of_points(points);
    let half = voxel_size / 2.0;

    let mut names = SLAB_NAMES;
    names[2 * flow_axis.index()] = "inlet";
    names[2 * flow_axis.index() + 1] = "outlet";

    let slabs: Vec<Aabb> = (0..6usize)
        .map(|i| bounds.slab(i / 2, i % 2 == 1, half))
        .collect();

    let face_in_slab = |face_idx: usize, slab: &Aabb| -> bool {
        faces[face_idx].iter().all(|&v| slab.contains(&points[v]))
    };

    // First matching slab wins; matched faces drop out of consideration.
    let mut remaining: Vec<usize> = (n_internal..faces.len()).collect();
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::with_capacity(7);
    for (&name, slab) in names.iter().zip(&slabs) {
        let (matched, rest): (Vec<usize>, Vec<usize>) = remaining
            .into_iter()
            .partition(|&face_idx| face_in_slab(face_idx, slab));
        groups.push((name, matched));
        remaining = rest;
    }
    groups.push(("walls", remaining));

    // Within each patch: ascending owner, canonical key as the tie-break
    // for cells owning several faces in the same patch.
    for (_, group) in &mut groups {
        group.sort_unstable_by_key(|&face_idx| {
            (owner[face_idx], canonical_face_key(&faces[face_idx]))
        });
    }

    let mut new_faces = Vec::with_capacity(faces.len());
    let mut new_owner = Vec::with_capacity(owner.len());
    new_faces.extend_from_slice(&faces[..n_internal]);
    new_owner.extend_from_slice(&owner[..n_internal]);

    let mut patches = Vec::new();
    for (name, group) in groups {
        if group.is_empty() {
            continue;
        }
        let start_face = new_faces.len();
        for &face_idx in &group {
            new_faces.push(faces[face_idx]);
            new_owner.push(owner[face_idx]);
        }
        report.push(BuildEvent::PatchClassified {
            name: name.to_string(),
            start_face,
            n_faces: group.len(),
        });
        patches.push(BoundaryPatch {
            name: name.to_string(),
            start_face,
            n_faces: group.len(),
        });
    }

    (new_faces, new_owner, neighbour, patches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_of_points() {
        let points = [
            Point3::new(0.0, 1.0, 2.0),
            Point3::new(-1.0, 3.0, 0.5),
            Point3::new(2.0, 0.0, 1.0),
        ];
        let bounds = Aabb::of_points(&points);
        assert_eq!(bounds.min, [-1.0, 0.0, 0.5]);
        assert_eq!(bounds.max, [2.0, 3.0, 2.0]);
    }

    #[test]
    fn test_slab_pins_one_axis() {
        let bounds = Aabb {
            min: [0.0, 0.0, 0.0],
            max: [4.0, 2.0, 2.0],
        };
        let slab = bounds.slab(0, false, 0.5);
        assert_eq!(slab.min, [-0.5, -0.5, -0.5]);
        assert_eq!(slab.max, [0.5, 2.5, 2.5]);

        let slab = bounds.slab(2, true, 0.5);
        assert_eq!(slab.min, [-0.5, -0.5, 1.5]);
        assert_eq!(slab.max, [4.5, 2.5, 2.5]);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let slab = Aabb {
            min: [0.0, 0.0, 0.0],
            max: [1.0, 1.0, 1.0],
        };
        assert!(slab.contains(&Point3::new(0.0, 1.0, 0.5)));
        assert!(!slab.contains(&Point3::new(1.5, 0.5, 0.5)));
    }
}
