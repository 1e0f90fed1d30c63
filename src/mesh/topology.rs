//! Reference hexahedron topology.
//!
//! Pure compile-time data describing a single hexahedral cell: the 8 corner
//! offsets around the cell center and the 6 quadrilateral faces as corner
//! indices. There is no runtime state here; the tables are shared by vertex
//! generation and face generation.

/// Number of corners of a hexahedron.
pub const N_HEX_CORNERS: usize = 8;

/// Number of faces of a hexahedron.
pub const N_HEX_FACES: usize = 6;

/// Number of corners per quadrilateral face.
pub const N_FACE_CORNERS: usize = 4;

/// Corner offsets from the cell center, in half-voxel units.
///
/// This is the *generation* order; cells sort their corners by (z, y, x)
/// before any face is built, and [`HEX_FACE_TABLE`] indexes into the sorted
/// layout.
pub const HEX_CORNER_OFFSETS: [[i64; 3]; N_HEX_CORNERS] = [
    [-1, -1, -1],
    [1, -1, -1],
    [1, -1, 1],
    [-1, -1, 1],
    [-1, 1, -1],
    [1, 1, -1],
    [1, 1, 1],
    [-1, 1, 1],
];

/// The 6 quadrilateral faces of a hexahedron, as local corner indices in a
/// consistent winding.
///
/// Indices refer to the (z, y, x)-sorted corner layout:
///
/// ```text
/// 0: (-,-,-)  1: (+,-,-)  2: (-,+,-)  3: (+,+,-)
/// 4: (-,-,+)  5: (+,-,+)  6: (-,+,+)  7: (+,+,+)
/// ```
pub const HEX_FACE_TABLE: [[usize; N_FACE_CORNERS]; N_HEX_FACES] = [
    [1, 3, 7, 5], // +x
    [2, 6, 7, 3], // +y
    [4, 5, 7, 6], // +z
    [0, 4, 6, 2], // -x
    [0, 1, 5, 4], // -y
    [0, 2, 3, 1], // -z
];
