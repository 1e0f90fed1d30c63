//! Strongly-typed domain types for safer APIs.
//!
//! This module provides newtypes and small enums to make APIs
//! self-documenting and prevent parameter mix-ups.
//!
//! # Design Philosophy
//!
//! - **Named fields over positional**: `GridDims { nx, ny, nz }` instead of
//!   three bare `usize` arguments
//! - **Enums over magic integers**: `FlowAxis::X` instead of `0`,
//!   `CellRegion::InletBuffer` instead of `1`
//! - **Zero-cost abstractions**: everything here is `Copy` and compiles away
//!
//! # Example
//!
//! ```
//! use hexmesh_rs::types::{FlowAxis, GridDims};
//!
//! let dims = GridDims::new(64, 32, 32);
//! assert_eq!(dims.total(), 65_536);
//!
//! let axis = FlowAxis::X;
//! assert_eq!(axis.index(), 0);
//! assert_eq!(axis.secondary(), FlowAxis::Y);
//! ```

mod axis;
mod dims;
mod region;

pub use axis::{FlowAxis, ParseAxisError};
pub use dims::GridDims;
pub use region::CellRegion;
