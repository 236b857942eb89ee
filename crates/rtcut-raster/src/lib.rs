#![warn(missing_docs)]

//! Rectilinear rasters for rtcut.
//!
//! A region cut perpendicular to its slices shows up as a stack of rows, one
//! per slice, each holding x-sorted rectangle spans. This crate turns such a
//! stack into the segments of its outline and groups its spans into
//! connected islands.
//!
//! # Example
//!
//! ```
//! use rtcut_raster::{slabs_to_segments, RectangleSpan};
//!
//! let slabs = vec![
//!     vec![RectangleSpan::new(0.0, 4.0, 0.0, 1.0)],
//!     vec![RectangleSpan::new(2.0, 6.0, 1.0, 2.0)],
//! ];
//! let outline = slabs_to_segments(&slabs);
//! assert_eq!(outline.len(), 8);
//! ```

mod disjoint_set;
mod outline;
mod partition;
mod slab;

pub use disjoint_set::DisjointSet;
pub use outline::{
    add_slab_boundaries, convert_list_of_slabs_to_segments, process_boundary_list,
    slabs_to_segments,
};
pub use partition::{group_touching_rectangles, SpanIndex};
pub use slab::{slab_y_range, BoundaryEvent, RectangleBoundaryKind, RectangleSpan, Slab};
