#![warn(missing_docs)]

//! Radiotherapy structure sets for rtcut.
//!
//! A structure set is a list of regions of interest, each a stack of closed
//! planar contours drawn on image slices. This crate loads them from a
//! parsed dataset and cuts them with arbitrary planes.
//!
//! # Example
//!
//! ```
//! use rtcut_math::Plane;
//! use rtcut_structure::{CutSettings, GeometryKind, RegionBuilder, Rgb};
//!
//! let mut builder = RegionBuilder::new("Bladder", Rgb::new(0, 255, 255), "ORGAN");
//! for z in [0.0, 2.5, 5.0] {
//!     let square = [0.0, 0.0, z, 10.0, 0.0, z, 10.0, 10.0, z, 0.0, 10.0, z];
//!     builder.add_contour(&square, GeometryKind::ClosedPlanar, "1.2.840.1")?;
//! }
//! let region = builder.compute_dependent_properties(&CutSettings::default())?;
//!
//! let axial = region.project(&Plane::axial(2.5)).unwrap();
//! assert_eq!(axial.len(), 4);
//! let coronal = region.project(&Plane::coronal(5.0)).unwrap();
//! assert_eq!(coronal.len(), 3);
//! # Ok::<(), rtcut_structure::StructureError>(())
//! ```

pub mod contour;
pub mod dataset;
pub mod error;
pub mod json_dataset;
pub mod region;
pub mod settings;
pub mod structure_set;

pub use contour::{GeometryKind, PlanarContour};
pub use dataset::{DatasetReader, DicomTag, FieldPath};
pub use error::{Result, StructureError};
pub use json_dataset::JsonDataset;
pub use region::{Region, RegionBuilder, Rgb};
pub use settings::CutSettings;
pub use structure_set::StructureSet;
