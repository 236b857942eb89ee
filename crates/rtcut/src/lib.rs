#![warn(missing_docs)]

//! Plane cuts of radiotherapy structure sets.
//!
//! Facade over the rtcut crates: load a structure set, then ask what each
//! region draws on an axial, coronal, sagittal or oblique plane.
//!
//! # Example
//!
//! ```
//! use rtcut::{load_json, View};
//!
//! let set = load_json(r#"{
//!     "3006,0020": {"Name": "StructureSetROISequence", "Type": "Sequence", "Value": []},
//!     "3006,0039": {"Name": "ROIContourSequence", "Type": "Sequence", "Value": []},
//!     "3006,0080": {"Name": "RTROIObservationsSequence", "Type": "Sequence", "Value": []}
//! }"#)?;
//! assert!(set.is_empty());
//! assert!(rtcut::cut_all(&set, &View::Axial.plane(0.0)).is_empty());
//! # Ok::<(), rtcut::StructureError>(())
//! ```

pub use rtcut_math;
pub use rtcut_raster;
pub use rtcut_structure;

pub use rtcut_math::{Plane, Point2D, Point3, Segment2D, Tolerance, Vec3};
pub use rtcut_raster::{
    convert_list_of_slabs_to_segments, group_touching_rectangles, DisjointSet, RectangleSpan,
    Slab,
};
pub use rtcut_structure::{
    CutSettings, DatasetReader, GeometryKind, JsonDataset, PlanarContour, Region, RegionBuilder,
    Result, Rgb, StructureError, StructureSet,
};

use serde::{Deserialize, Serialize};

/// Standard patient-space viewing orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    /// Constant Z.
    Axial,
    /// Constant Y.
    Coronal,
    /// Constant X.
    Sagittal,
}

impl View {
    /// Cutting plane of this view at `position` mm along its normal axis.
    pub fn plane(self, position: f64) -> Plane {
        match self {
            View::Axial => Plane::axial(position),
            View::Coronal => Plane::coronal(position),
            View::Sagittal => Plane::sagittal(position),
        }
    }
}

/// Load a structure set from its JSON dataset rendering with default settings.
pub fn load_json(text: &str) -> Result<StructureSet> {
    load_json_with(text, &CutSettings::default())
}

/// Load a structure set from its JSON dataset rendering.
pub fn load_json_with(text: &str, settings: &CutSettings) -> Result<StructureSet> {
    let dataset = JsonDataset::from_json(text)?;
    StructureSet::from_dataset(&dataset, settings)
}

/// Cut every region of `set`, keeping the regions that draw something.
///
/// Returns `(region index, segments)` pairs in region order.
pub fn cut_all(set: &StructureSet, plane: &Plane) -> Vec<(usize, Vec<Segment2D>)> {
    set.regions()
        .iter()
        .enumerate()
        .filter_map(|(i, region)| region.project(plane).map(|segments| (i, segments)))
        .collect()
}
