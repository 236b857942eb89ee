//! Error types for structure sets.

use thiserror::Error;

/// Errors raised while building or loading a structure set.
#[derive(Error, Debug)]
pub enum StructureError {
    /// Contour has too few points or no area.
    #[error("degenerate contour with {points} points")]
    DegenerateContour {
        /// Number of points in the rejected contour.
        points: usize,
    },

    /// Flat coordinate list is not a list of triples.
    #[error("coordinate list of length {0} is not a multiple of 3")]
    MalformedPoints(usize),

    /// Contour geometry kind other than closed planar.
    #[error("unsupported contour geometry: {0}")]
    UnsupportedGeometry(String),

    /// A mandatory dataset field is absent.
    #[error("missing field: {0}")]
    MissingField(String),

    /// A dataset field exists but cannot be decoded.
    #[error("bad field {path}: {message}")]
    BadField {
        /// Location of the field.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// The per-ROI sequences do not describe the same number of regions.
    #[error(
        "ROI sequences disagree: {structure_set_rois} structure set ROIs, \
         {roi_contours} ROI contours, {observations} observations"
    )]
    SequenceMismatch {
        /// Entries in Structure Set ROI Sequence.
        structure_set_rois: usize,
        /// Entries in ROI Contour Sequence.
        roi_contours: usize,
        /// Entries in RT ROI Observations Sequence.
        observations: usize,
    },

    /// Cut shape the requested query cannot express.
    #[error("unsupported cutting plane: {0}")]
    UnsupportedPlane(String),

    /// Invalid cut settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// JSON dataset could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for structure set operations.
pub type Result<T> = std::result::Result<T, StructureError>;
