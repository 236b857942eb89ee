//! Typed field access to a parsed DICOM dataset.
//!
//! The loader never sees the wire format. It walks the dataset through
//! [`DatasetReader`], addressing every field with a [`FieldPath`]: zero or
//! more `(sequence tag, item index)` steps followed by the tag of the field
//! itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StructureError};

/// A DICOM attribute tag `(group, element)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DicomTag {
    /// Group number.
    pub group: u16,
    /// Element number.
    pub element: u16,
}

impl DicomTag {
    /// Create a tag.
    pub const fn new(group: u16, element: u16) -> Self {
        Self { group, element }
    }
}

impl fmt::Display for DicomTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x},{:04x}", self.group, self.element)
    }
}

/// Tags read by the structure set loader.
pub mod tags {
    use super::DicomTag;

    /// Referenced SOP Instance UID.
    pub const REFERENCED_SOP_INSTANCE_UID: DicomTag = DicomTag::new(0x0008, 0x1155);
    /// Contour Image Sequence.
    pub const CONTOUR_IMAGE_SEQUENCE: DicomTag = DicomTag::new(0x3006, 0x0016);
    /// Structure Set ROI Sequence.
    pub const STRUCTURE_SET_ROI_SEQUENCE: DicomTag = DicomTag::new(0x3006, 0x0020);
    /// ROI Name.
    pub const ROI_NAME: DicomTag = DicomTag::new(0x3006, 0x0026);
    /// ROI Display Color.
    pub const ROI_DISPLAY_COLOR: DicomTag = DicomTag::new(0x3006, 0x002a);
    /// ROI Contour Sequence.
    pub const ROI_CONTOUR_SEQUENCE: DicomTag = DicomTag::new(0x3006, 0x0039);
    /// Contour Sequence.
    pub const CONTOUR_SEQUENCE: DicomTag = DicomTag::new(0x3006, 0x0040);
    /// Contour Geometric Type.
    pub const CONTOUR_GEOMETRIC_TYPE: DicomTag = DicomTag::new(0x3006, 0x0042);
    /// Number of Contour Points.
    pub const NUMBER_OF_CONTOUR_POINTS: DicomTag = DicomTag::new(0x3006, 0x0046);
    /// Contour Data.
    pub const CONTOUR_DATA: DicomTag = DicomTag::new(0x3006, 0x0050);
    /// RT ROI Observations Sequence.
    pub const RT_ROI_OBSERVATIONS_SEQUENCE: DicomTag = DicomTag::new(0x3006, 0x0080);
    /// RT ROI Interpreted Type.
    pub const RT_ROI_INTERPRETED_TYPE: DicomTag = DicomTag::new(0x3006, 0x00a4);
}

/// Location of a field, possibly nested inside sequence items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    prefix: Vec<(DicomTag, usize)>,
    tag: DicomTag,
}

impl FieldPath {
    /// A top-level field.
    pub fn new(tag: DicomTag) -> Self {
        Self {
            prefix: Vec::new(),
            tag,
        }
    }

    /// The field `tag` inside item `index` of the sequence this path points to.
    ///
    /// ```
    /// use rtcut_structure::dataset::{tags, FieldPath};
    ///
    /// let path = FieldPath::new(tags::ROI_CONTOUR_SEQUENCE)
    ///     .item(2, tags::CONTOUR_SEQUENCE)
    ///     .item(0, tags::CONTOUR_DATA);
    /// assert_eq!(path.to_string(), "(3006,0039)[2] / (3006,0040)[0] / (3006,0050)");
    /// ```
    pub fn item(mut self, index: usize, tag: DicomTag) -> Self {
        self.prefix.push((self.tag, index));
        self.tag = tag;
        self
    }

    /// The `(sequence, index)` steps leading to the field.
    pub fn prefix(&self) -> &[(DicomTag, usize)] {
        &self.prefix
    }

    /// Tag of the field itself.
    pub fn tag(&self) -> DicomTag {
        self.tag
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tag, index) in &self.prefix {
            write!(f, "({tag})[{index}] / ")?;
        }
        write!(f, "({})", self.tag)
    }
}

/// Read access to a parsed dataset.
///
/// Implementors answer `Ok(None)` when a field (or any sequence item on the
/// way to it) is absent, and an error when something is present but has the
/// wrong shape.
pub trait DatasetReader {
    /// String value of a field.
    fn string_value(&self, path: &FieldPath) -> Result<Option<String>>;

    /// Number of items in a sequence.
    fn sequence_size(&self, path: &FieldPath) -> Result<Option<usize>>;

    /// String value of a field that must be present.
    fn mandatory_string(&self, path: &FieldPath) -> Result<String> {
        self.string_value(path)?
            .ok_or_else(|| StructureError::MissingField(path.to_string()))
    }

    /// String value of a field, or `default` when it is absent.
    fn string_or(&self, path: &FieldPath, default: &str) -> Result<String> {
        Ok(self
            .string_value(path)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Non-negative integer value of a field.
    fn unsigned(&self, path: &FieldPath) -> Result<Option<u32>> {
        let Some(raw) = self.string_value(path)? else {
            return Ok(None);
        };
        let value: i64 = raw.trim().parse().map_err(|_| StructureError::BadField {
            path: path.to_string(),
            message: format!("{raw:?} is not an integer"),
        })?;
        u32::try_from(value)
            .map(Some)
            .map_err(|_| StructureError::BadField {
                path: path.to_string(),
                message: format!("{value} is out of range"),
            })
    }

    /// Backslash-separated list of numbers.
    fn f64_vector(&self, path: &FieldPath) -> Result<Option<Vec<f64>>> {
        let Some(raw) = self.string_value(path)? else {
            return Ok(None);
        };
        parse_vector(&raw)
            .map(Some)
            .map_err(|message| StructureError::BadField {
                path: path.to_string(),
                message,
            })
    }
}

/// Parse a DICOM multi-valued decimal string (`"1.5\\-2\\3e1"`).
///
/// Whitespace around each value is ignored. An empty or blank string is an
/// empty list.
pub fn parse_vector(raw: &str) -> std::result::Result<Vec<f64>, String> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split('\\')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f64>()
                .map_err(|_| format!("{token:?} is not a number"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Flat map keyed by the rendered path.
    struct MapDataset(HashMap<String, String>);

    impl DatasetReader for MapDataset {
        fn string_value(&self, path: &FieldPath) -> Result<Option<String>> {
            Ok(self.0.get(&path.to_string()).cloned())
        }

        fn sequence_size(&self, _path: &FieldPath) -> Result<Option<usize>> {
            Ok(None)
        }
    }

    fn dataset(entries: &[(FieldPath, &str)]) -> MapDataset {
        MapDataset(
            entries
                .iter()
                .map(|(p, v)| (p.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(tags::ROI_DISPLAY_COLOR.to_string(), "3006,002a");
        assert_eq!(tags::REFERENCED_SOP_INSTANCE_UID.to_string(), "0008,1155");
    }

    #[test]
    fn test_path_building() {
        let path = FieldPath::new(tags::STRUCTURE_SET_ROI_SEQUENCE).item(3, tags::ROI_NAME);
        assert_eq!(path.prefix(), &[(tags::STRUCTURE_SET_ROI_SEQUENCE, 3)]);
        assert_eq!(path.tag(), tags::ROI_NAME);
        assert_eq!(path.to_string(), "(3006,0020)[3] / (3006,0026)");
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("1\\2.5\\-3e1").unwrap(), vec![1.0, 2.5, -30.0]);
        assert_eq!(parse_vector(" 4 \\ 5 ").unwrap(), vec![4.0, 5.0]);
        assert!(parse_vector("").unwrap().is_empty());
        assert!(parse_vector("1\\\\2").is_err());
        assert!(parse_vector("1\\abc").is_err());
    }

    #[test]
    fn test_reader_helpers() {
        let name = FieldPath::new(tags::ROI_NAME);
        let count = FieldPath::new(tags::NUMBER_OF_CONTOUR_POINTS);
        let color = FieldPath::new(tags::ROI_DISPLAY_COLOR);
        let ds = dataset(&[
            (name.clone(), "PTV"),
            (count.clone(), " 12 "),
            (color.clone(), "255\\128\\0"),
        ]);

        assert_eq!(ds.mandatory_string(&name).unwrap(), "PTV");
        assert_eq!(ds.unsigned(&count).unwrap(), Some(12));
        assert_eq!(ds.f64_vector(&color).unwrap(), Some(vec![255.0, 128.0, 0.0]));

        let absent = FieldPath::new(tags::RT_ROI_INTERPRETED_TYPE);
        assert_eq!(ds.string_or(&absent, "No interpretation").unwrap(), "No interpretation");
        assert_eq!(ds.unsigned(&absent).unwrap(), None);
        assert!(matches!(
            ds.mandatory_string(&absent),
            Err(StructureError::MissingField(p)) if p == "(3006,00a4)"
        ));
    }

    #[test]
    fn test_unsigned_rejects_bad_values() {
        let count = FieldPath::new(tags::NUMBER_OF_CONTOUR_POINTS);
        let negative = dataset(&[(count.clone(), "-4")]);
        assert!(matches!(
            negative.unsigned(&count),
            Err(StructureError::BadField { .. })
        ));
        let text = dataset(&[(count.clone(), "four")]);
        assert!(text.unsigned(&count).is_err());
    }
}
