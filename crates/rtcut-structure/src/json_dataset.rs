//! [`DatasetReader`] over the JSON rendering of a DICOM dataset.
//!
//! Each object maps `"gggg,eeee"` keys to entries of the form
//! `{"Name": .., "Type": "String" | "Sequence", "Value": ..}`; a sequence's
//! value is an array of such objects.

use serde_json::Value;

use crate::dataset::{DatasetReader, DicomTag, FieldPath};
use crate::error::{Result, StructureError};

/// A dataset held as a `serde_json` document.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDataset {
    root: Value,
}

impl JsonDataset {
    /// Wrap an already-parsed document. The root must be an object.
    pub fn from_value(root: Value) -> Result<Self> {
        if !root.is_object() {
            return Err(bad_format("(root)", "dataset root is not an object"));
        }
        Ok(Self { root })
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// The underlying document.
    pub fn root(&self) -> &Value {
        &self.root
    }

    fn lookup(&self, path: &FieldPath) -> Result<Option<&Value>> {
        let mut content = &self.root;
        for &(tag, index) in path.prefix() {
            let Some(entry) = access_tag(content, tag, path)? else {
                return Ok(None);
            };
            let items = sequence_items(entry, path)?;
            match items.get(index) {
                Some(item) => content = item,
                None => return Ok(None),
            }
        }
        access_tag(content, path.tag(), path)
    }
}

fn bad_format(path: impl ToString, message: &str) -> StructureError {
    StructureError::BadField {
        path: path.to_string(),
        message: message.to_string(),
    }
}

fn access_tag<'a>(content: &'a Value, tag: DicomTag, path: &FieldPath) -> Result<Option<&'a Value>> {
    let object = content
        .as_object()
        .ok_or_else(|| bad_format(path, "sequence item is not an object"))?;
    let Some(entry) = object.get(&tag.to_string()) else {
        return Ok(None);
    };
    let well_formed = entry.get("Name").is_some_and(Value::is_string)
        && entry.get("Type").is_some_and(Value::is_string)
        && entry.get("Value").is_some();
    if !well_formed {
        return Err(bad_format(path, "entry lacks Name, Type or Value"));
    }
    Ok(Some(entry))
}

fn sequence_items<'a>(entry: &'a Value, path: &FieldPath) -> Result<&'a Vec<Value>> {
    match (entry["Type"].as_str(), entry["Value"].as_array()) {
        (Some("Sequence"), Some(items)) => Ok(items),
        _ => Err(bad_format(path, "expected a sequence")),
    }
}

impl DatasetReader for JsonDataset {
    fn string_value(&self, path: &FieldPath) -> Result<Option<String>> {
        let Some(entry) = self.lookup(path)? else {
            return Ok(None);
        };
        match (entry["Type"].as_str(), entry["Value"].as_str()) {
            (Some("String"), Some(value)) => Ok(Some(value.to_string())),
            _ => Err(bad_format(path, "expected a string")),
        }
    }

    fn sequence_size(&self, path: &FieldPath) -> Result<Option<usize>> {
        match self.lookup(path)? {
            Some(entry) => Ok(Some(sequence_items(entry, path)?.len())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tags;
    use serde_json::json;

    fn sample() -> JsonDataset {
        JsonDataset::from_value(json!({
            "3006,0020": {
                "Name": "StructureSetROISequence",
                "Type": "Sequence",
                "Value": [
                    { "3006,0026": { "Name": "ROIName", "Type": "String", "Value": "Body" } },
                    { "3006,0026": { "Name": "ROIName", "Type": "Null", "Value": null } }
                ]
            },
            "0008,0060": { "Name": "Modality", "Type": "String", "Value": "RTSTRUCT" },
            "0010,0010": { "Name": "PatientName" }
        }))
        .unwrap()
    }

    #[test]
    fn test_top_level_string() {
        let ds = sample();
        let modality = FieldPath::new(DicomTag::new(0x0008, 0x0060));
        assert_eq!(ds.string_value(&modality).unwrap().as_deref(), Some("RTSTRUCT"));
        let absent = FieldPath::new(DicomTag::new(0x0020, 0x000d));
        assert_eq!(ds.string_value(&absent).unwrap(), None);
    }

    #[test]
    fn test_nested_lookup() {
        let ds = sample();
        let seq = FieldPath::new(tags::STRUCTURE_SET_ROI_SEQUENCE);
        assert_eq!(ds.sequence_size(&seq).unwrap(), Some(2));

        let name = seq.clone().item(0, tags::ROI_NAME);
        assert_eq!(ds.string_value(&name).unwrap().as_deref(), Some("Body"));

        // past the end of the sequence reads as absent
        let beyond = seq.clone().item(5, tags::ROI_NAME);
        assert_eq!(ds.string_value(&beyond).unwrap(), None);

        // missing sequence reads as absent too
        let other = FieldPath::new(tags::ROI_CONTOUR_SEQUENCE).item(0, tags::CONTOUR_SEQUENCE);
        assert_eq!(ds.sequence_size(&other).unwrap(), None);
    }

    #[test]
    fn test_shape_errors() {
        let ds = sample();
        let null_name = FieldPath::new(tags::STRUCTURE_SET_ROI_SEQUENCE).item(1, tags::ROI_NAME);
        assert!(matches!(
            ds.string_value(&null_name),
            Err(StructureError::BadField { .. })
        ));

        let not_a_sequence = FieldPath::new(DicomTag::new(0x0008, 0x0060));
        assert!(ds.sequence_size(&not_a_sequence).is_err());

        let incomplete = FieldPath::new(DicomTag::new(0x0010, 0x0010));
        assert!(ds.string_value(&incomplete).is_err());
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(JsonDataset::from_json("[1, 2]").is_err());
        assert!(matches!(
            JsonDataset::from_json("{not json"),
            Err(StructureError::Json(_))
        ));
        assert!(JsonDataset::from_json("{}").is_ok());
    }
}
