//! Structure sets: every region of interest of an RTSTRUCT dataset.

use std::collections::BTreeSet;

use log::{error, info, warn};
use rtcut_math::{Plane, Segment2D};

use crate::contour::GeometryKind;
use crate::dataset::{parse_vector, tags, DatasetReader, FieldPath};
use crate::error::{Result, StructureError};
use crate::region::{Region, RegionBuilder, Rgb};
use crate::settings::CutSettings;

const DEFAULT_NAME: &str = "No name";
const DEFAULT_INTERPRETATION: &str = "No interpretation";

/// The finalized regions of one structure set.
#[derive(Debug, Clone, Default)]
pub struct StructureSet {
    regions: Vec<Region>,
}

impl StructureSet {
    /// Wrap already finalized regions.
    pub fn from_regions(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Load every region of a dataset and finalize it.
    ///
    /// The Structure Set ROI, ROI Contour and RT ROI Observations sequences
    /// must all be present and list the same number of regions. Contours
    /// that are not `CLOSED_PLANAR` are skipped.
    pub fn from_dataset<R: DatasetReader + ?Sized>(
        reader: &R,
        settings: &CutSettings,
    ) -> Result<Self> {
        settings.validate()?;

        let sequence_len = |tag| -> Result<usize> {
            let path = FieldPath::new(tag);
            reader
                .sequence_size(&path)?
                .ok_or_else(|| StructureError::MissingField(path.to_string()))
        };
        let observations = sequence_len(tags::RT_ROI_OBSERVATIONS_SEQUENCE)?;
        let roi_contours = sequence_len(tags::ROI_CONTOUR_SEQUENCE)?;
        let structure_set_rois = sequence_len(tags::STRUCTURE_SET_ROI_SEQUENCE)?;
        if roi_contours != observations || structure_set_rois != observations {
            return Err(StructureError::SequenceMismatch {
                structure_set_rois,
                roi_contours,
                observations,
            });
        }

        let regions = (0..observations)
            .map(|i| read_region(reader, i)?.compute_dependent_properties(settings))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { regions })
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the set holds no region.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// All regions, in dataset order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region at `index`.
    pub fn region(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// First region called `name`.
    pub fn region_by_name(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name() == name)
    }

    /// Cut region `index` with a plane. See [`Region::project`].
    pub fn project_region(&self, index: usize, plane: &Plane) -> Option<Vec<Segment2D>> {
        self.regions.get(index)?.project(plane)
    }

    /// SOP Instance UIDs of every image slice a contour refers to.
    pub fn referenced_instances(&self) -> BTreeSet<String> {
        self.regions
            .iter()
            .flat_map(|r| r.contours())
            .map(|c| c.slice_ref().trim().to_string())
            .filter(|uid| !uid.is_empty())
            .collect()
    }
}

/// Clamp a color component to a byte, truncating the fraction.
fn clip_to_byte(v: f64) -> u8 {
    if v < 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

fn read_color<R: DatasetReader + ?Sized>(reader: &R, path: &FieldPath) -> Rgb {
    match reader.f64_vector(path) {
        Ok(Some(c)) if c.len() == 3 => {
            Rgb::new(clip_to_byte(c[0]), clip_to_byte(c[1]), clip_to_byte(c[2]))
        }
        _ => Rgb::RED,
    }
}

fn read_region<R: DatasetReader + ?Sized>(reader: &R, i: usize) -> Result<RegionBuilder> {
    let interpretation = reader.string_or(
        &FieldPath::new(tags::RT_ROI_OBSERVATIONS_SEQUENCE).item(i, tags::RT_ROI_INTERPRETED_TYPE),
        DEFAULT_INTERPRETATION,
    )?;
    let name = reader.string_or(
        &FieldPath::new(tags::STRUCTURE_SET_ROI_SEQUENCE).item(i, tags::ROI_NAME),
        DEFAULT_NAME,
    )?;
    let roi = FieldPath::new(tags::ROI_CONTOUR_SEQUENCE);
    let color = read_color(reader, &roi.clone().item(i, tags::ROI_DISPLAY_COLOR));

    let contours = roi.item(i, tags::CONTOUR_SEQUENCE);
    let count = match reader.sequence_size(&contours)? {
        Some(count) => count,
        None => {
            warn!("structure \"{name}\" has no contour sequence");
            0
        }
    };
    info!(
        "new RT structure \"{name}\" ({interpretation}) with {count} contours, color {},{},{}",
        color.r, color.g, color.b
    );

    let mut builder = RegionBuilder::new(name, color, interpretation);
    for j in 0..count {
        let field = |tag| contours.clone().item(j, tag);

        let count_path = field(tags::NUMBER_OF_CONTOUR_POINTS);
        let point_count = reader
            .unsigned(&count_path)?
            .ok_or_else(|| StructureError::MissingField(count_path.to_string()))?;

        let kind_name = reader.mandatory_string(&field(tags::CONTOUR_GEOMETRIC_TYPE))?;
        let kind = match kind_name.parse::<GeometryKind>() {
            Ok(kind) => kind,
            Err(_) => {
                warn!("ignoring contour with geometry type {kind_name}");
                continue;
            }
        };

        let images = field(tags::CONTOUR_IMAGE_SEQUENCE);
        if reader.sequence_size(&images)? != Some(1) {
            return Err(StructureError::BadField {
                path: images.to_string(),
                message: "must be present and contain exactly one item".into(),
            });
        }
        let uid_path = images.item(0, tags::REFERENCED_SOP_INSTANCE_UID);
        let sop_instance_uid = reader.mandatory_string(&uid_path)?;

        let data_path = field(tags::CONTOUR_DATA);
        let data = reader.mandatory_string(&data_path)?;
        let points = parse_vector(&data).map_err(|message| StructureError::BadField {
            path: data_path.to_string(),
            message,
        })?;
        if points.len() != 3 * point_count as usize {
            return Err(StructureError::BadField {
                path: data_path.to_string(),
                message: format!("{} values for {} points", points.len(), point_count),
            });
        }

        if sop_instance_uid.trim().is_empty() {
            // seen in real data; the contour is still usable
            error!("empty Referenced SOP Instance UID at {uid_path}");
        }

        builder.add_contour(&points, kind, sop_instance_uid)?;
    }
    Ok(builder)
}
