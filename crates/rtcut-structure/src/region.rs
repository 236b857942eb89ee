//! Regions of interest: named stacks of planar contours.
//!
//! A region is assembled with a [`RegionBuilder`] and becomes a queryable
//! [`Region`] once its dependent properties (normal, slice spacing, bounds)
//! have been computed.

use log::{debug, warn};
use rtcut_math::{Aabb3, Plane, Point2D, Point3, Segment2D, Tolerance, Vec3};
use rtcut_raster::{convert_list_of_slabs_to_segments, RectangleSpan, Slab};
use serde::{Deserialize, Serialize};

use crate::contour::{GeometryKind, PlanarContour};
use crate::error::{Result, StructureError};
use crate::settings::CutSettings;

/// Display color of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Color used when a region declares none.
    pub const RED: Self = Self { r: 255, g: 0, b: 0 };

    /// Create a color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::RED
    }
}

/// A region under construction.
#[derive(Debug, Clone)]
pub struct RegionBuilder {
    name: String,
    color: Rgb,
    interpretation: String,
    contours: Vec<PlanarContour>,
}

impl RegionBuilder {
    /// Start an empty region.
    pub fn new(name: impl Into<String>, color: Rgb, interpretation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color,
            interpretation: interpretation.into(),
            contours: Vec::new(),
        }
    }

    /// Region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of contours added so far.
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// Add a contour from a flat `x0, y0, z0, x1, ..` coordinate list.
    pub fn add_contour(
        &mut self,
        points: &[f64],
        kind: GeometryKind,
        slice_ref: impl Into<String>,
    ) -> Result<()> {
        if points.len() % 3 != 0 {
            return Err(StructureError::MalformedPoints(points.len()));
        }
        let points = points
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        self.contours
            .push(PlanarContour::new(slice_ref, kind, points)?);
        Ok(())
    }

    /// Add an already built contour.
    pub fn push_contour(&mut self, contour: PlanarContour) {
        self.contours.push(contour);
    }

    /// Finalize the region.
    ///
    /// The region normal is the first contour's normal, flipped if needed so
    /// that its dominant component is positive; the winding of the contours
    /// does not affect it. Slice positions are measured along it, and the
    /// slice spacing is the smallest gap between distinct positions
    /// (`settings.default_slice_spacing` when there are fewer than two).
    pub fn compute_dependent_properties(self, settings: &CutSettings) -> Result<Region> {
        settings.validate()?;
        let tolerance = settings.tolerance;

        let normal = self.contours.first().map(|c| oriented(c.normal()));
        let mut positions = Vec::with_capacity(self.contours.len());
        let mut bounds: Option<Aabb3> = None;

        if let Some(normal) = normal {
            for (i, contour) in self.contours.iter().enumerate() {
                if !tolerance.parallel_or_opposite(&contour.normal(), &normal) {
                    warn!(
                        "region \"{}\": contour #{} is not parallel to the region's slices",
                        self.name, i
                    );
                }
                positions.push(contour.position_along(&normal));
                let mut merged = bounds.unwrap_or_else(|| contour.bounds());
                merged.merge(&contour.bounds());
                bounds = Some(merged);
            }
        }

        let mut order: Vec<usize> = (0..self.contours.len()).collect();
        order.sort_by(|&a, &b| positions[a].total_cmp(&positions[b]));

        let mut slices: Vec<f64> = Vec::new();
        for &i in &order {
            let p = positions[i];
            if slices.last().map_or(true, |&last| !tolerance.is_near(last, p)) {
                slices.push(p);
            }
        }

        let slice_spacing = slices
            .windows(2)
            .map(|w| w[1] - w[0])
            .min_by(f64::total_cmp)
            .unwrap_or(settings.default_slice_spacing);
        debug!(
            "region \"{}\": {} contours on {} slices, spacing {}",
            self.name,
            self.contours.len(),
            slices.len(),
            slice_spacing
        );

        Ok(Region {
            name: self.name,
            color: self.color,
            interpretation: self.interpretation,
            contours: self.contours,
            positions,
            order,
            slices,
            normal,
            slice_spacing,
            bounds,
            tolerance,
        })
    }
}

/// `normal` flipped so that its largest-magnitude component is positive.
fn oriented(normal: Vec3) -> Vec3 {
    if normal[normal.iamax()] < 0.0 {
        -normal
    } else {
        normal
    }
}

/// A finalized, read-only region.
#[derive(Debug, Clone)]
pub struct Region {
    name: String,
    color: Rgb,
    interpretation: String,
    contours: Vec<PlanarContour>,
    /// Slice position of each contour, in contour order.
    positions: Vec<f64>,
    /// Contour indices by ascending position, ingestion order among equals.
    order: Vec<usize>,
    /// Distinct slice positions, ascending.
    slices: Vec<f64>,
    normal: Option<Vec3>,
    slice_spacing: f64,
    bounds: Option<Aabb3>,
    tolerance: Tolerance,
}

impl Region {
    /// Region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display color.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// RT ROI Interpreted Type (`ORGAN`, `PTV`, ..).
    pub fn interpretation(&self) -> &str {
        &self.interpretation
    }

    /// Contours in ingestion order.
    pub fn contours(&self) -> &[PlanarContour] {
        &self.contours
    }

    /// Normal shared by the slices, `None` for a region without contours.
    pub fn normal(&self) -> Option<Vec3> {
        self.normal
    }

    /// Estimated distance between consecutive slices.
    pub fn slice_spacing(&self) -> f64 {
        self.slice_spacing
    }

    /// Distinct slice positions along the normal, ascending.
    pub fn slice_positions(&self) -> &[f64] {
        &self.slices
    }

    /// Bounds of every contour point.
    pub fn bounds(&self) -> Option<Aabb3> {
        self.bounds
    }

    /// Center of the bounds.
    pub fn center(&self) -> Option<Point3> {
        self.bounds.map(|b| b.center())
    }

    /// Slice matching a plane parallel to the region, if within half a spacing.
    fn matching_slice(&self, plane: &Plane, normal: &Vec3) -> Option<f64> {
        let target = plane.origin_point().coords.dot(normal);
        let nearest = self
            .slices
            .iter()
            .copied()
            .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()))?;
        if (nearest - target).abs() > self.slice_spacing / 2.0 {
            debug!(
                "region \"{}\": no slice within {} of {}",
                self.name,
                self.slice_spacing / 2.0,
                target
            );
            return None;
        }
        Some(nearest)
    }

    fn contours_at(&self, position: f64) -> impl Iterator<Item = &PlanarContour> + '_ {
        self.order
            .iter()
            .filter(move |&&i| self.tolerance.is_near(self.positions[i], position))
            .map(move |&i| &self.contours[i])
    }

    /// First contour on the slice closest to a plane parallel to the region.
    pub fn closest_contour(&self, plane: &Plane) -> Option<&PlanarContour> {
        let normal = self.normal?;
        if !self.tolerance.parallel_or_opposite(&normal, &plane.normal()) {
            return None;
        }
        let slice = self.matching_slice(plane, &normal)?;
        self.contours_at(slice).next()
    }

    /// Segments drawn by the region on a cutting plane.
    ///
    /// For a plane parallel to the slices, every contour of the nearest slice
    /// is returned as a closed loop; planes farther than half a spacing from
    /// every slice see nothing. Other planes cut each contour into pairs of
    /// crossings, concatenated by ascending slice position. Returns `None`
    /// when nothing is drawn.
    pub fn project(&self, plane: &Plane) -> Option<Vec<Segment2D>> {
        let normal = self.normal?;

        let mut segments = Vec::new();
        if self.tolerance.parallel_or_opposite(&normal, &plane.normal()) {
            let slice = self.matching_slice(plane, &normal)?;
            for contour in self.contours_at(slice) {
                segments.extend(contour.project_on_parallel_plane(plane));
            }
        } else {
            for (_, hits) in self.crossings(plane) {
                segments.extend(
                    hits.chunks_exact(2)
                        .filter(|pair| pair[0].distance(&pair[1]) >= self.tolerance.linear)
                        .map(|pair| (pair[0], pair[1])),
                );
            }
        }

        (!segments.is_empty()).then_some(segments)
    }

    /// Per-contour crossings with a non-parallel plane, by ascending slice.
    ///
    /// An odd crossing count means the contour is malformed; the unpaired
    /// last crossing is dropped.
    fn crossings<'a>(
        &'a self,
        plane: &'a Plane,
    ) -> impl Iterator<Item = (usize, Vec<Point2D>)> + 'a {
        self.order.iter().filter_map(move |&i| {
            let mut hits = self.contours[i].project(plane, &self.tolerance)?;
            if hits.len() % 2 != 0 {
                warn!(
                    "region \"{}\": contour #{} has {} crossings with the cutting plane",
                    self.name,
                    i,
                    hits.len()
                );
                hits.pop();
            }
            Some((i, hits))
        })
    }

    /// Rectangles swept by the region on a plane whose `v` axis runs along
    /// the slice normal.
    ///
    /// The crossings of all contours on a slice are sorted and paired
    /// even-odd, so a hole splits the span of its outer contour. Each pair
    /// becomes a span extruded by half a spacing on either side of its slice. Rows are ordered by ascending `v`, one per
    /// slice, with an empty row standing for any run of missing slices.
    pub fn project_rectangles(&self, plane: &Plane) -> Result<Vec<Slab>> {
        let Some(normal) = self.normal else {
            return Ok(Vec::new());
        };
        let v_axis = plane.v_vec();
        if !self.tolerance.parallel_or_opposite(&v_axis, &normal) {
            return Err(StructureError::UnsupportedPlane(
                "the v axis must run along the region's slice normal".into(),
            ));
        }
        let sign = v_axis.dot(&normal).signum();
        let origin_offset = plane.origin_point().coords.dot(&normal);
        let half = self.slice_spacing / 2.0;

        // crossings of every contour on a slice, pooled so that holes and
        // islands pair up even-odd into disjoint spans
        let mut rows: Vec<(f64, Vec<f64>)> = self
            .slices
            .iter()
            .map(|&position| (sign * (position - origin_offset), Vec::new()))
            .collect();
        let row_of = |position: f64| {
            self.slices
                .iter()
                .position(|&s| self.tolerance.is_near(s, position))
        };
        for (i, hits) in self.crossings(plane) {
            let Some(row) = row_of(self.positions[i]) else {
                continue;
            };
            rows[row].1.extend(hits.iter().map(|p| p.x));
        }
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut slabs: Vec<Slab> = Vec::with_capacity(rows.len());
        let mut previous: Option<f64> = None;
        for (v, mut xs) in rows {
            if let Some(prev) = previous {
                if v - prev > 1.5 * self.slice_spacing {
                    slabs.push(Vec::new());
                }
            }
            previous = Some(v);
            xs.sort_by(f64::total_cmp);
            slabs.push(
                xs.chunks_exact(2)
                    .filter(|pair| pair[1] - pair[0] >= self.tolerance.linear)
                    .map(|pair| RectangleSpan::new(pair[0], pair[1], v - half, v + half))
                    .collect(),
            );
        }
        Ok(slabs)
    }

    /// Rectilinear outline of the region on a plane whose `v` axis runs along
    /// the slice normal. `None` when the plane misses the region.
    pub fn project_outline(&self, plane: &Plane) -> Result<Option<Vec<Segment2D>>> {
        let slabs = self.project_rectangles(plane)?;
        let total = slabs.iter().map(Vec::len).sum();
        let mut segments = Vec::new();
        convert_list_of_slabs_to_segments(&mut segments, &slabs, total);
        Ok((!segments.is_empty()).then_some(segments))
    }
}
