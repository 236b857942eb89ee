//! Closed planar contours and their intersection with cutting planes.

use std::fmt;
use std::str::FromStr;

use rtcut_math::{Aabb3, Plane, Point2D, Point3, Segment2D, Tolerance, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StructureError};

/// Contour geometric type.
///
/// Only closed planar polygons describe a region's cross-section; the other
/// DICOM types (points, open polylines) are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// `CLOSED_PLANAR`: an implicitly closed polygon lying in one plane.
    #[serde(rename = "CLOSED_PLANAR")]
    ClosedPlanar,
}

impl GeometryKind {
    /// DICOM spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::ClosedPlanar => "CLOSED_PLANAR",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryKind {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "CLOSED_PLANAR" => Ok(GeometryKind::ClosedPlanar),
            other => Err(StructureError::UnsupportedGeometry(other.to_string())),
        }
    }
}

/// One closed polygon of a region, drawn on one image slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarContour {
    slice_ref: String,
    kind: GeometryKind,
    points: Vec<Point3>,
    normal: Vec3,
    bounds: Aabb3,
}

impl PlanarContour {
    /// Build a contour from its vertices.
    ///
    /// The polygon is implicitly closed: the last point connects back to the
    /// first. Fails when there are fewer than 3 points or the polygon has no
    /// area. Planarity is not checked.
    pub fn new(slice_ref: impl Into<String>, kind: GeometryKind, points: Vec<Point3>) -> Result<Self> {
        if points.len() < 3 {
            return Err(StructureError::DegenerateContour {
                points: points.len(),
            });
        }
        let normal = newell_normal(&points).ok_or(StructureError::DegenerateContour {
            points: points.len(),
        })?;
        let bounds = Aabb3::from_points(&points).ok_or(StructureError::DegenerateContour {
            points: points.len(),
        })?;
        Ok(Self {
            slice_ref: slice_ref.into(),
            kind,
            points,
            normal,
            bounds,
        })
    }

    /// SOP Instance UID of the image slice the contour was drawn on.
    pub fn slice_ref(&self) -> &str {
        &self.slice_ref
    }

    /// Geometric type.
    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    /// Vertices in ingestion order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the contour has no vertices. [`PlanarContour::new`] rejects
    /// fewer than three, so this is false for any constructed contour.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Unit normal, oriented by the winding (counter-clockwise seen from the tip).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Axis-aligned bounds of the vertices.
    pub fn bounds(&self) -> Aabb3 {
        self.bounds
    }

    /// Offset of the contour's plane along `direction`.
    pub fn position_along(&self, direction: &Vec3) -> f64 {
        self.points[0].coords.dot(direction)
    }

    /// The polygon re-expressed in `plane`'s frame, as the closed loop
    /// `p0-p1, p1-p2, .., pn-p0`.
    ///
    /// Meant for planes parallel to the contour; the points are projected
    /// as they are, without checking that they lie on the plane.
    pub fn project_on_parallel_plane(&self, plane: &Plane) -> Vec<Segment2D> {
        let projected: Vec<Point2D> = self.points.iter().map(|p| plane.project(p)).collect();
        let n = projected.len();
        (0..n)
            .map(|i| (projected[i], projected[(i + 1) % n]))
            .collect()
    }

    /// Crossings of the polygon's edges with a cutting plane.
    ///
    /// Vertices closer to the plane than `tolerance.linear` count as lying on
    /// it, and an edge crosses only when exactly one of its ends is strictly
    /// below the plane. A closed polygon therefore always yields an even
    /// number of crossings, and a vertex the outline passes through is
    /// counted once.
    ///
    /// The crossings are returned sorted along the line where the two planes
    /// meet, oriented towards increasing `u` (increasing `v` when that line
    /// runs along `v`). Returns `None` when the planes are parallel or no edge
    /// crosses.
    pub fn project(&self, plane: &Plane, tolerance: &Tolerance) -> Option<Vec<Point2D>> {
        let plane_normal = plane.normal();
        if tolerance.parallel_or_opposite(&self.normal, &plane_normal) {
            return None;
        }

        let distances: Vec<f64> = self
            .points
            .iter()
            .map(|p| {
                let d = plane.signed_distance(p);
                if tolerance.is_zero(d) {
                    0.0
                } else {
                    d
                }
            })
            .collect();

        let n = self.points.len();
        let mut crossings = Vec::new();
        for i in 0..n {
            let j = (i + 1) % n;
            let (da, db) = (distances[i], distances[j]);
            if (da < 0.0) == (db < 0.0) {
                continue;
            }
            let t = da / (da - db);
            let (a, b) = (&self.points[i], &self.points[j]);
            let hit = a + (b - a) * t;
            crossings.push(plane.project(&hit));
        }
        if crossings.is_empty() {
            return None;
        }

        let line = self.normal.cross(&plane_normal);
        let (mut du, mut dv) = (line.dot(&plane.u_vec()), line.dot(&plane.v_vec()));
        if du < -tolerance.angular || (du.abs() <= tolerance.angular && dv < 0.0) {
            du = -du;
            dv = -dv;
        }
        crossings.sort_by(|p, q| (p.x * du + p.y * dv).total_cmp(&(q.x * du + q.y * dv)));
        Some(crossings)
    }
}

/// Unit normal by Newell's method, `None` for a polygon with no area.
fn newell_normal(points: &[Point3]) -> Option<Vec3> {
    let mut n = Vec3::zeros();
    for i in 0..points.len() {
        let current = points[i];
        let next = points[(i + 1) % points.len()];
        n.x += (current.y - next.y) * (current.z + next.z);
        n.y += (current.z - next.z) * (current.x + next.x);
        n.z += (current.x - next.x) * (current.y + next.y);
    }
    n.try_normalize(1e-12)
}
