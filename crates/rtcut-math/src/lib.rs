#![warn(missing_docs)]

//! Math types for rtcut.
//!
//! Thin wrappers around nalgebra providing the types shared by the
//! structure-set cutter and the outline tracer: 3D points and vectors,
//! serializable 2D points and segments, cutting planes, bounding boxes and
//! tolerance constants.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

mod plane;

pub use plane::Plane;

/// A point in 3D patient space (mm).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in 2D plane space.
pub type Point2 = nalgebra::Point2<f64>;

/// A 2D point expressed in a cutting plane's `(u, v)` frame.
///
/// We use a plain struct instead of nalgebra::Point2 so that cut results
/// serialize without requiring nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// U coordinate.
    pub x: f64,
    /// V coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<Point2> for Point2D {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point2D> for Point2 {
    fn from(p: Point2D) -> Self {
        Point2::new(p.x, p.y)
    }
}

/// A 2D line segment, the unit of output handed to renderers.
pub type Segment2D = (Point2D, Point2D);

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance, compared against `1 - |cos θ|`.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 mm linear, 1e-9 angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two scalars are equal within the linear tolerance.
    pub fn is_near(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check if two directions are parallel or opposite.
    ///
    /// Degenerate (zero-length) vectors are never parallel to anything.
    pub fn parallel_or_opposite(&self, a: &Vec3, b: &Vec3) -> bool {
        let (na, nb) = (a.norm(), b.norm());
        if na < f64::EPSILON || nb < f64::EPSILON {
            return false;
        }
        let cos = a.dot(b) / (na * nb);
        1.0 - cos.abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut aabb = Self::empty();
        let mut any = false;
        for p in points {
            aabb.include_point(p);
            any = true;
        }
        any.then_some(aabb)
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Expand this AABB to include another box.
    pub fn merge(&mut self, other: &Aabb3) {
        self.include_point(&other.min);
        self.include_point(&other.max);
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths along X, Y and Z.
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }
}
