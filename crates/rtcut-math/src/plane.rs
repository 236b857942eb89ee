//! Cutting planes: a 2D `(u, v)` frame embedded in 3D space.

use serde::{Deserialize, Serialize};

use crate::{Point2D, Point3, Vec3};

/// A plane with an in-plane coordinate frame.
///
/// The axes are expected to be orthonormal. Nothing here rescales them, so a
/// non-unit axis scales the projected coordinates accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Point of the plane mapped to `(0, 0)` [x, y, z].
    pub origin: [f64; 3],
    /// First in-plane axis [x, y, z].
    pub axis_u: [f64; 3],
    /// Second in-plane axis [x, y, z].
    pub axis_v: [f64; 3],
}

impl Plane {
    /// Create a plane from an origin and two in-plane axes.
    pub fn new(origin: Point3, axis_u: Vec3, axis_v: Vec3) -> Self {
        Self {
            origin: [origin.x, origin.y, origin.z],
            axis_u: [axis_u.x, axis_u.y, axis_u.z],
            axis_v: [axis_v.x, axis_v.y, axis_v.z],
        }
    }

    /// Axial plane at height `z` (u = +X, v = +Y).
    pub fn axial(z: f64) -> Self {
        Self {
            origin: [0.0, 0.0, z],
            axis_u: [1.0, 0.0, 0.0],
            axis_v: [0.0, 1.0, 0.0],
        }
    }

    /// Coronal plane at depth `y` (u = +X, v = +Z).
    pub fn coronal(y: f64) -> Self {
        Self {
            origin: [0.0, y, 0.0],
            axis_u: [1.0, 0.0, 0.0],
            axis_v: [0.0, 0.0, 1.0],
        }
    }

    /// Sagittal plane at position `x` (u = +Y, v = +Z).
    pub fn sagittal(x: f64) -> Self {
        Self {
            origin: [x, 0.0, 0.0],
            axis_u: [0.0, 1.0, 0.0],
            axis_v: [0.0, 0.0, 1.0],
        }
    }

    /// Build an orthonormal frame on the plane through `origin` with the given normal.
    ///
    /// The `u` axis is the projection of whichever world axis is least aligned
    /// with the normal, so axis-aligned normals give axis-aligned frames.
    /// Returns `None` for a zero normal.
    pub fn from_normal(origin: Point3, normal: Vec3) -> Option<Self> {
        let n = normal.try_normalize(f64::EPSILON)?;
        let seed = if n.x.abs() <= n.y.abs() && n.x.abs() <= n.z.abs() {
            Vec3::x()
        } else if n.y.abs() <= n.z.abs() {
            Vec3::y()
        } else {
            Vec3::z()
        };
        let u = (seed - n * n.dot(&seed)).normalize();
        let v = n.cross(&u);
        Some(Self::new(origin, u, v))
    }

    /// Get origin as Point3.
    pub fn origin_point(&self) -> Point3 {
        Point3::new(self.origin[0], self.origin[1], self.origin[2])
    }

    /// Get the first axis as Vec3.
    pub fn u_vec(&self) -> Vec3 {
        Vec3::new(self.axis_u[0], self.axis_u[1], self.axis_u[2])
    }

    /// Get the second axis as Vec3.
    pub fn v_vec(&self) -> Vec3 {
        Vec3::new(self.axis_v[0], self.axis_v[1], self.axis_v[2])
    }

    /// Plane normal, `u × v`.
    pub fn normal(&self) -> Vec3 {
        self.u_vec().cross(&self.v_vec())
    }

    /// Signed distance of `p` along the normal.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal().dot(&(p - self.origin_point()))
    }

    /// Express a 3D point in the plane's `(u, v)` frame.
    pub fn project(&self, p: &Point3) -> Point2D {
        let d = p - self.origin_point();
        Point2D::new(d.dot(&self.u_vec()), d.dot(&self.v_vec()))
    }

    /// Map a plane coordinate back to 3D.
    pub fn unproject(&self, p: &Point2D) -> Point3 {
        self.origin_point() + self.u_vec() * p.x + self.v_vec() * p.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axial_projection_is_exact() {
        let plane = Plane::axial(-12.5);
        let p = Point3::new(-88.137, 41.0009, -12.5);
        let q = plane.project(&p);
        assert_eq!(q.x, p.x);
        assert_eq!(q.y, p.y);
    }

    #[test]
    fn test_standard_plane_normals() {
        assert_eq!(Plane::axial(0.0).normal(), Vec3::z());
        assert_eq!(Plane::coronal(0.0).normal(), -Vec3::y());
        assert_eq!(Plane::sagittal(0.0).normal(), Vec3::x());
    }

    #[test]
    fn test_signed_distance() {
        let plane = Plane::sagittal(3.0);
        assert_relative_eq!(plane.signed_distance(&Point3::new(5.0, 7.0, -1.0)), 2.0);
        assert_relative_eq!(plane.signed_distance(&Point3::new(1.0, 0.0, 0.0)), -2.0);
    }

    #[test]
    fn test_oblique_project_unproject() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let plane = Plane::new(
            Point3::new(1.0, 2.0, 3.0),
            Vec3::new(s, s, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let p = Point3::new(2.0, 3.0, 7.0);
        let q = plane.project(&p);
        assert_relative_eq!(q.x, 2.0 * s, epsilon = 1e-12);
        assert_relative_eq!(q.y, 4.0, epsilon = 1e-12);
        let back = plane.unproject(&q);
        assert_relative_eq!(back, p, epsilon = 1e-12);
    }

    #[test]
    fn test_from_normal_is_orthonormal() {
        let plane = Plane::from_normal(Point3::origin(), Vec3::new(1.0, 2.0, 2.0)).unwrap();
        let (u, v, n) = (plane.u_vec(), plane.v_vec(), plane.normal());
        assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-12);
        assert_relative_eq!(n, Vec3::new(1.0, 2.0, 2.0) / 3.0, epsilon = 1e-12);

        assert!(Plane::from_normal(Point3::origin(), Vec3::zeros()).is_none());
    }

    #[test]
    fn test_from_normal_axis_aligned() {
        let plane = Plane::from_normal(Point3::new(0.0, 0.0, 4.0), Vec3::z()).unwrap();
        assert_eq!(plane.u_vec(), Vec3::x());
        assert_eq!(plane.v_vec(), Vec3::y());
    }
}
