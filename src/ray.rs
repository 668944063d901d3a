// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derivative carriers: a point with a tangent, and a point with two
//! derivative vectors.

use nalgebra::{Point3, Vector3};

/// A point together with a direction vector.
///
/// As the result of a curve evaluation, `direction` is the derivative with
/// respect to the curve's fraction parameter, so its length is meaningful.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray3 {
    /// The ray's start point.
    pub origin: Point3<f64>,
    /// The ray's direction (not necessarily unit length).
    pub direction: Vector3<f64>,
}

impl Ray3 {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Ray3 {
        Ray3 { origin, direction }
    }

    /// The point at parameter `t`, i.e. `origin + t * direction`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// The direction scaled to unit length, or `None` if it is zero.
    pub fn unit_direction(&self) -> Option<Vector3<f64>> {
        self.direction.try_normalize(0.0)
    }
}

/// A point with two vectors, typically the first and second derivative of a
/// curve at that point.
///
/// The two vectors span the osculating plane wherever they are independent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneByOriginAndVectors {
    /// Base point.
    pub origin: Point3<f64>,
    /// First vector (first derivative).
    pub vector_u: Vector3<f64>,
    /// Second vector (second derivative).
    pub vector_v: Vector3<f64>,
}

impl PlaneByOriginAndVectors {
    /// Create a new plane from a point and two vectors.
    #[inline]
    pub fn new(
        origin: Point3<f64>,
        vector_u: Vector3<f64>,
        vector_v: Vector3<f64>,
    ) -> PlaneByOriginAndVectors {
        PlaneByOriginAndVectors {
            origin,
            vector_u,
            vector_v,
        }
    }

    /// The point `origin + u * vector_u + v * vector_v`.
    #[inline]
    pub fn fraction_to_point(&self, u: f64, v: f64) -> Point3<f64> {
        self.origin + self.vector_u * u + self.vector_v * v
    }

    /// Unit normal `vector_u × vector_v`, or `None` when the vectors are parallel.
    pub fn unit_normal(&self) -> Option<Vector3<f64>> {
        self.vector_u.cross(&self.vector_v).try_normalize(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_eval() {
        let ray = Ray3::new(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(ray.eval(0.5), Point3::new(1.0, 3.0, 3.0));
        assert_eq!(ray.unit_direction(), Some(Vector3::y()));
        assert_eq!(Ray3::new(Point3::origin(), Vector3::zeros()).unit_direction(), None);
    }

    #[test]
    fn plane_normal() {
        let plane = PlaneByOriginAndVectors::new(Point3::origin(), Vector3::x() * 3.0, Vector3::y());
        assert_eq!(plane.unit_normal(), Some(Vector3::z()));
        assert_eq!(plane.fraction_to_point(1.0, 2.0), Point3::new(3.0, 2.0, 0.0));
    }
}
