// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement transforms.

use core::ops::{Mul, MulAssign};

use nalgebra::{Matrix3, Point3, Vector3};

use crate::common::{is_almost_equal_number, SMALL_METRIC_DISTANCE};
use crate::Ray3;

/// Relative tolerance for the `MᵀM = s²I` test in
/// [`Transform3::factor_rigid_with_scale`].
const RIGID_TOLERANCE: f64 = 1.0e-10;

/// A 3D affine transform: a linear map followed by a translation.
///
/// A point `p` maps to `matrix * p + origin`; vectors see only `matrix`.
/// Composition follows the same convention as a matrix product, so
/// `(a * b) * p == a * (b * p)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform3 {
    origin: Vector3<f64>,
    matrix: Matrix3<f64>,
}

impl Default for Transform3 {
    fn default() -> Self {
        Transform3::identity()
    }
}

impl Transform3 {
    /// The identity transform.
    #[inline]
    pub fn identity() -> Transform3 {
        Transform3 {
            origin: Vector3::zeros(),
            matrix: Matrix3::identity(),
        }
    }

    /// Create a transform from its translation and linear part.
    #[inline]
    pub fn from_origin_and_matrix(origin: Point3<f64>, matrix: Matrix3<f64>) -> Transform3 {
        Transform3 {
            origin: origin.coords,
            matrix,
        }
    }

    /// A pure translation.
    #[inline]
    pub fn translate(v: Vector3<f64>) -> Transform3 {
        Transform3 {
            origin: v,
            matrix: Matrix3::identity(),
        }
    }

    /// A linear map with no translation.
    #[inline]
    pub fn from_matrix(matrix: Matrix3<f64>) -> Transform3 {
        Transform3 {
            origin: Vector3::zeros(),
            matrix,
        }
    }

    /// Uniform scaling about the origin.
    #[inline]
    pub fn scale(s: f64) -> Transform3 {
        Transform3::from_matrix(Matrix3::from_diagonal_element(s))
    }

    /// Uniform scaling that keeps `center` fixed.
    pub fn scale_about(s: f64, center: Point3<f64>) -> Transform3 {
        Transform3::translate(-center.coords)
            .then_scale(s)
            .then_translate(center.coords)
    }

    /// Rotation by `th` radians about the z axis, positive x turning toward positive y.
    pub fn rotate_z(th: f64) -> Transform3 {
        let (s, c) = th.sin_cos();
        Transform3::from_matrix(Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0))
    }

    /// `self` followed by a translation of `v`.
    #[must_use]
    pub fn then_translate(mut self, v: Vector3<f64>) -> Transform3 {
        self.origin += v;
        self
    }

    /// `self` followed by a uniform scale of `s`.
    #[must_use]
    pub fn then_scale(self, s: f64) -> Transform3 {
        Transform3::scale(s) * self
    }

    /// `self` followed by a rotation of `th` about the z axis.
    #[must_use]
    pub fn then_rotate_z(self, th: f64) -> Transform3 {
        Transform3::rotate_z(th) * self
    }

    /// The translation part, as the image of the local origin.
    #[inline]
    pub fn origin(&self) -> Point3<f64> {
        Point3::from(self.origin)
    }

    /// The linear part.
    #[inline]
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Apply the full transform to a point.
    #[inline]
    pub fn transform_point(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.matrix * p.coords + self.origin)
    }

    /// Apply the linear part to a vector.
    #[inline]
    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * v
    }

    /// Apply the linear part to the in-plane vector `(x, y, 0)`.
    #[inline]
    pub fn multiply_xy(&self, x: f64, y: f64) -> Vector3<f64> {
        self.matrix.column(0) * x + self.matrix.column(1) * y
    }

    /// The inverse transform, or `None` if the linear part is singular.
    pub fn inverse(&self) -> Option<Transform3> {
        let inv = self.matrix.try_inverse()?;
        Some(Transform3 {
            origin: -(inv * self.origin),
            matrix: inv,
        })
    }

    /// Map a world-space ray into the local space of this transform.
    pub fn inverse_transform_ray(&self, ray: &Ray3) -> Option<Ray3> {
        let inv = self.inverse()?;
        Some(Ray3::new(
            inv.transform_point(&ray.origin),
            inv.transform_vector(&ray.direction),
        ))
    }

    /// Factor the linear part as `s * Q` with `Q` orthogonal and `s > 0`.
    ///
    /// `Q` may be a reflection (determinant `-1`). Returns `None` when the
    /// matrix is singular, non-uniformly scaled, or sheared.
    pub fn factor_rigid_with_scale(&self) -> Option<(Matrix3<f64>, f64)> {
        let mtm = self.matrix.transpose() * self.matrix;
        let s2 = mtm.trace() / 3.0;
        if !(s2.is_finite() && s2 > 0.0) {
            return None;
        }
        let tol = RIGID_TOLERANCE * s2;
        let off_identity = mtm - Matrix3::from_diagonal_element(s2);
        if off_identity.iter().any(|e| e.abs() > tol) {
            return None;
        }
        let s = s2.sqrt();
        Some((self.matrix / s, s))
    }

    /// A right-handed orthonormal frame built from the matrix columns.
    ///
    /// The x axis follows the first column, the z axis follows
    /// `column0 × column1`, and the y axis completes the frame. Returns
    /// `None` when the first two columns are parallel or zero.
    pub fn rigid_axes_xyz(&self) -> Option<Matrix3<f64>> {
        let x = self.matrix.column(0).into_owned();
        let y = self.matrix.column(1).into_owned();
        let z = x.cross(&y).try_normalize(0.0)?;
        let x = x.try_normalize(0.0)?;
        let y = z.cross(&x);
        Some(Matrix3::from_columns(&[x, y, z]))
    }

    /// Entry-by-entry comparison with coordinate tolerance.
    pub fn is_almost_equal(&self, other: &Transform3) -> bool {
        (self.origin - other.origin).amax() <= SMALL_METRIC_DISTANCE
            && self
                .matrix
                .iter()
                .zip(other.matrix.iter())
                .all(|(a, b)| is_almost_equal_number(*a, *b))
    }

    /// Is this transform finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.origin.iter().all(|x| x.is_finite()) && self.matrix.iter().all(|x| x.is_finite())
    }
}

impl Mul for Transform3 {
    type Output = Transform3;

    #[inline]
    fn mul(self, other: Transform3) -> Transform3 {
        Transform3 {
            origin: self.matrix * other.origin + self.origin,
            matrix: self.matrix * other.matrix,
        }
    }
}

impl MulAssign for Transform3 {
    #[inline]
    fn mul_assign(&mut self, other: Transform3) {
        *self = self.mul(other);
    }
}

impl Mul<Point3<f64>> for Transform3 {
    type Output = Point3<f64>;

    #[inline]
    fn mul(self, other: Point3<f64>) -> Point3<f64> {
        self.transform_point(&other)
    }
}
