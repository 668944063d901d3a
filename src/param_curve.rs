// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trait for curves parametrized by a fraction.

use nalgebra::Point3;

use crate::{
    PlaneByOriginAndVectors, Polyline, Range3, Ray3, SpiralError, StrokeHandler, StrokeOptions,
    Transform3,
};

/// A bounded curve in 3D, parametrized by a fraction.
///
/// Fraction 0 is the start of the curve and fraction 1 its end. Fractions
/// outside `[0, 1]` may be accepted but carry no guarantees beyond what
/// each implementation documents.
///
/// The trait is object safe, so curves can be stroked through
/// `&dyn CurvePrimitive`.
pub trait CurvePrimitive {
    /// Evaluate the curve at `fraction`.
    fn fraction_to_point(&self, fraction: f64) -> Point3<f64>;

    /// The point at `fraction` and the derivative with respect to fraction.
    fn fraction_to_point_and_derivative(&self, fraction: f64) -> Ray3;

    /// The point at `fraction` and the first and second derivatives with
    /// respect to fraction.
    fn fraction_to_point_and_2_derivatives(&self, fraction: f64) -> PlaneByOriginAndVectors;

    /// A right-handed orthonormal frame at `fraction`, with x along the
    /// tangent, or `None` where the frame is undefined.
    fn fraction_to_frenet_frame(&self, fraction: f64) -> Option<Transform3>;

    /// The start point.
    fn start_point(&self) -> Point3<f64> {
        self.fraction_to_point(0.0)
    }

    /// The end point.
    fn end_point(&self) -> Point3<f64> {
        self.fraction_to_point(1.0)
    }

    /// The arc length from fraction 0 to fraction 1.
    fn curve_length(&self) -> f64;

    /// A fast length estimate. The default is the exact length.
    fn quick_length(&self) -> f64 {
        self.curve_length()
    }

    /// The number of uniform fraction steps to use when stroking with
    /// `options`.
    fn compute_stroke_count_for_options(&self, options: Option<&StrokeOptions>) -> usize;

    /// Announce this curve's stroke intervals to `handler`.
    fn emit_strokable_parts(&self, handler: &mut dyn StrokeHandler, options: Option<&StrokeOptions>);

    /// Append stroke points to `dest`.
    ///
    /// The first point is skipped when it repeats the last point already
    /// in `dest`, so consecutive curves chain without duplicates.
    fn emit_strokes(&self, dest: &mut Polyline, options: Option<&StrokeOptions>) {
        let num_strokes = self.compute_stroke_count_for_options(options).max(1);
        for i in 0..=num_strokes {
            dest.push_if_distinct(self.fraction_to_point(i as f64 / num_strokes as f64));
        }
    }

    /// The range of the stroke points with the given options.
    fn range(&self) -> Range3 {
        let mut strokes = Polyline::new();
        self.emit_strokes(&mut strokes, None);
        strokes.range()
    }

    /// Reverse the direction of the curve.
    fn reverse_in_place(&mut self);

    /// Apply `transform` to the curve.
    ///
    /// # Errors
    ///
    /// Fails when the curve type cannot represent the transformed curve. The
    /// curve is left unchanged on failure.
    fn try_transform_in_place(&mut self, transform: &Transform3) -> Result<(), SpiralError>;

    /// Compare with another curve of the same type, within tolerance.
    fn is_almost_equal(&self, other: &Self) -> bool
    where
        Self: Sized;
}
