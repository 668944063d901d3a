// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition spirals placed in 3D.

use nalgebra::{Matrix3, Point3, Vector2};

use crate::common::{gauss_legendre_5, is_almost_equal_number};
use crate::{
    radius_to_curvature, ActiveStrokes, AngleSweep, CurvePrimitive, PlaneByOriginAndVectors,
    Polyline, Range3, Ray3, ResolvedTransitionProperties, Segment1d, SpiralError, SpiralType,
    StrokeHandler, StrokeOptions, Transform3, TransitionConditionalProperties,
};

/// Number of uniform fraction steps in the cached strokes.
pub const DEFAULT_STROKE_COUNT: usize = 16;

/// A transition spiral: a planar curve whose curvature moves from one end
/// value to another along a [`SpiralType`] profile.
///
/// The spiral is defined in the local xy plane, starting at the local origin
/// with tangent direction `bearing01.start`, and mapped to the world by
/// `local_to_world`. Only the part selected by `active_fraction_interval` is
/// the curve proper; fractions passed to [`CurvePrimitive`] methods are
/// fractions of that part.
///
/// Points are evaluated by Gauss quadrature of the tangent direction,
/// starting from the nearest cached stroke point, so the error of any query
/// is that of a single sixteenth of the spiral.
#[derive(Clone, Debug)]
pub struct TransitionSpiral {
    radius01: Segment1d,
    bearing01: AngleSweep,
    curvature01: Segment1d,
    active_fraction_interval: Segment1d,
    local_to_world: Transform3,
    arc_length01: f64,
    spiral_type: SpiralType,
    original_properties: Option<TransitionConditionalProperties>,
    global_strokes: Polyline,
    active_strokes: ActiveStrokes,
}

impl TransitionSpiral {
    /// Create a spiral from its end radii and end bearings.
    ///
    /// The arc length is derived from the sweep and the average curvature.
    /// A radius of 0 means a straight tangent at that end.
    ///
    /// # Errors
    ///
    /// Fails for an unknown profile name, when the bearings turn against the
    /// sense of the curvature, or when the length cannot be derived (both
    /// radii 0 with a nonzero sweep, for example).
    pub fn from_radius_radius_bearing_bearing(
        spiral_type: Option<&str>,
        radius01: Segment1d,
        bearing01: AngleSweep,
        active_fraction_interval: Segment1d,
        local_to_world: Transform3,
    ) -> Result<TransitionSpiral, SpiralError> {
        let spiral_type = SpiralType::from_optional_name(spiral_type)?;
        let properties = TransitionConditionalProperties::new(
            Some(radius01.x0),
            Some(radius01.x1),
            Some(bearing01.start_angle()),
            Some(bearing01.end_angle()),
            None,
        );
        let resolved = properties.resolve()?;
        Ok(TransitionSpiral::new_unchecked(
            spiral_type,
            radius01,
            bearing01,
            active_fraction_interval,
            local_to_world,
            resolved.curve_length,
            None,
        ))
    }

    /// Create a spiral from four of the five defining properties.
    ///
    /// The missing one is solved for, and the given properties are retained
    /// as [`original_properties`](Self::original_properties).
    ///
    /// # Errors
    ///
    /// Fails for an unknown profile name, and wherever
    /// [`TransitionConditionalProperties::resolve`] fails.
    pub fn from_four_of_five(
        spiral_type: Option<&str>,
        properties: &TransitionConditionalProperties,
        active_fraction_interval: Segment1d,
        local_to_world: Transform3,
    ) -> Result<TransitionSpiral, SpiralError> {
        let spiral_type = SpiralType::from_optional_name(spiral_type)?;
        let resolved = properties.resolve()?;
        let mut spiral =
            TransitionSpiral::from_resolved(spiral_type, &resolved, active_fraction_interval, local_to_world);
        spiral.original_properties = Some(*properties);
        Ok(spiral)
    }

    /// Create a spiral from a complete property set.
    pub fn from_resolved(
        spiral_type: SpiralType,
        resolved: &ResolvedTransitionProperties,
        active_fraction_interval: Segment1d,
        local_to_world: Transform3,
    ) -> TransitionSpiral {
        TransitionSpiral::new_unchecked(
            spiral_type,
            resolved.radius01(),
            resolved.bearing01(),
            active_fraction_interval,
            local_to_world,
            resolved.curve_length,
            None,
        )
    }

    fn new_unchecked(
        spiral_type: SpiralType,
        radius01: Segment1d,
        bearing01: AngleSweep,
        active_fraction_interval: Segment1d,
        local_to_world: Transform3,
        arc_length01: f64,
        original_properties: Option<TransitionConditionalProperties>,
    ) -> TransitionSpiral {
        let mut spiral = TransitionSpiral {
            radius01,
            bearing01,
            curvature01: radius01.map(radius_to_curvature),
            active_fraction_interval,
            local_to_world,
            arc_length01,
            spiral_type,
            original_properties,
            global_strokes: Polyline::new(),
            active_strokes: ActiveStrokes::AliasesGlobal,
        };
        spiral.refresh_computed_properties();
        spiral
    }

    /// Recompute everything derived from the defining data.
    fn refresh_computed_properties(&mut self) {
        self.curvature01 = self.radius01.map(radius_to_curvature);

        let step = 1.0 / DEFAULT_STROKE_COUNT as f64;
        let mut xy = Vector2::zeros();
        let mut strokes = Polyline::new();
        strokes.push(Point3::origin());
        for i in 1..=DEFAULT_STROKE_COUNT {
            xy += self.full_spiral_incremental_integral((i - 1) as f64 * step, i as f64 * step);
            strokes.push(Point3::new(xy.x, xy.y, 0.0));
        }
        strokes.transform_in_place(&self.local_to_world);
        self.global_strokes = strokes;

        // The global strokes must be in place before this resampling.
        self.active_strokes = if self.active_fraction_interval.is_exact01() {
            ActiveStrokes::AliasesGlobal
        } else {
            ActiveStrokes::Independent(
                (0..=DEFAULT_STROKE_COUNT)
                    .map(|i| self.fraction_to_point(i as f64 * step))
                    .collect(),
            )
        };
        log::trace!(
            "refreshed {} spiral: length {}, curvature {:?}, active {:?}",
            self.spiral_type,
            self.arc_length01,
            self.curvature01,
            self.active_fraction_interval
        );
    }

    /// Local xy displacement from global fraction `fraction0` to `fraction1`,
    /// by one 5-point Gauss rule.
    fn full_spiral_incremental_integral(&self, fraction0: f64, fraction1: f64) -> Vector2<f64> {
        gauss_legendre_5(fraction0, fraction1)
            .into_iter()
            .fold(Vector2::zeros(), |sum, (fraction, weight)| {
                let (s, c) = self.global_fraction_to_bearing_radians(fraction).sin_cos();
                sum + Vector2::new(c, s) * (weight * self.arc_length01)
            })
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "The cast saturates and the index is clamped to the cache size."
    )]
    fn global_fraction_to_point(&self, fraction: f64) -> Point3<f64> {
        // NaN truncates to index 0 and propagates through the integral.
        let index = ((fraction * DEFAULT_STROKE_COUNT as f64) as usize).min(DEFAULT_STROKE_COUNT);
        let anchor_fraction = index as f64 / DEFAULT_STROKE_COUNT as f64;
        let delta = self.full_spiral_incremental_integral(anchor_fraction, fraction);
        let anchor = self
            .global_strokes
            .get(index)
            .unwrap_or_else(|| self.local_to_world.origin());
        anchor + self.local_to_world.multiply_xy(delta.x, delta.y)
    }

    /// Map an active fraction to a global one, unclamped.
    #[inline]
    fn active_to_global(&self, fraction: f64) -> f64 {
        self.active_fraction_interval.fraction_to_point(fraction)
    }

    /// Derivative of arc length with respect to active fraction, signed.
    #[inline]
    fn signed_fraction_scale(&self) -> f64 {
        self.arc_length01 * self.active_fraction_interval.signed_delta()
    }

    /// The global fraction where the curvature changes sign, if it does.
    ///
    /// Every profile is monotone, so there is at most one such fraction.
    fn global_inflection_fraction(&self) -> Option<f64> {
        let k0 = self.curvature01.x0;
        if !(k0 * self.curvature01.x1 < 0.0) {
            return None;
        }
        let (mut low, mut high) = (0.0, 1.0);
        for _ in 0..60 {
            let mid = 0.5 * (low + high);
            if self.global_fraction_to_curvature(mid) * k0 > 0.0 {
                low = mid;
            } else {
                high = mid;
            }
        }
        Some(0.5 * (low + high))
    }

    /// Total absolute turning over the active interval.
    ///
    /// Across an inflection the bearing turns back, so the two sides are
    /// summed rather than netted.
    fn active_turning_radians(&self) -> f64 {
        let global0 = self.active_fraction_interval.x0;
        let global1 = self.active_fraction_interval.x1;
        let bearing0 = self.global_fraction_to_bearing_radians(global0);
        let bearing1 = self.global_fraction_to_bearing_radians(global1);
        match self.global_inflection_fraction() {
            Some(inflection) if (global0 - inflection) * (global1 - inflection) < 0.0 => {
                let turn = self.global_fraction_to_bearing_radians(inflection);
                (turn - bearing0).abs() + (bearing1 - turn).abs()
            }
            _ => (bearing1 - bearing0).abs(),
        }
    }

    /// Bearing at a global fraction of the full spiral.
    pub fn global_fraction_to_bearing_radians(&self, fraction: f64) -> f64 {
        let k0 = self.curvature01.x0;
        let dk = self.curvature01.signed_delta();
        let length = self.arc_length01;
        self.bearing01.start_radians()
            + self.spiral_type.fraction_to_area(fraction) * length * dk
            + fraction * k0 * length
    }

    /// Curvature at a global fraction of the full spiral.
    pub fn global_fraction_to_curvature(&self, fraction: f64) -> f64 {
        self.curvature01.x0
            + self.spiral_type.fraction_to_curvature_fraction(fraction) * self.curvature01.signed_delta()
    }

    /// Bearing at a fraction of the active interval.
    pub fn fraction_to_bearing_radians(&self, fraction: f64) -> f64 {
        self.global_fraction_to_bearing_radians(self.active_to_global(fraction))
    }

    /// Curvature at a fraction of the active interval.
    pub fn fraction_to_curvature(&self, fraction: f64) -> f64 {
        self.global_fraction_to_curvature(self.active_to_global(fraction))
    }

    /// Arc length between two active fractions.
    pub fn curve_length_between_fractions(&self, fraction0: f64, fraction1: f64) -> f64 {
        (self.signed_fraction_scale() * (fraction1 - fraction0)).abs()
    }

    /// A new spiral that is the part of this one between two active
    /// fractions.
    ///
    /// `fraction1 < fraction0` gives a reversed part.
    #[must_use]
    pub fn clone_partial_curve(&self, fraction0: f64, fraction1: f64) -> TransitionSpiral {
        let mut partial = self.clone();
        partial.active_fraction_interval = self.active_fraction_interval.sub_segment(fraction0, fraction1);
        partial.refresh_computed_properties();
        partial
    }

    /// The curvature profile.
    #[inline]
    pub fn spiral_type(&self) -> SpiralType {
        self.spiral_type
    }

    /// Radii at the two ends of the full spiral.
    #[inline]
    pub fn radius01(&self) -> Segment1d {
        self.radius01
    }

    /// Bearings at the two ends of the full spiral.
    #[inline]
    pub fn bearing01(&self) -> AngleSweep {
        self.bearing01
    }

    /// Curvatures at the two ends of the full spiral.
    #[inline]
    pub fn curvature01(&self) -> Segment1d {
        self.curvature01
    }

    /// The part of the full spiral that is the curve.
    #[inline]
    pub fn active_fraction_interval(&self) -> Segment1d {
        self.active_fraction_interval
    }

    /// The placement.
    #[inline]
    pub fn local_to_world(&self) -> &Transform3 {
        &self.local_to_world
    }

    /// Arc length of the full spiral.
    #[inline]
    pub fn arc_length01(&self) -> f64 {
        self.arc_length01
    }

    /// The properties given at construction, if built from four of five,
    /// scaled along with the spiral.
    #[inline]
    pub fn original_properties(&self) -> Option<&TransitionConditionalProperties> {
        self.original_properties.as_ref()
    }

    /// Strokes of the full spiral, in world coordinates.
    #[inline]
    pub fn global_strokes(&self) -> &Polyline {
        &self.global_strokes
    }

    /// Strokes of the active part, in world coordinates.
    #[inline]
    pub fn active_strokes(&self) -> &Polyline {
        self.active_strokes.resolve(&self.global_strokes)
    }

    /// True when the active strokes are the global strokes.
    #[inline]
    pub fn active_strokes_are_global(&self) -> bool {
        self.active_strokes.is_aliased()
    }
}

impl CurvePrimitive for TransitionSpiral {
    /// Fractions outside `[0, 1]` of the full spiral are clamped to its ends.
    fn fraction_to_point(&self, fraction: f64) -> Point3<f64> {
        self.global_fraction_to_point(self.active_to_global(fraction).clamp(0.0, 1.0))
    }

    fn fraction_to_point_and_derivative(&self, fraction: f64) -> Ray3 {
        let (s, c) = self.fraction_to_bearing_radians(fraction).sin_cos();
        let a = self.signed_fraction_scale();
        Ray3::new(
            self.fraction_to_point(fraction),
            self.local_to_world.multiply_xy(a * c, a * s),
        )
    }

    fn fraction_to_point_and_2_derivatives(&self, fraction: f64) -> PlaneByOriginAndVectors {
        let (s, c) = self.fraction_to_bearing_radians(fraction).sin_cos();
        let a = self.signed_fraction_scale();
        let b = a * a * self.fraction_to_curvature(fraction);
        PlaneByOriginAndVectors::new(
            self.fraction_to_point(fraction),
            self.local_to_world.multiply_xy(a * c, a * s),
            self.local_to_world.multiply_xy(-b * s, b * c),
        )
    }

    /// The x axis follows the spiral's bearing, which is the direction of
    /// increasing fraction unless the active interval is reversed.
    fn fraction_to_frenet_frame(&self, fraction: f64) -> Option<Transform3> {
        let axes = self.local_to_world.rigid_axes_xyz()?;
        let (s, c) = self.fraction_to_bearing_radians(fraction).sin_cos();
        let x = axes.column(0).into_owned();
        let y = axes.column(1).into_owned();
        let z = axes.column(2).into_owned();
        let rotated = Matrix3::from_columns(&[x * c + y * s, y * c - x * s, z]);
        Some(Transform3::from_origin_and_matrix(self.fraction_to_point(fraction), rotated))
    }

    fn curve_length(&self) -> f64 {
        self.signed_fraction_scale().abs()
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "The active interval lies in [0, 1], so the count is at most 16."
    )]
    fn compute_stroke_count_for_options(&self, options: Option<&StrokeOptions>) -> usize {
        let delta = self.active_fraction_interval.signed_delta().abs();
        let count = ((DEFAULT_STROKE_COUNT as f64 * delta).ceil() as usize).max(1);
        let Some(options) = options else {
            return count;
        };
        let turning = self.active_turning_radians();
        let mut count = options.apply_angle_tol(count, turning);
        count = options.apply_max_edge_length(count, self.curve_length());
        // Every profile is monotone, so the sharpest bend is at an end. The
        // chord rule bends the whole length at that curvature.
        let max_curvature = self
            .global_fraction_to_curvature(self.active_fraction_interval.x0)
            .abs()
            .max(self.global_fraction_to_curvature(self.active_fraction_interval.x1).abs());
        if max_curvature > 0.0 {
            let length = self.curve_length();
            count = options.apply_chord_tol(count, 1.0 / max_curvature, length * max_curvature);
        }
        options.apply_min_strokes_per_primitive(count)
    }

    fn emit_strokable_parts(&self, handler: &mut dyn StrokeHandler, options: Option<&StrokeOptions>) {
        handler.start_curve_primitive(self);
        let num_strokes = self.compute_stroke_count_for_options(options);
        handler.announce_interval_for_uniform_step_strokes(self, num_strokes, 0.0, 1.0);
        handler.end_curve_primitive(self);
    }

    /// The range of the strokes, sampled four times as finely as the cache.
    fn range(&self) -> Range3 {
        let options = StrokeOptions::default().with_min_strokes_per_primitive(4 * DEFAULT_STROKE_COUNT);
        let mut strokes = Polyline::new();
        self.emit_strokes(&mut strokes, Some(&options));
        strokes.range()
    }

    fn reverse_in_place(&mut self) {
        self.active_fraction_interval.reverse_in_place();
        self.refresh_computed_properties();
    }

    /// Only rigid motions, mirrors and uniform scales are accepted.
    ///
    /// The rigid part composes into the placement, and the scale moves into
    /// the radii and length, so the placement matrix stays orthonormal.
    fn try_transform_in_place(&mut self, transform: &Transform3) -> Result<(), SpiralError> {
        let Some((rigid, scale)) = transform.factor_rigid_with_scale() else {
            log::debug!("rejecting transform without a rigid factor: {:?}", transform);
            return Err(SpiralError::NonRigidTransform);
        };
        let origin = (*transform * self.local_to_world).origin();
        self.local_to_world = Transform3::from_origin_and_matrix(origin, rigid * self.local_to_world.matrix());
        self.radius01.scale_in_place(scale);
        self.arc_length01 *= scale;
        if let Some(properties) = self.original_properties.as_mut() {
            properties.apply_scale_factor(scale);
        }
        self.refresh_computed_properties();
        Ok(())
    }

    fn is_almost_equal(&self, other: &TransitionSpiral) -> bool {
        self.spiral_type == other.spiral_type
            && self.radius01.is_almost_equal(&other.radius01)
            && self.bearing01.is_almost_equal_allow_period(&other.bearing01)
            && self
                .active_fraction_interval
                .is_almost_equal_fractions(&other.active_fraction_interval)
            && self.local_to_world.is_almost_equal(&other.local_to_world)
            && is_almost_equal_number(self.arc_length01, other.arc_length01)
    }
}
