// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroking: turning curves into polylines.

use core::f64::consts::PI;

use nalgebra::Point3;
use smallvec::SmallVec;

use crate::common::SMALL_METRIC_DISTANCE;
use crate::{CurvePrimitive, Range3, Transform3};

/// Tolerances that control how finely a curve is stroked.
///
/// Every limit is optional. An unset limit imposes nothing, so the default
/// options leave the choice of stroke count entirely to the curve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeOptions {
    /// Largest turn, in radians, allowed across one stroke.
    pub angle_tol: Option<f64>,
    /// Largest distance allowed between a stroke and the curve.
    pub chord_tol: Option<f64>,
    /// Longest stroke allowed.
    pub max_edge_length: Option<f64>,
    /// Fewest strokes to emit for any one curve.
    pub min_strokes_per_primitive: Option<usize>,
}

impl StrokeOptions {
    /// Set the angle tolerance, in radians.
    #[must_use]
    pub fn with_angle_tol(mut self, angle_tol: f64) -> Self {
        self.angle_tol = Some(angle_tol);
        self
    }

    /// Set the chord tolerance.
    #[must_use]
    pub fn with_chord_tol(mut self, chord_tol: f64) -> Self {
        self.chord_tol = Some(chord_tol);
        self
    }

    /// Set the maximum edge length.
    #[must_use]
    pub fn with_max_edge_length(mut self, max_edge_length: f64) -> Self {
        self.max_edge_length = Some(max_edge_length);
        self
    }

    /// Set the minimum stroke count.
    #[must_use]
    pub fn with_min_strokes_per_primitive(mut self, count: usize) -> Self {
        self.min_strokes_per_primitive = Some(count);
        self
    }

    /// Raise `count` so that no stroke turns more than the angle tolerance.
    pub fn apply_angle_tol(&self, count: usize, sweep_radians: f64) -> usize {
        match self.angle_tol {
            Some(tol) => count.max(steps_for(sweep_radians.abs(), tol)),
            None => count,
        }
    }

    /// Raise `count` so that no stroke exceeds the maximum edge length.
    pub fn apply_max_edge_length(&self, count: usize, length: f64) -> usize {
        match self.max_edge_length {
            Some(max_length) => count.max(steps_for(length.abs(), max_length)),
            None => count,
        }
    }

    /// Raise `count` so that strokes across `sweep_radians` of a circle of
    /// `radius` stay within the chord tolerance.
    ///
    /// The sagitta of a chord subtending angle `θ` is `r (1 − cos(θ/2))`,
    /// so each stroke may turn at most `2 acos(1 − tol/r)`. That is
    /// evaluated as `4 asin(sqrt(tol / 2r))`, which keeps its precision for
    /// tolerances far below the radius.
    pub fn apply_chord_tol(&self, count: usize, radius: f64, sweep_radians: f64) -> usize {
        let Some(tol) = self.chord_tol else {
            return count;
        };
        let radius = radius.abs();
        if !(tol > 0.0 && radius > 0.0 && radius.is_finite()) {
            return count;
        }
        let half_ratio = (0.5 * tol / radius).min(1.0);
        let max_turn = (4.0 * half_ratio.sqrt().asin())
            .min(PI)
            .max(f64::MIN_POSITIVE);
        count.max(steps_for(sweep_radians.abs(), max_turn))
    }

    /// Raise `count` to the minimum stroke count.
    pub fn apply_min_strokes_per_primitive(&self, count: usize) -> usize {
        match self.min_strokes_per_primitive {
            Some(min) => count.max(min),
            None => count,
        }
    }
}

/// Most strokes any tolerance can ask of one curve.
///
/// An explicit [`StrokeOptions::min_strokes_per_primitive`] is not limited.
pub const MAX_STROKES_PER_PRIMITIVE: usize = 1 << 16;

/// Number of steps of at most `step` needed to cover `total`, up to
/// [`MAX_STROKES_PER_PRIMITIVE`].
///
/// A non-positive or non-finite step asks for nothing.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The count is clamped to `MAX_STROKES_PER_PRIMITIVE` before the cast."
)]
fn steps_for(total: f64, step: f64) -> usize {
    if !(step > 0.0 && total.is_finite()) {
        return 0;
    }
    (total / step).ceil().min(MAX_STROKES_PER_PRIMITIVE as f64) as usize
}

/// Receives the pieces a curve announces when asked to stroke itself.
///
/// A curve brackets its announcements with [`start_curve_primitive`] and
/// [`end_curve_primitive`]. Between them it reports each fraction interval
/// that should be stroked with uniform steps.
///
/// [`start_curve_primitive`]: StrokeHandler::start_curve_primitive
/// [`end_curve_primitive`]: StrokeHandler::end_curve_primitive
pub trait StrokeHandler {
    /// Called before any interval of `curve` is announced.
    fn start_curve_primitive(&mut self, _curve: &dyn CurvePrimitive) {}

    /// Stroke `curve` from `fraction0` to `fraction1` in `num_strokes`
    /// equal fraction steps.
    fn announce_interval_for_uniform_step_strokes(
        &mut self,
        curve: &dyn CurvePrimitive,
        num_strokes: usize,
        fraction0: f64,
        fraction1: f64,
    );

    /// Called after the last interval of `curve`.
    fn end_curve_primitive(&mut self, _curve: &dyn CurvePrimitive) {}
}

/// Inline capacity of a [`Polyline`]: one stroke per sixteenth, plus the start.
const INLINE_POINTS: usize = 17;

/// An ordered run of points joined by straight strokes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    points: SmallVec<[Point3<f64>; INLINE_POINTS]>,
}

impl Polyline {
    /// An empty polyline.
    pub fn new() -> Polyline {
        Polyline::default()
    }

    /// The points, in order.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at `index`, if there is one.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Point3<f64>> {
        self.points.get(index).copied()
    }

    /// The first point.
    pub fn start_point(&self) -> Option<Point3<f64>> {
        self.points.first().copied()
    }

    /// The last point.
    pub fn end_point(&self) -> Option<Point3<f64>> {
        self.points.last().copied()
    }

    /// Append a point.
    pub fn push(&mut self, p: Point3<f64>) {
        self.points.push(p);
    }

    /// Append a point unless it repeats the last one.
    pub fn push_if_distinct(&mut self, p: Point3<f64>) {
        match self.points.last() {
            Some(last) if (p - last).norm() <= SMALL_METRIC_DISTANCE => {}
            _ => self.points.push(p),
        }
    }

    /// Remove every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Apply `transform` to every point.
    pub fn transform_in_place(&mut self, transform: &Transform3) {
        for p in &mut self.points {
            *p = transform.transform_point(p);
        }
    }

    /// Total length of the strokes.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Bounding range of the points.
    pub fn range(&self) -> Range3 {
        Range3::from_points(&self.points)
    }
}

impl FromIterator<Point3<f64>> for Polyline {
    fn from_iter<T: IntoIterator<Item = Point3<f64>>>(iter: T) -> Self {
        Polyline {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point3<f64>> for Polyline {
    fn extend<T: IntoIterator<Item = Point3<f64>>>(&mut self, iter: T) {
        self.points.extend(iter);
    }
}

/// A polyline collects the strokes it is handed.
impl StrokeHandler for Polyline {
    fn announce_interval_for_uniform_step_strokes(
        &mut self,
        curve: &dyn CurvePrimitive,
        num_strokes: usize,
        fraction0: f64,
        fraction1: f64,
    ) {
        let num_strokes = num_strokes.max(1);
        for i in 0..=num_strokes {
            let t = i as f64 / num_strokes as f64;
            let fraction = fraction0 + t * (fraction1 - fraction0);
            self.push_if_distinct(curve.fraction_to_point(fraction));
        }
    }
}

/// Stroke points for the active part of a curve.
///
/// When the active part is the whole curve the curve's own full-curve
/// strokes serve, and nothing separate is stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ActiveStrokes {
    /// Same as the full-curve strokes.
    #[default]
    AliasesGlobal,
    /// Strokes computed for a proper sub-interval.
    Independent(Polyline),
}

impl ActiveStrokes {
    /// Pick the polyline that applies, given the full-curve strokes.
    pub fn resolve<'a>(&'a self, global: &'a Polyline) -> &'a Polyline {
        match self {
            ActiveStrokes::AliasesGlobal => global,
            ActiveStrokes::Independent(strokes) => strokes,
        }
    }

    /// True when no separate strokes are stored.
    pub fn is_aliased(&self) -> bool {
        matches!(self, ActiveStrokes::AliasesGlobal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_change_nothing() {
        let options = StrokeOptions::default();
        assert_eq!(options.apply_angle_tol(3, 10.0), 3);
        assert_eq!(options.apply_chord_tol(3, 1.0, 10.0), 3);
        assert_eq!(options.apply_max_edge_length(3, 100.0), 3);
        assert_eq!(options.apply_min_strokes_per_primitive(3), 3);
    }

    #[test]
    fn options_raise_counts() {
        let options = StrokeOptions::default()
            .with_angle_tol(0.1)
            .with_max_edge_length(2.0)
            .with_min_strokes_per_primitive(7);
        assert_eq!(options.apply_angle_tol(1, 1.05), 11);
        assert_eq!(options.apply_angle_tol(1, -1.05), 11);
        assert_eq!(options.apply_angle_tol(20, 1.05), 20);
        assert_eq!(options.apply_max_edge_length(1, 9.0), 5);
        assert_eq!(options.apply_min_strokes_per_primitive(2), 7);
        assert_eq!(options.apply_min_strokes_per_primitive(9), 9);
    }

    #[test]
    fn chord_tolerance() {
        // tol = r/2 allows 2 acos(1/2) = 120 degrees per stroke.
        let options = StrokeOptions::default().with_chord_tol(0.5);
        assert_eq!(options.apply_chord_tol(1, 1.0, 2.0 * PI - 0.1), 3);
        // A tolerance beyond the diameter is capped at a half turn.
        let loose = StrokeOptions::default().with_chord_tol(10.0);
        assert_eq!(loose.apply_chord_tol(1, 1.0, 2.0 * PI), 2);
        // Straight lines need nothing.
        assert_eq!(options.apply_chord_tol(1, f64::INFINITY, 0.0), 1);
        assert_eq!(options.apply_chord_tol(1, 0.0, 1.0), 1);
    }

    #[test]
    fn degenerate_steps() {
        assert_eq!(steps_for(1.0, 0.0), 0);
        assert_eq!(steps_for(1.0, -1.0), 0);
        assert_eq!(steps_for(f64::NAN, 1.0), 0);
        assert_eq!(steps_for(0.0, 1.0), 0);
        assert_eq!(steps_for(1.0, 1e-300), MAX_STROKES_PER_PRIMITIVE);
        assert_eq!(steps_for(1.0, f64::MIN_POSITIVE), MAX_STROKES_PER_PRIMITIVE);
    }

    #[test]
    fn tiny_chord_tolerance() {
        let sweep = 0.5235987755982988;
        let coarse = StrokeOptions::default().with_chord_tol(1e-4);
        let coarse_count = coarse.apply_chord_tol(1, 100.0, sweep);
        // 2 acos(1 - 1e-6) is about 2.83e-3 rad per stroke.
        assert_eq!(coarse_count, 186);
        // 1 - 1e-17 rounds to 1, but the tolerance still binds.
        let fine = StrokeOptions::default().with_chord_tol(1e-15);
        let fine_count = fine.apply_chord_tol(1, 100.0, sweep);
        assert!(fine_count > coarse_count);
        assert_eq!(fine_count, MAX_STROKES_PER_PRIMITIVE);
        // Small but representable: sqrt(8 tol / r) per stroke.
        let small = StrokeOptions::default().with_chord_tol(1e-12);
        assert_eq!(small.apply_chord_tol(1, 100.0, 1e-3), 3536);
        // Underflowing ratios hit the cap rather than asking for nothing.
        let underflow = StrokeOptions::default().with_chord_tol(1e-320);
        assert_eq!(underflow.apply_chord_tol(1, 100.0, sweep), MAX_STROKES_PER_PRIMITIVE);
    }

    #[test]
    fn polyline_basics() {
        let mut line: Polyline = [Point3::origin(), Point3::new(3.0, 4.0, 0.0)]
            .into_iter()
            .collect();
        line.push_if_distinct(Point3::new(3.0, 4.0, 0.0));
        assert_eq!(line.len(), 2);
        line.push(Point3::new(3.0, 4.0, 2.0));
        assert_eq!(line.length(), 7.0);
        assert_eq!(line.start_point(), Some(Point3::origin()));
        assert_eq!(line.end_point(), Some(Point3::new(3.0, 4.0, 2.0)));
        assert_eq!(line.range().high, Point3::new(3.0, 4.0, 2.0));

        line.transform_in_place(&Transform3::scale(2.0));
        assert_eq!(line.get(1), Some(Point3::new(6.0, 8.0, 0.0)));
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.start_point(), None);
    }

    #[test]
    fn active_strokes_resolve() {
        let global: Polyline = [Point3::origin()].into_iter().collect();
        let own: Polyline = [Point3::new(1.0, 0.0, 0.0)].into_iter().collect();
        assert_eq!(ActiveStrokes::AliasesGlobal.resolve(&global), &global);
        assert!(ActiveStrokes::default().is_aliased());
        let independent = ActiveStrokes::Independent(own.clone());
        assert_eq!(independent.resolve(&global), &own);
        assert!(!independent.is_aliased());
    }
}
