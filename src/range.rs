// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned 3D ranges.

use nalgebra::Point3;

/// An axis-aligned box, accumulated from points.
///
/// The empty range has `low > high` on every axis, so that the first
/// [`Range3::union_pt`] makes it the single-point range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range3 {
    /// Minimum corner.
    pub low: Point3<f64>,
    /// Maximum corner.
    pub high: Point3<f64>,
}

impl Default for Range3 {
    fn default() -> Self {
        Range3::empty()
    }
}

impl Range3 {
    /// The range containing no points.
    pub fn empty() -> Range3 {
        Range3 {
            low: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            high: Point3::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    /// The smallest range containing all the points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Range3 {
        points
            .into_iter()
            .fold(Range3::empty(), |range, p| range.union_pt(p))
    }

    /// True if no point has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.low.x > self.high.x
    }

    /// Compute the union with one point.
    #[must_use]
    pub fn union_pt(&self, p: &Point3<f64>) -> Range3 {
        Range3 {
            low: self.low.inf(p),
            high: self.high.sup(p),
        }
    }

    /// Compute the union of two ranges.
    #[must_use]
    pub fn union(&self, other: &Range3) -> Range3 {
        Range3 {
            low: self.low.inf(&other.low),
            high: self.high.sup(&other.high),
        }
    }

    /// True if `p` is inside or on the boundary.
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| self.low[i] <= p[i] && p[i] <= self.high[i])
    }

    /// The largest extent over the three axes, zero when empty.
    pub fn max_abs_extent(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (self.high - self.low).amax()
    }
}
