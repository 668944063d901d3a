// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional segments.

use crate::common::{interpolate, is_almost_equal_number, is_same_within, SMALL_FRACTION};

/// A directed interval `x0 -> x1` on the real line.
///
/// Nothing requires `x0 <= x1`; a reversed segment maps fraction 0 to the
/// larger value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment1d {
    /// Value at fraction 0.
    pub x0: f64,
    /// Value at fraction 1.
    pub x1: f64,
}

impl Default for Segment1d {
    fn default() -> Self {
        Segment1d::UNIT
    }
}

impl Segment1d {
    /// The interval `[0, 1]`.
    pub const UNIT: Segment1d = Segment1d::new(0.0, 1.0);

    /// Create a segment from its endpoints.
    #[inline]
    pub const fn new(x0: f64, x1: f64) -> Segment1d {
        Segment1d { x0, x1 }
    }

    /// The value at `fraction` along the segment.
    #[inline]
    pub fn fraction_to_point(&self, fraction: f64) -> f64 {
        interpolate(self.x0, fraction, self.x1)
    }

    /// The fraction at which the segment reaches `x`.
    ///
    /// Returns `None` for a zero-length segment.
    pub fn point_to_fraction(&self, x: f64) -> Option<f64> {
        let delta = self.signed_delta();
        if delta == 0.0 {
            return None;
        }
        Some((x - self.x0) / delta)
    }

    /// `x1 - x0`.
    #[inline]
    pub fn signed_delta(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Swap the endpoints.
    pub fn reverse_in_place(&mut self) {
        core::mem::swap(&mut self.x0, &mut self.x1);
    }

    /// Returns a copy with the endpoints swapped.
    #[must_use]
    #[inline]
    pub fn reversed(&self) -> Segment1d {
        Segment1d::new(self.x1, self.x0)
    }

    /// True if this is exactly `[0, 1]`, with no tolerance.
    #[inline]
    pub fn is_exact01(&self) -> bool {
        self.x0 == 0.0 && self.x1 == 1.0
    }

    /// True if both endpoints lie within `[0, 1]`, in either order.
    pub fn is_in_01(&self) -> bool {
        (0.0..=1.0).contains(&self.x0) && (0.0..=1.0).contains(&self.x1)
    }

    /// Multiply both endpoints by `scale`.
    pub fn scale_in_place(&mut self, scale: f64) {
        self.x0 *= scale;
        self.x1 *= scale;
    }

    /// Apply `f` to both endpoints.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Segment1d {
        Segment1d::new(f(self.x0), f(self.x1))
    }

    /// The subinterval between `fraction0` and `fraction1` of this segment.
    #[must_use]
    pub fn sub_segment(&self, fraction0: f64, fraction1: f64) -> Segment1d {
        Segment1d::new(
            self.fraction_to_point(fraction0),
            self.fraction_to_point(fraction1),
        )
    }

    /// Endpoint comparison with a tolerance relative to their size.
    pub fn is_almost_equal(&self, other: &Segment1d) -> bool {
        is_almost_equal_number(self.x0, other.x0) && is_almost_equal_number(self.x1, other.x1)
    }

    /// Endpoint comparison with the fraction tolerance, for parameter intervals.
    pub fn is_almost_equal_fractions(&self, other: &Segment1d) -> bool {
        is_same_within(self.x0, other.x0, SMALL_FRACTION)
            && is_same_within(self.x1, other.x1, SMALL_FRACTION)
    }
}
