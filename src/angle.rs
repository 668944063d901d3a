// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angles and angular sweeps.

use core::f64::consts::{PI, TAU};
use core::ops::{Add, Neg, Sub};

use crate::common::{interpolate, is_same_within, SMALL_ANGLE_RADIANS};

/// Tolerance used by the `is_almost_equal` family of angle comparisons.
const ANGLE_TOLERANCE: f64 = 1.0e-10;

/// An angle, stored in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    radians: f64,
}

impl Angle {
    /// The zero angle.
    pub const ZERO: Angle = Angle { radians: 0.0 };

    /// Create an angle from radians.
    #[inline]
    pub const fn from_radians(radians: f64) -> Angle {
        Angle { radians }
    }

    /// Create an angle from degrees.
    #[inline]
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle {
            radians: degrees.to_radians(),
        }
    }

    /// The angle in radians.
    #[inline]
    pub const fn radians(self) -> f64 {
        self.radians
    }

    /// The angle in degrees.
    #[inline]
    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }

    /// The cosine and sine of the angle, in that order.
    #[inline]
    pub fn cos_sin(self) -> (f64, f64) {
        let (s, c) = self.radians.sin_cos();
        (c, s)
    }

    /// True if both angles have the same radians, within tolerance.
    pub fn is_almost_equal_no_period(self, other: Angle) -> bool {
        is_same_within(self.radians, other.radians, ANGLE_TOLERANCE)
    }

    /// True if the angles agree up to a whole number of turns.
    pub fn is_almost_equal_allow_period(self, other: Angle) -> bool {
        let delta = normalize_radians_signed(other.radians - self.radians);
        delta.abs() <= ANGLE_TOLERANCE
    }

    /// This angle shifted into `(-π, π]`.
    #[must_use]
    pub fn normalized(self) -> Angle {
        Angle::from_radians(normalize_radians_signed(self.radians))
    }
}

impl Add for Angle {
    type Output = Angle;

    #[inline]
    fn add(self, other: Angle) -> Angle {
        Angle::from_radians(self.radians + other.radians)
    }
}

impl Sub for Angle {
    type Output = Angle;

    #[inline]
    fn sub(self, other: Angle) -> Angle {
        Angle::from_radians(self.radians - other.radians)
    }
}

impl Neg for Angle {
    type Output = Angle;

    #[inline]
    fn neg(self) -> Angle {
        Angle::from_radians(-self.radians)
    }
}

/// Shift `radians` by whole turns into `(-π, π]`.
pub fn normalize_radians_signed(radians: f64) -> f64 {
    let mut r = radians % TAU;
    if r > PI {
        r -= TAU;
    } else if r <= -PI {
        r += TAU;
    }
    r
}

/// An angular interval from a start angle to an end angle.
///
/// The sweep is signed: a sweep with `end < start` runs clockwise. No
/// normalization is applied, so sweeps of more than a full turn are
/// representable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleSweep {
    start_radians: f64,
    end_radians: f64,
}

impl AngleSweep {
    /// Create a sweep from start and end angles.
    #[inline]
    pub fn from_start_end(start: Angle, end: Angle) -> AngleSweep {
        AngleSweep {
            start_radians: start.radians,
            end_radians: end.radians,
        }
    }

    /// Create a sweep from start and end radians.
    #[inline]
    pub const fn from_start_end_radians(start_radians: f64, end_radians: f64) -> AngleSweep {
        AngleSweep {
            start_radians,
            end_radians,
        }
    }

    /// Create a sweep from start and end degrees.
    pub fn from_start_end_degrees(start_degrees: f64, end_degrees: f64) -> AngleSweep {
        AngleSweep::from_start_end_radians(start_degrees.to_radians(), end_degrees.to_radians())
    }

    /// Create a sweep from a start angle and a signed sweep.
    pub fn from_start_sweep(start: Angle, sweep: Angle) -> AngleSweep {
        AngleSweep::from_start_end_radians(start.radians, start.radians + sweep.radians)
    }

    /// The start angle.
    #[inline]
    pub fn start_angle(&self) -> Angle {
        Angle::from_radians(self.start_radians)
    }

    /// The end angle.
    #[inline]
    pub fn end_angle(&self) -> Angle {
        Angle::from_radians(self.end_radians)
    }

    /// The start angle in radians.
    #[inline]
    pub fn start_radians(&self) -> f64 {
        self.start_radians
    }

    /// The end angle in radians.
    #[inline]
    pub fn end_radians(&self) -> f64 {
        self.end_radians
    }

    /// Signed sweep, `end - start`, in radians.
    #[inline]
    pub fn sweep_radians(&self) -> f64 {
        self.end_radians - self.start_radians
    }

    /// The angle at `fraction` of the way from start to end.
    #[inline]
    pub fn fraction_to_radians(&self, fraction: f64) -> f64 {
        interpolate(self.start_radians, fraction, self.end_radians)
    }

    /// Inverse of [`AngleSweep::fraction_to_radians`].
    ///
    /// Returns `None` for a zero sweep.
    pub fn radians_to_fraction(&self, radians: f64) -> Option<f64> {
        let sweep = self.sweep_radians();
        if sweep.abs() < SMALL_ANGLE_RADIANS {
            return None;
        }
        Some((radians - self.start_radians) / sweep)
    }

    /// Swap start and end.
    pub fn reverse_in_place(&mut self) {
        core::mem::swap(&mut self.start_radians, &mut self.end_radians);
    }

    /// Returns a copy with start and end swapped.
    #[must_use]
    pub fn reversed(&self) -> AngleSweep {
        AngleSweep {
            start_radians: self.end_radians,
            end_radians: self.start_radians,
        }
    }

    /// True if the starts agree up to whole turns and the sweeps agree exactly.
    pub fn is_almost_equal_allow_period(&self, other: &AngleSweep) -> bool {
        self.start_angle()
            .is_almost_equal_allow_period(other.start_angle())
            && is_same_within(self.sweep_radians(), other.sweep_radians(), ANGLE_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_radians() {
        let a = Angle::from_degrees(90.0);
        assert!((a.radians() - PI / 2.0).abs() < 1e-15);
        assert!((a.degrees() - 90.0).abs() < 1e-12);
        let (c, s) = a.cos_sin();
        assert!(c.abs() < 1e-15);
        assert!((s - 1.0).abs() < 1e-15);
    }

    #[test]
    fn period_aware_equality() {
        let a = Angle::from_degrees(10.0);
        let b = Angle::from_degrees(370.0);
        assert!(a.is_almost_equal_allow_period(b));
        assert!(!a.is_almost_equal_no_period(b));
        assert!(Angle::from_degrees(-180.0).is_almost_equal_allow_period(Angle::from_degrees(180.0)));
    }

    #[test]
    fn normalize() {
        assert!((normalize_radians_signed(2.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert!((normalize_radians_signed(-PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_radians_signed(0.5), 0.5);
        let a = Angle::from_degrees(-270.0).normalized();
        assert!((a.degrees() - 90.0).abs() < 1e-12);
        assert!(a.is_almost_equal_allow_period(Angle::from_degrees(-270.0)));
    }

    #[test]
    fn sweep_fraction_mapping() {
        let sweep = AngleSweep::from_start_end_degrees(30.0, -60.0);
        assert!((sweep.sweep_radians() + PI / 2.0).abs() < 1e-14);
        let mid = sweep.fraction_to_radians(0.5);
        assert!((mid.to_degrees() + 15.0).abs() < 1e-12);
        let f = sweep.radians_to_fraction(mid).unwrap();
        assert!((f - 0.5).abs() < 1e-14);
        assert!(AngleSweep::from_start_end_radians(1.0, 1.0)
            .radians_to_fraction(1.0)
            .is_none());
    }

    #[test]
    fn sweep_reversal() {
        let mut sweep = AngleSweep::from_start_end_radians(0.25, 1.0);
        sweep.reverse_in_place();
        assert_eq!(sweep.start_radians(), 1.0);
        assert_eq!(sweep.end_radians(), 0.25);
        assert_eq!(sweep.reversed(), AngleSweep::from_start_end_radians(0.25, 1.0));
    }

    #[test]
    fn sweep_from_start_and_sweep() {
        let sweep = AngleSweep::from_start_sweep(Angle::from_degrees(350.0), Angle::from_degrees(-400.0));
        assert!((sweep.start_angle().degrees() - 350.0).abs() < 1e-12);
        assert!((sweep.end_angle().degrees() + 50.0).abs() < 1e-12);
        // The sweep is kept as given, not wrapped.
        assert!((sweep.sweep_radians().to_degrees() + 400.0).abs() < 1e-12);
    }

    #[test]
    fn sweep_equality_allows_shifted_start() {
        let a = AngleSweep::from_start_end_degrees(0.0, 45.0);
        let b = AngleSweep::from_start_end_degrees(360.0, 405.0);
        let c = AngleSweep::from_start_end_degrees(0.0, 405.0);
        assert!(a.is_almost_equal_allow_period(&b));
        assert!(!a.is_almost_equal_allow_period(&c));
    }
}
