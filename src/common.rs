// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations: tolerances, clamping, and quadrature.

use arrayvec::ArrayVec;

/// Distance below which two coordinates are considered equal.
pub const SMALL_METRIC_DISTANCE: f64 = 1.0e-6;

/// Angle below which two angles are considered equal, and below which a
/// curvature is treated as zero.
pub const SMALL_ANGLE_RADIANS: f64 = 1.0e-12;

/// Tolerance for comparing fractions and other dimensionless numbers.
pub const SMALL_FRACTION: f64 = 1.0e-10;

/// Relative tolerance for comparing arbitrary scalars.
const SMALL_RELATIVE: f64 = 1.0e-10;

/// Returns true if `a` and `b` differ by no more than `tol`.
#[inline]
pub fn is_same_within(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Returns true if `a` and `b` agree to a tolerance relative to their size.
///
/// The tolerance never drops below [`SMALL_METRIC_DISTANCE`], so values near
/// zero compare as coordinates would.
#[inline]
pub fn is_almost_equal_number(a: f64, b: f64) -> bool {
    let tol = SMALL_METRIC_DISTANCE.max(SMALL_RELATIVE * a.abs().max(b.abs()));
    is_same_within(a, b, tol)
}

/// Returns true if `x` is within [`SMALL_ANGLE_RADIANS`] of zero.
#[inline]
pub fn is_small_angle_radians(x: f64) -> bool {
    x.abs() < SMALL_ANGLE_RADIANS
}

/// Interpolate between `a` and `b` at fraction `t`.
///
/// The formula is chosen so that `t = 0` and `t = 1` reproduce the
/// endpoints exactly.
#[inline]
pub fn interpolate(a: f64, t: f64, b: f64) -> f64 {
    if t <= 0.5 {
        a + t * (b - a)
    } else {
        b - (1.0 - t) * (b - a)
    }
}

/// Legendre-Gauss quadrature coefficients as (weight, abscissa) on `[-1, 1]`,
/// adapted from:
/// <https://pomax.github.io/bezierinfo/legendre-gauss.html>
pub const GAUSS_LEGENDRE_COEFFS_5: &[(f64, f64)] = &[
    (0.5688888888888889, 0.0000000000000000),
    (0.4786286704993665, -0.5384693101056831),
    (0.4786286704993665, 0.5384693101056831),
    (0.2369268850561891, -0.9061798459386640),
    (0.2369268850561891, 0.9061798459386640),
];

/// Map the 5-point Gauss-Legendre rule onto the interval `x0..x1`.
///
/// Returns `(x, weight)` pairs, ordered by increasing `x` when `x0 < x1`.
/// The weights sum to `x1 - x0`, so a reversed interval integrates with
/// negative sign, and an empty interval contributes nothing.
pub fn gauss_legendre_5(x0: f64, x1: f64) -> ArrayVec<(f64, f64), 5> {
    let mut result = ArrayVec::new();
    let half = 0.5 * (x1 - x0);
    let mid = 0.5 * (x0 + x1);
    // Visit the table in abscissa order; the table itself is sorted by weight.
    for &i in &[3usize, 1, 0, 2, 4] {
        let (wi, xi) = GAUSS_LEGENDRE_COEFFS_5[i];
        result.push((mid + half * xi, half * wi));
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::common::*;

    #[test]
    fn gauss_weights_sum_to_interval() {
        let samples = gauss_legendre_5(0.25, 0.75);
        assert_eq!(samples.len(), 5);
        let total: f64 = samples.iter().map(|(_, w)| w).sum();
        assert!((total - 0.5).abs() < 1e-14);
        for (x, _) in &samples {
            assert!((0.25..=0.75).contains(x));
        }
        for pair in samples.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn gauss_integrates_degree_9_exactly() {
        // A 5-point rule is exact for polynomials up to degree 9.
        let f = |x: f64| 3.0 * x.powi(9) - x.powi(4) + 2.0;
        let exact = |x: f64| 0.3 * x.powi(10) - 0.2 * x.powi(5) + 2.0 * x;
        let (a, b) = (-0.3, 1.7);
        let sum: f64 = gauss_legendre_5(a, b).iter().map(|&(x, w)| w * f(x)).sum();
        assert!((sum - (exact(b) - exact(a))).abs() < 1e-10);
    }

    #[test]
    fn gauss_reversed_interval_negates() {
        let forward: f64 = gauss_legendre_5(0.0, 1.0)
            .iter()
            .map(|&(x, w)| w * x.cos())
            .sum();
        let backward: f64 = gauss_legendre_5(1.0, 0.0)
            .iter()
            .map(|&(x, w)| w * x.cos())
            .sum();
        assert!((forward + backward).abs() < 1e-14);
        assert!((forward - 1f64.sin()).abs() < 1e-10);
    }

    #[test]
    fn empty_interval_has_zero_weight() {
        for (x, w) in gauss_legendre_5(0.5, 0.5) {
            assert_eq!(x, 0.5);
            assert_eq!(w, 0.0);
        }
    }

    #[test]
    fn interpolate_hits_endpoints() {
        assert_eq!(interpolate(3.0, 0.0, 7.0), 3.0);
        assert_eq!(interpolate(3.0, 1.0, 7.0), 7.0);
        assert_eq!(interpolate(3.0, 0.25, 7.0), 4.0);
    }

    #[test]
    fn almost_equal_number_is_relative() {
        assert!(is_almost_equal_number(1.0e9, 1.0e9 + 1.0e-3));
        assert!(!is_almost_equal_number(1.0, 1.0 + 1.0e-3));
        assert!(is_almost_equal_number(0.0, 1.0e-8));
    }
}
