// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized curvature profiles for transition spirals.
//!
//! A profile describes how curvature moves from its start value to its end
//! value as a function of the fraction `u` along the spiral. Everything is
//! normalized: the curvature fraction runs from 0 at `u = 0` to 1 at
//! `u = 1`, and the area is its integral from 0 to `u`.
//!
//! Each profile is symmetric about `u = 1/2`, so the area at `u = 1` is
//! exactly `1/2`. This is what makes a spiral's total sweep equal its length
//! times its average end curvature, regardless of profile.

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

use crate::SpiralError;

/// The closed family of curvature profiles, selected by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpiralType {
    /// Curvature linear in arc length: the Euler spiral.
    #[default]
    Clothoid,
    /// Cubic curvature `3u² − 2u³`, with zero curvature rate at both ends.
    Bloss,
    /// Two quadratic pieces meeting at the midpoint.
    Biquadratic,
    /// Linear curvature with a full sine wave subtracted.
    Sine,
    /// Half a cosine wave, `(1 − cos πu) / 2`.
    Cosine,
}

/// Name/variant pairs; lookup walks this table.
const REGISTRY: &[(&str, SpiralType)] = &[
    ("clothoid", SpiralType::Clothoid),
    ("bloss", SpiralType::Bloss),
    ("biquadratic", SpiralType::Biquadratic),
    ("sine", SpiralType::Sine),
    ("cosine", SpiralType::Cosine),
];

impl SpiralType {
    /// All supported profiles.
    pub const ALL: [SpiralType; 5] = [
        SpiralType::Clothoid,
        SpiralType::Bloss,
        SpiralType::Biquadratic,
        SpiralType::Sine,
        SpiralType::Cosine,
    ];

    /// Look up a profile by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<SpiralType> {
        REGISTRY
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|&(_, spiral_type)| spiral_type)
    }

    /// Resolve an optional name: `None` selects the clothoid.
    ///
    /// # Errors
    ///
    /// Returns [`SpiralError::UnsupportedSpiralType`] when the name matches
    /// no registered profile.
    pub fn from_optional_name(name: Option<&str>) -> Result<SpiralType, SpiralError> {
        match name {
            None => Ok(SpiralType::default()),
            Some(name) => {
                SpiralType::from_name(name).ok_or_else(|| SpiralError::unsupported_spiral_type(name))
            }
        }
    }

    /// The registry name.
    pub fn name(self) -> &'static str {
        match self {
            SpiralType::Clothoid => "clothoid",
            SpiralType::Bloss => "bloss",
            SpiralType::Biquadratic => "biquadratic",
            SpiralType::Sine => "sine",
            SpiralType::Cosine => "cosine",
        }
    }

    /// Integral of the curvature fraction from 0 to `u`.
    pub fn fraction_to_area(self, u: f64) -> f64 {
        match self {
            SpiralType::Clothoid => 0.5 * u * u,
            SpiralType::Bloss => u * u * u * (1.0 - 0.5 * u),
            SpiralType::Biquadratic => {
                if u <= 0.5 {
                    (2.0 / 3.0) * u * u * u
                } else {
                    let v = 1.0 - u;
                    u - 0.5 + (2.0 / 3.0) * v * v * v
                }
            }
            SpiralType::Sine => 0.5 * u * u + ((2.0 * PI * u).cos() - 1.0) / (4.0 * PI * PI),
            SpiralType::Cosine => 0.5 * (u - (PI * u).sin() / PI),
        }
    }

    /// The curvature fraction at `u`.
    pub fn fraction_to_curvature_fraction(self, u: f64) -> f64 {
        match self {
            SpiralType::Clothoid => u,
            SpiralType::Bloss => u * u * (3.0 - 2.0 * u),
            SpiralType::Biquadratic => {
                if u <= 0.5 {
                    2.0 * u * u
                } else {
                    let v = 1.0 - u;
                    1.0 - 2.0 * v * v
                }
            }
            SpiralType::Sine => u - (2.0 * PI * u).sin() / (2.0 * PI),
            SpiralType::Cosine => 0.5 * (1.0 - (PI * u).cos()),
        }
    }

    /// Derivative of the curvature fraction with respect to `u`.
    pub fn fraction_to_curvature_fraction_derivative(self, u: f64) -> f64 {
        match self {
            SpiralType::Clothoid => 1.0,
            SpiralType::Bloss => 6.0 * u * (1.0 - u),
            SpiralType::Biquadratic => {
                if u <= 0.5 {
                    4.0 * u
                } else {
                    4.0 * (1.0 - u)
                }
            }
            SpiralType::Sine => 1.0 - (2.0 * PI * u).cos(),
            SpiralType::Cosine => 0.5 * PI * (PI * u).sin(),
        }
    }
}

impl fmt::Display for SpiralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpiralType {
    type Err = SpiralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpiralType::from_name(s).ok_or_else(|| SpiralError::unsupported_spiral_type(s))
    }
}
