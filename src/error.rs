// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for spiral construction and transformation.

use alloc::string::String;

use thiserror::Error;

/// Errors reported when a spiral cannot be built or modified.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpiralError {
    /// No curvature profile is registered under this name.
    #[error("spiral type {0:?} is not supported")]
    UnsupportedSpiralType(String),

    /// More than one of the five defining properties is unknown.
    #[error("transition properties are underdetermined: {missing} of 5 values unknown")]
    Underdetermined {
        /// Number of unknown properties.
        missing: usize,
    },

    /// All five properties were given, but they violate the sweep relation.
    #[error("transition properties are inconsistent: sweep is {sweep_radians} radians, length and radii imply {expected_sweep_radians}")]
    Inconsistent {
        /// Sweep from the two bearings.
        sweep_radians: f64,
        /// Sweep implied by the length and average curvature.
        expected_sweep_radians: f64,
    },

    /// A solved quantity came out infinite or NaN.
    #[error("degenerate spiral: {reason}")]
    Degenerate {
        /// Description of the degeneracy.
        reason: String,
    },

    /// The transform is not a rotation (or mirror) times a uniform scale.
    #[error("transform is not rigid with uniform scale")]
    NonRigidTransform,
}

impl SpiralError {
    /// Create an unsupported spiral type error.
    #[must_use]
    pub fn unsupported_spiral_type(name: impl Into<String>) -> Self {
        Self::UnsupportedSpiralType(name.into())
    }

    /// Create a degenerate spiral error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }

    /// Check if this is an unsupported spiral type error.
    #[must_use]
    pub fn is_unsupported_spiral_type(&self) -> bool {
        matches!(self, Self::UnsupportedSpiralType(_))
    }

    /// Check if this error came from solving the conditional properties.
    #[must_use]
    pub fn is_unresolved_properties(&self) -> bool {
        matches!(
            self,
            Self::Underdetermined { .. } | Self::Inconsistent { .. } | Self::Degenerate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SpiralError::unsupported_spiral_type("euler");
        assert_eq!(err.to_string(), "spiral type \"euler\" is not supported");

        let err = SpiralError::Underdetermined { missing: 2 };
        assert!(err.to_string().contains("2 of 5"));

        let err = SpiralError::degenerate("zero length");
        assert!(err.to_string().contains("zero length"));
    }

    #[test]
    fn error_predicates() {
        assert!(SpiralError::unsupported_spiral_type("x").is_unsupported_spiral_type());
        assert!(!SpiralError::NonRigidTransform.is_unsupported_spiral_type());
        assert!(SpiralError::Underdetermined { missing: 3 }.is_unresolved_properties());
        assert!(!SpiralError::NonRigidTransform.is_unresolved_properties());
    }
}
