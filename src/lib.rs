// Copyright 2026 the Spiral3d Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition spirals, with a focus on road and rail alignment geometry.
//!
//! A transition spiral is a planar curve whose curvature changes smoothly
//! from one value to another, so that a vehicle can move between a straight
//! and a circular arc (or between two arcs) without a jump in lateral
//! acceleration. The best known is the clothoid, whose curvature is linear in
//! arc length; this crate also provides the Bloss, biquadratic, sine and
//! cosine profiles.
//!
//! A spiral is fixed by five quantities: its two end radii, its two end
//! bearings, and its length. They are tied by
//! `sweep = length × average curvature`, so any four determine the fifth.
//!
//! # Examples
//!
//! A spiral that eases from a 100 m radius into a straight, turning 30°:
//! ```
//! use spiral3d::{AngleSweep, CurvePrimitive, Segment1d, Transform3, TransitionSpiral};
//!
//! let spiral = TransitionSpiral::from_radius_radius_bearing_bearing(
//!     Some("clothoid"),
//!     Segment1d::new(100.0, 0.0),
//!     AngleSweep::from_start_end_degrees(0.0, 30.0),
//!     Segment1d::UNIT,
//!     Transform3::identity(),
//! )
//! .unwrap();
//! assert!((spiral.curve_length() - 104.719755).abs() < 1e-6);
//! assert!((spiral.fraction_to_curvature(0.5) - 0.005).abs() < 1e-12);
//! ```
//!
//! Solving for a missing property:
//! ```
//! use spiral3d::{Angle, TransitionConditionalProperties};
//!
//! let mut properties = TransitionConditionalProperties::new(
//!     Some(0.0),
//!     Some(200.0),
//!     Some(Angle::ZERO),
//!     None,
//!     Some(100.0),
//! );
//! assert!(properties.try_resolve_any_single_unknown());
//! let bearing1 = properties.bearing1.unwrap();
//! assert!((bearing1.radians() - 0.25).abs() < 1e-12);
//! ```
//!
//! # Features
//!
//! The `serde` feature derives `Serialize` and `Deserialize` for the value
//! types.
//!
//! # Logging
//!
//! Rejected constructions and transforms are reported at `debug` level and
//! cache refreshes at `trace` level through the [`log`] facade.
//!
//! [`log`]: https://docs.rs/log

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    reason = "Numeric code with published constants."
)]

extern crate alloc;

mod angle;
pub mod common;
mod error;
mod param_curve;
mod profile;
mod properties;
mod range;
mod ray;
mod segment;
mod spiral;
mod stroke;
mod transform;

pub use crate::angle::*;
pub use crate::error::*;
pub use crate::param_curve::*;
pub use crate::profile::*;
pub use crate::properties::*;
pub use crate::range::*;
pub use crate::ray::*;
pub use crate::segment::*;
pub use crate::spiral::*;
pub use crate::stroke::*;
pub use crate::transform::*;
