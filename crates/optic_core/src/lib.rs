//! Optic Core
//!
//! Math primitives shared by the Optic camera crates:
//!
//! - **Vec3**: plain 3D vector with the handful of operations camera code needs
//! - **Rotator**: yaw/pitch/roll in degrees with per-axis normalization
//! - **CameraTag**: opaque label attached to camera modes (e.g. `"aiming"`)
//! - **Scalar helpers**: `lerp`, frame-rate independent `interp_to`
//!
//! # Example
//!
//! ```rust
//! use optic_core::{Rotator, Vec3};
//!
//! let a = Rotator::new(0.0, 170.0, 0.0);
//! let b = Rotator::new(0.0, -170.0, 0.0);
//!
//! // The shortest way from 170 to -170 is +20 degrees, not -340.
//! let delta = (b - a).normalized();
//! assert!((delta.yaw - 20.0).abs() < 1e-4);
//!
//! let mid = Vec3::ZERO.lerp(Vec3::new(2.0, 0.0, 0.0), 0.5);
//! assert_eq!(mid, Vec3::new(1.0, 0.0, 0.0));
//! ```

pub mod rotator;
pub mod scalar;
pub mod tag;
pub mod vector;

pub use rotator::{clamp_angle, clamp_axis, normalize_axis, Rotator};
pub use scalar::{interp_to, lerp, KINDA_SMALL_NUMBER};
pub use tag::CameraTag;
pub use vector::Vec3;
