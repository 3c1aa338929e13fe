//! Optic Animation
//!
//! Blend curves and interpolation used to fade camera layers in and out.
//!
//! # Features
//!
//! - **Blend Functions**: closed set of curves (linear, ease-in, ease-out,
//!   ease-in-out) parameterized by an exponent
//! - **Curve Inversion**: solve for the progress that produces a given weight,
//!   so a blend can be resumed from an arbitrary visibility
//! - **Interpolation**: `Interpolate` for scalars, vectors and rotators, with
//!   shortest-path rotation blending

pub mod easing;
pub mod values;

pub use easing::{sanitize_exponent, BlendFunction};
pub use values::Interpolate;
