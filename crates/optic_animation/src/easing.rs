//! Blend curves
//!
//! A layer's raw progress (`alpha`, elapsed / duration) is mapped through a
//! [`BlendFunction`] to the weight actually used for compositing. The mapping
//! is invertible so a weight can be assigned directly and progress resumed
//! from there.

use serde::{Deserialize, Serialize};

/// Curve mapping blend progress to blend weight
///
/// The set is closed: every `match` over it is exhaustive, so adding a curve
/// is a compile error everywhere it needs handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendFunction {
    /// Weight equals progress
    Linear,
    /// Slow start, fast end (`alpha^exp`)
    EaseIn,
    /// Fast start, slow end (`1 - (1 - alpha)^exp`)
    #[default]
    EaseOut,
    /// Slow start and end, ease-in below one half and ease-out above
    EaseInOut,
}

/// Replace a non-positive (or NaN) exponent with `1.0`
pub fn sanitize_exponent(exponent: f32) -> f32 {
    if exponent > 0.0 {
        exponent
    } else {
        1.0
    }
}

#[inline]
fn ease_in(t: f32, exponent: f32) -> f32 {
    t.powf(exponent)
}

#[inline]
fn ease_out(t: f32, exponent: f32) -> f32 {
    1.0 - (1.0 - t).powf(exponent)
}

#[inline]
fn ease_in_out(t: f32, exponent: f32) -> f32 {
    if t < 0.5 {
        0.5 * ease_in(t * 2.0, exponent)
    } else {
        0.5 + 0.5 * ease_out(t * 2.0 - 1.0, exponent)
    }
}

impl BlendFunction {
    /// All curves, in declaration order
    pub const ALL: [BlendFunction; 4] = [
        BlendFunction::Linear,
        BlendFunction::EaseIn,
        BlendFunction::EaseOut,
        BlendFunction::EaseInOut,
    ];

    /// Map blend progress in `[0, 1]` to a blend weight in `[0, 1]`
    pub fn evaluate(self, alpha: f32, exponent: f32) -> f32 {
        self.apply(alpha, sanitize_exponent(exponent))
    }

    /// Solve for the progress that [`evaluate`](Self::evaluate) maps to `weight`
    ///
    /// Each curve family is its own inverse under the reciprocal exponent.
    pub fn invert(self, weight: f32, exponent: f32) -> f32 {
        self.apply(weight, 1.0 / sanitize_exponent(exponent))
    }

    fn apply(self, t: f32, exponent: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            BlendFunction::Linear => t,
            BlendFunction::EaseIn => ease_in(t, exponent),
            BlendFunction::EaseOut => ease_out(t, exponent),
            BlendFunction::EaseInOut => ease_in_out(t, exponent),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlendFunction::Linear => "linear",
            BlendFunction::EaseIn => "ease_in",
            BlendFunction::EaseOut => "ease_out",
            BlendFunction::EaseInOut => "ease_in_out",
        }
    }
}
