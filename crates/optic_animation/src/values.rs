//! Interpolatable value types
//!
//! Camera layers are composited by interpolating every field of a view
//! toward the next layer. Rotations take the shortest way around.

use optic_core::{lerp, Rotator, Vec3};

/// Trait for values that can be interpolated toward another value
pub trait Interpolate: Clone {
    /// Interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        lerp(*self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Vec3 Implementation
// ============================================================================

impl Interpolate for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

// ============================================================================
// Rotator Implementation
// ============================================================================

impl Interpolate for Rotator {
    /// Shortest-path blend: the per-axis delta is wrapped into (-180, 180]
    /// before scaling, and the result is wrapped again.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let from = self.normalized();
        let delta = (other.normalized() - from).normalized();
        (from + delta * t).normalized()
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.equals(other, epsilon)
    }
}
