//! Euler rotation in degrees
//!
//! Camera orientation is stored as yaw/pitch/roll rather than a quaternion:
//! pitch limits and per-axis recoil offsets are expressed directly on the
//! angles, and blending works on the wrapped per-axis delta.

use crate::vector::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Wrap an angle in degrees into `(-180, 180]`
pub fn normalize_axis(angle: f32) -> f32 {
    let mut a = clamp_axis(angle);
    if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Wrap an angle in degrees into `[0, 360)`
pub fn clamp_axis(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    // -tiny + 360 rounds to exactly 360 in f32
    if a >= 360.0 {
        a -= 360.0;
    }
    a
}

/// Clamp an angle to the arc `[min, max]`, all in degrees
///
/// Works on the wrapped circle: `clamp_angle(350.0, -20.0, 20.0)` is `-10.0`.
pub fn clamp_angle(angle: f32, min: f32, max: f32) -> f32 {
    let max_delta = (max - min).clamp(0.0, 360.0) * 0.5;
    let range_center = clamp_axis(min + max_delta);
    let delta_from_center = normalize_axis(angle - range_center);

    if delta_from_center > max_delta {
        normalize_axis(range_center + max_delta)
    } else if delta_from_center < -max_delta {
        normalize_axis(range_center - max_delta)
    } else {
        normalize_axis(angle)
    }
}

/// Rotation as pitch/yaw/roll in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    /// Rotation around the right axis (looking up is positive)
    pub pitch: f32,
    /// Rotation around the up axis
    pub yaw: f32,
    /// Rotation around the forward axis
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Copy with every axis wrapped into `(-180, 180]`
    pub fn normalized(&self) -> Self {
        Self {
            pitch: normalize_axis(self.pitch),
            yaw: normalize_axis(self.yaw),
            roll: normalize_axis(self.roll),
        }
    }

    /// True when every axis already lies in `(-180, 180]`
    pub fn is_normalized(&self) -> bool {
        let in_range = |a: f32| a > -180.0 && a <= 180.0;
        in_range(self.pitch) && in_range(self.yaw) && in_range(self.roll)
    }

    /// Unit view direction for this rotation (roll has no effect)
    pub fn forward(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Per-axis comparison on the wrapped circle
    pub fn equals(&self, other: &Rotator, tolerance: f32) -> bool {
        let d = (*self - *other).normalized();
        d.pitch.abs() <= tolerance && d.yaw.abs() <= tolerance && d.roll.abs() <= tolerance
    }

    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite() && self.roll.is_finite()
    }
}

impl Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl AddAssign for Rotator {
    fn add_assign(&mut self, rhs: Rotator) {
        self.pitch += rhs.pitch;
        self.yaw += rhs.yaw;
        self.roll += rhs.roll;
    }
}

impl Sub for Rotator {
    type Output = Rotator;

    fn sub(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch - rhs.pitch, self.yaw - rhs.yaw, self.roll - rhs.roll)
    }
}

impl Mul<f32> for Rotator {
    type Output = Rotator;

    fn mul(self, rhs: f32) -> Rotator {
        Rotator::new(self.pitch * rhs, self.yaw * rhs, self.roll * rhs)
    }
}

impl Neg for Rotator {
    type Output = Rotator;

    fn neg(self) -> Rotator {
        Rotator::new(-self.pitch, -self.yaw, -self.roll)
    }
}

impl fmt::Display for Rotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P={:.2} Y={:.2} R={:.2}",
            self.pitch, self.yaw, self.roll
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_normalize_axis_range() {
        assert!((normalize_axis(0.0) - 0.0).abs() < EPS);
        assert!((normalize_axis(180.0) - 180.0).abs() < EPS);
        assert!((normalize_axis(-180.0) - 180.0).abs() < EPS);
        assert!((normalize_axis(190.0) + 170.0).abs() < EPS);
        assert!((normalize_axis(-190.0) - 170.0).abs() < EPS);
        assert!((normalize_axis(720.0 + 45.0) - 45.0).abs() < EPS);
        assert!((normalize_axis(-725.0) + 5.0).abs() < EPS);
    }

    #[test]
    fn test_clamp_axis_never_returns_360() {
        let a = clamp_axis(-1e-9);
        assert!((0.0..360.0).contains(&a));
    }

    #[test]
    fn test_clamp_angle() {
        assert!((clamp_angle(45.0, -89.0, 89.0) - 45.0).abs() < EPS);
        assert!((clamp_angle(95.0, -89.0, 89.0) - 89.0).abs() < EPS);
        assert!((clamp_angle(-120.0, -89.0, 89.0) + 89.0).abs() < EPS);
        // 350 is -10 on the wrapped circle
        assert!((clamp_angle(350.0, -20.0, 20.0) + 10.0).abs() < EPS);
    }

    #[test]
    fn test_normalized_delta_takes_short_way() {
        let a = Rotator::new(10.0, 170.0, 0.0);
        let b = Rotator::new(-10.0, -170.0, 0.0);
        let d = (b - a).normalized();
        assert!((d.yaw - 20.0).abs() < EPS);
        assert!((d.pitch + 20.0).abs() < EPS);
    }

    #[test]
    fn test_forward_default_is_negative_z() {
        let f = Rotator::ZERO.forward();
        assert!((f.z + 1.0).abs() < EPS);
        assert!(f.x.abs() < EPS && f.y.abs() < EPS);

        let up = Rotator::new(90.0, 0.0, 0.0).forward();
        assert!((up.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_equals_wraps() {
        let a = Rotator::new(0.0, 179.9, 0.0);
        let b = Rotator::new(0.0, -179.9, 0.0);
        assert!(a.equals(&b, 0.5));
        assert!(!a.equals(&Rotator::ZERO, 0.5));
    }
}
