//! Scalar helpers

/// Threshold under which two floats are treated as the same value
pub const KINDA_SMALL_NUMBER: f32 = 1.0e-4;

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` toward `target` at a rate proportional to the remaining distance
///
/// `speed <= 0` snaps to the target. The step never overshoots: the blend factor
/// `dt * speed` is clamped to `[0, 1]`.
pub fn interp_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist * dist < KINDA_SMALL_NUMBER * KINDA_SMALL_NUMBER {
        return target;
    }

    current + dist * (dt * speed).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_to_converges_without_overshoot() {
        let mut v = 0.0;
        for _ in 0..600 {
            let next = interp_to(v, 10.0, 1.0 / 60.0, 5.0);
            assert!(next >= v);
            assert!(next <= 10.0);
            v = next;
        }
        assert!((v - 10.0).abs() <= 1e-3);
    }

    #[test]
    fn test_interp_to_snaps_with_zero_speed() {
        assert_eq!(interp_to(1.0, 4.0, 0.016, 0.0), 4.0);
    }

    #[test]
    fn test_interp_to_large_step_is_clamped() {
        assert_eq!(interp_to(0.0, 2.0, 10.0, 5.0), 2.0);
    }
}
