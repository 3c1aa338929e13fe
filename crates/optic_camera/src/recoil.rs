//! Recoil suppression
//!
//! Recoil is a view-only rotation offset. Kicks raise a target offset that
//! decays back to rest, and the applied offset chases that target. Rotation
//! input from the player that opposes the applied offset eats into it, so
//! pulling down against a kick cancels it instead of fighting it.

use crate::config::RecoilConfig;
use optic_core::{interp_to, Rotator, KINDA_SMALL_NUMBER};

/// Outstanding recoil of a camera
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecoilState {
    /// Offset the applied recoil is chasing; decays toward zero
    target: Rotator,
    /// Offset applied to the view this frame
    current: Rotator,
    config: RecoilConfig,
}

impl RecoilState {
    pub fn new(config: RecoilConfig) -> Self {
        Self {
            target: Rotator::ZERO,
            current: Rotator::ZERO,
            config,
        }
    }

    /// Add a kick; pitch and yaw accumulate, roll is ignored
    pub fn add_recoil(&mut self, kick: Rotator) {
        self.target.pitch += kick.pitch;
        self.target.yaw += kick.yaw;
    }

    pub fn target(&self) -> Rotator {
        self.target
    }

    pub fn current(&self) -> Rotator {
        self.current
    }

    pub fn config(&self) -> &RecoilConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RecoilConfig) {
        self.config = config;
    }

    /// Whether any recoil is still outstanding
    pub fn is_active(&self) -> bool {
        [self.target.pitch, self.target.yaw, self.current.pitch, self.current.yaw]
            .iter()
            .any(|v| v.abs() > KINDA_SMALL_NUMBER)
    }

    /// Drop all outstanding recoil
    pub fn reset(&mut self) {
        self.target = Rotator::ZERO;
        self.current = Rotator::ZERO;
    }

    /// Advance recoil by `dt` given this frame's player rotation input
    ///
    /// Returns the offset to add to the view orientation.
    pub fn update(&mut self, dt: f32, input: Rotator) -> Rotator {
        let cancelled_pitch = cancel_axis(&mut self.current.pitch, input.pitch);
        let cancelled_yaw = cancel_axis(&mut self.current.yaw, input.yaw);
        move_toward_zero(&mut self.target.pitch, cancelled_pitch);
        move_toward_zero(&mut self.target.yaw, cancelled_yaw);

        let recovery = self.config.recovery_speed;
        self.target.pitch = interp_to(self.target.pitch, 0.0, dt, recovery);
        self.target.yaw = interp_to(self.target.yaw, 0.0, dt, recovery);

        let speed = self.config.interp_speed;
        self.current.pitch = interp_to(self.current.pitch, self.target.pitch, dt, speed);
        self.current.yaw = interp_to(self.current.yaw, self.target.yaw, dt, speed);

        self.current
    }
}

/// Cancel the part of `offset` opposed by `input`, returning the amount removed
fn cancel_axis(offset: &mut f32, input: f32) -> f32 {
    if input == 0.0 || *offset == 0.0 || input.signum() == offset.signum() {
        return 0.0;
    }

    let amount = input.abs().min(offset.abs());
    move_toward_zero(offset, amount);
    amount
}

fn move_toward_zero(value: &mut f32, amount: f32) {
    if *value > 0.0 {
        *value = (*value - amount).max(0.0);
    } else if *value < 0.0 {
        *value = (*value + amount).min(0.0);
    }
}
