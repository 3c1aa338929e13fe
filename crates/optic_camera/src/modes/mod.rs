//! Built-in camera modes
//!
//! Reference modes driven by [`CameraModeSettings`]. Both start from
//! [`pivot_view`] and add their own placement on top.

mod first_person;
mod third_person;

pub use first_person::FirstPersonMode;
pub use third_person::ThirdPersonMode;

use crate::config::CameraModeSettings;
use crate::mode::ViewTarget;
use crate::view::CameraModeView;
use optic_core::{clamp_angle, Rotator};

/// Default view of a mode: the target's pivot with pitch limited
///
/// The control orientation matches the clamped orientation, so writing it back
/// keeps the controller inside the same pitch limits.
pub fn pivot_view(settings: &CameraModeSettings, target: &dyn ViewTarget) -> CameraModeView {
    let pivot = target.pivot_rotation();
    let pitch = clamp_angle(pivot.pitch, settings.view_pitch_min, settings.view_pitch_max);
    let orientation = Rotator::new(pitch, pivot.yaw, pivot.roll);

    CameraModeView::new(target.pivot_location(), orientation, settings.field_of_view)
}
