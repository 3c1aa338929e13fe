//! Common imports for camera code

pub use crate::component::{CameraComponent, CameraTarget, DesiredView};
pub use crate::config::{CameraConfig, CameraModeSettings};
pub use crate::mode::{
    ActivationState, BlendSettings, CameraMode, CameraModeClass, CameraModeContext, ViewTarget,
};
pub use crate::modes::{FirstPersonMode, ThirdPersonMode};
pub use crate::stack::{BlendInfo, CameraModeStack};
pub use crate::view::CameraModeView;
pub use optic_animation::BlendFunction;
pub use optic_core::{CameraTag, Rotator, Vec3};
