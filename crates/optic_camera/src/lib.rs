//! # Optic Camera
//!
//! Layered camera modes blended with a painter's algorithm.
//!
//! This crate provides:
//! - **CameraModeStack**: ordered, weighted layers of camera modes with
//!   continuity-preserving pushes and pruning of fully covered layers
//! - **CameraMode**: the trait a mode implements to produce its view, plus
//!   lifecycle hooks
//! - **CameraComponent**: per-frame driver adding recoil, zoom and control
//!   rotation write-back on top of the stack
//! - **CameraConfig**: TOML-loadable tunables with presets
//!
//! ## Quick Start
//!
//! ```rust
//! use optic_camera::prelude::*;
//!
//! struct Player {
//!     eyes: Vec3,
//!     look: Rotator,
//! }
//!
//! impl ViewTarget for Player {
//!     fn pivot_location(&self) -> Vec3 {
//!         self.eyes
//!     }
//!
//!     fn pivot_rotation(&self) -> Rotator {
//!         self.look
//!     }
//! }
//!
//! impl CameraTarget for Player {
//!     fn set_control_rotation(&mut self, rotation: Rotator) {
//!         self.look = rotation;
//!     }
//! }
//!
//! let config = CameraConfig::standard();
//! let mut camera = CameraComponent::new(&config);
//! let first_person = FirstPersonMode::from_config(&config);
//! camera.set_determine_camera_mode(move || Some(first_person.clone()));
//!
//! let mut player = Player {
//!     eyes: Vec3::new(0.0, 1.7, 0.0),
//!     look: Rotator::ZERO,
//! };
//! let view = camera.get_camera_view(1.0 / 60.0, &mut player);
//! assert_eq!(camera.get_blend_info().weight_of_top_layer, 1.0);
//! assert!((view.field_of_view - 80.0).abs() < 1e-4);
//! ```

pub mod component;
pub mod config;
pub mod debug;
pub mod error;
pub mod mode;
pub mod modes;
pub mod recoil;
pub mod stack;
pub mod view;
pub mod zoom;

pub mod prelude;

pub use component::{
    BlendInfoListener, BlendInfoListenerId, CameraComponent, CameraTarget, DesiredView,
    DetermineCameraModeFn,
};
pub use config::{CameraConfig, CameraModeSettings, RecoilConfig, ZoomConfig};
pub use debug::{LayerSnapshot, StackSnapshot};
pub use error::{ConfigError, Result};
pub use mode::{
    ActivationState, BlendSettings, CameraMode, CameraModeClass, CameraModeContext,
    CameraModeInstance, ViewTarget,
};
pub use modes::{pivot_view, FirstPersonMode, ThirdPersonMode};
pub use recoil::RecoilState;
pub use stack::{BlendInfo, CameraModeId, CameraModeStack};
pub use view::{CameraModeView, DEFAULT_FIELD_OF_VIEW};
pub use zoom::ZoomState;
