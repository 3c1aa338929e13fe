//! Camera mode view
//!
//! The pose a single camera mode produces each frame, and the weighted blend
//! used to composite one layer over another.

use optic_animation::Interpolate;
use optic_core::{Rotator, Vec3};
use serde::{Deserialize, Serialize};

/// Default vertical field of view in degrees
pub const DEFAULT_FIELD_OF_VIEW: f32 = 80.0;

/// A complete, renderable camera pose
///
/// Recomputed from scratch every tick by the owning mode. Rotations are kept
/// with every axis in `(-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraModeView {
    /// World position of the camera
    pub location: Vec3,
    /// Orientation of the camera itself
    pub orientation: Rotator,
    /// Orientation written back to whatever controls the view target
    pub control_orientation: Rotator,
    /// Vertical field of view in degrees
    pub field_of_view: f32,
}

impl Default for CameraModeView {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            orientation: Rotator::ZERO,
            control_orientation: Rotator::ZERO,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
        }
    }
}

impl CameraModeView {
    pub fn new(location: Vec3, orientation: Rotator, field_of_view: f32) -> Self {
        let orientation = orientation.normalized();
        Self {
            location,
            orientation,
            control_orientation: orientation,
            field_of_view,
        }
    }

    /// Blend `other` over this view with weight `other_weight`
    ///
    /// A weight of zero (or NaN) leaves the view untouched and a weight of one
    /// or more replaces it. In between, location and field of view are linear
    /// and both rotations move along the shortest arc per axis.
    pub fn blend(&mut self, other: &CameraModeView, other_weight: f32) {
        if other_weight.is_nan() || other_weight <= 0.0 {
            return;
        }
        if other_weight >= 1.0 {
            *self = *other;
            return;
        }

        self.location = self.location.lerp(other.location, other_weight);
        self.orientation = self.orientation.lerp(&other.orientation, other_weight);
        self.control_orientation = self
            .control_orientation
            .lerp(&other.control_orientation, other_weight);
        self.field_of_view += (other.field_of_view - self.field_of_view) * other_weight;
    }

    /// True when every field is finite
    pub fn is_finite(&self) -> bool {
        self.location.is_finite()
            && self.orientation.is_finite()
            && self.control_orientation.is_finite()
            && self.field_of_view.is_finite()
    }
}
