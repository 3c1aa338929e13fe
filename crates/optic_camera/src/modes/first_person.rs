use super::pivot_view;
use crate::config::{CameraModeSettings, FIRST_PERSON};
use crate::mode::{BlendSettings, CameraMode, CameraModeClass, CameraModeContext};
use crate::view::CameraModeView;
use optic_core::CameraTag;

/// Camera at the target's eyes
///
/// Places the camera at the pivot plus a fixed world-space eye offset.
#[derive(Clone, Debug)]
pub struct FirstPersonMode {
    settings: CameraModeSettings,
}

impl Default for FirstPersonMode {
    fn default() -> Self {
        Self::new(CameraModeSettings::first_person())
    }
}

impl FirstPersonMode {
    pub fn new(settings: CameraModeSettings) -> Self {
        Self { settings }
    }

    /// Mode class constructing instances with `settings`
    pub fn class(settings: CameraModeSettings) -> CameraModeClass {
        CameraModeClass::with_factory(move || Self::new(settings.clone()))
    }

    /// Mode class using the `first_person` entry of `config`
    pub fn from_config(config: &crate::CameraConfig) -> CameraModeClass {
        Self::class(config.mode_settings(FIRST_PERSON))
    }

    pub fn settings(&self) -> &CameraModeSettings {
        &self.settings
    }
}

impl CameraMode for FirstPersonMode {
    fn update_view(&mut self, ctx: &CameraModeContext<'_>) -> CameraModeView {
        let mut view = pivot_view(&self.settings, ctx.target);
        view.location += self.settings.offset;
        view
    }

    fn blend_settings(&self) -> BlendSettings {
        self.settings.blend_settings()
    }

    fn camera_type_tag(&self) -> Option<&CameraTag> {
        self.settings.tag.as_ref()
    }

    fn on_activated(&mut self) {
        tracing::trace!("first person camera in control");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::test_support::Pivot;
    use optic_core::{Rotator, Vec3};

    #[test]
    fn test_eye_offset() {
        let mut mode = FirstPersonMode::default();
        let target = Pivot {
            location: Vec3::new(0.0, 1.7, 0.0),
            rotation: Rotator::new(10.0, 90.0, 0.0),
        };
        let ctx = CameraModeContext {
            dt: 0.016,
            target: &target,
        };

        let view = mode.update_view(&ctx);
        assert!((view.location.y - 1.8).abs() < 1e-5);
        assert_eq!(view.orientation, Rotator::new(10.0, 90.0, 0.0));
        assert_eq!(
            mode.camera_type_tag(),
            Some(&CameraTag::new("camera.first_person"))
        );
        assert_eq!(mode.blend_settings().blend_time, 0.25);
    }
}
