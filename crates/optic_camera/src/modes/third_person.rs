use super::pivot_view;
use crate::config::{CameraModeSettings, THIRD_PERSON};
use crate::mode::{BlendSettings, CameraMode, CameraModeClass, CameraModeContext};
use crate::view::CameraModeView;
use optic_core::CameraTag;

/// Camera on a fixed boom behind the target
///
/// The boom socket sits at the pivot plus the configured offset and extends
/// `boom_length` backwards along the view direction. No collision is done.
#[derive(Clone, Debug)]
pub struct ThirdPersonMode {
    settings: CameraModeSettings,
}

impl Default for ThirdPersonMode {
    fn default() -> Self {
        Self::new(CameraModeSettings::third_person())
    }
}

impl ThirdPersonMode {
    pub fn new(settings: CameraModeSettings) -> Self {
        Self { settings }
    }

    /// Mode class constructing instances with `settings`
    pub fn class(settings: CameraModeSettings) -> CameraModeClass {
        CameraModeClass::with_factory(move || Self::new(settings.clone()))
    }

    /// Mode class using the `third_person` entry of `config`
    pub fn from_config(config: &crate::CameraConfig) -> CameraModeClass {
        Self::class(config.mode_settings(THIRD_PERSON))
    }

    pub fn settings(&self) -> &CameraModeSettings {
        &self.settings
    }
}

impl CameraMode for ThirdPersonMode {
    fn update_view(&mut self, ctx: &CameraModeContext<'_>) -> CameraModeView {
        let mut view = pivot_view(&self.settings, ctx.target);
        let socket = view.location + self.settings.offset;
        view.location = socket - view.orientation.forward() * self.settings.boom_length;
        view
    }

    fn blend_settings(&self) -> BlendSettings {
        self.settings.blend_settings()
    }

    fn camera_type_tag(&self) -> Option<&CameraTag> {
        self.settings.tag.as_ref()
    }
}
