//! Camera configuration
//!
//! Tunables for recoil, zoom, debug output and the built-in camera modes,
//! loadable from TOML:
//!
//! ```toml
//! debug_stack = false
//!
//! [recoil]
//! recovery_speed = 8.0
//! interp_speed = 20.0
//!
//! [zoom]
//! interp_speed = 10.0
//! min_zoom = 0.5
//! max_zoom = 8.0
//!
//! [modes.third_person]
//! blend_time = 0.5
//! blend_function = "ease_out"
//! blend_exponent = 4.0
//! boom_length = 4.0
//! offset = { x = 0.0, y = 1.5, z = 0.0 }
//! ```

use crate::error::{ConfigError, Result};
use crate::mode::BlendSettings;
use crate::view::DEFAULT_FIELD_OF_VIEW;
use optic_animation::BlendFunction;
use optic_core::{CameraTag, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Key of the first person mode in [`CameraConfig::modes`]
pub const FIRST_PERSON: &str = "first_person";
/// Key of the third person mode in [`CameraConfig::modes`]
pub const THIRD_PERSON: &str = "third_person";

/// Recoil recovery tunables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoilConfig {
    /// Rate at which the outstanding recoil target decays to rest (1/s)
    pub recovery_speed: f32,
    /// Rate at which the applied recoil follows its target (1/s)
    pub interp_speed: f32,
}

impl Default for RecoilConfig {
    fn default() -> Self {
        Self {
            recovery_speed: 8.0,
            interp_speed: 20.0,
        }
    }
}

/// Zoom tunables
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Rate at which the zoom amount follows its target (1/s), `0` snaps
    pub interp_speed: f32,
    /// Lower bound of the zoom target, must be positive
    pub min_zoom: f32,
    /// Upper bound of the zoom target
    pub max_zoom: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            interp_speed: 10.0,
            min_zoom: 0.5,
            max_zoom: 8.0,
        }
    }
}

/// Per-mode tunables consumed by the built-in camera modes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraModeSettings {
    /// Seconds to blend in; `0` cuts instantly
    pub blend_time: f32,
    pub blend_function: BlendFunction,
    /// Ease exponent; non-positive values behave as `1.0`
    pub blend_exponent: f32,
    /// Vertical field of view in degrees
    pub field_of_view: f32,
    /// Lowest allowed view pitch in degrees
    pub view_pitch_min: f32,
    /// Highest allowed view pitch in degrees
    pub view_pitch_max: f32,
    /// Distance behind the pivot along the view direction
    pub boom_length: f32,
    /// Tag reported while the mode is on top
    pub tag: Option<CameraTag>,
    /// Offset from the pivot (eye offset or boom socket)
    pub offset: Vec3,
}

impl Default for CameraModeSettings {
    fn default() -> Self {
        let blend = BlendSettings::default();
        Self {
            blend_time: blend.blend_time,
            blend_function: blend.blend_function,
            blend_exponent: blend.blend_exponent,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            view_pitch_min: -89.0,
            view_pitch_max: 89.0,
            boom_length: 0.0,
            tag: None,
            offset: Vec3::ZERO,
        }
    }
}

impl CameraModeSettings {
    /// Defaults for a first person camera
    pub fn first_person() -> Self {
        Self {
            blend_time: 0.25,
            offset: Vec3::new(0.0, 0.1, 0.0),
            tag: Some(CameraTag::new("camera.first_person")),
            ..Self::default()
        }
    }

    /// Defaults for an over-the-shoulder third person camera
    pub fn third_person() -> Self {
        Self {
            view_pitch_min: -60.0,
            view_pitch_max: 60.0,
            offset: Vec3::new(0.0, 1.5, 0.0),
            boom_length: 4.0,
            tag: Some(CameraTag::new("camera.third_person")),
            ..Self::default()
        }
    }

    /// Blend tunables as used by the stack
    pub fn blend_settings(&self) -> BlendSettings {
        BlendSettings::new(self.blend_time, self.blend_function, self.blend_exponent)
    }

    pub fn with_blend(mut self, blend_time: f32, blend_function: BlendFunction) -> Self {
        self.blend_time = blend_time;
        self.blend_function = blend_function;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<CameraTag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    fn validate(&self, name: &str) -> Result<()> {
        let field = |f: &str| format!("modes.{name}.{f}");

        if !self.blend_time.is_finite() || self.blend_time < 0.0 {
            return Err(ConfigError::invalid(
                field("blend_time"),
                format!("must be a finite value >= 0, got {}", self.blend_time),
            ));
        }
        if !self.blend_exponent.is_finite() {
            return Err(ConfigError::invalid(field("blend_exponent"), "must be finite"));
        }
        if self.blend_exponent <= 0.0 {
            tracing::warn!(
                "camera mode `{}`: blend_exponent {} is not positive, using 1.0",
                name,
                self.blend_exponent
            );
        }
        if !self.field_of_view.is_finite()
            || self.field_of_view <= 0.0
            || self.field_of_view >= 180.0
        {
            return Err(ConfigError::invalid(
                field("field_of_view"),
                format!("must be within (0, 180), got {}", self.field_of_view),
            ));
        }
        if !self.view_pitch_min.is_finite() || !self.view_pitch_max.is_finite() {
            return Err(ConfigError::invalid(field("view_pitch_min"), "must be finite"));
        }
        if self.view_pitch_min > self.view_pitch_max {
            return Err(ConfigError::invalid(
                field("view_pitch_min"),
                format!(
                    "{} is greater than view_pitch_max {}",
                    self.view_pitch_min, self.view_pitch_max
                ),
            ));
        }
        if !self.offset.is_finite() {
            return Err(ConfigError::invalid(field("offset"), "must be finite"));
        }
        if !self.boom_length.is_finite() || self.boom_length < 0.0 {
            return Err(ConfigError::invalid(
                field("boom_length"),
                format!("must be a finite value >= 0, got {}", self.boom_length),
            ));
        }
        Ok(())
    }
}

/// Configuration of a [`CameraComponent`](crate::CameraComponent)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Log a dump of the mode stack every evaluated frame
    pub debug_stack: bool,
    pub recoil: RecoilConfig,
    pub zoom: ZoomConfig,
    /// Per-mode tunables by mode key
    pub modes: BTreeMap<String, CameraModeSettings>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl CameraConfig {
    /// Standard configuration for gameplay
    pub fn standard() -> Self {
        let mut modes = BTreeMap::new();
        modes.insert(FIRST_PERSON.to_string(), CameraModeSettings::first_person());
        modes.insert(THIRD_PERSON.to_string(), CameraModeSettings::third_person());

        Self {
            debug_stack: false,
            recoil: RecoilConfig::default(),
            zoom: ZoomConfig::default(),
            modes,
        }
    }

    /// Debug configuration: stack dumps on, slow blends for inspection
    pub fn debug() -> Self {
        let mut config = Self::standard();
        config.debug_stack = true;
        for settings in config.modes.values_mut() {
            settings.blend_time *= 4.0;
        }
        config
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CameraConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("loading camera config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Check every value is within its allowed range
    pub fn validate(&self) -> Result<()> {
        let recoil = &self.recoil;
        for (field, value) in [
            ("recoil.recovery_speed", recoil.recovery_speed),
            ("recoil.interp_speed", recoil.interp_speed),
            ("zoom.interp_speed", self.zoom.interp_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be a finite value >= 0, got {value}"),
                ));
            }
        }

        let zoom = &self.zoom;
        if !zoom.min_zoom.is_finite() || zoom.min_zoom <= 0.0 {
            return Err(ConfigError::invalid(
                "zoom.min_zoom",
                format!("must be positive, got {}", zoom.min_zoom),
            ));
        }
        if !zoom.max_zoom.is_finite() || zoom.min_zoom > zoom.max_zoom {
            return Err(ConfigError::invalid(
                "zoom.max_zoom",
                format!(
                    "must be finite and >= min_zoom {}, got {}",
                    zoom.min_zoom, zoom.max_zoom
                ),
            ));
        }

        for (name, settings) in &self.modes {
            settings.validate(name)?;
        }
        Ok(())
    }

    /// Settings for the mode stored under `name`, or defaults
    pub fn mode_settings(&self, name: &str) -> CameraModeSettings {
        self.modes.get(name).cloned().unwrap_or_default()
    }

    pub fn with_debug_stack(mut self, enabled: bool) -> Self {
        self.debug_stack = enabled;
        self
    }

    pub fn with_mode(mut self, name: impl Into<String>, settings: CameraModeSettings) -> Self {
        self.modes.insert(name.into(), settings);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(CameraConfig::standard().validate().is_ok());
        assert!(CameraConfig::debug().validate().is_ok());
        assert!(CameraConfig::debug().debug_stack);
        assert!(!CameraConfig::standard().debug_stack);
    }

    #[test]
    fn test_debug_preset_slows_blends() {
        let standard = CameraConfig::standard();
        let debug = CameraConfig::debug();
        let a = standard.mode_settings(THIRD_PERSON).blend_time;
        let b = debug.mode_settings(THIRD_PERSON).blend_time;
        assert!((b - a * 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_partial_document() {
        let config = CameraConfig::from_toml_str(
            r#"
            debug_stack = true

            [zoom]
            max_zoom = 4.0

            [modes.aim]
            blend_time = 0.15
            blend_function = "ease_in_out"
            blend_exponent = 2.0
            field_of_view = 50.0
            tag = "camera.aiming"
            "#,
        )
        .unwrap();

        assert!(config.debug_stack);
        assert_eq!(config.zoom.max_zoom, 4.0);
        assert_eq!(config.zoom.min_zoom, ZoomConfig::default().min_zoom);
        assert_eq!(config.recoil, RecoilConfig::default());

        let aim = config.mode_settings("aim");
        assert_eq!(aim.blend_function, BlendFunction::EaseInOut);
        assert_eq!(aim.field_of_view, 50.0);
        assert_eq!(aim.view_pitch_max, 89.0);
        assert_eq!(aim.tag, Some(CameraTag::new("camera.aiming")));
        assert_eq!(
            aim.blend_settings(),
            BlendSettings::new(0.15, BlendFunction::EaseInOut, 2.0)
        );

        // An explicit `modes` table replaces the preset modes
        assert!(!config.modes.contains_key(FIRST_PERSON));
        assert_eq!(config.mode_settings(FIRST_PERSON), CameraModeSettings::default());
    }

    #[test]
    fn test_empty_document_is_standard() {
        let config = CameraConfig::from_toml_str("").unwrap();
        assert_eq!(config, CameraConfig::standard());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CameraConfig::debug().with_mode(
            "aim",
            CameraModeSettings::default().with_blend(0.1, BlendFunction::EaseIn),
        );
        let text = toml::to_string(&config).unwrap();
        assert_eq!(CameraConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_parse_error() {
        let err = CameraConfig::from_toml_str("debug_stack = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = CameraConfig::from_toml_str(
            r#"
            [modes.aim]
            blend_function = "bounce"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let cases = [
            ("[zoom]\nmin_zoom = 0.0", "zoom.min_zoom"),
            ("[zoom]\nmin_zoom = 3.0\nmax_zoom = 2.0", "zoom.max_zoom"),
            ("[recoil]\nrecovery_speed = -1.0", "recoil.recovery_speed"),
            ("[modes.a]\nblend_time = -0.5", "modes.a.blend_time"),
            ("[modes.a]\nfield_of_view = 0.0", "modes.a.field_of_view"),
            (
                "[modes.a]\nview_pitch_min = 30.0\nview_pitch_max = 10.0",
                "modes.a.view_pitch_min",
            ),
            ("[modes.a]\nboom_length = -2.0", "modes.a.boom_length"),
        ];

        for (source, expected) in cases {
            match CameraConfig::from_toml_str(source) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid `{expected}`, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_positive_exponent_is_accepted() {
        let config = CameraConfig::from_toml_str("[modes.a]\nblend_exponent = 0.0").unwrap();
        assert_eq!(config.mode_settings("a").blend_exponent, 0.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CameraConfig::from_path("/definitely/not/here/camera.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("camera.toml"));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("optic_camera_{}.toml", std::process::id()));
        fs::write(&path, "[zoom]\ninterp_speed = 0.0\n").unwrap();
        let config = CameraConfig::from_path(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(config.unwrap().zoom.interp_speed, 0.0);
    }
}
