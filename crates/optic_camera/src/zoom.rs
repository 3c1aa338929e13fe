//! Zoom
//!
//! A scalar magnification that eases toward its target. The view's field of
//! view is divided by the current amount, so `2.0` halves the FOV.

use crate::config::ZoomConfig;
use optic_core::interp_to;

/// Smallest zoom amount ever applied, keeps the FOV division finite
pub const MIN_ZOOM: f32 = 0.01;

/// Current and requested zoom of a camera
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomState {
    current: f32,
    target: f32,
    /// Usable `[min, max]` range derived from the config
    bounds: (f32, f32),
    config: ZoomConfig,
}

/// Ordered, positive zoom range for `config`
///
/// Bounds that are not finite or fall below [`MIN_ZOOM`] are replaced, and an
/// inverted range is swapped.
fn zoom_bounds(config: &ZoomConfig) -> (f32, f32) {
    let sanitize = |v: f32| if v.is_finite() { v.max(MIN_ZOOM) } else { 1.0 };
    let (a, b) = (sanitize(config.min_zoom), sanitize(config.max_zoom));
    if a > b {
        tracing::warn!(
            "zoom range [{}, {}] is inverted, using [{}, {}]",
            config.min_zoom,
            config.max_zoom,
            b,
            a
        );
        (b, a)
    } else {
        (a, b)
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomState {
    /// Start unzoomed (`1.0`), clamped into the configured range
    pub fn new(config: ZoomConfig) -> Self {
        let bounds = zoom_bounds(&config);
        let rest = 1.0_f32.clamp(bounds.0, bounds.1);
        Self {
            current: rest,
            target: rest,
            bounds,
            config,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Range the target is clamped into
    pub fn bounds(&self) -> (f32, f32) {
        self.bounds
    }

    /// Request a zoom amount; values outside [`bounds`](Self::bounds) are clamped
    pub fn set_target(&mut self, zoom: f32) {
        let (min, max) = self.bounds;
        let requested = if zoom.is_nan() { 1.0 } else { zoom };
        let clamped = requested.clamp(min, max);
        if clamped != zoom {
            tracing::warn!("zoom target {} clamped to {}", zoom, clamped);
        }
        self.target = clamped;
    }

    /// Jump straight to `zoom` without easing
    pub fn snap_to(&mut self, zoom: f32) {
        self.set_target(zoom);
        self.current = self.target;
    }

    /// Ease the current amount toward the target
    pub fn update(&mut self, dt: f32) -> f32 {
        self.current = interp_to(self.current, self.target, dt, self.config.interp_speed);
        self.current
    }

    /// Field of view after applying the current zoom
    pub fn apply(&self, field_of_view: f32) -> f32 {
        field_of_view / self.current
    }
}
