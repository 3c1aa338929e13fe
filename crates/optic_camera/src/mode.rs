//! Camera modes
//!
//! A camera mode is one behavioral unit (first person, third person, death cam,
//! ...) that produces a [`CameraModeView`] every tick. Behavior lives behind the
//! [`CameraMode`] trait; the blend timer, weight and activation lifecycle live in
//! the stack-owned [`CameraModeInstance`] wrapping it.

use crate::view::CameraModeView;
use optic_animation::BlendFunction;
use optic_core::{CameraTag, Rotator, Vec3};
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::fmt;
use std::rc::Rc;

/// Source of the pivot a camera mode builds its view from
///
/// Usually backed by the entity the camera is attached to (a pawn's eyes, a
/// vehicle's seat, ...).
pub trait ViewTarget {
    /// Ideal camera location before any mode-specific offset
    fn pivot_location(&self) -> Vec3;
    /// Ideal camera rotation before any mode-specific clamping
    fn pivot_rotation(&self) -> Rotator;
}

/// Context passed to camera modes during update
pub struct CameraModeContext<'a> {
    /// Delta time in seconds
    pub dt: f32,
    /// Pivot source for this frame
    pub target: &'a dyn ViewTarget,
}

/// Lifecycle phase of a mode within the stack
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationState {
    /// Just pushed, fading in
    PreActivate,
    /// Fully blended in on top of the stack
    Activated,
    /// Being overridden by a newer mode
    PreDeactivate,
    /// Pruned from the stack (or never pushed)
    #[default]
    Deactivated,
}

/// Blend tunables of a camera mode
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendSettings {
    /// Seconds to blend in; zero means an instant cut
    pub blend_time: f32,
    /// Curve applied to blend progress
    pub blend_function: BlendFunction,
    /// Exponent for the ease curves; non-positive values act as `1.0`
    pub blend_exponent: f32,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self {
            blend_time: 0.5,
            blend_function: BlendFunction::EaseOut,
            blend_exponent: 4.0,
        }
    }
}

impl BlendSettings {
    pub const fn new(blend_time: f32, blend_function: BlendFunction, blend_exponent: f32) -> Self {
        Self {
            blend_time,
            blend_function,
            blend_exponent,
        }
    }

    /// No blending, the mode takes over on the frame it is pushed
    pub const fn instant() -> Self {
        Self::new(0.0, BlendFunction::Linear, 1.0)
    }

    /// Linear blend over `blend_time` seconds
    pub const fn linear(blend_time: f32) -> Self {
        Self::new(blend_time, BlendFunction::Linear, 1.0)
    }
}

/// Trait for camera modes
///
/// Only [`update_view`](CameraMode::update_view) is required. The lifecycle hooks
/// fire when the owning stack moves the mode between [`ActivationState`]s, once
/// per actual change.
pub trait CameraMode: 'static {
    /// Compute this frame's unblended view
    fn update_view(&mut self, ctx: &CameraModeContext<'_>) -> CameraModeView;

    /// Blend tunables, read every frame
    fn blend_settings(&self) -> BlendSettings {
        BlendSettings::default()
    }

    /// Optional label reported to UI while this mode is on top
    fn camera_type_tag(&self) -> Option<&CameraTag> {
        None
    }

    /// The mode was pushed and is about to start blending in
    fn on_pre_activate(&mut self) {}

    /// The mode reached full weight on top of the stack
    fn on_activated(&mut self) {}

    /// A newer mode was pushed over this one
    fn on_pre_deactivate(&mut self) {}

    /// The mode was pruned from the stack
    fn on_deactivated(&mut self) {}
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Identity and constructor of a camera mode type
///
/// The type id is the pool key: a stack holds at most one instance per concrete
/// mode type, built lazily from the first class requested for that type.
#[derive(Clone)]
pub struct CameraModeClass {
    key: TypeId,
    name: &'static str,
    factory: Rc<dyn Fn() -> Box<dyn CameraMode>>,
}

impl CameraModeClass {
    /// Class for a default-constructible mode
    pub fn of<M: CameraMode + Default>() -> Self {
        Self::with_factory(M::default)
    }

    /// Class whose instance is built by `factory` on first use
    pub fn with_factory<M: CameraMode>(factory: impl Fn() -> M + 'static) -> Self {
        Self {
            key: TypeId::of::<M>(),
            name: short_type_name::<M>(),
            factory: Rc::new(move || Box::new(factory()) as Box<dyn CameraMode>),
        }
    }

    pub fn key(&self) -> TypeId {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn construct(&self) -> Box<dyn CameraMode> {
        (self.factory)()
    }
}

impl PartialEq for CameraModeClass {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CameraModeClass {}

impl fmt::Debug for CameraModeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CameraModeClass").field(&self.name).finish()
    }
}

/// A pooled camera mode together with its blend state
pub struct CameraModeInstance {
    mode: Box<dyn CameraMode>,
    name: &'static str,
    /// Raw blend progress in [0, 1]
    blend_alpha: f32,
    /// Curve-mapped visibility in [0, 1]
    blend_weight: f32,
    state: ActivationState,
    view: CameraModeView,
}

impl CameraModeInstance {
    pub(crate) fn new(class: &CameraModeClass) -> Self {
        Self {
            mode: class.construct(),
            name: class.name(),
            blend_alpha: 1.0,
            blend_weight: 1.0,
            state: ActivationState::Deactivated,
            view: CameraModeView::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn blend_alpha(&self) -> f32 {
        self.blend_alpha
    }

    pub fn blend_weight(&self) -> f32 {
        self.blend_weight
    }

    pub fn activation_state(&self) -> ActivationState {
        self.state
    }

    /// View computed on the last update
    pub fn view(&self) -> &CameraModeView {
        &self.view
    }

    pub fn blend_settings(&self) -> BlendSettings {
        self.mode.blend_settings()
    }

    pub fn camera_type_tag(&self) -> Option<&CameraTag> {
        self.mode.camera_type_tag()
    }

    pub fn mode(&self) -> &dyn CameraMode {
        self.mode.as_ref()
    }

    pub fn mode_mut(&mut self) -> &mut dyn CameraMode {
        self.mode.as_mut()
    }

    /// Recompute the view and advance the blend by one frame
    pub(crate) fn update_camera_mode(&mut self, ctx: &CameraModeContext<'_>) {
        self.view = self.mode.update_view(ctx);
        self.update_blending(ctx.dt);
    }

    fn update_blending(&mut self, dt: f32) {
        let settings = self.mode.blend_settings();

        if settings.blend_time > 0.0 {
            self.blend_alpha = (self.blend_alpha + dt / settings.blend_time).clamp(0.0, 1.0);
        } else {
            self.blend_alpha = 1.0;
        }

        self.blend_weight = settings
            .blend_function
            .evaluate(self.blend_alpha, settings.blend_exponent);
    }

    /// Assign a weight directly, back-solving the progress that produces it
    ///
    /// Later updates continue along the curve from the assigned weight.
    pub fn set_blend_weight(&mut self, weight: f32) {
        let settings = self.mode.blend_settings();
        let weight = if weight.is_nan() { 0.0 } else { weight.clamp(0.0, 1.0) };

        self.blend_weight = weight;
        self.blend_alpha = settings
            .blend_function
            .invert(weight, settings.blend_exponent);
    }

    /// Move to `state`, firing the matching hook if the state changed
    pub(crate) fn set_activation_state(&mut self, state: ActivationState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;

        match state {
            ActivationState::PreActivate => self.mode.on_pre_activate(),
            ActivationState::Activated => self.mode.on_activated(),
            ActivationState::PreDeactivate => self.mode.on_pre_deactivate(),
            ActivationState::Deactivated => self.mode.on_deactivated(),
        }
        true
    }
}

impl fmt::Debug for CameraModeInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraModeInstance")
            .field("name", &self.name)
            .field("blend_alpha", &self.blend_alpha)
            .field("blend_weight", &self.blend_weight)
            .field("state", &self.state)
            .finish()
    }
}
