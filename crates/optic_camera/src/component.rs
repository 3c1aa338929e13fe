//! Camera component
//!
//! Drives a [`CameraModeStack`] once per frame: asks a strategy which mode it
//! wants, evaluates the stack, layers recoil and zoom on top, writes the
//! control rotation back to the target and tells listeners about the top of
//! the stack.

use crate::config::CameraConfig;
use crate::mode::{CameraModeClass, ViewTarget};
use crate::recoil::RecoilState;
use crate::stack::{BlendInfo, CameraModeStack};
use crate::view::CameraModeView;
use crate::zoom::ZoomState;
use optic_core::{Rotator, Vec3};
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};

/// A view target whose control rotation the camera can correct
pub trait CameraTarget: ViewTarget {
    /// Receive the rotation the camera settled on this frame
    fn set_control_rotation(&mut self, rotation: Rotator);
}

/// Strategy queried each frame for the desired camera mode
pub type DetermineCameraModeFn = Box<dyn FnMut() -> Option<CameraModeClass>>;

/// Callback receiving the top-of-stack blend info each evaluated frame
pub type BlendInfoListener = Box<dyn FnMut(&BlendInfo)>;

new_key_type! {
    /// Handle to a registered blend info listener
    pub struct BlendInfoListenerId;
}

/// Final view published for rendering
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DesiredView {
    pub location: Vec3,
    /// View rotation including recoil
    pub rotation: Rotator,
    /// Rotation written back to the target
    pub control_rotation: Rotator,
    /// Field of view after offset and zoom
    pub field_of_view: f32,
}

/// Per-camera driver of a mode stack
pub struct CameraComponent {
    /// Created on first use
    stack: Option<CameraModeStack>,
    determine_mode: Option<DetermineCameraModeFn>,
    recoil: RecoilState,
    zoom: ZoomState,
    /// One-frame field of view delta
    field_of_view_offset: f32,
    /// Player rotation input accumulated since the last view
    rotation_input: Rotator,
    listeners: SlotMap<BlendInfoListenerId, BlendInfoListener>,
    debug_stack: bool,
    /// Stack dump of the last frame, kept while `debug_stack` is on
    last_debug_dump: Option<String>,
    /// Last composite produced by the stack
    last_view: CameraModeView,
}

/// The stack in `slot`, created on first use
fn stack_or_create(slot: &mut Option<CameraModeStack>) -> &mut CameraModeStack {
    slot.get_or_insert_with(|| {
        tracing::debug!("CameraComponent: creating camera mode stack");
        CameraModeStack::new()
    })
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl CameraComponent {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            stack: None,
            determine_mode: None,
            recoil: RecoilState::new(config.recoil.clone()),
            zoom: ZoomState::new(config.zoom.clone()),
            field_of_view_offset: 0.0,
            rotation_input: Rotator::ZERO,
            listeners: SlotMap::with_key(),
            debug_stack: config.debug_stack,
            last_debug_dump: None,
            last_view: CameraModeView::default(),
        }
    }

    /// Set the strategy that picks the desired mode each frame
    pub fn set_determine_camera_mode(
        &mut self,
        determine: impl FnMut() -> Option<CameraModeClass> + 'static,
    ) {
        self.determine_mode = Some(Box::new(determine));
    }

    pub fn clear_determine_camera_mode(&mut self) {
        self.determine_mode = None;
    }

    /// The mode stack, if it has been created yet
    pub fn camera_mode_stack(&self) -> Option<&CameraModeStack> {
        self.stack.as_ref()
    }

    /// The mode stack, created on first access
    pub fn camera_mode_stack_mut(&mut self) -> &mut CameraModeStack {
        stack_or_create(&mut self.stack)
    }

    /// Push a mode directly, bypassing the strategy
    pub fn push_camera_mode(&mut self, class: impl Into<Option<CameraModeClass>>) {
        self.camera_mode_stack_mut().push_camera_mode(class);
    }

    /// Weight and tag of the top layer
    pub fn get_blend_info(&self) -> BlendInfo {
        self.stack
            .as_ref()
            .map(CameraModeStack::get_blend_info)
            .unwrap_or_default()
    }

    // =========================================================================
    // Recoil / Zoom / FOV
    // =========================================================================

    /// Kick the view; see [`RecoilState`]
    pub fn add_recoil(&mut self, kick: Rotator) {
        self.recoil.add_recoil(kick);
    }

    /// Report player rotation input for this frame
    ///
    /// Input opposing outstanding recoil cancels it.
    pub fn add_rotation_input(&mut self, input: Rotator) {
        self.rotation_input.pitch += input.pitch;
        self.rotation_input.yaw += input.yaw;
    }

    pub fn recoil(&self) -> &RecoilState {
        &self.recoil
    }

    /// Request a zoom amount, eased in over the next frames
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom.set_target(zoom);
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// Add a field of view delta applied to the next view only
    pub fn add_field_of_view_offset(&mut self, offset: f32) {
        self.field_of_view_offset += offset;
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_blend_info_listener(
        &mut self,
        listener: impl FnMut(&BlendInfo) + 'static,
    ) -> BlendInfoListenerId {
        self.listeners.insert(Box::new(listener))
    }

    /// Returns `false` if the listener was already removed
    pub fn remove_blend_info_listener(&mut self, id: BlendInfoListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    pub fn set_debug_stack(&mut self, enabled: bool) {
        self.debug_stack = enabled;
        if !enabled {
            self.last_debug_dump = None;
        }
    }

    /// Stack dump logged on the last frame, if `debug_stack` is on and debug
    /// logging is enabled
    pub fn last_debug_dump(&self) -> Option<&str> {
        self.last_debug_dump.as_deref()
    }

    /// Last composite produced by the stack, before recoil and zoom
    pub fn last_view(&self) -> &CameraModeView {
        &self.last_view
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Produce this frame's view for `target`
    ///
    /// While the stack is inactive the previous composite is reused and the
    /// target's control rotation is left alone.
    pub fn get_camera_view<T: CameraTarget>(&mut self, dt: f32, target: &mut T) -> DesiredView {
        let stack = stack_or_create(&mut self.stack);

        if let Some(determine) = self.determine_mode.as_mut() {
            if let Some(class) = determine() {
                stack.push_camera_mode(class);
            }
        }

        let mut view = self.last_view;
        let evaluated = stack.evaluate_stack(dt, &*target, &mut view) && !stack.is_empty();
        self.last_view = view;

        let input = std::mem::replace(&mut self.rotation_input, Rotator::ZERO);
        let recoil = self.recoil.update(dt, input);
        self.zoom.update(dt);

        let field_of_view = self.zoom.apply(view.field_of_view + self.field_of_view_offset);
        self.field_of_view_offset = 0.0;

        let desired = DesiredView {
            location: view.location,
            rotation: (view.orientation + recoil).normalized(),
            control_rotation: view.control_orientation,
            field_of_view,
        };

        if evaluated {
            target.set_control_rotation(view.control_orientation);

            let info = stack.get_blend_info();
            for listener in self.listeners.values_mut() {
                listener(&info);
            }
        }

        if self.debug_stack && tracing::enabled!(tracing::Level::DEBUG) {
            let dump = stack.snapshot().to_string();
            tracing::debug!("{}", dump);
            self.last_debug_dump = Some(dump);
        }

        desired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraModeSettings, RecoilConfig, ZoomConfig};
    use crate::mode::ActivationState;
    use crate::modes::{FirstPersonMode, ThirdPersonMode};
    use optic_animation::BlendFunction;
    use optic_core::CameraTag;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Pawn {
        location: Vec3,
        rotation: Rotator,
        control: Option<Rotator>,
    }

    impl Pawn {
        fn new() -> Self {
            Self {
                location: Vec3::new(0.0, 1.7, 0.0),
                rotation: Rotator::new(10.0, 45.0, 0.0),
                control: None,
            }
        }
    }

    impl ViewTarget for Pawn {
        fn pivot_location(&self) -> Vec3 {
            self.location
        }

        fn pivot_rotation(&self) -> Rotator {
            self.rotation
        }
    }

    impl CameraTarget for Pawn {
        fn set_control_rotation(&mut self, rotation: Rotator) {
            self.control = Some(rotation);
        }
    }

    /// Config with snapping recoil and zoom so single frames are predictable
    fn snappy_config() -> CameraConfig {
        CameraConfig {
            recoil: RecoilConfig {
                recovery_speed: 5.0,
                interp_speed: 0.0,
            },
            zoom: ZoomConfig {
                interp_speed: 0.0,
                ..ZoomConfig::default()
            },
            ..CameraConfig::standard()
        }
    }

    fn first_person_component(config: &CameraConfig) -> CameraComponent {
        let mut component = CameraComponent::new(config);
        let class = FirstPersonMode::from_config(config);
        component.set_determine_camera_mode(move || Some(class.clone()));
        component
    }

    #[test]
    fn test_stack_created_lazily() {
        let mut component = CameraComponent::default();
        assert!(component.camera_mode_stack().is_none());
        assert_eq!(component.get_blend_info(), BlendInfo::default());

        let mut pawn = Pawn::new();
        let view = component.get_camera_view(0.016, &mut pawn);
        assert!(component.camera_mode_stack().is_some());

        // Nothing pushed: default view, control untouched
        assert_eq!(view.location, Vec3::ZERO);
        assert_eq!(view.field_of_view, 80.0);
        assert_eq!(pawn.control, None);
    }

    #[test]
    fn test_strategy_pushes_and_writes_control() {
        let config = snappy_config();
        let mut component = first_person_component(&config);
        let mut pawn = Pawn::new();

        let view = component.get_camera_view(0.016, &mut pawn);
        assert!((view.location.y - 1.8).abs() < 1e-5);
        assert!(view.rotation.equals(&pawn.rotation, 1e-4));
        assert_eq!(pawn.control, Some(view.control_rotation));

        // Repeated pushes of the same class are no-ops
        for _ in 0..10 {
            component.get_camera_view(0.016, &mut pawn);
        }
        let stack = component.camera_mode_stack().unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.instance_count(), 1);
        assert_eq!(
            stack.top().map(|t| t.activation_state()),
            Some(ActivationState::Activated)
        );
    }

    #[test]
    fn test_switching_modes_blends_and_notifies() {
        let config = CameraConfig::standard()
            .with_mode(
                crate::config::THIRD_PERSON,
                CameraModeSettings::third_person().with_blend(1.0, BlendFunction::Linear),
            );
        let mut component = CameraComponent::new(&config);

        let first = FirstPersonMode::from_config(&config);
        let third = ThirdPersonMode::from_config(&config);
        let use_third = Rc::new(Cell::new(false));
        let flag = use_third.clone();
        component.set_determine_camera_mode(move || {
            Some(if flag.get() { third.clone() } else { first.clone() })
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        component.add_blend_info_listener(move |info| sink.borrow_mut().push(info.clone()));

        let mut pawn = Pawn::new();
        component.get_camera_view(0.1, &mut pawn);
        use_third.set(true);
        component.get_camera_view(0.25, &mut pawn);
        component.get_camera_view(0.25, &mut pawn);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].weight_of_top_layer, 1.0);
        assert_eq!(
            seen[0].tag_of_top_layer,
            Some(CameraTag::new("camera.first_person"))
        );
        assert!((seen[1].weight_of_top_layer - 0.25).abs() < 1e-6);
        assert!((seen[2].weight_of_top_layer - 0.5).abs() < 1e-6);
        assert_eq!(
            seen[2].tag_of_top_layer,
            Some(CameraTag::new("camera.third_person"))
        );
        assert_eq!(component.camera_mode_stack().map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_recoil_offsets_view_not_control() {
        let config = snappy_config();
        let mut component = first_person_component(&config);
        let mut pawn = Pawn::new();

        component.add_recoil(Rotator::new(5.0, 0.0, 0.0));
        let view = component.get_camera_view(0.0, &mut pawn);

        assert!((view.rotation.pitch - 15.0).abs() < 1e-4);
        assert!((view.control_rotation.pitch - 10.0).abs() < 1e-4);
        assert_eq!(pawn.control.map(|c| c.pitch), Some(view.control_rotation.pitch));
    }

    #[test]
    fn test_rotation_input_cancels_recoil() {
        let config = snappy_config();
        let mut component = first_person_component(&config);
        let mut pawn = Pawn::new();

        component.add_recoil(Rotator::new(5.0, 0.0, 0.0));
        component.get_camera_view(0.0, &mut pawn);

        component.add_rotation_input(Rotator::new(-2.0, 0.0, 0.0));
        let view = component.get_camera_view(0.0, &mut pawn);
        assert!((view.rotation.pitch - 13.0).abs() < 1e-4);

        // Input is consumed by the frame it was reported in
        let view = component.get_camera_view(0.0, &mut pawn);
        assert!((view.rotation.pitch - 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_divides_field_of_view() {
        let config = snappy_config();
        let mut component = first_person_component(&config);
        let mut pawn = Pawn::new();

        component.set_zoom(2.0);
        let view = component.get_camera_view(0.016, &mut pawn);
        assert!((view.field_of_view - 40.0).abs() < 1e-4);
        assert_eq!(component.zoom().current(), 2.0);
    }

    #[test]
    fn test_field_of_view_offset_lasts_one_frame() {
        let config = snappy_config();
        let mut component = first_person_component(&config);
        let mut pawn = Pawn::new();

        component.add_field_of_view_offset(-10.0);
        let view = component.get_camera_view(0.016, &mut pawn);
        assert!((view.field_of_view - 70.0).abs() < 1e-4);

        let view = component.get_camera_view(0.016, &mut pawn);
        assert!((view.field_of_view - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_removed_listener_is_not_called() {
        let mut component = first_person_component(&CameraConfig::standard());
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = component.add_blend_info_listener(move |_| counter.set(counter.get() + 1));

        let mut pawn = Pawn::new();
        component.get_camera_view(0.016, &mut pawn);
        assert!(component.remove_blend_info_listener(id));
        assert!(!component.remove_blend_info_listener(id));
        component.get_camera_view(0.016, &mut pawn);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_inactive_stack_keeps_last_view() {
        let mut component = first_person_component(&CameraConfig::standard());
        let mut pawn = Pawn::new();
        let before = component.get_camera_view(0.016, &mut pawn);

        component.camera_mode_stack_mut().deactivate_stack();
        pawn.location = Vec3::new(100.0, 0.0, 0.0);
        pawn.control = None;

        let after = component.get_camera_view(0.016, &mut pawn);
        assert_eq!(after.location, before.location);
        assert_eq!(pawn.control, None);
    }

    fn with_debug_logging(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_debug_stack_dump() {
        with_debug_logging(|| {
            let config = CameraConfig::debug();
            let mut component = first_person_component(&config);
            let mut pawn = Pawn::new();
            assert_eq!(component.last_debug_dump(), None);

            component.get_camera_view(0.016, &mut pawn);
            let dump = component.last_debug_dump().unwrap_or_default().to_string();
            assert!(dump.starts_with("CameraModeStack: 1 layer(s)"));
            assert!(dump.contains("[0] FirstPersonMode [camera.first_person]"));

            component.set_debug_stack(false);
            component.get_camera_view(0.016, &mut pawn);
            assert_eq!(component.last_debug_dump(), None);
        });
    }

    #[test]
    fn test_no_dump_without_debug_stack() {
        with_debug_logging(|| {
            let mut component = first_person_component(&CameraConfig::standard());
            let mut pawn = Pawn::new();
            component.get_camera_view(0.016, &mut pawn);
            assert_eq!(component.last_debug_dump(), None);
        });
    }

    #[test]
    fn test_inverted_zoom_range_does_not_panic() {
        let config = CameraConfig {
            zoom: ZoomConfig {
                interp_speed: 0.0,
                min_zoom: 3.0,
                max_zoom: 2.0,
            },
            ..CameraConfig::standard()
        };
        assert!(config.validate().is_err());

        let mut component = first_person_component(&config);
        let mut pawn = Pawn::new();
        component.set_zoom(0.0);
        let view = component.get_camera_view(0.016, &mut pawn);
        assert_eq!(component.zoom().current(), 2.0);
        assert!((view.field_of_view - 40.0).abs() < 1e-4);
    }
}
