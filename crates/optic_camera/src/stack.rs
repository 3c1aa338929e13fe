//! Camera mode stack
//!
//! Ordered layers of camera modes composited with the painter's algorithm.
//! Index 0 is the most recently pushed mode (top), the last index is the
//! oldest surviving one (bottom). The bottom layer is always fully opaque, and
//! anything behind a fully blended layer is pruned on update.
//!
//! Mode instances are pooled per type for the stack's lifetime and never
//! evicted, so re-pushing a mode reuses its state.

use crate::mode::{
    ActivationState, CameraModeClass, CameraModeContext, CameraModeInstance, ViewTarget,
};
use crate::view::CameraModeView;
use optic_core::CameraTag;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::any::TypeId;

new_key_type! {
    /// Handle to a pooled camera mode instance
    pub struct CameraModeId;
}

/// Snapshot of the top layer, for HUD and UI consumers
#[derive(Clone, Debug, PartialEq)]
pub struct BlendInfo {
    /// Blend weight of the top layer (1.0 for an empty stack)
    pub weight_of_top_layer: f32,
    /// Camera type tag of the top layer, if any
    pub tag_of_top_layer: Option<CameraTag>,
}

impl Default for BlendInfo {
    fn default() -> Self {
        Self {
            weight_of_top_layer: 1.0,
            tag_of_top_layer: None,
        }
    }
}

/// Layered, weighted compositor of camera modes
pub struct CameraModeStack {
    /// Instance pool, one entry per mode type ever requested
    instances: SlotMap<CameraModeId, CameraModeInstance>,
    /// Pool lookup by mode type
    lookup: FxHashMap<TypeId, CameraModeId>,
    /// Live layers, top first
    active: SmallVec<[CameraModeId; 4]>,
    is_active: bool,
}

impl Default for CameraModeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraModeStack {
    /// Create an empty, active stack
    pub fn new() -> Self {
        Self {
            instances: SlotMap::with_key(),
            lookup: FxHashMap::default(),
            active: SmallVec::new(),
            is_active: true,
        }
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Resume evaluation after [`deactivate_stack`](Self::deactivate_stack)
    ///
    /// The top layer re-enters `PreActivate`, layers below it `PreDeactivate`.
    pub fn activate_stack(&mut self) {
        if self.is_active {
            return;
        }
        for (index, &id) in self.active.iter().enumerate() {
            let state = if index == 0 {
                ActivationState::PreActivate
            } else {
                ActivationState::PreDeactivate
            };
            self.instances[id].set_activation_state(state);
        }
        self.is_active = true;
        tracing::debug!("CameraModeStack: activated ({} layers)", self.active.len());
    }

    /// Stop evaluation; every live layer is told it is deactivated
    ///
    /// Layers stay in place so [`activate_stack`](Self::activate_stack) resumes
    /// the same composite.
    pub fn deactivate_stack(&mut self) {
        if !self.is_active {
            return;
        }
        for &id in &self.active {
            self.instances[id].set_activation_state(ActivationState::Deactivated);
        }
        self.is_active = false;
        tracing::debug!("CameraModeStack: deactivated ({} layers)", self.active.len());
    }

    pub fn is_stack_active(&self) -> bool {
        self.is_active
    }

    // =========================================================================
    // Push
    // =========================================================================

    /// Request that `class` become (or keep becoming) the dominant layer
    ///
    /// No-op for `None` or when the mode is already on top, so it is safe to
    /// call every frame. A mode that is still visible further down resumes
    /// from its current visible contribution instead of popping.
    pub fn push_camera_mode(&mut self, class: impl Into<Option<CameraModeClass>>) {
        let Some(class) = class.into() else {
            tracing::trace!("CameraModeStack: ignoring push of an invalid mode class");
            return;
        };

        let id = self.get_camera_mode_instance(&class);
        if self.active.first() == Some(&id) {
            return;
        }

        // Visible contribution of the mode under the current composite: the
        // product of (1 - weight) of every layer above it, times its own weight.
        let mut existing_index = None;
        let mut existing_contribution = 1.0;
        for (index, &entry_id) in self.active.iter().enumerate() {
            let entry = &mut self.instances[entry_id];
            if entry_id == id {
                existing_index = Some(index);
                existing_contribution *= entry.blend_weight();
            } else {
                if existing_index.is_none() {
                    existing_contribution *= 1.0 - entry.blend_weight();
                }
                entry.set_activation_state(ActivationState::PreDeactivate);
            }
        }

        let existing_contribution = match existing_index {
            Some(index) => {
                self.active.remove(index);
                existing_contribution
            }
            None => 0.0,
        };

        let instance = &mut self.instances[id];
        let should_blend = instance.blend_settings().blend_time > 0.0 && !self.active.is_empty();
        let start_weight = if should_blend {
            existing_contribution
        } else {
            1.0
        };
        instance.set_blend_weight(start_weight);

        self.active.insert(0, id);

        // Nothing is behind the bottom layer, so it must read as opaque
        if let Some(&bottom) = self.active.last() {
            self.instances[bottom].set_blend_weight(1.0);
        }

        self.instances[id].set_activation_state(ActivationState::PreActivate);

        tracing::debug!(
            "CameraModeStack: pushed {} (start weight {:.3}, {} layers)",
            class.name(),
            start_weight,
            self.active.len()
        );
        self.debug_check_opaque_bottom();
    }

    /// Resolve the pooled instance for `class`, constructing it on first use
    fn get_camera_mode_instance(&mut self, class: &CameraModeClass) -> CameraModeId {
        if let Some(&id) = self.lookup.get(&class.key()) {
            return id;
        }

        let id = self.instances.insert(CameraModeInstance::new(class));
        self.lookup.insert(class.key(), id);
        tracing::debug!("CameraModeStack: created instance of {}", class.name());
        id
    }

    // =========================================================================
    // Update / Blend
    // =========================================================================

    /// Update and composite the stack into `view`
    ///
    /// Returns `false` without touching `view` while the stack is deactivated.
    /// An empty stack also leaves `view` untouched.
    pub fn evaluate_stack(
        &mut self,
        dt: f32,
        target: &dyn ViewTarget,
        view: &mut CameraModeView,
    ) -> bool {
        if !self.is_active {
            return false;
        }

        self.update_stack(dt, target);
        self.blend_stack(view);
        true
    }

    /// Advance every layer by `dt`, then prune layers hidden behind a fully
    /// blended one
    pub fn update_stack(&mut self, dt: f32, target: &dyn ViewTarget) {
        if self.active.is_empty() {
            return;
        }

        let ctx = CameraModeContext { dt, target };
        for &id in &self.active {
            self.instances[id].update_camera_mode(&ctx);
        }

        let instances = &self.instances;
        let full_index = self
            .active
            .iter()
            .position(|&id| instances[id].blend_weight() >= 1.0);

        if let Some(index) = full_index {
            for id in self.active.drain(index + 1..) {
                let instance = &mut self.instances[id];
                instance.set_activation_state(ActivationState::Deactivated);
                tracing::debug!("CameraModeStack: pruned {}", instance.name());
            }

            if index == 0 {
                let top = &mut self.instances[self.active[0]];
                if top.set_activation_state(ActivationState::Activated) {
                    tracing::debug!("CameraModeStack: {} activated", top.name());
                }
            }
        }

        if tracing::enabled!(tracing::Level::TRACE) {
            for &id in &self.active {
                let instance = &self.instances[id];
                tracing::trace!(
                    "CameraModeStack: {} weight {:.3}",
                    instance.name(),
                    instance.blend_weight()
                );
            }
        }

        self.debug_check_opaque_bottom();
        self.debug_check_single_full_layer();
    }

    /// Composite the live layers into `view`, oldest first
    pub fn blend_stack(&self, view: &mut CameraModeView) {
        let Some((&bottom, rest)) = self.active.split_last() else {
            return;
        };

        *view = *self.instances[bottom].view();

        for &id in rest.iter().rev() {
            let instance = &self.instances[id];
            view.blend(instance.view(), instance.blend_weight());
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Weight and tag of the top layer
    pub fn get_blend_info(&self) -> BlendInfo {
        match self.active.first() {
            Some(&top) => {
                let instance = &self.instances[top];
                BlendInfo {
                    weight_of_top_layer: instance.blend_weight(),
                    tag_of_top_layer: instance.camera_type_tag().cloned(),
                }
            }
            None => BlendInfo::default(),
        }
    }

    /// Number of live layers
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of pooled instances (live or not)
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Live layers, top first
    pub fn layers(&self) -> impl Iterator<Item = &CameraModeInstance> + '_ {
        self.active.iter().map(move |&id| &self.instances[id])
    }

    /// Handles of the live layers, top first
    pub fn layer_ids(&self) -> &[CameraModeId] {
        &self.active
    }

    pub fn top(&self) -> Option<&CameraModeInstance> {
        self.active.first().map(|&id| &self.instances[id])
    }

    pub fn get(&self, id: CameraModeId) -> Option<&CameraModeInstance> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: CameraModeId) -> Option<&mut CameraModeInstance> {
        self.instances.get_mut(id)
    }

    /// Pool handle for `class`, if an instance has been created
    pub fn find(&self, class: &CameraModeClass) -> Option<CameraModeId> {
        self.lookup.get(&class.key()).copied()
    }

    /// Pooled instance for `class`, if one has been created
    pub fn instance(&self, class: &CameraModeClass) -> Option<&CameraModeInstance> {
        self.find(class).and_then(|id| self.instances.get(id))
    }

    /// Position of `class` in the live layers (0 = top)
    pub fn position_of(&self, class: &CameraModeClass) -> Option<usize> {
        let id = self.find(class)?;
        self.active.iter().position(|&entry| entry == id)
    }

    // =========================================================================
    // Invariant checks (debug builds)
    // =========================================================================

    fn debug_check_opaque_bottom(&self) {
        if let Some(&bottom) = self.active.last() {
            debug_assert!(
                self.instances[bottom].blend_weight() >= 1.0,
                "bottom camera layer must be opaque"
            );
        }
        debug_assert!(
            self.active
                .iter()
                .enumerate()
                .all(|(i, id)| !self.active[i + 1..].contains(id)),
            "camera layer pushed twice"
        );
    }

    fn debug_check_single_full_layer(&self) {
        debug_assert!(
            self.active
                .iter()
                .rev()
                .skip(1)
                .all(|&id| self.instances[id].blend_weight() < 1.0),
            "only the bottom camera layer may be fully blended after update"
        );
    }
}
