//! Stack introspection
//!
//! A serializable snapshot of the live layers, top first, with a textual
//! rendering used for per-frame debug dumps.

use crate::mode::ActivationState;
use crate::stack::CameraModeStack;
use crate::view::CameraModeView;
use optic_core::CameraTag;
use serde::Serialize;
use std::fmt;

/// One live layer of the stack
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerSnapshot {
    pub name: &'static str,
    pub tag: Option<CameraTag>,
    pub blend_weight: f32,
    pub blend_alpha: f32,
    pub state: ActivationState,
    pub view: CameraModeView,
}

/// Contents of a [`CameraModeStack`] at one point in time
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StackSnapshot {
    pub is_active: bool,
    /// Live layers, top first
    pub layers: Vec<LayerSnapshot>,
    /// Pooled instances, live or not
    pub instance_count: usize,
}

impl StackSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl CameraModeStack {
    /// Capture the live layers for inspection
    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            is_active: self.is_stack_active(),
            layers: self
                .layers()
                .map(|instance| LayerSnapshot {
                    name: instance.name(),
                    tag: instance.camera_type_tag().cloned(),
                    blend_weight: instance.blend_weight(),
                    blend_alpha: instance.blend_alpha(),
                    state: instance.activation_state(),
                    view: *instance.view(),
                })
                .collect(),
            instance_count: self.instance_count(),
        }
    }
}

impl fmt::Display for StackSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "CameraModeStack: {} layer(s), {} pooled{}",
            self.layers.len(),
            self.instance_count,
            if self.is_active { "" } else { " (inactive)" }
        )?;

        for (index, layer) in self.layers.iter().enumerate() {
            let tag = layer.tag.as_ref().map(CameraTag::as_str).unwrap_or("-");
            let location = layer.view.location;
            writeln!(
                f,
                "  [{index}] {} [{tag}] weight={:.3} alpha={:.3} {:?}",
                layer.name, layer.blend_weight, layer.blend_alpha, layer.state
            )?;
            writeln!(
                f,
                "      loc=({:.2}, {:.2}, {:.2}) rot=({}) fov={:.2}",
                location.x, location.y, location.z, layer.view.orientation, layer.view.field_of_view
            )?;
        }
        Ok(())
    }
}
