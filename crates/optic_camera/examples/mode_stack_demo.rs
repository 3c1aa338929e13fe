//! Mode Stack Demo
//!
//! Drives a camera through a scripted sequence:
//! - first person at rest
//! - switch to third person and watch the blend
//! - switch back mid-blend (resumes from the visible contribution)
//! - fire a burst of recoil while pulling down against it
//! - zoom in
//!
//! Run with: RUST_LOG=debug cargo run -p optic_camera --example mode_stack_demo [config.toml]

use optic_camera::prelude::*;
use optic_camera::Result;
use std::cell::Cell;
use std::rc::Rc;

struct Player {
    location: Vec3,
    look: Rotator,
}

impl ViewTarget for Player {
    fn pivot_location(&self) -> Vec3 {
        self.location
    }

    fn pivot_rotation(&self) -> Rotator {
        self.look
    }
}

impl CameraTarget for Player {
    fn set_control_rotation(&mut self, rotation: Rotator) {
        self.look = rotation;
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Desired {
    FirstPerson,
    ThirdPerson,
}

const DT: f32 = 1.0 / 30.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CameraConfig::from_path(path)?,
        None => CameraConfig::standard(),
    };

    let mut camera = CameraComponent::new(&config);
    let first_person = FirstPersonMode::from_config(&config);
    let third_person = ThirdPersonMode::from_config(&config);

    let desired = Rc::new(Cell::new(Desired::FirstPerson));
    let strategy = desired.clone();
    camera.set_determine_camera_mode(move || {
        Some(match strategy.get() {
            Desired::FirstPerson => first_person.clone(),
            Desired::ThirdPerson => third_person.clone(),
        })
    });

    camera.add_blend_info_listener(|info| {
        tracing::debug!(
            "top layer {} at {:.2}",
            info.tag_of_top_layer
                .as_ref()
                .map(CameraTag::as_str)
                .unwrap_or("untagged"),
            info.weight_of_top_layer
        );
    });

    let mut player = Player {
        location: Vec3::new(0.0, 1.7, 0.0),
        look: Rotator::new(0.0, 30.0, 0.0),
    };

    let frame = |camera: &mut CameraComponent, player: &mut Player, label: &str| {
        let view = camera.get_camera_view(DT, player);
        tracing::info!(
            "{label:>12}: loc=({:.2}, {:.2}, {:.2}) rot=({}) fov={:.1}",
            view.location.x,
            view.location.y,
            view.location.z,
            view.rotation,
            view.field_of_view
        );
    };

    for _ in 0..5 {
        frame(&mut camera, &mut player, "first person");
    }

    desired.set(Desired::ThirdPerson);
    for _ in 0..8 {
        frame(&mut camera, &mut player, "to third");
    }

    desired.set(Desired::FirstPerson);
    for _ in 0..20 {
        frame(&mut camera, &mut player, "back to first");
    }

    for shot in 0..6 {
        camera.add_recoil(Rotator::new(1.5, if shot % 2 == 0 { 0.4 } else { -0.4 }, 0.0));
        camera.add_rotation_input(Rotator::new(-0.8, 0.0, 0.0));
        frame(&mut camera, &mut player, "recoil");
    }

    camera.set_zoom(2.5);
    for _ in 0..15 {
        frame(&mut camera, &mut player, "zoom");
    }

    if let Some(stack) = camera.camera_mode_stack() {
        println!("{}", stack.snapshot());
    }

    Ok(())
}
