use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};

use crate::OrbitCamera;

/// Pixel scroll events are much finer than line events
const PIXELS_PER_LINE: f32 = 100.0;

/// Lets other plugins (UI panels) claim the pointer for a frame
#[derive(Resource)]
pub struct OrbitCameraInput {
    pub enabled: bool,
}

impl Default for OrbitCameraInput {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Returns every orbit camera to its initial pose
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct ResetOrbitCamera;

pub(crate) fn orbit_camera_input(
    input: Res<OrbitCameraInput>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    // drain the readers even when the pointer belongs to someone else
    let drag: Vec2 = motion_evr.read().map(|ev| ev.delta).sum();
    let scroll: f32 = scroll_evr
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum();

    if !input.enabled {
        return;
    }

    for mut camera in &mut cameras {
        if mouse_buttons.pressed(MouseButton::Left) {
            camera.rotate(drag);
        } else if mouse_buttons.pressed(MouseButton::Right) {
            camera.pan(drag);
        }
        if scroll != 0.0 {
            camera.zoom(scroll);
        }
    }
}

pub(crate) fn apply_reset(
    mut reset_evr: EventReader<ResetOrbitCamera>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    if reset_evr.read().count() == 0 {
        return;
    }
    debug!("Resetting orbit cameras");
    for mut camera in &mut cameras {
        camera.reset();
    }
}

pub(crate) fn update_orbit_transforms(mut cameras: Query<(&mut OrbitCamera, &mut Transform)>) {
    for (mut camera, mut transform) in &mut cameras {
        camera.step();
        *transform = camera.pose().transform();
    }
}
