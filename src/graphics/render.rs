use crate::prelude::*;
use bevy::prelude::*;
use orbit_camera::{OrbitCamera, OrbitCameraPlugin};

/// The galaxy turns once every 6π seconds
const ROTATION_SLOWDOWN: f32 = 3.0;

const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 100.0;
const CAMERA_START: Vec3 = Vec3::new(0.0, 9.0, 10.0);
const CAMERA_MIN_DISTANCE: f32 = 2.0;
const CAMERA_MAX_DISTANCE: f32 = 20.0;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MaterialPlugin::<PointCloudMaterial>::default(),
            OrbitCameraPlugin,
        ))
        .add_systems(Startup, spawn_camera)
        .add_systems(Update, (rotate_galaxy.in_set(GalaxySet::Animate), exit_on_escape));
    }
}

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::new(CAMERA_START, Vec3::ZERO)
            .with_distance_range(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE)
            .with_damping(true)
            .with_pan(false),
    ));
}

pub fn galaxy_rotation(elapsed_secs: f32) -> Quat {
    Quat::from_rotation_y(elapsed_secs / ROTATION_SLOWDOWN)
}

/// Rotation is a transform on the entity, the cloud buffers are never touched
fn rotate_galaxy(time: Res<Time>, mut galaxies: Query<&mut Transform, With<GalaxyPoints>>) {
    let rotation = galaxy_rotation(time.elapsed_secs());
    for mut transform in &mut galaxies {
        transform.rotation = rotation;
    }
}

fn exit_on_escape(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
