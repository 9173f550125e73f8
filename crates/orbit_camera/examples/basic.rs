use bevy::prelude::*;
use orbit_camera::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(OrbitCameraPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, reset_on_space)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(2.0, 2.0, 2.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.8, 0.7, 0.6),
            ..default()
        })),
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    // drag with the left button to orbit, scroll to zoom, space to reset
    commands.spawn((
        Camera3d::default(),
        OrbitCamera::new(Vec3::new(0.0, 4.0, 8.0), Vec3::ZERO)
            .with_distance_range(3.0, 30.0)
            .with_pan(false),
    ));
}

fn reset_on_space(keys: Res<ButtonInput<KeyCode>>, mut reset: EventWriter<ResetOrbitCamera>) {
    if keys.just_pressed(KeyCode::Space) {
        reset.write(ResetOrbitCamera);
    }
}
