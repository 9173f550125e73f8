use bevy::prelude::*;
mod controls;
mod orbit;
pub mod prelude;

pub use controls::{OrbitCameraInput, ResetOrbitCamera};
pub use orbit::{OrbitCamera, OrbitPose};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrbitCameraSet;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCameraInput>()
            .add_event::<ResetOrbitCamera>()
            .add_systems(
                PostUpdate,
                (
                    controls::orbit_camera_input,
                    controls::apply_reset,
                    controls::update_orbit_transforms,
                )
                    .chain()
                    .in_set(OrbitCameraSet)
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_event_restores_the_camera_transform() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<bevy::input::mouse::MouseMotion>()
            .add_event::<bevy::input::mouse::MouseWheel>()
            .add_plugins(OrbitCameraPlugin);

        let eye = Vec3::new(0.0, 9.0, 10.0);
        let entity = app
            .world_mut()
            .spawn(OrbitCamera::new(eye, Vec3::ZERO).with_distance_range(2.0, 20.0))
            .id();
        app.update();
        let initial = *app.world().get::<Transform>(entity).unwrap();
        assert!(initial.translation.distance(eye) < 1e-4);

        app.world_mut()
            .get_mut::<OrbitCamera>(entity)
            .unwrap()
            .zoom(-5.0);
        for _ in 0..5 {
            app.update();
        }
        let zoomed = *app.world().get::<Transform>(entity).unwrap();
        assert!(zoomed.translation.length() > initial.translation.length());

        app.world_mut().send_event(ResetOrbitCamera);
        app.update();
        let reset = *app.world().get::<Transform>(entity).unwrap();
        assert!(reset.translation.distance(eye) < 1e-4);
    }
}
