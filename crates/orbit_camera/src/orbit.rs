use bevy::prelude::*;

/// Keeps the camera off the poles so `looking_at` always has a usable up vector
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Spherical camera placement around a target point.
/// yaw is measured around +Y from the +Z axis, pitch is the elevation above the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPose {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitPose {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Self {
                target,
                yaw: 0.0,
                pitch: 0.0,
                distance: 0.0,
            };
        }

        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.target + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

/// Orbit-style controller: rotate around a target, zoom within a distance range,
/// optional panning and frame based damping.
#[derive(Component, Clone, Debug)]
#[require(Transform)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,

    pub min_distance: f32,
    pub max_distance: f32,

    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,

    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    pan_velocity: Vec3,

    initial: OrbitPose,
}

impl OrbitCamera {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let pose = OrbitPose::looking_at(eye, target);
        Self {
            target: pose.target,
            yaw: pose.yaw,
            pitch: pose.pitch,
            distance: pose.distance,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_damping: true,
            damping_factor: 0.05,
            enable_pan: true,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.001,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            pan_velocity: Vec3::ZERO,
            initial: pose,
        }
    }

    pub fn with_distance_range(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self.distance = self.distance.clamp(min_distance, max_distance);
        self.initial.distance = self.distance;
        self
    }

    pub fn with_damping(mut self, enabled: bool) -> Self {
        self.enable_damping = enabled;
        self
    }

    pub fn with_pan(mut self, enabled: bool) -> Self {
        self.enable_pan = enabled;
        self
    }

    pub fn pose(&self) -> OrbitPose {
        OrbitPose {
            target: self.target,
            yaw: self.yaw,
            pitch: self.pitch,
            distance: self.distance,
        }
    }

    /// Queue a rotation from a pointer drag, in pixels
    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw_velocity -= drag.x * self.rotate_speed;
        self.pitch_velocity += drag.y * self.rotate_speed;
    }

    /// Queue a zoom from scroll lines, positive values move closer
    pub fn zoom(&mut self, scroll: f32) {
        self.zoom_velocity -= scroll * self.zoom_speed;
    }

    /// Queue a pan from a pointer drag, ignored while panning is disabled
    pub fn pan(&mut self, drag: Vec2) {
        if !self.enable_pan {
            return;
        }
        let transform = self.pose().transform();
        let scale = self.distance * self.pan_speed;
        self.pan_velocity += (transform.left() * drag.x + transform.up() * drag.y) * scale;
    }

    /// Integrate queued motion for one frame
    pub fn step(&mut self) {
        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        self.yaw += self.yaw_velocity * factor;
        self.pitch = (self.pitch + self.pitch_velocity * factor).clamp(-MAX_PITCH, MAX_PITCH);
        self.distance = (self.distance * (self.zoom_velocity * factor).exp())
            .clamp(self.min_distance, self.max_distance);
        self.target += self.pan_velocity * factor;

        let decay = 1.0 - factor;
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
        self.zoom_velocity *= decay;
        self.pan_velocity *= decay;
    }

    pub fn is_moving(&self) -> bool {
        self.yaw_velocity.abs() > 1e-5
            || self.pitch_velocity.abs() > 1e-5
            || self.zoom_velocity.abs() > 1e-5
            || self.pan_velocity.length_squared() > 1e-10
    }

    /// Return to the pose the camera was created with
    pub fn reset(&mut self) {
        self.target = self.initial.target;
        self.yaw = self.initial.yaw;
        self.pitch = self.initial.pitch;
        self.distance = self.initial.distance;
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
        self.zoom_velocity = 0.0;
        self.pan_velocity = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn galaxy_camera() -> OrbitCamera {
        OrbitCamera::new(Vec3::new(0.0, 9.0, 10.0), Vec3::ZERO)
            .with_distance_range(2.0, 20.0)
            .with_pan(false)
    }

    #[test]
    fn pose_round_trips_the_eye_position() {
        let pose = OrbitPose::looking_at(Vec3::new(0.0, 9.0, 10.0), Vec3::ZERO);
        assert!(pose.eye().distance(Vec3::new(0.0, 9.0, 10.0)) < 1e-4);
        assert!((pose.distance - 181f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped_to_the_distance_range() {
        let mut camera = galaxy_camera();
        camera.zoom(-1000.0);
        for _ in 0..200 {
            camera.step();
        }
        assert_eq!(camera.distance, 20.0);

        camera.zoom(1000.0);
        for _ in 0..200 {
            camera.step();
        }
        assert_eq!(camera.distance, 2.0);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut camera = galaxy_camera();
        camera.rotate(Vec2::new(100.0, 0.0));
        camera.step();
        let first = camera.yaw;
        assert!(camera.is_moving());
        camera.step();
        assert!(camera.yaw < first);
        assert!(first < 0.0);
    }

    #[test]
    fn undamped_motion_applies_in_one_frame() {
        let mut camera = galaxy_camera().with_damping(false);
        camera.rotate(Vec2::new(100.0, 0.0));
        camera.step();
        assert!((camera.yaw + 0.5).abs() < 1e-5);
        assert!(!camera.is_moving());
    }

    #[test]
    fn pan_is_ignored_when_disabled() {
        let mut camera = galaxy_camera().with_damping(false);
        camera.pan(Vec2::new(300.0, 300.0));
        camera.step();
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn pitch_never_reaches_the_pole() {
        let mut camera = galaxy_camera().with_damping(false);
        camera.rotate(Vec2::new(0.0, 10_000.0));
        camera.step();
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        assert!(camera.pose().transform().translation.is_finite());
    }

    #[test]
    fn reset_restores_initial_pose() {
        let mut camera = galaxy_camera();
        let initial = camera.pose();
        camera.rotate(Vec2::new(40.0, -25.0));
        camera.zoom(3.0);
        for _ in 0..10 {
            camera.step();
        }
        assert_ne!(camera.pose(), initial);

        camera.reset();
        assert_eq!(camera.pose(), initial);
        assert!(!camera.is_moving());
    }
}
