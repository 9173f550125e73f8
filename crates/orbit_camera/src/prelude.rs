pub use crate::{
    OrbitCamera, OrbitCameraInput, OrbitCameraPlugin, OrbitCameraSet, OrbitPose, ResetOrbitCamera,
};
