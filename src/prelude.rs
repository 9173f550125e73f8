pub use crate::galaxy::{
    galaxy_hints, generate_galaxy, Blending, GalaxyCloud, GalaxyParameters, GalaxyPoints,
    GalaxySet, ParameterCommitted, ParameterEdit, PointCloud, PointCloudHints,
};
pub use crate::graphics::{point_cloud_mesh, PointCloudMaterial};
