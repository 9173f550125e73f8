use bevy::prelude::*;

mod galaxy_config;
mod point_cloud;
mod random_source;
mod regenerate;
mod spiral;
mod star_field;

pub use galaxy_config::{
    GalaxyConfigPlugin, GalaxyParameters, ParameterCommitted, ParameterEdit,
};
pub use point_cloud::{Blending, PointCloud, PointCloudHints};
pub use random_source::{GalaxyRandom, RandomSource};
pub use regenerate::{
    CloudAssets, CloudState, GalaxyCloud, GalaxyPoints, LiveCloud, RegenerateError,
    RegeneratePlugin,
};
pub use spiral::{galaxy_hints, generate_galaxy, safe_pow};
pub use star_field::{generate_star_field, StarField, StarFieldPlugin};

pub(crate) use galaxy_config::apply_committed_parameters;

/// Per-frame ordering: commits land before regeneration, animation sees the new cloud
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GalaxySet {
    ApplyParameters,
    Regenerate,
    Animate,
}

pub struct GalaxyPlugin;

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GalaxySet::ApplyParameters,
                GalaxySet::Regenerate,
                GalaxySet::Animate,
            )
                .chain(),
        )
        .add_plugins((GalaxyConfigPlugin, RegeneratePlugin, StarFieldPlugin));
    }
}
