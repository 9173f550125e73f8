use bevy::prelude::*;

mod point_cloud_material;
mod render;
mod shader_types;
mod star_sprite;

pub use point_cloud_material::{point_cloud_mesh, PointCloudMaterial};
pub use star_sprite::star_sprite_image;

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(render::RenderPlugin);
    }
}
