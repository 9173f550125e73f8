use super::{Blending, PointCloud, PointCloudHints, RandomSource};
use crate::graphics::{point_cloud_mesh, star_sprite_image, PointCloudMaterial};
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

pub const STAR_COUNT: usize = 800;
/// Stars fill a cube of side 40 centered on the origin
pub const STAR_FIELD_HALF_EXTENT: f32 = 20.0;
pub const STAR_SIZE: f32 = 0.3;
const STAR_SPRITE_DIMENSION: u32 = 64;

pub struct StarFieldPlugin;

impl Plugin for StarFieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_star_field);
    }
}

/// Background star field, spawned once and kept for the lifetime of the app
#[derive(Component)]
pub struct StarField;

pub fn star_field_hints() -> PointCloudHints {
    PointCloudHints {
        point_size: STAR_SIZE,
        size_attenuation: true,
        blending: Blending::Additive,
        vertex_colors: false,
        depth_write: false,
        tint: [1.0; 3],
        alpha_mask: true,
    }
}

pub fn generate_star_field(rng: &mut impl RandomSource) -> PointCloud {
    let mut cloud = PointCloud::with_capacity(STAR_COUNT, star_field_hints());
    for _ in 0..STAR_COUNT {
        let x = star_coordinate(rng);
        let y = star_coordinate(rng);
        let z = star_coordinate(rng);
        cloud.push(Vec3::new(x, y, z), [1.0; 3]);
    }
    cloud
}

fn star_coordinate(rng: &mut impl RandomSource) -> f32 {
    (rng.next_uniform() * 2.0 - 1.0) * STAR_FIELD_HALF_EXTENT
}

fn spawn_star_field(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointCloudMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let cloud = generate_star_field(&mut rand::rng());
    info!("Spawning background star field ({} stars)", cloud.len());

    let sprite = images.add(star_sprite_image(STAR_SPRITE_DIMENSION));
    commands.spawn((
        Mesh3d(meshes.add(point_cloud_mesh(&cloud))),
        MeshMaterial3d(materials.add(PointCloudMaterial::from_hints(
            cloud.hints(),
            Some(sprite),
        ))),
        Transform::IDENTITY,
        Visibility::Inherited,
        NoFrustumCulling,
        StarField,
    ));
}
