use super::shader_types::PointCloudSettings;
use crate::prelude::*;
use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::{Indices, MeshVertexBufferLayoutRef, PrimitiveTopology},
        render_asset::RenderAssetUsages,
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
        },
    },
};
use rayon::prelude::*;

const SHADER_ASSET_PATH: &str = "shaders/point_cloud.wgsl";

/// Billboard corners, one quad per particle
const CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Additive point sprite material shared by the galaxy and the star field
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointCloudMaterial {
    #[uniform(0)]
    pub settings: PointCloudSettings,
    #[texture(1)]
    #[sampler(2)]
    pub alpha_map: Option<Handle<Image>>,
    pub alpha_mode: AlphaMode,
}

impl PointCloudMaterial {
    pub fn from_hints(hints: &PointCloudHints, alpha_map: Option<Handle<Image>>) -> Self {
        let alpha_mode = match hints.blending {
            Blending::Additive => AlphaMode::Add,
        };
        Self {
            settings: PointCloudSettings::read(hints),
            alpha_map: alpha_map.filter(|_| hints.alpha_mask),
            alpha_mode,
        }
    }
}

impl Material for PointCloudMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // clouds never occlude each other
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}

/// Expands a cloud into a quad mesh. Every corner carries the particle center,
/// the vertex shader pushes it out along the UV corner.
pub fn point_cloud_mesh(cloud: &PointCloud) -> Mesh {
    let positions: Vec<[f32; 3]> = cloud
        .positions()
        .par_iter()
        .flat_map_iter(|p| [p.to_array(); 4])
        .collect();

    let uvs: Vec<[f32; 2]> = (0..cloud.len())
        .into_par_iter()
        .flat_map_iter(|_| CORNERS)
        .collect();

    // generators blend in sRGB, vertex colors are linear
    let colors: Vec<[f32; 4]> = cloud
        .colors()
        .par_iter()
        .flat_map_iter(|&[r, g, b]| {
            let linear = LinearRgba::from(Srgba::rgb(r, g, b));
            [[linear.red, linear.green, linear.blue, 1.0]; 4]
        })
        .collect();

    let indices: Vec<u32> = (0..cloud.len() as u32)
        .into_par_iter()
        .flat_map_iter(|i| QUAD_INDICES.map(|corner| i * 4 + corner))
        .collect();

    // keep the main world copy so regeneration can release it explicitly
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::{generate_star_field, GalaxyParameters};
    use bevy::render::mesh::VertexAttributeValues;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn mesh_has_one_quad_per_particle() {
        let params = GalaxyParameters {
            count: 1_000,
            ..default()
        };
        let cloud = generate_galaxy(&params, &mut SmallRng::seed_from_u64(1));
        let mesh = point_cloud_mesh(&cloud);

        assert_eq!(mesh.count_vertices(), 4_000);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), 6_000);
        assert_eq!(&indices[6..12], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(*indices.iter().max().unwrap(), 3_999);
    }

    #[test]
    fn quad_corners_share_the_particle_center() {
        let cloud = generate_star_field(&mut SmallRng::seed_from_u64(2));
        let mesh = point_cloud_mesh(&cloud);
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("expected positions");
        };
        for (i, center) in cloud.positions().iter().enumerate() {
            for corner in &positions[i * 4..i * 4 + 4] {
                assert_eq!(*corner, center.to_array());
            }
        }
    }

    #[test]
    fn vertex_colors_are_linearized() {
        let params = GalaxyParameters {
            count: 10,
            ..default()
        };
        let cloud = generate_galaxy(&params, &mut SmallRng::seed_from_u64(4));
        let mesh = point_cloud_mesh(&cloud);
        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("expected colors");
        };
        let [r, g, b] = cloud.colors()[3];
        let expected = LinearRgba::from(Srgba::rgb(r, g, b));
        assert_eq!(colors[12], [expected.red, expected.green, expected.blue, 1.0]);
    }

    #[test]
    fn alpha_map_only_kept_for_masked_clouds() {
        let handle = Handle::<Image>::default();
        let galaxy = PointCloudMaterial::from_hints(
            &galaxy_hints(&GalaxyParameters::default()),
            Some(handle.clone()),
        );
        assert!(galaxy.alpha_map.is_none());
        assert_eq!(galaxy.alpha_mode, AlphaMode::Add);

        let stars = PointCloudMaterial::from_hints(
            &crate::galaxy::generate_star_field(&mut SmallRng::seed_from_u64(0)).hints(),
            Some(handle),
        );
        assert!(stars.alpha_map.is_some());
    }
}
