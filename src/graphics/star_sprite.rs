use bevy::{
    image::ImageSampler,
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
};
use rayon::prelude::*;

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let s = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    s * s * (3.0 - 2.0 * s)
}

/// Soft circular falloff used as the star field's alpha mask
pub fn star_sprite_alpha(uv: Vec2) -> f32 {
    let d = (uv * 2.0 - Vec2::ONE).length();
    1.0 - smoothstep(0.0, 1.0, d)
}

/// Bakes the star sprite into a single channel texture, sampled as `.r` in the shader
pub fn star_sprite_image(dimension: u32) -> Image {
    let width = dimension.max(2) as usize;
    let mut texture_data = vec![0u8; width * width];

    texture_data
        .par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, texel) in row.iter_mut().enumerate() {
                let uv = (Vec2::new(x as f32, y as f32) + 0.5) / width as f32;
                *texel = (star_sprite_alpha(uv) * 255.0).round() as u8;
            }
        });

    let mut image = Image::new(
        Extent3d {
            width: width as u32,
            height: width as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        texture_data,
        TextureFormat::R8Unorm,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::linear();
    image
}
