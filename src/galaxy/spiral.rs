use super::{Blending, GalaxyParameters, PointCloud, PointCloudHints, RandomSource};
use bevy::prelude::*;
use std::f32::consts::TAU;

/// Builds the spiral galaxy cloud.
///
/// Per particle the source is sampled in a fixed order: radius, then a
/// magnitude and a sign for each of x, y and z.
/// Radius is uniform over `[0, radius]` with no area correction, so the core
/// is denser than the rim.
pub fn generate_galaxy(params: &GalaxyParameters, rng: &mut impl RandomSource) -> PointCloud {
    let count = params.count as usize;
    let branches = params.branches.max(1);
    let inside = srgb_components(params.inside_color);
    let outside = srgb_components(params.outside_color);

    let mut cloud = PointCloud::with_capacity(count, galaxy_hints(params));

    for i in 0..count {
        let radius = rng.next_uniform() * params.radius;
        let branch_angle = (i as u32 % branches) as f32 / branches as f32 * TAU;
        let spin_angle = radius * params.spin;

        // y reuses the planar radius, the galaxy is not flattened
        let offset_x = noise_offset(rng, params, radius);
        let offset_y = noise_offset(rng, params, radius);
        let offset_z = noise_offset(rng, params, radius);

        let angle = branch_angle + spin_angle;
        let position = Vec3::new(
            angle.cos() * radius + offset_x,
            offset_y,
            angle.sin() * radius + offset_z,
        );

        let t = if params.radius > 0.0 {
            (radius / params.radius).clamp(0.0, 1.0)
        } else {
            0.0
        };
        cloud.push(position, mix_rgb(inside, outside, t));
    }

    cloud
}

pub fn galaxy_hints(params: &GalaxyParameters) -> PointCloudHints {
    PointCloudHints {
        point_size: params.size,
        size_attenuation: params.size_attenuation,
        blending: Blending::Additive,
        vertex_colors: true,
        depth_write: false,
        tint: [1.0; 3],
        alpha_mask: false,
    }
}

fn noise_offset(rng: &mut impl RandomSource, params: &GalaxyParameters, radius: f32) -> f32 {
    let magnitude = safe_pow(rng.next_uniform(), params.randomness_power);
    let sign = if rng.next_uniform() < 0.5 { 1.0 } else { -1.0 };
    // a finite magnitude can still overflow once scaled
    let offset = sign * magnitude * params.randomness * radius;
    if offset.is_finite() {
        offset
    } else {
        0.0
    }
}

/// `base^exponent` that never yields NaN or infinity.
/// A zero base with a non-positive exponent counts as no offset.
pub fn safe_pow(base: f32, exponent: f32) -> f32 {
    if base <= 0.0 && exponent <= 0.0 {
        return 0.0;
    }
    let value = base.powf(exponent);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Straight blend of the gamma encoded components.
/// Written as a weighted sum so t = 0 and t = 1 hit the endpoints exactly.
fn mix_rgb(inside: [f32; 3], outside: [f32; 3], t: f32) -> [f32; 3] {
    std::array::from_fn(|c| (inside[c] * (1.0 - t) + outside[c] * t).clamp(0.0, 1.0))
}

fn srgb_components(color: Srgba) -> [f32; 3] {
    [color.red, color.green, color.blue]
}
