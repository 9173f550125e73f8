use crate::prelude::*;
use bevy::{prelude::*, render::render_resource::ShaderType};
use bytemuck::{Pod, Zeroable};

// Duplicated as `PointCloudSettings` in point_cloud.wgsl, keep both in sync
#[derive(ShaderType, Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct PointCloudSettings {
    pub tint: Vec4,
    pub point_size: f32,
    pub size_attenuation: u32,
    pub vertex_colors: u32,
    pub alpha_mask: u32,
}

impl PointCloudSettings {
    pub fn read(hints: &PointCloudHints) -> Self {
        let [r, g, b] = hints.tint;
        // tint arrives gamma encoded, the shader works in linear space
        let tint = LinearRgba::from(Srgba::rgb(r, g, b));
        Self {
            tint: Vec4::new(tint.red, tint.green, tint.blue, 1.0),
            point_size: hints.point_size,
            size_attenuation: hints.size_attenuation as u32,
            vertex_colors: hints.vertex_colors as u32,
            alpha_mask: hints.alpha_mask as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_layout_matches_the_shader() {
        // vec4 + four 4 byte scalars
        assert_eq!(std::mem::size_of::<PointCloudSettings>(), 32);
        assert_eq!(PointCloudSettings::min_size().get(), 32);
    }

    #[test]
    fn flags_follow_the_hints() {
        let settings = PointCloudSettings::read(&PointCloudHints {
            point_size: 0.3,
            size_attenuation: true,
            vertex_colors: false,
            alpha_mask: true,
            ..default()
        });
        assert_eq!(settings.point_size, 0.3);
        assert_eq!(settings.size_attenuation, 1);
        assert_eq!(settings.vertex_colors, 0);
        assert_eq!(settings.alpha_mask, 1);
        assert_eq!(settings.tint, Vec4::ONE);
    }
}
