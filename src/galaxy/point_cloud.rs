use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blending {
    Additive,
}

/// How a cloud wants to be drawn. Read by the renderer, never by the generators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointCloudHints {
    pub point_size: f32,
    pub size_attenuation: bool,
    pub blending: Blending,
    pub vertex_colors: bool,
    pub depth_write: bool,
    /// Flat color used when `vertex_colors` is off
    pub tint: [f32; 3],
    /// Modulate alpha with the star sprite
    pub alpha_mask: bool,
}

impl Default for PointCloudHints {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            size_attenuation: true,
            blending: Blending::Additive,
            vertex_colors: true,
            depth_write: false,
            tint: [1.0; 3],
            alpha_mask: false,
        }
    }
}

/// Parallel position / color buffers. Frozen once a generator hands it out.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
    hints: PointCloudHints,
}

impl PointCloud {
    pub(super) fn with_capacity(count: usize, hints: PointCloudHints) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            hints,
        }
    }

    pub(super) fn push(&mut self, position: Vec3, color: [f32; 3]) {
        self.positions.push(position);
        self.colors.push(color);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn hints(&self) -> &PointCloudHints {
        &self.hints
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vec3, [f32; 3])> + '_ {
        self.positions.iter().copied().zip(self.colors.iter().copied())
    }
}
