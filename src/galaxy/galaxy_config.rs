use bevy::prelude::*;

/// Parameters driving the spiral galaxy.
/// Mutated only through [`GalaxyParameters::apply`], which bumps `generation`
/// so the regeneration system knows to rebuild the cloud.
#[derive(Resource, Clone, PartialEq, Debug)]
pub struct GalaxyParameters {
    pub generation: i32,

    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,

    pub inside_color: Srgba,
    pub outside_color: Srgba,
    pub size_attenuation: bool,
}

/// A single committed field edit coming from the parameter panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterEdit {
    Count(u32),
    Size(f32),
    Radius(f32),
    Branches(u32),
    Spin(f32),
    Randomness(f32),
    RandomnessPower(f32),
    InsideColor(Srgba),
    OutsideColor(Srgba),
    SizeAttenuation(bool),
}

#[derive(Event, Clone, Copy, Debug)]
pub struct ParameterCommitted(pub ParameterEdit);

impl GalaxyParameters {
    pub const MIN: Self = Self {
        generation: 0,
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 2,
        spin: -5.0,
        randomness: 0.01,
        randomness_power: -1.0,
        inside_color: Srgba::BLACK,
        outside_color: Srgba::BLACK,
        size_attenuation: false,
    };
    pub const MAX: Self = Self {
        generation: i32::MAX,
        count: 200_000,
        size: 0.1,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: Srgba::WHITE,
        outside_color: Srgba::WHITE,
        size_attenuation: true,
    };

    /// Copy with every field pulled inside its bound.
    /// NaN floats fall back to the default value.
    pub fn clamped(&self) -> Self {
        let (min, max, fallback) = (Self::MIN, Self::MAX, Self::default());
        Self {
            generation: self.generation,
            count: self.count.clamp(min.count, max.count),
            size: clamp_or(self.size, min.size, max.size, fallback.size),
            radius: clamp_or(self.radius, min.radius, max.radius, fallback.radius),
            branches: self.branches.clamp(min.branches, max.branches),
            spin: clamp_or(self.spin, min.spin, max.spin, fallback.spin),
            randomness: clamp_or(
                self.randomness,
                min.randomness,
                max.randomness,
                fallback.randomness,
            ),
            randomness_power: clamp_or(
                self.randomness_power,
                min.randomness_power,
                max.randomness_power,
                fallback.randomness_power,
            ),
            inside_color: clamp_color(self.inside_color),
            outside_color: clamp_color(self.outside_color),
            size_attenuation: self.size_attenuation,
        }
    }

    /// Applies one edit. Returns true (and bumps `generation`) only when a value changed.
    pub fn apply(&mut self, edit: ParameterEdit) -> bool {
        // NaN edits keep the previous value rather than the default
        if has_nan(&edit) {
            return false;
        }

        let mut next = self.clone();
        match edit {
            ParameterEdit::Count(v) => next.count = v,
            ParameterEdit::Size(v) => next.size = v,
            ParameterEdit::Radius(v) => next.radius = v,
            ParameterEdit::Branches(v) => next.branches = v,
            ParameterEdit::Spin(v) => next.spin = v,
            ParameterEdit::Randomness(v) => next.randomness = v,
            ParameterEdit::RandomnessPower(v) => next.randomness_power = v,
            ParameterEdit::InsideColor(v) => next.inside_color = v,
            ParameterEdit::OutsideColor(v) => next.outside_color = v,
            ParameterEdit::SizeAttenuation(v) => next.size_attenuation = v,
        }
        let next = next.clamped();
        if next == *self {
            return false;
        }
        *self = Self {
            generation: self.generation + 1,
            ..next
        };
        true
    }
}

fn has_nan(edit: &ParameterEdit) -> bool {
    match *edit {
        ParameterEdit::Size(v)
        | ParameterEdit::Radius(v)
        | ParameterEdit::Spin(v)
        | ParameterEdit::Randomness(v)
        | ParameterEdit::RandomnessPower(v) => v.is_nan(),
        ParameterEdit::InsideColor(c) | ParameterEdit::OutsideColor(c) => {
            c.red.is_nan() || c.green.is_nan() || c.blue.is_nan()
        }
        _ => false,
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

fn clamp_color(color: Srgba) -> Srgba {
    Srgba::new(
        clamp_or(color.red, 0.0, 1.0, 0.0),
        clamp_or(color.green, 0.0, 1.0, 0.0),
        clamp_or(color.blue, 0.0, 1.0, 0.0),
        1.0,
    )
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            generation: 1,
            count: 100_000,
            size: 0.01,
            radius: 6.0,
            branches: 4,
            spin: 1.2,
            randomness: 0.45,
            randomness_power: 0.144,
            inside_color: Srgba::rgb_u8(0xff, 0x60, 0x30),
            outside_color: Srgba::rgb_u8(0x1b, 0x39, 0x84),
            size_attenuation: true,
        }
    }
}

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyParameters::default())
            .add_event::<ParameterCommitted>()
            .add_systems(
                Update,
                apply_committed_parameters.in_set(super::GalaxySet::ApplyParameters),
            );
    }
}

pub(crate) fn apply_committed_parameters(
    mut committed_evr: EventReader<ParameterCommitted>,
    mut params: ResMut<GalaxyParameters>,
) {
    for ParameterCommitted(edit) in committed_evr.read() {
        if params.apply(*edit) {
            debug!(
                "Committed {:?}, parameters now at generation {}",
                edit, params.generation
            );
        }
    }
}
