use bevy::prelude::*;
use rand::{
    rngs::{SmallRng, ThreadRng},
    Rng, SeedableRng,
};

/// Source of uniform samples in `[0, 1)` used by the cloud generators
pub trait RandomSource {
    fn next_uniform(&mut self) -> f32;
}

impl RandomSource for SmallRng {
    fn next_uniform(&mut self) -> f32 {
        self.random::<f32>()
    }
}

impl RandomSource for ThreadRng {
    fn next_uniform(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Random source used for galaxy regeneration. Unseeded in the app, replaced in tests.
#[derive(Resource)]
pub struct GalaxyRandom(pub Box<dyn RandomSource + Send + Sync>);

impl Default for GalaxyRandom {
    fn default() -> Self {
        Self(Box::new(SmallRng::from_os_rng()))
    }
}

impl RandomSource for GalaxyRandom {
    fn next_uniform(&mut self) -> f32 {
        self.0.next_uniform()
    }
}
