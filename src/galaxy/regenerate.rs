use super::{generate_galaxy, GalaxyParameters, GalaxyRandom, GalaxySet, RandomSource};
use crate::graphics::{point_cloud_mesh, PointCloudMaterial};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use std::fmt;
use std::time::{Duration, Instant};

pub struct RegeneratePlugin;

impl Plugin for RegeneratePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyCloud>()
            .init_resource::<GalaxyRandom>()
            .add_systems(Update, regenerate_galaxy.in_set(GalaxySet::Regenerate));
    }
}

/// Marks the entity drawing the current galaxy cloud
#[derive(Component)]
pub struct GalaxyPoints;

/// Render resources owned by a live galaxy cloud
#[derive(Debug, Clone)]
pub struct LiveCloud {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<PointCloudMaterial>,
    pub particle_count: usize,
}

#[derive(Debug, Default)]
pub enum CloudState {
    #[default]
    Empty,
    Populated(LiveCloud),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegenerateError {
    /// The live cloud's mesh was already gone from `Assets<Mesh>`
    MeshNotResident(AssetId<Mesh>),
    /// The live cloud's material was already gone from its asset collection
    MaterialNotResident(AssetId<PointCloudMaterial>),
}

impl fmt::Display for RegenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegenerateError::MeshNotResident(id) => {
                write!(f, "galaxy mesh {id:?} was released outside of regeneration")
            }
            RegenerateError::MaterialNotResident(id) => {
                write!(f, "galaxy material {id:?} was released outside of regeneration")
            }
        }
    }
}

impl std::error::Error for RegenerateError {}

/// Asset collections a cloud's GPU resources live in
#[derive(SystemParam)]
pub struct CloudAssets<'w> {
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub materials: ResMut<'w, Assets<PointCloudMaterial>>,
}

/// Owner of the galaxy cloud's lifecycle
#[derive(Resource)]
pub struct GalaxyCloud {
    pub state: CloudState,
    /// Parameter generation last built (or attempted)
    pub generation: i32,
    pub last_generation_time: Duration,
    pub last_error: Option<RegenerateError>,
}

impl Default for GalaxyCloud {
    fn default() -> Self {
        Self {
            state: CloudState::Empty,
            generation: -1,
            last_generation_time: Duration::ZERO,
            last_error: None,
        }
    }
}

impl GalaxyCloud {
    pub fn particle_count(&self) -> usize {
        match &self.state {
            CloudState::Empty => 0,
            CloudState::Populated(live) => live.particle_count,
        }
    }

    pub fn entity(&self) -> Option<Entity> {
        match &self.state {
            CloudState::Empty => None,
            CloudState::Populated(live) => Some(live.entity),
        }
    }

    /// Replaces the live cloud: dispose, detach, generate, attach.
    ///
    /// Entity commands from detach and attach are applied at the same sync
    /// point, so the renderer sees either the old cloud or the new one.
    /// If disposal fails the old cloud stays attached and nothing is generated.
    pub fn regenerate(
        &mut self,
        params: &GalaxyParameters,
        rng: &mut impl RandomSource,
        commands: &mut Commands,
        assets: &mut CloudAssets,
    ) -> Result<(), RegenerateError> {
        let started = Instant::now();

        if let CloudState::Populated(live) = std::mem::take(&mut self.state) {
            if let Err(err) = dispose(&live, assets) {
                self.state = CloudState::Populated(live);
                return Err(err);
            }
            commands.entity(live.entity).despawn();
        }

        let cloud = generate_galaxy(params, rng);
        let mesh = assets.meshes.add(point_cloud_mesh(&cloud));
        let material = assets
            .materials
            .add(PointCloudMaterial::from_hints(cloud.hints(), None));
        let entity = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::IDENTITY,
                Visibility::Inherited,
                NoFrustumCulling,
                GalaxyPoints,
            ))
            .id();

        self.state = CloudState::Populated(LiveCloud {
            entity,
            mesh,
            material,
            particle_count: cloud.len(),
        });
        self.last_generation_time = started.elapsed();
        Ok(())
    }
}

/// Releases both assets or neither
fn dispose(live: &LiveCloud, assets: &mut CloudAssets) -> Result<(), RegenerateError> {
    if !assets.meshes.contains(&live.mesh) {
        return Err(RegenerateError::MeshNotResident(live.mesh.id()));
    }
    if !assets.materials.contains(&live.material) {
        return Err(RegenerateError::MaterialNotResident(live.material.id()));
    }
    assets.meshes.remove(&live.mesh);
    assets.materials.remove(&live.material);
    Ok(())
}

pub(crate) fn regenerate_galaxy(
    mut commands: Commands,
    params: Res<GalaxyParameters>,
    mut cloud: ResMut<GalaxyCloud>,
    mut rng: ResMut<GalaxyRandom>,
    mut assets: CloudAssets,
) {
    if cloud.generation == params.generation {
        return;
    }
    // a failed attempt is not retried until the next commit
    cloud.generation = params.generation;

    match cloud.regenerate(&params, &mut *rng, &mut commands, &mut assets) {
        Ok(()) => {
            info!(
                "Generated galaxy with {} particles in {:.2} ms (generation {})",
                cloud.particle_count(),
                cloud.last_generation_time.as_secs_f64() * 1000.0,
                params.generation
            );
            cloud.last_error = None;
        }
        Err(err) => {
            error!("Galaxy regeneration failed: {err}");
            cloud.last_error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::{apply_committed_parameters, ParameterCommitted, ParameterEdit};
    use rand::{rngs::SmallRng, SeedableRng};

    fn test_app(count: u32) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<PointCloudMaterial>()
            .add_event::<ParameterCommitted>()
            .insert_resource(GalaxyParameters {
                count,
                ..default()
            })
            .insert_resource(GalaxyRandom(Box::new(SmallRng::seed_from_u64(17))))
            .init_resource::<GalaxyCloud>()
            .add_systems(
                Update,
                (apply_committed_parameters, regenerate_galaxy).chain(),
            );
        app
    }

    fn galaxy_entities(app: &mut App) -> Vec<Entity> {
        let world = app.world_mut();
        let mut query = world.query_filtered::<Entity, With<GalaxyPoints>>();
        query.iter(world).collect()
    }

    fn resident_counts(app: &App) -> (usize, usize) {
        let world = app.world();
        (
            world.resource::<Assets<Mesh>>().len(),
            world.resource::<Assets<PointCloudMaterial>>().len(),
        )
    }

    fn bump_generation(app: &mut App) {
        app.world_mut()
            .resource_mut::<GalaxyParameters>()
            .generation += 1;
    }

    #[test]
    fn first_frame_populates_the_cloud() {
        let mut app = test_app(1_000);
        assert_eq!(app.world().resource::<GalaxyCloud>().particle_count(), 0);

        app.update();

        let cloud = app.world().resource::<GalaxyCloud>();
        assert_eq!(cloud.particle_count(), 1_000);
        assert_eq!(cloud.generation, 1);
        assert!(cloud.last_error.is_none());
        assert_eq!(galaxy_entities(&mut app).len(), 1);
        assert_eq!(resident_counts(&app), (1, 1));
    }

    #[test]
    fn unchanged_generation_does_not_regenerate() {
        let mut app = test_app(500);
        app.update();
        let first = galaxy_entities(&mut app);
        app.update();
        app.update();
        assert_eq!(galaxy_entities(&mut app), first);
    }

    #[test]
    fn repeated_regeneration_does_not_accumulate_resources() {
        let mut app = test_app(1_000);
        app.update();

        let mut previous = galaxy_entities(&mut app)[0];
        for _ in 0..25 {
            bump_generation(&mut app);
            app.update();

            let entities = galaxy_entities(&mut app);
            assert_eq!(entities.len(), 1);
            assert_ne!(entities[0], previous);
            assert!(app.world().get_entity(previous).is_err());
            previous = entities[0];

            assert_eq!(resident_counts(&app), (1, 1));
            assert_eq!(app.world().resource::<GalaxyCloud>().particle_count(), 1_000);
        }
    }

    #[test]
    fn count_change_mid_session_replaces_the_cloud() {
        let mut app = test_app(1_000);
        app.update();
        let old_mesh = match &app.world().resource::<GalaxyCloud>().state {
            CloudState::Populated(live) => live.mesh.id(),
            CloudState::Empty => panic!("cloud should be populated"),
        };

        app.world_mut()
            .send_event(ParameterCommitted(ParameterEdit::Count(50_000)));
        app.update();

        let world = app.world();
        let cloud = world.resource::<GalaxyCloud>();
        assert_eq!(cloud.particle_count(), 50_000);
        let CloudState::Populated(live) = &cloud.state else {
            panic!("cloud should be populated");
        };
        let meshes = world.resource::<Assets<Mesh>>();
        assert!(meshes.get(old_mesh).is_none());
        assert_eq!(meshes.get(&live.mesh).unwrap().count_vertices(), 50_000 * 4);
        assert_eq!(resident_counts(&app), (1, 1));
        assert_eq!(galaxy_entities(&mut app).len(), 1);
    }

    #[test]
    fn disposal_failure_keeps_the_old_cloud_attached() {
        let mut app = test_app(300);
        app.update();
        let (old_entity, old_mesh) = match &app.world().resource::<GalaxyCloud>().state {
            CloudState::Populated(live) => (live.entity, live.mesh.id()),
            CloudState::Empty => panic!("cloud should be populated"),
        };

        // release the mesh behind the generator's back
        app.world_mut()
            .resource_mut::<Assets<Mesh>>()
            .remove(old_mesh);
        bump_generation(&mut app);
        app.update();

        let cloud = app.world().resource::<GalaxyCloud>();
        assert_eq!(
            cloud.last_error,
            Some(RegenerateError::MeshNotResident(old_mesh))
        );
        assert_eq!(cloud.entity(), Some(old_entity));
        assert_eq!(cloud.generation, 2);
        // material was not released either
        assert_eq!(resident_counts(&app), (0, 1));
        assert_eq!(galaxy_entities(&mut app), vec![old_entity]);

        // not retried on the following frame
        app.update();
        assert_eq!(galaxy_entities(&mut app), vec![old_entity]);
    }

    #[test]
    fn error_messages_name_the_resource() {
        let err = RegenerateError::MeshNotResident(AssetId::default());
        assert!(err.to_string().starts_with("galaxy mesh"));
    }
}
