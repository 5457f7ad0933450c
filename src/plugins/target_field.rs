// Target field: one-shot generation of the floating targets, regenerated wholesale on reset.
use std::fmt;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::plugins::config::RangeConfig;

/// Stable target identity; displays as `target-<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub position: Vec3,
    pub hit: bool,
}

/// Scatter `count` targets in a horizontal band, each one further downrange than the last.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Target> {
    (0..count)
        .map(|i| {
            let x = (rng.gen::<f32>() - 0.5) * 12.0;
            let y = 1.2 + rng.gen::<f32>() * 2.0;
            let z = -20.0 - (i as f32 * 15.0) - rng.gen::<f32>() * 5.0;
            Target { id: TargetId(i), position: Vec3::new(x, y, z), hit: false }
        })
        .collect()
}

/// All targets of the current game, in generation order (collision tie-break order).
#[derive(Resource, Debug, Default)]
pub struct TargetField {
    targets: Vec<Target>,
}

impl TargetField {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    pub fn regenerate<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.targets = generate(count, rng);
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn hit_count(&self) -> usize {
        self.targets.iter().filter(|t| t.hit).count()
    }

    pub fn all_hit(&self) -> bool {
        !self.targets.is_empty() && self.targets.iter().all(|t| t.hit)
    }

    /// First unhit target (in field order) within the hit radius of `pos`; flags it as hit.
    pub(crate) fn strike(&mut self, pos: Vec3, hit_radius_sq: f32) -> Option<TargetId> {
        let target = self
            .targets
            .iter_mut()
            .filter(|t| !t.hit)
            .find(|t| pos.distance_squared(t.position) < hit_radius_sq)?;
        target.hit = true;
        Some(target.id)
    }
}

/// RNG behind target placement; seeded from config when a seed is set.
#[derive(Resource)]
pub struct FieldRng(pub StdRng);

impl FieldRng {
    pub fn from_config(cfg: &RangeConfig) -> Self {
        match cfg.seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

pub struct TargetFieldPlugin;
impl Plugin for TargetFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TargetField>()
            .add_systems(Startup, spawn_target_field);
    }
}

fn spawn_target_field(mut commands: Commands, cfg: Res<RangeConfig>, mut field: ResMut<TargetField>) {
    let mut rng = FieldRng::from_config(&cfg);
    field.regenerate(cfg.target_count, &mut rng.0);
    info!("FIELD generated targets={} seed={:?}", field.targets().len(), cfg.seed);
    commands.insert_resource(rng);
}
