// Ballistic simulation: explicit Euler flight, TTL expiry, ground clipping and target hits.
use std::fmt;

use bevy::prelude::*;

use crate::plugins::config::RangeConfig;
use crate::plugins::core_sim::{SimClock, SimSet};
use crate::plugins::events::TargetHit;
use crate::plugins::target_field::{TargetField, TargetId};

/// Projectile identity; displays as `stone-<n>`. Never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stone-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Launch time on the simulation clock (seconds).
    pub created_at: f32,
}

impl Projectile {
    pub fn age(&self, now: f32) -> f32 {
        now - self.created_at
    }
}

/// How a projectile left the active set during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retired {
    Expired,
    Grounded,
    Hit(TargetId),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StepReport {
    pub retired: Vec<(ProjectileId, Retired)>,
}

impl StepReport {
    pub fn hits(&self) -> impl Iterator<Item = (ProjectileId, TargetId)> + '_ {
        self.retired.iter().filter_map(|(p, r)| match r {
            Retired::Hit(t) => Some((*p, *t)),
            _ => None,
        })
    }
}

/// Every in-flight projectile, in launch order.
#[derive(Resource, Debug, Default)]
pub struct Projectiles {
    active: Vec<Projectile>,
    next_id: u64,
}

impl Projectiles {
    pub fn launch(&mut self, position: Vec3, velocity: Vec3, now: f32) -> ProjectileId {
        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        self.active.push(Projectile { id, position, velocity, created_at: now });
        id
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.active.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drops every projectile; ids keep counting so stale references never alias a new stone.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Advance all projectiles by `dt`. `now` is the clock after this frame's advance.
    /// Hit flags are written into `field` as they happen, so later projectiles in the
    /// same step already see them.
    pub fn step(&mut self, dt: f32, now: f32, field: &mut TargetField, cfg: &RangeConfig) -> StepReport {
        let mut report = StepReport::default();
        let mut survivors = Vec::with_capacity(self.active.len());

        for mut p in self.active.drain(..) {
            if p.age(now) > cfg.projectile_lifetime {
                report.retired.push((p.id, Retired::Expired));
                continue;
            }

            p.position += p.velocity * dt;
            p.velocity.y -= cfg.gravity * dt;

            if p.position.y < cfg.ground_clip_y {
                report.retired.push((p.id, Retired::Grounded));
                continue;
            }

            if let Some(target) = field.strike(p.position, cfg.hit_radius_sq) {
                report.retired.push((p.id, Retired::Hit(target)));
                continue;
            }

            survivors.push(p);
        }

        self.active = survivors;
        report
    }
}

pub struct BallisticsPlugin;
impl Plugin for BallisticsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Projectiles>()
            .add_systems(Update, advance_projectiles.in_set(SimSet::Ballistics));
    }
}

fn advance_projectiles(
    clock: Res<SimClock>,
    cfg: Res<RangeConfig>,
    mut projectiles: ResMut<Projectiles>,
    mut field: ResMut<TargetField>,
    mut ev_hit: EventWriter<TargetHit>,
) {
    if projectiles.is_empty() {
        return;
    }
    let report = projectiles.step(clock.delta_seconds, clock.elapsed_seconds, &mut field, &cfg);
    for (id, outcome) in &report.retired {
        match outcome {
            Retired::Hit(target) => {
                info!("HIT target={} projectile={} t={:.2}s", target, id, clock.elapsed_seconds);
                ev_hit.send(TargetHit { target: *target, projectile: *id });
            }
            Retired::Grounded => debug!("GROUND projectile={}", id),
            Retired::Expired => debug!("EXPIRED projectile={}", id),
        }
    }
}
