// Notifications the simulation core emits to its host, plus the reset request the host sends back.
use bevy::prelude::*;

use crate::plugins::ballistics::ProjectileId;
use crate::plugins::target_field::TargetId;

/// One per resolved projectile/target collision.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetHit {
    pub target: TargetId,
    pub projectile: ProjectileId,
}

/// Charge power as a fraction of max power (0 on fire, cancel and reset).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PowerChanged {
    pub normalized: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileSpawned {
    pub id: ProjectileId,
}

/// Host restart: regenerate targets, clear projectiles, charge state and camera follow.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetRequested;

pub struct RangeEventsPlugin;
impl Plugin for RangeEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TargetHit>()
            .add_event::<PowerChanged>()
            .add_event::<ProjectileSpawned>()
            .add_event::<ResetRequested>();
    }
}
