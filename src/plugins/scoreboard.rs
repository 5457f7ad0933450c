// Game outcome kept by the host: score, progress and the victory/restart flow.
use bevy::prelude::*;

use crate::plugins::config::RangeConfig;
use crate::plugins::core_sim::{SimClock, SimSet};
use crate::plugins::events::{PowerChanged, ResetRequested, TargetHit};

pub const POINTS_PER_HIT: u32 = 100;

#[derive(Resource, Debug, Default)]
pub struct Score {
    pub hits: u32,
    pub points: u32,
    pub total: u32,
    pub won: bool,
    pub final_time: f32,
}

/// Latest normalized charge power, shown by the power meter.
#[derive(Resource, Debug, Default)]
pub struct PowerMeter {
    pub normalized: f32,
}

impl Score {
    pub fn new(total: u32) -> Self {
        Self { total, ..default() }
    }

    /// Count one hit; returns true on the hit that completes the field.
    pub fn record_hit(&mut self, now: f32) -> bool {
        self.hits += 1;
        self.points += POINTS_PER_HIT;
        if !self.won && self.total > 0 && self.hits >= self.total {
            self.won = true;
            self.final_time = now;
            return true;
        }
        false
    }
}

pub struct ScoreboardPlugin;
impl Plugin for ScoreboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Score>()
            .init_resource::<PowerMeter>()
            .add_systems(Startup, init_score)
            .add_systems(Update, request_restart.before(SimSet::Reset))
            .add_systems(Update, clear_score_on_reset.in_set(SimSet::Reset))
            .add_systems(Update, (tally_hits, track_power).after(SimSet::Ballistics));
    }
}

fn init_score(cfg: Res<RangeConfig>, mut score: ResMut<Score>) {
    *score = Score::new(cfg.target_count as u32);
}

fn tally_hits(clock: Res<SimClock>, mut score: ResMut<Score>, mut ev_hit: EventReader<TargetHit>) {
    for _ in ev_hit.read() {
        if score.record_hit(clock.elapsed_seconds) {
            info!("VICTORY hits={} points={} time={:.2}s", score.hits, score.points, score.final_time);
        }
    }
}

fn track_power(mut meter: ResMut<PowerMeter>, mut ev_power: EventReader<PowerChanged>) {
    if let Some(last) = ev_power.read().last() {
        meter.normalized = last.normalized;
    }
}

fn request_restart(keys: Option<Res<ButtonInput<KeyCode>>>, score: Res<Score>, mut ev_reset: EventWriter<ResetRequested>) {
    let Some(keys) = keys else { return; };
    if score.won && keys.just_pressed(KeyCode::KeyR) {
        ev_reset.send(ResetRequested);
    }
}

fn clear_score_on_reset(cfg: Res<RangeConfig>, mut score: ResMut<Score>, mut ev_reset: EventReader<ResetRequested>) {
    if ev_reset.read().count() == 0 {
        return;
    }
    *score = Score::new(cfg.target_count as u32);
}
