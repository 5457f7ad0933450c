use bevy::prelude::*;

use crate::plugins::ballistics::{BallisticsPlugin, Projectiles};
use crate::plugins::camera::{CameraRig, CameraRigConfig, CameraRigPlugin};
use crate::plugins::charge::{ChargeController, ChargePlugin, InputInbox};
use crate::plugins::config::RangeConfig;
use crate::plugins::events::{PowerChanged, RangeEventsPlugin, ResetRequested};
use crate::plugins::target_field::{FieldRng, TargetField, TargetFieldPlugin};

// Simulation clock, per-frame ordering, and the reset entry point.
#[derive(Resource, Default, Debug)]
pub struct SimClock {
    pub tick: u64,
    pub elapsed_seconds: f32,
    /// Delta applied by the most recent advance.
    pub delta_seconds: f32,
}
impl SimClock {
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.delta_seconds = dt;
        self.elapsed_seconds += dt;
    }
}

/// Per-frame stages, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Reset,
    Input,
    Clock,
    Charge,
    Ballistics,
    Camera,
}

#[derive(Resource, Default)]
pub struct LogState { pub last_logged_second: u64 }

/// Headless simulation core: clock, targets, charge/aim, ballistics and camera rig.
/// Input collection and presentation are left to the host.
pub struct RangeCorePlugin;
impl Plugin for RangeCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RangeConfig>()
            .add_plugins(RangeEventsPlugin)
            .add_plugins(CoreSimPlugin)
            .add_plugins(TargetFieldPlugin)
            .add_plugins(ChargePlugin)
            .add_plugins(BallisticsPlugin)
            .add_plugins(CameraRigPlugin);
    }
}

pub struct CoreSimPlugin;
impl Plugin for CoreSimPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimClock::default())
            .insert_resource(LogState::default())
            .configure_sets(
                Update,
                (
                    SimSet::Reset,
                    SimSet::Input,
                    SimSet::Clock,
                    SimSet::Charge,
                    SimSet::Ballistics,
                    SimSet::Camera,
                )
                    .chain(),
            )
            .add_systems(Update, reset_range.in_set(SimSet::Reset))
            .add_systems(Update, (tick_clock, log_each_second).chain().in_set(SimSet::Clock));
    }
}

fn tick_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.advance(time.delta_seconds());
}

fn log_each_second(
    clock: Res<SimClock>,
    mut log_state: ResMut<LogState>,
    projectiles: Res<Projectiles>,
    field: Res<TargetField>,
) {
    let current_second = clock.elapsed_seconds as u64;
    if current_second == 0 || current_second == log_state.last_logged_second { return; }
    log_state.last_logged_second = current_second;
    debug!("T+{}s tick={} projectiles={} hits={}/{}",
        current_second, clock.tick, projectiles.len(), field.hit_count(), field.targets().len());
}

#[allow(clippy::too_many_arguments)]
fn reset_range(
    mut ev_reset: EventReader<ResetRequested>,
    cfg: Res<RangeConfig>,
    rng: Option<ResMut<FieldRng>>,
    mut clock: ResMut<SimClock>,
    mut log_state: ResMut<LogState>,
    mut field: ResMut<TargetField>,
    mut projectiles: ResMut<Projectiles>,
    mut charge: ResMut<ChargeController>,
    mut inbox: ResMut<InputInbox>,
    rig_cfg: Res<CameraRigConfig>,
    mut rig: ResMut<CameraRig>,
    mut ev_power: EventWriter<PowerChanged>,
) {
    // several requests in one frame collapse into one reset
    if ev_reset.read().count() == 0 {
        return;
    }
    match rng {
        Some(mut rng) => field.regenerate(cfg.target_count, &mut rng.0),
        None => field.regenerate(cfg.target_count, &mut rand::thread_rng()),
    }
    projectiles.clear();
    charge.reset();
    inbox.clear();
    rig.reset_to(&rig_cfg);
    *clock = SimClock::default();
    log_state.last_logged_second = 0;
    ev_power.send(PowerChanged { normalized: 0.0 });
    info!("RESET targets={}", field.targets().len());
}
