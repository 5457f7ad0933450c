// Charge & aim controller.
// Input handlers only record intents into `InputInbox`; the controller drains the inbox once
// per frame, runs the idle/pulling state machine, and hands launches to the ballistics set.
//
// Power policy is pluggable (`ChargeModel`):
//  - DurationCharge (default): pointer held = aiming at base power, boost key held = charging,
//    boost released = fire, pointer released without boost = cancel.
//  - DisplacementCharge: power follows pointer distance from screen center, pointer release
//    fires unless power is under the minimum (silent cancel).

use std::fmt;

use bevy::prelude::*;

use crate::plugins::ballistics::Projectiles;
use crate::plugins::camera::CameraRig;
use crate::plugins::config::{ChargeModelKind, RangeConfig, MUZZLE_OFFSET};
use crate::plugins::core_sim::{SimClock, SimSet};
use crate::plugins::events::{PowerChanged, ProjectileSpawned};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimIntent {
    PointerDown,
    PointerUp,
    /// Pointer offset from screen center, normalized device units (x right, y up).
    PointerMoved(Vec2),
    BoostDown,
    BoostUp,
}

/// Intents recorded since the last frame, consumed in arrival order.
#[derive(Resource, Debug, Default)]
pub struct InputInbox {
    intents: Vec<AimIntent>,
}

impl InputInbox {
    pub fn push(&mut self, intent: AimIntent) {
        self.intents.push(intent);
    }

    pub fn take(&mut self) -> Vec<AimIntent> {
        std::mem::take(&mut self.intents)
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeMode {
    Idle,
    Pulling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pointer,
    Boost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    Fire,
    Cancel,
    Ignore,
}

/// What the charge model sees each frame while pulling.
#[derive(Debug, Clone, Copy)]
pub struct ChargeInput {
    pub pointer: Vec2,
    /// Seconds the boost key has been held, if it is held.
    pub boost_held_for: Option<f32>,
}

pub trait ChargeModel: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Power for the current frame, before clamping to `[0, max_power]`.
    fn power(&self, input: &ChargeInput, cfg: &RangeConfig) -> f32;

    /// Decide what releasing `control` does while pulling.
    fn release(&self, control: Control, boosting: bool, power: f32, cfg: &RangeConfig) -> ReleaseAction;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DurationCharge;

impl ChargeModel for DurationCharge {
    fn name(&self) -> &'static str { "duration" }

    fn power(&self, input: &ChargeInput, cfg: &RangeConfig) -> f32 {
        let base = cfg.base_power();
        match input.boost_held_for {
            Some(held) => {
                let progress = if cfg.charge_time > 0.0 { (held / cfg.charge_time).min(1.0) } else { 1.0 };
                base + cfg.max_power * (1.0 - cfg.base_power_factor) * progress
            }
            None => base,
        }
    }

    fn release(&self, control: Control, boosting: bool, _power: f32, _cfg: &RangeConfig) -> ReleaseAction {
        match control {
            Control::Boost => ReleaseAction::Fire,
            // the boost release decides while the key is still down
            Control::Pointer if boosting => ReleaseAction::Ignore,
            Control::Pointer => ReleaseAction::Cancel,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DisplacementCharge;

impl ChargeModel for DisplacementCharge {
    fn name(&self) -> &'static str { "displacement" }

    fn power(&self, input: &ChargeInput, cfg: &RangeConfig) -> f32 {
        if cfg.max_pull_radius <= 0.0 {
            return 0.0;
        }
        (input.pointer.length() / cfg.max_pull_radius).clamp(0.0, 1.0) * cfg.max_power
    }

    fn release(&self, control: Control, _boosting: bool, power: f32, cfg: &RangeConfig) -> ReleaseAction {
        match control {
            Control::Pointer if power >= cfg.min_fire_power => ReleaseAction::Fire,
            Control::Pointer => ReleaseAction::Cancel,
            Control::Boost => ReleaseAction::Ignore,
        }
    }
}

pub fn model_for(kind: ChargeModelKind) -> Box<dyn ChargeModel> {
    match kind {
        ChargeModelKind::Duration => Box::new(DurationCharge),
        ChargeModelKind::Displacement => Box::new(DisplacementCharge),
    }
}

/// Slingshot feel: pulling right aims left, pulling up aims down.
pub fn aim_direction(pointer: Vec2, cfg: &RangeConfig) -> Vec3 {
    let (spread_x, spread_y) = cfg.aim_spread;
    Vec3::new(-pointer.x * spread_x, -pointer.y * spread_y, -cfg.aim_depth).normalize_or_zero()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: Vec3,
    pub velocity: Vec3,
    pub power: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeEvent {
    /// A new pull began; the camera should stop following any earlier shot.
    PullStarted,
    /// Normalized power for the power meter.
    Power(f32),
    Fired(Launch),
    Cancelled { power: f32 },
}

#[derive(Resource, Debug)]
pub struct ChargeController {
    mode: ChargeMode,
    power: f32,
    aim: Vec3,
    pointer: Vec2,
    boost_since: Option<f32>,
    model: Box<dyn ChargeModel>,
}

impl Default for ChargeController {
    fn default() -> Self {
        Self::new(model_for(ChargeModelKind::default()))
    }
}

impl ChargeController {
    pub fn new(model: Box<dyn ChargeModel>) -> Self {
        Self {
            mode: ChargeMode::Idle,
            power: 0.0,
            aim: Vec3::NEG_Z,
            pointer: Vec2::ZERO,
            boost_since: None,
            model,
        }
    }

    pub fn set_model(&mut self, model: Box<dyn ChargeModel>) {
        self.model = model;
        self.reset();
    }

    pub fn model_name(&self) -> &'static str { self.model.name() }
    pub fn mode(&self) -> ChargeMode { self.mode }
    pub fn power(&self) -> f32 { self.power }
    pub fn aim(&self) -> Vec3 { self.aim }
    pub fn pointer(&self) -> Vec2 { self.pointer }
    pub fn is_boosting(&self) -> bool { self.boost_since.is_some() }

    /// Back to idle with zero power. The pointer position is kept (it is not charge state).
    pub fn reset(&mut self) {
        self.mode = ChargeMode::Idle;
        self.power = 0.0;
        self.aim = Vec3::NEG_Z;
        self.boost_since = None;
    }

    fn input(&self, now: f32) -> ChargeInput {
        ChargeInput { pointer: self.pointer, boost_held_for: self.boost_since.map(|t| (now - t).max(0.0)) }
    }

    fn compute_power(&self, now: f32, cfg: &RangeConfig) -> f32 {
        self.model.power(&self.input(now), cfg).clamp(0.0, cfg.max_power)
    }

    /// Run one frame: apply `intents` in order, then recompute power and aim while pulling.
    /// Releases use the power computed on the preceding frame. At most one launch per frame.
    pub fn update(&mut self, intents: impl IntoIterator<Item = AimIntent>, now: f32, cfg: &RangeConfig) -> Vec<ChargeEvent> {
        let mut out = Vec::new();
        let mut fired = false;

        for intent in intents {
            match intent {
                AimIntent::PointerMoved(p) => {
                    self.pointer = p.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
                }
                AimIntent::PointerDown => {
                    // a re-press mid-pull keeps the boost that is still held
                    if self.mode == ChargeMode::Idle {
                        self.mode = ChargeMode::Pulling;
                        self.boost_since = None;
                        out.push(ChargeEvent::PullStarted);
                    }
                    self.power = self.compute_power(now, cfg);
                    self.aim = aim_direction(self.pointer, cfg);
                }
                AimIntent::BoostDown => {
                    if self.mode == ChargeMode::Pulling && self.boost_since.is_none() {
                        self.boost_since = Some(now);
                    }
                }
                AimIntent::BoostUp => {
                    let boosting = self.boost_since.take().is_some();
                    if self.mode == ChargeMode::Pulling {
                        let action = self.model.release(Control::Boost, boosting, self.power, cfg);
                        self.apply_release(action, &mut fired, cfg, &mut out);
                    }
                }
                AimIntent::PointerUp => {
                    if self.mode == ChargeMode::Pulling {
                        let action = self.model.release(Control::Pointer, self.is_boosting(), self.power, cfg);
                        self.apply_release(action, &mut fired, cfg, &mut out);
                    }
                }
            }
        }

        if self.mode == ChargeMode::Pulling {
            self.aim = aim_direction(self.pointer, cfg);
            self.power = self.compute_power(now, cfg);
            out.push(ChargeEvent::Power(cfg.normalized(self.power)));
        }
        out
    }

    fn apply_release(&mut self, action: ReleaseAction, fired: &mut bool, cfg: &RangeConfig, out: &mut Vec<ChargeEvent>) {
        match action {
            ReleaseAction::Ignore => {}
            ReleaseAction::Fire if !*fired => {
                let aim = aim_direction(self.pointer, cfg);
                out.push(ChargeEvent::Fired(Launch {
                    position: MUZZLE_OFFSET,
                    velocity: aim * self.power,
                    power: self.power,
                }));
                *fired = true;
                self.reset();
                out.push(ChargeEvent::Power(0.0));
            }
            ReleaseAction::Fire | ReleaseAction::Cancel => {
                out.push(ChargeEvent::Cancelled { power: self.power });
                self.reset();
                out.push(ChargeEvent::Power(0.0));
            }
        }
    }
}

pub struct ChargePlugin;
impl Plugin for ChargePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChargeController>()
            .init_resource::<InputInbox>()
            .add_systems(Startup, select_charge_model)
            .add_systems(Update, update_charge.in_set(SimSet::Charge));
    }
}

fn select_charge_model(cfg: Res<RangeConfig>, mut charge: ResMut<ChargeController>) {
    charge.set_model(model_for(cfg.charge_model));
    info!("CHARGE model={} max_power={}", charge.model_name(), cfg.max_power);
}

fn update_charge(
    clock: Res<SimClock>,
    cfg: Res<RangeConfig>,
    mut inbox: ResMut<InputInbox>,
    mut charge: ResMut<ChargeController>,
    mut projectiles: ResMut<Projectiles>,
    mut rig: ResMut<CameraRig>,
    mut ev_power: EventWriter<PowerChanged>,
    mut ev_spawned: EventWriter<ProjectileSpawned>,
) {
    let now = clock.elapsed_seconds;
    for event in charge.update(inbox.take(), now, &cfg) {
        match event {
            ChargeEvent::PullStarted => rig.stop_following(),
            ChargeEvent::Power(normalized) => {
                ev_power.send(PowerChanged { normalized });
            }
            ChargeEvent::Fired(launch) => {
                let id = projectiles.launch(launch.position, launch.velocity, now);
                rig.follow(id);
                ev_spawned.send(ProjectileSpawned { id });
                info!("FIRE id={} power={:.1} vel=({:.2},{:.2},{:.2})",
                    id, launch.power, launch.velocity.x, launch.velocity.y, launch.velocity.z);
            }
            ChargeEvent::Cancelled { power } => {
                info!("CANCEL power={:.1} min={:.1}", power, cfg.min_fire_power);
            }
        }
    }
}
