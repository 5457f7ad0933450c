// Range tuning: compile-time defaults plus an optional RON override file.
use bevy::prelude::*;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;

pub const GRAVITY: f32 = 9.8;
pub const MAX_POWER: f32 = 80.0;
pub const TARGET_COUNT: usize = 5;
/// Seconds a projectile may stay in flight.
pub const PROJECTILE_LIFETIME: f32 = 5.0;
/// Seconds of boost hold needed to reach full power (duration model).
pub const CHARGE_TIME: f32 = 3.0;
pub const BASE_POWER_FACTOR: f32 = 0.1;
/// Pointer offset (normalized device units) that maps to full power (displacement model).
pub const MAX_PULL_RADIUS: f32 = 1.0;
pub const MIN_FIRE_POWER: f32 = 5.0;
pub const HIT_RADIUS_SQ: f32 = 1.0;
// Slightly below zero so a stone touching the plane is still drawn for its last frame.
pub const GROUND_CLIP_Y: f32 = -0.1;
pub const PLAYER_HEIGHT: f32 = 1.6;
/// Launch point relative to the world origin (just in front of the slingshot fork).
pub const MUZZLE_OFFSET: Vec3 = Vec3::new(0.0, PLAYER_HEIGHT, 0.5);

pub const AIM_SPREAD_X: f32 = 8.0;
pub const AIM_SPREAD_Y: f32 = 14.0;
pub const AIM_DEPTH: f32 = 25.0;

pub const CONFIG_PATH: &str = "assets/config/range.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ChargeModelKind {
    /// Hold the pointer to aim, hold the boost key to charge, release boost to fire.
    #[default]
    Duration,
    /// Power follows the pointer's distance from screen center; release to fire.
    Displacement,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub gravity: f32,
    pub max_power: f32,
    pub target_count: usize,
    pub projectile_lifetime: f32,
    pub charge_model: ChargeModelKind,
    pub charge_time: f32,
    pub base_power_factor: f32,
    pub max_pull_radius: f32,
    pub min_fire_power: f32,
    pub hit_radius_sq: f32,
    pub ground_clip_y: f32,
    pub aim_spread: (f32, f32),
    pub aim_depth: f32,
    pub seed: Option<u64>,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_power: MAX_POWER,
            target_count: TARGET_COUNT,
            projectile_lifetime: PROJECTILE_LIFETIME,
            charge_model: ChargeModelKind::default(),
            charge_time: CHARGE_TIME,
            base_power_factor: BASE_POWER_FACTOR,
            max_pull_radius: MAX_PULL_RADIUS,
            min_fire_power: MIN_FIRE_POWER,
            hit_radius_sq: HIT_RADIUS_SQ,
            ground_clip_y: GROUND_CLIP_Y,
            aim_spread: (AIM_SPREAD_X, AIM_SPREAD_Y),
            aim_depth: AIM_DEPTH,
            seed: None,
        }
    }
}

impl RangeConfig {
    pub fn base_power(&self) -> f32 {
        self.max_power * self.base_power_factor
    }

    /// Power as a 0..1 fraction of `max_power`.
    pub fn normalized(&self, power: f32) -> f32 {
        if self.max_power > 0.0 { (power / self.max_power).clamp(0.0, 1.0) } else { 0.0 }
    }

    /// Parses a RON document; missing fields keep their defaults.
    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<RangeConfig>(data)
    }
}

pub struct ConfigPlugin;
impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RangeConfig>()
            .add_systems(PreStartup, load_range_config);
    }
}

fn load_range_config(mut commands: Commands, existing: Res<RangeConfig>) {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = existing;
        let data = include_str!("../../assets/config/range.ron");
        match RangeConfig::from_ron(data) {
            Ok(cfg) => {
                info!("CONFIG embedded charge_model={:?} targets={}", cfg.charge_model, cfg.target_count);
                commands.insert_resource(cfg);
            }
            Err(e) => error!("Failed to parse embedded range config: {e}"),
        }
        return;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let Ok(data) = fs::read_to_string(CONFIG_PATH) else {
            warn!("CONFIG {CONFIG_PATH} not found, using defaults charge_model={:?}", existing.charge_model);
            return;
        };
        match RangeConfig::from_ron(&data) {
            Ok(cfg) => {
                info!("CONFIG loaded path={CONFIG_PATH} charge_model={:?} targets={}", cfg.charge_model, cfg.target_count);
                commands.insert_resource(cfg);
            }
            Err(e) => error!("Failed to parse {CONFIG_PATH}: {e}"),
        }
    }
}
