//! Convenience re-exports for frequently used types & plugins.
pub use crate::plugins::config::{RangeConfig, ChargeModelKind, ConfigPlugin};
pub use crate::plugins::core_sim::{SimClock, SimSet, CoreSimPlugin, RangeCorePlugin};
pub use crate::plugins::events::{TargetHit, PowerChanged, ProjectileSpawned, ResetRequested};
pub use crate::plugins::target_field::{Target, TargetId, TargetField, FieldRng};
pub use crate::plugins::charge::{
    AimIntent, InputInbox, ChargeController, ChargeMode, ChargeModel, ChargeEvent,
    DurationCharge, DisplacementCharge,
};
pub use crate::plugins::ballistics::{Projectile, ProjectileId, Projectiles, Retired, StepReport};
pub use crate::plugins::camera::{CameraRig, CameraRigConfig, CameraPose, CameraGoal, RangeCamera};
pub use crate::plugins::scoreboard::{PowerMeter, Score, ScoreboardPlugin};
pub use crate::plugins::input::RangeInputPlugin;
pub use crate::plugins::scene::ScenePlugin;
pub use crate::plugins::hud::HudPlugin;
