use bevy::prelude::*;

use crate::plugins::ballistics::{Projectile, ProjectileId, Projectiles};
use crate::plugins::config::PLAYER_HEIGHT;
use crate::plugins::core_sim::{SimClock, SimSet};

/// Marker component for the camera entity driven by the rig.
#[derive(Component)]
pub struct RangeCamera;

/// Tunables for the rest and chase poses.
#[derive(Resource, Debug, Clone)]
pub struct CameraRigConfig {
    pub rest_position: Vec3,
    pub rest_look_at: Vec3,
    pub chase_distance: f32,
    pub chase_height: f32,
    /// Exponential smoothing rate (1/s); higher converges faster.
    pub sharpness: f32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            rest_position: Vec3::new(0.0, PLAYER_HEIGHT + 0.4, 6.0),
            rest_look_at: Vec3::new(0.0, PLAYER_HEIGHT, -20.0),
            chase_distance: 6.0,
            chase_height: 2.0,
            sharpness: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPose {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let rotation = Transform::from_translation(position).looking_at(target, Vec3::Y).rotation;
        Self { position, rotation }
    }

    pub fn rest(cfg: &CameraRigConfig) -> Self {
        Self::looking_at(cfg.rest_position, cfg.rest_look_at)
    }

    /// Above and behind the projectile along its horizontal heading, looking at it.
    pub fn chase(p: &Projectile, cfg: &CameraRigConfig) -> Self {
        let mut heading = Vec3::new(p.velocity.x, 0.0, p.velocity.z).normalize_or_zero();
        if heading == Vec3::ZERO {
            heading = Vec3::NEG_Z;
        }
        let position = p.position - heading * cfg.chase_distance + Vec3::Y * cfg.chase_height;
        Self::looking_at(position, p.position)
    }

    pub fn blend_toward(&mut self, goal: &CameraPose, alpha: f32) {
        self.position = self.position.lerp(goal.position, alpha);
        self.rotation = self.rotation.slerp(goal.rotation, alpha).normalize();
    }
}

/// What the rig aimed for on its latest update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraGoal {
    Rest,
    Chase(ProjectileId),
}

/// Camera pose plus the id of the projectile being followed, looked up every frame.
#[derive(Resource, Debug)]
pub struct CameraRig {
    pose: CameraPose,
    following: Option<ProjectileId>,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self { pose: CameraPose::rest(&CameraRigConfig::default()), following: None }
    }
}

impl CameraRig {
    pub fn pose(&self) -> CameraPose { self.pose }
    pub fn following(&self) -> Option<ProjectileId> { self.following }

    pub fn follow(&mut self, id: ProjectileId) {
        self.following = Some(id);
    }

    pub fn stop_following(&mut self) {
        self.following = None;
    }

    /// Drop the follow target and snap to the rest pose.
    pub fn reset_to(&mut self, cfg: &CameraRigConfig) {
        self.following = None;
        self.pose = CameraPose::rest(cfg);
    }

    /// Ease toward the chase pose of the followed projectile, or toward rest when nothing
    /// is followed or the followed id is no longer in flight.
    pub fn update(&mut self, projectiles: &Projectiles, cfg: &CameraRigConfig, dt: f32) -> CameraGoal {
        let followed = self.following.and_then(|id| projectiles.get(id));
        let (goal, kind) = match followed {
            Some(p) => (CameraPose::chase(p, cfg), CameraGoal::Chase(p.id)),
            None => {
                self.following = None;
                (CameraPose::rest(cfg), CameraGoal::Rest)
            }
        };
        let alpha = 1.0 - (-cfg.sharpness * dt).exp();
        self.pose.blend_toward(&goal, alpha);
        kind
    }
}

pub struct CameraRigPlugin;
impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRigConfig>()
            .init_resource::<CameraRig>()
            .add_systems(Startup, place_rig_at_rest)
            .add_systems(Update, apply_camera_rig.in_set(SimSet::Camera));
    }
}

fn place_rig_at_rest(cfg: Res<CameraRigConfig>, mut rig: ResMut<CameraRig>) {
    rig.reset_to(&cfg);
}

fn apply_camera_rig(
    clock: Res<SimClock>,
    cfg: Res<CameraRigConfig>,
    projectiles: Res<Projectiles>,
    mut rig: ResMut<CameraRig>,
    mut q_cam: Query<&mut Transform, With<RangeCamera>>,
) {
    rig.update(&projectiles, &cfg, clock.delta_seconds);
    let pose = rig.pose();
    for mut t in &mut q_cam {
        t.translation = pose.position;
        t.rotation = pose.rotation;
    }
}
