// World presentation: camera entity, light, ground, decoration, the slingshot's
// elastic and aim arrow, and meshes mirroring the simulated targets and projectiles.
// Reads simulation state only.
use bevy::math::primitives::{Cuboid, Cylinder, Plane3d, Sphere};
use bevy::prelude::*;
use rand::Rng;

use crate::plugins::ballistics::{ProjectileId, Projectiles};
use crate::plugins::camera::{CameraRig, RangeCamera};
use crate::plugins::charge::{ChargeController, ChargeMode};
use crate::plugins::config::{RangeConfig, PLAYER_HEIGHT};
use crate::plugins::core_sim::{SimClock, SimSet};
use crate::plugins::target_field::{TargetField, TargetId};

const TREE_COUNT: usize = 30;
const TARGET_BOB_AMPLITUDE: f32 = 0.4;
const TARGET_BOB_SPEED: f32 = 2.5;
const TARGET_SPIN_SPEED: f32 = 1.8; // radians/sec
const PROJECTILE_VISUAL_RADIUS: f32 = 0.35;

/// Slingshot origin. The wooden frame hangs below it, the fork tips sit just above.
pub const SLINGSHOT_ROOT: Vec3 = Vec3::new(0.0, PLAYER_HEIGHT, 0.0);
const FORK_LEFT: Vec3 = Vec3::new(-0.45, 0.3, 0.0);
const FORK_RIGHT: Vec3 = Vec3::new(0.45, 0.3, 0.0);
const POUCH_REST: Vec3 = Vec3::new(0.0, 0.3, 0.0);
// fraction of the remaining distance the pouch covers each frame
const POUCH_FOLLOW: f32 = 0.3;
/// Below this power the aim arrow stays hidden.
pub const ARROW_MIN_POWER: f32 = 2.0;
const BAND_COLOR: Color = Color::srgb(0.83, 0.18, 0.18);

/// Target visual and the field position it was built for.
#[derive(Component)]
pub struct TargetVisual {
    pub id: TargetId,
    pub anchor: Vec3,
}

#[derive(Component)]
pub struct ProjectileVisual(pub ProjectileId);

#[derive(Component)]
pub struct Pouch;

#[derive(Component)]
pub struct AimArrow;

#[derive(Component)]
pub struct AimArrowShaft;

/// Aim preview derived from the charge state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowLook {
    pub direction: Vec3,
    pub length: f32,
    /// Power as a 0..1 fraction of max power.
    pub tension: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlingshotLook {
    /// Where the pouch is heading, relative to `SLINGSHOT_ROOT`.
    pub pouch: Vec3,
    pub arrow: Option<ArrowLook>,
}

/// Pouch stretch and aim arrow for the current charge: the pouch follows the pointer and
/// draws back with tension; the arrow shows only while pulling above `ARROW_MIN_POWER`.
pub fn slingshot_look(charge: &ChargeController, cfg: &RangeConfig) -> SlingshotLook {
    if charge.mode() != ChargeMode::Pulling {
        return SlingshotLook { pouch: POUCH_REST, arrow: None };
    }
    let tension = cfg.normalized(charge.power());
    let pointer = charge.pointer();
    let pouch = POUCH_REST + Vec3::new(pointer.x * 0.5, pointer.y * 0.6, tension * 2.5);
    let arrow = (charge.power() > ARROW_MIN_POWER).then(|| ArrowLook {
        direction: charge.aim(),
        length: tension * 7.0 + 1.5,
        tension,
    });
    SlingshotLook { pouch, arrow }
}

pub const TARGET_POST_LENGTH: f32 = 12.0;

/// Child offsets of a target visual built at `anchor`: face, ring, bullseye, post.
/// The post hangs from under the face down into the ground.
pub fn target_part_offsets(anchor: Vec3) -> [Vec3; 4] {
    [
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 0.11),
        Vec3::new(0.0, 0.0, 0.15),
        Vec3::new(0.0, -anchor.y - 1.0, 0.0),
    ]
}

/// Green at low tension, shifting to red at full power.
pub fn arrow_color(tension: f32) -> Color {
    Color::hsl(0.35 * (1.0 - tension.clamp(0.0, 1.0)) * 360.0, 1.0, 0.6)
}

#[derive(Resource)]
struct RangeMeshes {
    target_face: Handle<Mesh>,
    target_ring: Handle<Mesh>,
    target_bullseye: Handle<Mesh>,
    target_post: Handle<Mesh>,
    target_material: Handle<StandardMaterial>,
    ring_material: Handle<StandardMaterial>,
    post_material: Handle<StandardMaterial>,
    stone: Handle<Mesh>,
    stone_material: Handle<StandardMaterial>,
}

pub struct ScenePlugin;
impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (sync_target_visuals, sync_projectile_visuals, sync_slingshot).after(SimSet::Camera),
            );
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    rig: Res<CameraRig>,
) {
    let pose = rig.pose();
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(pose.position).with_rotation(pose.rotation),
            projection: PerspectiveProjection {
                fov: 45f32.to_radians(),
                ..default()
            }.into(),
            ..default()
        },
        RangeCamera,
    ));

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    // Ground
    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(1000.0, 1000.0)),
        material: mats.add(StandardMaterial {
            base_color: Color::srgb(0.18, 0.29, 0.19),
            perceptual_roughness: 1.0,
            ..default()
        }),
        ..default()
    });

    // Tree trunks scattered downrange
    let trunk_mesh = meshes.add(Cylinder::new(0.2, 5.0));
    let trunk_mat = mats.add(StandardMaterial { base_color: Color::srgb(0.11, 0.07, 0.03), ..default() });
    let mut rng = rand::thread_rng();
    for _ in 0..TREE_COUNT {
        let x = (rng.gen::<f32>() - 0.5) * 60.0;
        let z = -rng.gen::<f32>() * 100.0 - 30.0;
        commands.spawn(PbrBundle {
            mesh: trunk_mesh.clone(),
            material: trunk_mat.clone(),
            transform: Transform::from_xyz(x, 0.0, z),
            ..default()
        });
    }

    // Slingshot frame just below the muzzle
    let wood = mats.add(StandardMaterial { base_color: Color::srgb(0.31, 0.20, 0.18), perceptual_roughness: 0.9, ..default() });
    let frame_base = SLINGSHOT_ROOT - Vec3::Y * 0.6;
    for (size, offset) in [
        (Vec3::new(0.18, 1.2, 0.18), Vec3::new(0.0, -0.4, 0.0)),
        (Vec3::new(0.9, 0.18, 0.18), Vec3::new(0.0, 0.2, 0.0)),
        (Vec3::new(0.18, 0.8, 0.18), Vec3::new(-0.45, 0.5, 0.0)),
        (Vec3::new(0.18, 0.8, 0.18), Vec3::new(0.45, 0.5, 0.0)),
    ] {
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::from_size(size)),
            material: wood.clone(),
            transform: Transform::from_translation(frame_base + offset),
            ..default()
        });
    }

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(0.12)),
            material: mats.add(StandardMaterial { base_color: Color::srgb(0.2, 0.2, 0.2), perceptual_roughness: 0.4, ..default() }),
            transform: Transform::from_translation(SLINGSHOT_ROOT + POUCH_REST),
            ..default()
        },
        Pouch,
    ));

    // Aim arrow: a pivot at the fork with a unit shaft stretched along its -Z
    commands
        .spawn((
            SpatialBundle {
                transform: Transform::from_translation(SLINGSHOT_ROOT + POUCH_REST),
                visibility: Visibility::Hidden,
                ..default()
            },
            AimArrow,
        ))
        .with_children(|parent| {
            parent.spawn((
                PbrBundle {
                    mesh: meshes.add(Cylinder::new(0.02, 1.0)),
                    material: mats.add(StandardMaterial {
                        base_color: arrow_color(0.0).with_alpha(0.8),
                        alpha_mode: AlphaMode::Blend,
                        ..default()
                    }),
                    transform: Transform::from_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                    ..default()
                },
                AimArrowShaft,
            ));
        });

    commands.insert_resource(RangeMeshes {
        target_face: meshes.add(Cylinder::new(1.5, 0.2)),
        target_ring: meshes.add(Cylinder::new(1.0, 0.05)),
        target_bullseye: meshes.add(Cylinder::new(0.5, 0.05)),
        target_post: meshes.add(Cylinder::new(0.15, TARGET_POST_LENGTH)),
        target_material: mats.add(StandardMaterial { base_color: Color::WHITE, ..default() }),
        ring_material: mats.add(StandardMaterial { base_color: Color::srgb(0.96, 0.26, 0.21), ..default() }),
        post_material: mats.add(StandardMaterial { base_color: Color::srgb(0.26, 0.26, 0.26), ..default() }),
        stone: meshes.add(Sphere::new(PROJECTILE_VISUAL_RADIUS)),
        stone_material: mats.add(StandardMaterial {
            base_color: Color::WHITE,
            emissive: LinearRgba::new(2.0, 2.0, 2.0, 1.0),
            perceptual_roughness: 0.0,
            ..default()
        }),
    });
}

fn sync_target_visuals(
    mut commands: Commands,
    time: Res<Time>,
    field: Res<TargetField>,
    assets: Option<Res<RangeMeshes>>,
    mut q: Query<(Entity, &TargetVisual, &mut Transform, &mut Visibility)>,
) {
    let Some(assets) = assets else { return; };
    let t = time.elapsed_seconds();
    let mut seen = Vec::with_capacity(field.targets().len());

    for (entity, visual, mut tf, mut vis) in &mut q {
        // a regenerated field reuses ids, so rebuild visuals whose target moved
        let Some(target) = field.get(visual.id).filter(|target| target.position == visual.anchor) else {
            commands.entity(entity).despawn_recursive();
            continue;
        };
        seen.push(target.id);
        // cosmetic bobbing only; collisions use the fixed position
        let bob = (t * TARGET_BOB_SPEED + target.position.z).sin() * TARGET_BOB_AMPLITUDE;
        tf.translation = target.position + Vec3::Y * bob;
        tf.rotate_y(TARGET_SPIN_SPEED * time.delta_seconds());
        *vis = if target.hit { Visibility::Hidden } else { Visibility::Visible };
    }

    for target in field.targets().iter().filter(|t| !seen.contains(&t.id)) {
        commands
            .spawn((
                SpatialBundle::from_transform(Transform::from_translation(target.position)),
                TargetVisual { id: target.id, anchor: target.position },
            ))
            .with_children(|parent| {
                let face_up = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
                let [face, ring, bullseye, post] = target_part_offsets(target.position);
                for (mesh, material, offset) in [
                    (&assets.target_face, &assets.target_material, face),
                    (&assets.target_ring, &assets.ring_material, ring),
                    (&assets.target_bullseye, &assets.ring_material, bullseye),
                ] {
                    parent.spawn(PbrBundle {
                        mesh: mesh.clone(),
                        material: material.clone(),
                        transform: Transform::from_translation(offset).with_rotation(face_up),
                        ..default()
                    });
                }
                parent.spawn(PbrBundle {
                    mesh: assets.target_post.clone(),
                    material: assets.post_material.clone(),
                    transform: Transform::from_translation(post),
                    ..default()
                });
            });
    }
}

fn sync_projectile_visuals(
    mut commands: Commands,
    clock: Res<SimClock>,
    projectiles: Res<Projectiles>,
    assets: Option<Res<RangeMeshes>>,
    mut q: Query<(Entity, &ProjectileVisual, &mut Transform)>,
) {
    let Some(assets) = assets else { return; };
    let mut seen = Vec::with_capacity(projectiles.len());

    for (entity, visual, mut tf) in &mut q {
        match projectiles.get(visual.0) {
            Some(p) => {
                tf.translation = p.position;
                seen.push(p.id);
            }
            None => commands.entity(entity).despawn_recursive(),
        }
    }

    for p in projectiles.iter().filter(|p| !seen.contains(&p.id)) {
        trace!("VISUAL spawn projectile={} tick={}", p.id, clock.tick);
        commands.spawn((
            PbrBundle {
                mesh: assets.stone.clone(),
                material: assets.stone_material.clone(),
                transform: Transform::from_translation(p.position),
                ..default()
            },
            ProjectileVisual(p.id),
        ));
    }
}

#[allow(clippy::type_complexity)]
fn sync_slingshot(
    charge: Res<ChargeController>,
    cfg: Res<RangeConfig>,
    mut gizmos: Gizmos,
    mut mats: ResMut<Assets<StandardMaterial>>,
    mut q_pouch: Query<&mut Transform, (With<Pouch>, Without<AimArrow>, Without<AimArrowShaft>)>,
    mut q_arrow: Query<(&mut Transform, &mut Visibility), (With<AimArrow>, Without<Pouch>, Without<AimArrowShaft>)>,
    mut q_shaft: Query<(&mut Transform, &Handle<StandardMaterial>), (With<AimArrowShaft>, Without<Pouch>, Without<AimArrow>)>,
) {
    let look = slingshot_look(&charge, &cfg);

    if let Ok(mut tf) = q_pouch.get_single_mut() {
        tf.translation = tf.translation.lerp(SLINGSHOT_ROOT + look.pouch, POUCH_FOLLOW);
        gizmos.line(SLINGSHOT_ROOT + FORK_LEFT, tf.translation, BAND_COLOR);
        gizmos.line(SLINGSHOT_ROOT + FORK_RIGHT, tf.translation, BAND_COLOR);
    }

    let Ok((mut arrow_tf, mut vis)) = q_arrow.get_single_mut() else { return; };
    let Some(arrow) = look.arrow else {
        *vis = Visibility::Hidden;
        return;
    };
    *vis = Visibility::Visible;
    if arrow.direction != Vec3::ZERO {
        arrow_tf.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, arrow.direction);
    }
    if let Ok((mut shaft_tf, material)) = q_shaft.get_single_mut() {
        shaft_tf.scale = Vec3::new(1.0, arrow.length, 1.0);
        shaft_tf.translation = Vec3::new(0.0, 0.0, -arrow.length / 2.0);
        if let Some(mat) = mats.get_mut(material) {
            let color = arrow_color(arrow.tension);
            let glow = color.to_linear();
            mat.base_color = color.with_alpha(0.8);
            mat.emissive = LinearRgba::rgb(glow.red * 2.4, glow.green * 2.4, glow.blue * 2.4);
        }
    }
}
