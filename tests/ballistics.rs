use bevy::prelude::*;
use slingshot_range::prelude::*;

fn field_with(positions: &[Vec3]) -> TargetField {
    TargetField::new(
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| Target { id: TargetId(i), position: *p, hit: false })
            .collect(),
    )
}

#[test]
fn euler_integrates_position_before_velocity() {
    let cfg = RangeConfig::default();
    let mut field = field_with(&[]);
    let mut projectiles = Projectiles::default();
    let v0 = Vec3::new(1.0, 10.0, -20.0);
    let id = projectiles.launch(Vec3::new(0.0, 1.6, 0.5), v0, 0.0);

    projectiles.step(0.1, 0.1, &mut field, &cfg);
    let p = projectiles.get(id).unwrap();
    // position uses the velocity from before this frame's gravity
    assert!((p.position - (Vec3::new(0.0, 1.6, 0.5) + v0 * 0.1)).length() < 1e-5);
    assert!((p.velocity.y - (10.0 - cfg.gravity * 0.1)).abs() < 1e-5);
    assert_eq!(p.velocity.x, 1.0);
    assert_eq!(p.velocity.z, -20.0);
}

#[test]
fn vertical_velocity_drops_by_gravity_every_frame() {
    let cfg = RangeConfig::default();
    let mut field = field_with(&[]);
    let mut projectiles = Projectiles::default();
    let id = projectiles.launch(Vec3::new(0.0, 50.0, 0.0), Vec3::new(0.0, 30.0, -5.0), 0.0);

    let dt = 1.0 / 60.0;
    let mut now = 0.0;
    let mut prev_vy = projectiles.get(id).unwrap().velocity.y;
    for _ in 0..120 {
        now += dt;
        projectiles.step(dt, now, &mut field, &cfg);
        let vy = projectiles.get(id).expect("still airborne").velocity.y;
        assert!(vy < prev_vy);
        assert!((vy - (prev_vy - cfg.gravity * dt)).abs() < 1e-4);
        prev_vy = vy;
    }
}

#[test]
fn expired_projectile_is_dropped_before_collision() {
    let cfg = RangeConfig::default();
    let target = Vec3::new(0.0, 2.0, -10.0);
    let mut field = field_with(&[target]);
    let mut projectiles = Projectiles::default();
    // sitting right on the target, but past its lifetime
    let id = projectiles.launch(target, Vec3::ZERO, 0.0);

    let report = projectiles.step(0.016, cfg.projectile_lifetime + 0.1, &mut field, &cfg);
    assert_eq!(report.retired, vec![(id, Retired::Expired)]);
    assert!(projectiles.is_empty());
    assert!(!field.targets()[0].hit);
    assert_eq!(report.hits().count(), 0);
}

#[test]
fn projectile_at_lifetime_bound_still_flies() {
    let cfg = RangeConfig::default();
    let mut field = field_with(&[]);
    let mut projectiles = Projectiles::default();
    projectiles.launch(Vec3::new(0.0, 40.0, 0.0), Vec3::ZERO, 1.0);
    projectiles.step(0.0, 1.0 + cfg.projectile_lifetime, &mut field, &cfg);
    assert_eq!(projectiles.len(), 1);
}

#[test]
fn ground_clip_has_small_allowance_below_zero() {
    let cfg = RangeConfig::default();
    let mut field = field_with(&[]);
    let mut projectiles = Projectiles::default();
    let grazing = projectiles.launch(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -0.5, -1.0), 0.0);
    let buried = projectiles.launch(Vec3::new(0.0, 0.05, 0.0), Vec3::new(0.0, -2.0, -1.0), 0.0);

    let report = projectiles.step(0.1, 0.1, &mut field, &cfg);
    assert_eq!(report.retired, vec![(buried, Retired::Grounded)]);
    let p = projectiles.get(grazing).expect("y=-0.05 is above the clip plane");
    assert!(p.position.y < 0.0);
}

#[test]
fn hit_requires_strictly_inside_radius() {
    let cfg = RangeConfig::default();
    let target = Vec3::new(0.0, 2.0, -10.0);

    let mut field = field_with(&[target]);
    let mut projectiles = Projectiles::default();
    projectiles.launch(target + Vec3::X, Vec3::ZERO, 0.0);
    let report = projectiles.step(0.0, 0.0, &mut field, &cfg);
    assert_eq!(report.hits().count(), 0, "distance exactly at the radius must miss");
    assert!(!field.targets()[0].hit);
    assert_eq!(projectiles.len(), 1);

    let mut field = field_with(&[target]);
    let mut projectiles = Projectiles::default();
    let id = projectiles.launch(target + Vec3::X * 0.9, Vec3::ZERO, 0.0);
    let report = projectiles.step(0.0, 0.0, &mut field, &cfg);
    assert_eq!(report.hits().collect::<Vec<_>>(), vec![(id, TargetId(0))]);
    assert!(field.targets()[0].hit);
    assert!(projectiles.is_empty(), "a scoring projectile is retired immediately");
}

#[test]
fn overlapping_targets_first_in_order_wins() {
    let cfg = RangeConfig::default();
    let spot = Vec3::new(3.0, 2.0, -30.0);
    let mut field = field_with(&[spot, spot]);
    let mut projectiles = Projectiles::default();
    projectiles.launch(spot, Vec3::ZERO, 0.0);

    let report = projectiles.step(0.0, 0.0, &mut field, &cfg);
    assert_eq!(report.hits().map(|(_, t)| t).collect::<Vec<_>>(), vec![TargetId(0)]);
    assert!(field.targets()[0].hit);
    assert!(!field.targets()[1].hit);
}

#[test]
fn later_projectile_sees_hit_flag_from_same_frame() {
    let cfg = RangeConfig::default();
    let spot = Vec3::new(0.0, 2.0, -20.0);
    let mut field = field_with(&[spot]);
    let mut projectiles = Projectiles::default();
    let first = projectiles.launch(spot, Vec3::ZERO, 0.0);
    let second = projectiles.launch(spot, Vec3::ZERO, 0.0);

    let report = projectiles.step(0.0, 0.0, &mut field, &cfg);
    assert_eq!(report.hits().collect::<Vec<_>>(), vec![(first, TargetId(0))]);
    assert!(projectiles.get(second).is_some(), "hit target is no longer collidable");
}

#[test]
fn simultaneous_hits_are_all_reported() {
    let cfg = RangeConfig::default();
    let a = Vec3::new(-4.0, 2.0, -20.0);
    let b = Vec3::new(4.0, 3.0, -35.0);
    let mut field = field_with(&[a, b]);
    let mut projectiles = Projectiles::default();
    projectiles.launch(b, Vec3::ZERO, 0.0);
    projectiles.launch(a, Vec3::ZERO, 0.0);

    let report = projectiles.step(0.0, 0.0, &mut field, &cfg);
    let mut hit: Vec<_> = report.hits().map(|(_, t)| t).collect();
    hit.sort();
    assert_eq!(hit, vec![TargetId(0), TargetId(1)]);
    assert_eq!(field.hit_count(), 2);
    assert!(field.all_hit());
}

#[test]
fn hit_flags_never_revert() {
    let cfg = RangeConfig::default();
    let spot = Vec3::new(0.0, 2.0, -20.0);
    let mut field = field_with(&[spot]);
    let mut projectiles = Projectiles::default();
    projectiles.launch(spot, Vec3::ZERO, 0.0);
    projectiles.step(0.0, 0.0, &mut field, &cfg);
    assert!(field.targets()[0].hit);

    // keep flying stones through the hit target for a while
    let mut now = 0.0;
    for _ in 0..30 {
        projectiles.launch(spot + Vec3::Z * 2.0, Vec3::new(0.0, 0.0, -5.0), now);
        now += 0.05;
        projectiles.step(0.05, now, &mut field, &cfg);
        assert!(field.targets()[0].hit);
    }
}

#[test]
fn ids_keep_counting_after_clear() {
    let mut projectiles = Projectiles::default();
    let a = projectiles.launch(Vec3::ZERO, Vec3::ZERO, 0.0);
    projectiles.clear();
    let b = projectiles.launch(Vec3::ZERO, Vec3::ZERO, 0.0);
    assert_ne!(a, b);
    assert_eq!(b.to_string(), "stone-1");
}
