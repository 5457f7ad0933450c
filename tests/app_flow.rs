use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use slingshot_range::prelude::*;

// Headless range with scoring, seeded field and 250 ms frames.
fn build_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(RangeConfig { seed: Some(seed), ..default() })
        .add_plugins(RangeCorePlugin)
        .add_plugins(ScoreboardPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)));
    app.update();
    app
}

fn push(app: &mut App, intents: &[AimIntent]) {
    let mut inbox = app.world_mut().resource_mut::<InputInbox>();
    for intent in intents {
        inbox.push(*intent);
    }
}

fn target_positions(app: &App) -> Vec<Vec3> {
    app.world().resource::<TargetField>().targets().iter().map(|t| t.position).collect()
}

#[test]
fn seeded_apps_build_the_same_field() {
    let a = build_app(7);
    let b = build_app(7);
    assert_eq!(target_positions(&a), target_positions(&b));
    assert_eq!(a.world().resource::<Score>().total, 5);
}

#[test]
fn boost_release_launches_and_camera_follows() {
    let mut app = build_app(7);
    push(&mut app, &[AimIntent::PointerDown, AimIntent::BoostDown]);
    app.update();
    assert_eq!(app.world().resource::<ChargeController>().mode(), ChargeMode::Pulling);
    assert!(app.world().resource::<PowerMeter>().normalized > 0.0, "power meter shows the base power");

    push(&mut app, &[AimIntent::BoostUp]);
    app.update();

    let world = app.world();
    let projectiles = world.resource::<Projectiles>();
    assert_eq!(projectiles.len(), 1);
    let stone = projectiles.iter().next().unwrap();
    assert!(stone.position.z < 0.5, "integrated on its launch frame");
    assert_eq!(world.resource::<CameraRig>().following(), Some(stone.id));
    assert_eq!(world.resource::<ChargeController>().mode(), ChargeMode::Idle);
    assert_eq!(world.resource::<PowerMeter>().normalized, 0.0);

    let events = world.resource::<Events<ProjectileSpawned>>();
    let spawned: Vec<_> = events.get_reader().read(events).map(|e| e.id).collect();
    assert_eq!(spawned, vec![stone.id]);
}

#[test]
fn new_pull_releases_the_camera_but_not_the_stone() {
    let mut app = build_app(7);
    push(&mut app, &[AimIntent::PointerDown, AimIntent::BoostDown]);
    app.update();
    push(&mut app, &[AimIntent::BoostUp]);
    app.update();
    assert!(app.world().resource::<CameraRig>().following().is_some());

    push(&mut app, &[AimIntent::PointerDown]);
    app.update();
    assert_eq!(app.world().resource::<CameraRig>().following(), None);
    assert_eq!(app.world().resource::<Projectiles>().len(), 1);
}

#[test]
fn hitting_every_target_wins() {
    let mut app = build_app(7);
    let now = app.world().resource::<SimClock>().elapsed_seconds;
    for pos in target_positions(&app) {
        app.world_mut().resource_mut::<Projectiles>().launch(pos, Vec3::ZERO, now);
    }
    app.update();

    let world = app.world();
    assert!(world.resource::<TargetField>().all_hit());
    assert!(world.resource::<Projectiles>().is_empty());
    let events = world.resource::<Events<TargetHit>>();
    assert_eq!(events.get_reader().read(events).count(), 5);

    let score = world.resource::<Score>();
    assert_eq!(score.hits, 5);
    assert_eq!(score.points, 500);
    assert!(score.won);
    assert!(score.final_time > 0.0);
}

#[test]
fn reset_clears_the_range() {
    let mut app = build_app(7);
    let first = target_positions(&app)[0];
    app.world_mut().resource_mut::<Projectiles>().launch(first, Vec3::ZERO, 0.0);
    app.world_mut().resource_mut::<Projectiles>().launch(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO, 0.0);
    push(&mut app, &[AimIntent::PointerDown]);
    app.update();
    assert_eq!(app.world().resource::<TargetField>().hit_count(), 1);
    assert_eq!(app.world().resource::<Score>().hits, 1);
    assert_eq!(app.world().resource::<Projectiles>().len(), 1);
    assert!(app.world().resource::<PowerMeter>().normalized > 0.0);

    app.world_mut().send_event(ResetRequested);
    app.update();

    let world = app.world();
    assert_eq!(world.resource::<TargetField>().hit_count(), 0);
    assert_eq!(world.resource::<TargetField>().targets().len(), 5);
    assert!(world.resource::<Projectiles>().is_empty());
    assert_eq!(world.resource::<ChargeController>().mode(), ChargeMode::Idle);
    assert_eq!(world.resource::<CameraRig>().following(), None);
    assert_eq!(world.resource::<Score>().hits, 0);
    let events = world.resource::<Events<PowerChanged>>();
    let last = events.get_reader().read(events).last().map(|e| e.normalized);
    assert_eq!(last, Some(0.0), "reset zeroes the power meter");
    assert_eq!(world.resource::<PowerMeter>().normalized, 0.0);
    assert_eq!(world.resource::<SimClock>().tick, 1, "clock restarts and ticks once this frame");
}
