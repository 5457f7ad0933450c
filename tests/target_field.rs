use bevy::math::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slingshot_range::plugins::target_field::generate;
use slingshot_range::prelude::*;

#[test]
fn generated_field_stays_inside_its_bands() {
    let mut rng = StdRng::seed_from_u64(11);
    let targets = generate(5, &mut rng);
    assert_eq!(targets.len(), 5);

    for (i, t) in targets.iter().enumerate() {
        assert_eq!(t.id, TargetId(i));
        assert!(!t.hit);
        let p = t.position;
        assert!((-6.0..6.0).contains(&p.x), "x={}", p.x);
        assert!((1.2..3.2).contains(&p.y), "y={}", p.y);
        let near = -20.0 - i as f32 * 15.0;
        assert!(p.z <= near && p.z > near - 5.0, "target {} z={}", i, p.z);
    }
    assert!(targets.windows(2).all(|w| w[1].position.z < w[0].position.z));
}

#[test]
fn same_seed_same_field() {
    let a = generate(5, &mut StdRng::seed_from_u64(99));
    let b = generate(5, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}

#[test]
fn regenerate_replaces_hit_flags() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = TargetField::new(generate(3, &mut rng));
    let mut projectiles = Projectiles::default();
    let cfg = RangeConfig::default();
    let pos = field.targets()[1].position;
    projectiles.launch(pos, Vec3::ZERO, 0.0);
    projectiles.step(0.1, 0.1, &mut field, &cfg);
    assert_eq!(field.hit_count(), 1);
    assert!(!field.all_hit());

    field.regenerate(4, &mut rng);
    assert_eq!(field.targets().len(), 4);
    assert_eq!(field.hit_count(), 0);
}

#[test]
fn empty_field_is_never_complete() {
    let field = TargetField::default();
    assert!(!field.all_hit());
    assert_eq!(field.hit_count(), 0);
    assert!(field.get(TargetId(0)).is_none());
}

#[test]
fn ids_render_as_labels() {
    assert_eq!(TargetId(3).to_string(), "target-3");
    assert_eq!(ProjectileId(12).to_string(), "stone-12");
}
