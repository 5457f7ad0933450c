use slingshot_range::plugins::config::{CHARGE_TIME, GROUND_CLIP_Y, MAX_POWER};
use slingshot_range::prelude::*;

#[test]
fn shipped_config_parses() {
    let cfg = RangeConfig::from_ron(include_str!("../assets/config/range.ron")).expect("range.ron should parse");
    assert_eq!(cfg.charge_model, ChargeModelKind::Duration);
    assert_eq!(cfg.target_count, 5);
    assert_eq!(cfg.seed, None);
}

#[test]
fn partial_config_keeps_defaults() {
    let cfg = RangeConfig::from_ron("(charge_model: Displacement, seed: Some(3))").unwrap();
    assert_eq!(cfg.charge_model, ChargeModelKind::Displacement);
    assert_eq!(cfg.seed, Some(3));
    assert_eq!(cfg.max_power, MAX_POWER);
    assert_eq!(cfg.charge_time, CHARGE_TIME);
    assert_eq!(cfg.ground_clip_y, GROUND_CLIP_Y);
}

#[test]
fn malformed_config_is_an_error() {
    assert!(RangeConfig::from_ron("(max_power: \"lots\")").is_err());
}

#[test]
fn power_helpers() {
    let cfg = RangeConfig::default();
    assert_eq!(cfg.base_power(), 8.0);
    assert_eq!(cfg.normalized(40.0), 0.5);
    assert_eq!(cfg.normalized(120.0), 1.0);
    let zero = RangeConfig { max_power: 0.0, ..Default::default() };
    assert_eq!(zero.normalized(10.0), 0.0);
}
