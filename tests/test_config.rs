use std::io::Write;
use std::path::Path;

use damsel_rescue::config::*;
use damsel_rescue::error::ConfigError;

#[test]
fn defaults_match_the_classic_level() {
    let c = GameConfig::default();
    assert_eq!(c.enemy_count, 5);
    assert_eq!(c.rock_count, 3);
    assert_eq!(c.key_placement, KeyPlacement::Loose);
    assert_eq!(c.frame_ms, 33);
    assert_eq!(c.frame_duration().as_millis(), 33);
}

#[test]
fn empty_object_yields_defaults() {
    let c = GameConfig::from_json_str("{}").unwrap();
    assert_eq!(c, GameConfig::default());
}

#[test]
fn partial_object_overrides_named_fields() {
    let c = GameConfig::from_json_str(r#"{ "rock_count": 1, "key_placement": "exact" }"#).unwrap();
    assert_eq!(c.rock_count, 1);
    assert_eq!(c.key_placement, KeyPlacement::Exact);
    assert_eq!(c.enemy_count, 5);
}

#[test]
fn too_many_rocks_is_rejected() {
    let err = GameConfig::from_json_str(r#"{ "rock_count": 7 }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TooManyRocks { rock_count: 7, max: 6 }
    ));
}

#[test]
fn zero_enemies_is_rejected() {
    let err = GameConfig::from_json_str(r#"{ "enemy_count": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::NoEnemies));

    let one = GameConfig { enemy_count: 1, ..GameConfig::default() };
    assert!(one.validate().is_ok());
}

#[test]
fn max_rocks_is_accepted() {
    let c = GameConfig::from_json_str(r#"{ "rock_count": 6 }"#).unwrap();
    assert_eq!(c.rock_count, GameConfig::MAX_ROCKS);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json_str("{ rock_count: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = GameConfig::from_json_str(r#"{ "key_placement": "sideways" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "enemy_count": 3, "frame_ms": 16 }}"#).unwrap();
    let c = GameConfig::load(file.path()).unwrap();
    assert_eq!(c.enemy_count, 3);
    assert_eq!(c.frame_ms, 16);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = GameConfig::load(Path::new(&missing)).unwrap_err();
    match err {
        ConfigError::Read { path, .. } => assert_eq!(path, missing),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn config_round_trips_through_json() {
    let c = GameConfig {
        enemy_count: 4,
        rock_count: 2,
        key_placement: KeyPlacement::Exact,
        frame_ms: 20,
    };
    let raw = serde_json::to_string(&c).unwrap();
    assert!(raw.contains("\"exact\""));
    assert_eq!(GameConfig::from_json_str(&raw).unwrap(), c);
}
