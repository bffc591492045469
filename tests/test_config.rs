use std::time::Duration;

use juicy_time::config::*;
use juicy_time::spawner::{LetterPolicy, SpawnPolicy};

#[test]
fn every_preset_is_valid() {
    for mode in [GameMode::Classic, GameMode::Typing, GameMode::Falling] {
        assert_eq!(GameConfig::for_mode(mode).validate(), Ok(()));
    }
}

#[test]
fn presets_pick_their_spawn_policy_and_budget() {
    let classic = GameConfig::for_mode(GameMode::Classic);
    assert!(matches!(
        classic.spawn,
        SpawnPolicy::Batch {
            size: 3,
            letters: LetterPolicy::KindLetter,
            ..
        }
    ));
    assert_eq!(classic.round_budget, Duration::from_secs(40));

    let typing = GameConfig::for_mode(GameMode::Typing);
    assert!(matches!(
        typing.spawn,
        SpawnPolicy::Batch {
            letters: LetterPolicy::RandomLetter,
            ..
        }
    ));

    let single = GameConfig::for_mode(GameMode::Falling);
    assert_eq!(single.spawn, SpawnPolicy::Single);
    assert_eq!(single.round_budget, Duration::from_secs(50));
}

#[test]
fn strict_allows_a_single_miss() {
    let config = GameConfig::for_mode(GameMode::Classic).strict();
    assert_eq!(config.max_misses, 1);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn batch_larger_than_catalog_is_rejected() {
    let config = GameConfig {
        spawn: SpawnPolicy::Batch {
            size: 6,
            letters: LetterPolicy::KindLetter,
            stagger: 0.0,
        },
        ..GameConfig::for_mode(GameMode::Classic)
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::SampleTooLarge {
            requested: 6,
            available: 5
        })
    );
}

#[test]
fn too_narrow_field_is_rejected() {
    let config = GameConfig {
        field_width: 400.0,
        ..GameConfig::for_mode(GameMode::Classic)
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::SpawnSpanTooNarrow { batch: 3, .. })
    ));
}

#[test]
fn zero_limits_are_rejected() {
    let base = GameConfig::for_mode(GameMode::Falling);
    let no_hits = GameConfig {
        base_hits: 0,
        ..base.clone()
    };
    assert_eq!(no_hits.validate(), Err(ConfigError::Zero("base_hits")));
    let no_misses = GameConfig {
        max_misses: 0,
        ..base.clone()
    };
    assert_eq!(no_misses.validate(), Err(ConfigError::Zero("max_misses")));
    let no_catalog = GameConfig {
        catalog_size: 0,
        ..base
    };
    assert!(matches!(
        no_catalog.validate(),
        Err(ConfigError::CatalogSize { .. })
    ));
}

#[test]
fn config_errors_render_readably() {
    let err = ConfigError::SampleTooLarge {
        requested: 6,
        available: 5,
    };
    assert_eq!(
        err.to_string(),
        "cannot sample 6 distinct fruit from a catalog of 5"
    );
}
