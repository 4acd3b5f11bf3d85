//! Skirmish integration tests

use tank_tactics::arena::skirmish::SkirmishEventType;
use tank_tactics::arena::{Skirmish, SkirmishReport, SkirmishSettings};
use tank_tactics::core::types::Faction;
use tank_tactics::core::TacticsConfig;
use tank_tactics::tactics::{LevelView, PolicyKind};

fn run_standard(seed: u64, players: PolicyKind, bots: PolicyKind, ticks: u64) -> SkirmishReport {
    let mut skirmish =
        Skirmish::standard(TacticsConfig::default(), SkirmishSettings::default(), seed, players, bots).unwrap();
    skirmish.run(ticks)
}

#[test]
fn test_same_seed_same_report() {
    let a = run_standard(42, PolicyKind::Aggressive, PolicyKind::Classic, 1500);
    let b = run_standard(42, PolicyKind::Aggressive, PolicyKind::Classic, 1500);

    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn test_every_policy_pairing_runs() {
    let kinds = [PolicyKind::Aggressive, PolicyKind::Common, PolicyKind::Classic];
    for players in kinds {
        for bots in kinds {
            let report = run_standard(7, players, bots, 600);
            assert_eq!(report.tanks.len(), 5);
            assert!(report.ticks <= 600);
            assert!(report.tanks.iter().filter(|t| t.faction == Faction::Players).all(|t| t.policy == players));
            assert!(report.tanks.iter().filter(|t| t.faction == Faction::Bots).all(|t| t.policy == bots));
        }
    }
}

#[test]
fn test_report_is_consistent_with_events() {
    let report = run_standard(11, PolicyKind::Aggressive, PolicyKind::Common, 3000);

    let destroyed = report
        .events
        .iter()
        .filter(|e| matches!(e.event_type, SkirmishEventType::TankDestroyed { .. }))
        .count();
    let dead = report.tanks.iter().filter(|t| !t.alive).count();
    let kills: u32 = report.tanks.iter().map(|t| t.kills).sum();
    assert_eq!(destroyed, dead);
    assert_eq!(kills as usize, dead);

    let terrain = report
        .events
        .iter()
        .filter(|e| matches!(e.event_type, SkirmishEventType::TerrainDestroyed { .. }))
        .count();
    assert_eq!(terrain as u32, report.terrain_destroyed);

    if report.winner.is_none() {
        assert_eq!(report.ticks, 3000);
    }
}

#[test]
fn test_live_objects_stay_bounded_over_long_runs() {
    let mut skirmish = Skirmish::standard(
        TacticsConfig::default(),
        SkirmishSettings::default(),
        5,
        PolicyKind::Aggressive,
        PolicyKind::Classic,
    )
    .unwrap();
    let placed = skirmish.arena().live_count();
    let tanks = skirmish.combatants().len();

    for _ in 0..5000 {
        skirmish.step();
        // At most one shell per tank is ever in flight
        assert!(skirmish.arena().live_count() <= placed + tanks);
    }
    assert!(skirmish.arena().objects().len() >= skirmish.arena().live_count());
}

#[test]
fn test_run_stops_once_decided() {
    let mut skirmish = Skirmish::standard(
        TacticsConfig::default(),
        SkirmishSettings::default(),
        5,
        PolicyKind::Aggressive,
        PolicyKind::Aggressive,
    )
    .unwrap();
    let report = skirmish.run(4000);

    if let Some(winner) = report.winner {
        let loser = winner.opponent();
        let arena = skirmish.arena();
        assert!(arena.live_tanks(loser).is_empty() || report.objective_destroyed);
        assert_eq!(skirmish.outcome(), Some(winner));
    }
}

#[test]
fn test_period_index_follows_settings() {
    let settings = SkirmishSettings {
        period_ticks: 100,
        ..Default::default()
    };
    let mut skirmish =
        Skirmish::standard(TacticsConfig::default(), settings, 9, PolicyKind::Classic, PolicyKind::Classic).unwrap();
    for _ in 0..250 {
        skirmish.step();
    }
    assert_eq!(skirmish.arena().period_index(), 2);
    let periods = skirmish
        .events()
        .iter()
        .filter(|e| matches!(e.event_type, SkirmishEventType::PeriodAdvanced { .. }))
        .count();
    assert_eq!(periods as u64, skirmish.current_tick() / 100);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = TacticsConfig::default();
    config.classic.shot_one_in = 0;
    let result = Skirmish::standard(
        config,
        SkirmishSettings::default(),
        1,
        PolicyKind::Classic,
        PolicyKind::Classic,
    );
    assert!(result.is_err());
}

#[test]
fn test_loads_sample_config() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/tactics.toml");
    let config = TacticsConfig::load_from_toml(&path).unwrap();
    assert_eq!(config.pathfinding.max_steps, 4096);
    assert_eq!(config.classic.shot_one_in, 12);
}
