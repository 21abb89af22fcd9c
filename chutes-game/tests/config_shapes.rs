use std::collections::BTreeMap;

use chutes_game::{
    Board, BoardConfig, BoardError, ConfigError, PlayerKind, Simulation, SimulationConfig,
    VariantTuning,
};
use serde_json::Value;

#[test]
fn default_config_serializes_original_board() {
    let value = serde_json::to_value(SimulationConfig::default()).unwrap();
    assert_eq!(value["board"]["goal"], 90);
    assert_eq!(value["board"]["ladders"]["1"], 40);
    assert_eq!(value["board"]["chutes"]["87"], 70);
    assert_eq!(value["players"], serde_json::json!(["standard", "resilient", "lazy"]));
    assert_eq!(value["shuffle_players"], true);
    assert_eq!(value["seed"], Value::Null);
    assert_eq!(value["tuning"]["resilient_extra_steps"], 1);
    assert_eq!(value["tuning"]["lazy_dropped_steps"], 1);
}

#[test]
fn serialized_config_parses_back() {
    let config = SimulationConfig::new(vec![PlayerKind::Lazy, PlayerKind::Standard])
        .with_seed(Some(77))
        .with_shuffle(false)
        .with_max_rounds(Some(1_000))
        .with_tuning(VariantTuning {
            resilient_extra_steps: 2,
            lazy_dropped_steps: 5,
        });
    let json = serde_json::to_string_pretty(&config).unwrap();
    assert_eq!(SimulationConfig::from_json(&json).unwrap(), config);
}

#[test]
fn board_round_trips_through_config() {
    let board = Board::default();
    let rebuilt = board.config().build().unwrap();
    assert_eq!(rebuilt, board);
    assert_eq!(board.ladder_destinations().len(), 7);
    assert_eq!(board.chute_destinations().len(), 7);
}

#[test]
fn validation_errors_surface_through_json() {
    let cases = [
        (r#"{"board": {"goal": 0}}"#, "goal"),
        (
            r#"{"board": {"ladders": {"10": 20}, "chutes": {"10": 2}}}"#,
            "both",
        ),
        (r#"{"tuning": {"lazy_dropped_steps": 6}}"#, "lazy_dropped_steps"),
        (r#"{"players": []}"#, "empty"),
    ];
    for (json, needle) in cases {
        let err = SimulationConfig::from_json(json).unwrap_err();
        let message = err.to_string();
        assert!(
            message.contains(needle),
            "{json} produced unexpected error: {message}"
        );
    }
}

#[test]
fn chained_shortcuts_are_rejected() {
    let config = BoardConfig {
        ladders: BTreeMap::from([(3, 24)]),
        chutes: BTreeMap::from([(24, 5)]),
        goal: 90,
    };
    assert!(matches!(
        config.build(),
        Err(BoardError::ChainedShortcut { from: 3, to: 24 })
    ));
    let err = SimulationConfig::default()
        .with_board(config)
        .validate()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Board(_)));
}

#[test]
fn summary_json_shape() {
    let config = SimulationConfig::new(vec![
        PlayerKind::Standard,
        PlayerKind::Standard,
        PlayerKind::Resilient,
    ])
    .with_seed(Some(2024))
    .with_shuffle(false);
    let mut sim = Simulation::new(&config).unwrap();
    sim.run(30).unwrap();

    let value = serde_json::to_value(sim.summary()).unwrap();
    assert_eq!(value["games"], 30);
    assert_eq!(value["seed"], 2024);
    assert_eq!(
        value["lineup"],
        serde_json::json!(["standard", "standard", "resilient"])
    );
    let per_kind = value["per_kind"].as_array().unwrap();
    assert_eq!(per_kind.len(), 2);
    assert_eq!(per_kind[0]["kind"], "standard");
    assert_eq!(per_kind[0]["participants"], 2);
    for entry in per_kind {
        for field in ["wins", "win_share", "wins_per_participant", "durations"] {
            assert!(entry.get(field).is_some(), "missing {field}");
        }
    }
}
