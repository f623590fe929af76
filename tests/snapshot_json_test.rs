//! JSON shape of snapshots, events and rules files

use serde_json::json;

use sakura_tetris::core::{GameSnapshot, GameState};
use sakura_tetris::types::{GameEvent, PieceKind, Rules, SpeedMode};

#[test]
fn test_snapshot_round_trips_through_json() {
    let mut game = GameState::new(21);
    game.start();
    game.hard_drop();
    game.hold();
    game.tick(300, SpeedMode::Normal);

    let snap = game.snapshot();
    let text = serde_json::to_string(&snap).unwrap();
    let back: GameSnapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(back, snap);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["board"].as_array().unwrap().len(), 20);
    assert_eq!(value["board"][0].as_array().unwrap().len(), 10);
    assert_eq!(value["can_hold"], json!(false));
    assert_eq!(value["timers"]["drop_ms"], json!(300));
    assert_eq!(value["combo"], json!(-1));
}

#[test]
fn test_event_json_is_tagged() {
    let cleared = GameEvent::LineCleared {
        count: 4,
        difficult: true,
    };
    assert_eq!(
        serde_json::to_value(cleared).unwrap(),
        json!({"type": "line_cleared", "count": 4, "difficult": true})
    );

    let over: GameEvent =
        serde_json::from_value(json!({"type": "game_over", "final_score": 10, "best_score": 40}))
            .unwrap();
    assert_eq!(
        over,
        GameEvent::GameOver {
            final_score: 10,
            best_score: 40
        }
    );
}

#[test]
fn test_partial_rules_file_keeps_other_defaults() {
    let rules: Rules = serde_json::from_str(r#"{"lock_delay_ms": 300, "das_ms": 120}"#).unwrap();
    assert_eq!(rules.lock_delay_ms, 300);
    assert_eq!(rules.das_ms, 120);
    assert_eq!(rules.arr_ms, Rules::default().arr_ms);
    assert_eq!(rules.gravity_base_ms, Rules::default().gravity_base_ms);

    let empty: Rules = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Rules::default());
}

#[test]
fn test_piece_and_speed_names() {
    assert_eq!(serde_json::to_value(SpeedMode::Fast).unwrap(), json!("fast"));
    let kind: PieceKind = serde_json::from_value(serde_json::to_value(PieceKind::T).unwrap()).unwrap();
    assert_eq!(kind, PieceKind::T);
}
