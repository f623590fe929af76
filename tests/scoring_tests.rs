//! Scoring rules: line values, combo chains, back-to-back and the level curve

use sakura_tetris::core::scoring::{calculate_level, calculate_line_score};
use sakura_tetris::core::ScoreState;

#[test]
fn test_back_to_back_tetrises_at_level_three() {
    let mut score = ScoreState::with_lines(20);
    assert_eq!(score.level(), 3);

    let first = score.apply_clear(4);
    assert_eq!(first.total, 2400);
    assert_eq!(first.back_to_back_bonus, 0);
    assert_eq!(first.combo, 0);

    let second = score.apply_clear(4);
    assert_eq!(second.line_score, 2400);
    assert_eq!(second.combo_bonus, 200);
    assert_eq!(second.back_to_back_bonus, 1200);
    assert_eq!(second.total, 3800);
    assert_eq!(score.score(), 6200);
}

#[test]
fn test_level_boundary() {
    let mut nine = ScoreState::with_lines(8);
    let clear = nine.apply_clear(1);
    assert_eq!(nine.lines(), 9);
    assert_eq!(nine.level(), 1);
    assert_eq!(clear.leveled_up, None);

    let mut ten = ScoreState::with_lines(9);
    let clear = ten.apply_clear(1);
    assert_eq!(ten.lines(), 10);
    assert_eq!(ten.level(), 2);
    assert_eq!(clear.leveled_up, Some(2));
    // The clear that crosses the boundary still pays at the old level.
    assert_eq!(clear.line_score, 100);
}

#[test]
fn test_combo_chain_and_reset() {
    let mut score = ScoreState::new();

    assert_eq!(score.apply_clear(1).total, 100);
    assert_eq!(score.apply_clear(2).total, 300 + 50 * 2);
    assert_eq!(score.apply_clear(1).total, 100 + 2 * 50);
    assert_eq!(score.combo(), 2);

    let miss = score.apply_clear(0);
    assert_eq!(miss.total, 0);
    assert_eq!(score.combo(), -1);

    assert_eq!(score.apply_clear(1).total, 100);
}

#[test]
fn test_non_tetris_clear_resets_back_to_back() {
    let mut score = ScoreState::new();
    score.apply_clear(4);
    assert!(score.back_to_back());

    score.apply_clear(0);
    assert!(score.back_to_back());

    score.apply_clear(3);
    assert!(!score.back_to_back());

    let tetris = score.apply_clear(4);
    assert_eq!(tetris.back_to_back_bonus, 0);
}

#[test]
fn test_level_and_line_score_curves() {
    assert_eq!(calculate_level(0), 1);
    assert_eq!(calculate_level(9), 1);
    assert_eq!(calculate_level(10), 2);
    assert_eq!(calculate_level(125), 13);

    assert_eq!(calculate_line_score(0, 5), 0);
    assert_eq!(calculate_line_score(3, 2), 1000);
    assert_eq!(calculate_line_score(4, 7), 5600);
}

#[test]
fn test_drop_points_accumulate() {
    let mut score = ScoreState::new();
    assert_eq!(score.add_drop(3, false), 3);
    assert_eq!(score.add_drop(10, true), 20);
    assert_eq!(score.score(), 23);
}
