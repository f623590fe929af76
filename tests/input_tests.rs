//! Keyboard input driving a live session through the DAS/ARR handler

use sakura_tetris::core::{GameState, RandomSource};
use sakura_tetris::input::{action_for_key, repeat_key_for, InputHandler, RepeatKey};
use sakura_tetris::types::{GameAction, PieceKind, Rules};

#[derive(Debug, Clone)]
struct Fixed(u32);

impl RandomSource for Fixed {
    fn next_u32(&mut self) -> u32 {
        self.0
    }
}

/// Feed one key press, then frame updates every `frame_ms` until `until_ms`.
fn hold_key<R: RandomSource>(
    game: &mut GameState<R>,
    input: &mut InputHandler,
    key: &str,
    frame_ms: u64,
    until_ms: u64,
) -> usize {
    let mut applied = 0;
    let repeat = repeat_key_for(key).unwrap();
    if let Some(action) = input.press(repeat, 0) {
        applied += usize::from(game.apply_action(action));
    }

    let mut now = 0;
    while now < until_ms {
        now += frame_ms;
        for action in input.update(now) {
            applied += usize::from(game.apply_action(action));
        }
    }
    input.release(repeat);
    applied
}

#[test]
fn test_held_left_slides_to_the_wall() {
    // T first; North spans mask columns 0..=2.
    let mut game = GameState::with_source(Fixed(0), Rules::default());
    game.start();
    game.hard_drop();
    assert_eq!(game.active().map(|a| a.kind), Some(PieceKind::T));

    let mut input = InputHandler::from_rules(game.rules());
    // Press at 0, DAS at 170, ARR at 220: three moves take x from 3 to 0.
    let moved = hold_key(&mut game, &mut input, "ArrowLeft", 10, 230);
    assert_eq!(moved, 3);
    assert_eq!(game.active().unwrap().x, 0);

    // Further repeats hit the wall and change nothing.
    let moved = hold_key(&mut game, &mut input, "ArrowLeft", 10, 400);
    assert_eq!(moved, 0);
    assert_eq!(game.active().unwrap().x, 0);
}

#[test]
fn test_repeat_count_follows_das_and_arr() {
    let mut game = GameState::new(3);
    game.start();
    let mut input = InputHandler::with_config(100, 20);

    // Press plus repeats at 100, 120 and 140; the fourth would be at 160.
    let x0 = game.active().unwrap().x;
    hold_key(&mut game, &mut input, "ArrowRight", 10, 150);
    let x1 = game.active().unwrap().x;
    assert!(x1 > x0);
    assert!(x1 - x0 <= 4);
}

#[test]
fn test_soft_drop_repeats_score_one_point_each() {
    let mut game = GameState::new(8);
    game.start();
    let mut input = InputHandler::with_config(100, 25);

    let y0 = game.active().unwrap().y;
    let moved = hold_key(&mut game, &mut input, "ArrowDown", 5, 200);
    // Press, DAS at 100, then 125, 150, 175, 200.
    assert_eq!(moved, 6);
    assert_eq!(game.active().unwrap().y, y0 + 6);
    assert_eq!(game.score(), 6);
}

#[test]
fn test_non_repeating_keys_map_to_single_actions() {
    let mut game = GameState::new(8);
    game.start();

    let action = action_for_key(" ").unwrap();
    assert_eq!(action, GameAction::HardDrop);
    assert!(repeat_key_for(" ").is_none());
    assert!(game.apply_action(action));
    assert!(game.score() > 0);

    assert_eq!(action_for_key("p"), Some(GameAction::Pause));
    assert!(game.apply_action(GameAction::Pause));
    assert!(game.paused());
}

#[test]
fn test_reset_on_pause_drops_held_keys() {
    let mut input = InputHandler::new();
    input.press(RepeatKey::Left, 0);
    input.press(RepeatKey::Down, 0);
    input.reset();

    for key in RepeatKey::ALL {
        assert!(!input.is_held(key));
    }
    assert!(input.update(1_000).is_empty());
}
