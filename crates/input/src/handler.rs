//! DAS/ARR input handler.
//!
//! Each repeatable key keeps a "charged" flag and the timestamp of its last
//! action. The first action fires on press. A held key fires again once
//! `das_ms` has passed since the press, which charges it; after that it fires
//! every `arr_ms`. Releasing clears both the flag and the timer.
//!
//! Timestamps are caller-supplied milliseconds from any monotonic clock, so
//! the handler never reads real time.

use arrayvec::ArrayVec;

use crate::types::{GameAction, Rules, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// The three directions that auto-repeat while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatKey {
    Left,
    Right,
    Down,
}

impl RepeatKey {
    pub const ALL: [RepeatKey; 3] = [RepeatKey::Left, RepeatKey::Right, RepeatKey::Down];

    /// Action fired on press and on every repeat
    pub fn action(self) -> GameAction {
        match self {
            RepeatKey::Left => GameAction::MoveLeft,
            RepeatKey::Right => GameAction::MoveRight,
            RepeatKey::Down => GameAction::SoftDrop,
        }
    }

    pub fn from_action(action: GameAction) -> Option<Self> {
        match action {
            GameAction::MoveLeft => Some(RepeatKey::Left),
            GameAction::MoveRight => Some(RepeatKey::Right),
            GameAction::SoftDrop => Some(RepeatKey::Down),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            RepeatKey::Left => 0,
            RepeatKey::Right => 1,
            RepeatKey::Down => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    held: bool,
    charged: bool,
    last_ms: u64,
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    keys: [KeyState; 3],
    das_ms: u32,
    arr_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            keys: [KeyState::default(); 3],
            das_ms,
            arr_ms,
        }
    }

    pub fn from_rules(rules: &Rules) -> Self {
        Self::with_config(rules.das_ms, rules.arr_ms)
    }

    pub fn das_ms(&self) -> u32 {
        self.das_ms
    }

    pub fn arr_ms(&self) -> u32 {
        self.arr_ms
    }

    pub fn is_held(&self, key: RepeatKey) -> bool {
        self.keys[key.index()].held
    }

    pub fn is_charged(&self, key: RepeatKey) -> bool {
        self.keys[key.index()].charged
    }

    /// Register a key press at `now_ms`.
    ///
    /// Returns the initial action. A press for a key that is already held
    /// (device auto-repeat) returns `None` and does not restart its timer.
    pub fn press(&mut self, key: RepeatKey, now_ms: u64) -> Option<GameAction> {
        let state = &mut self.keys[key.index()];
        if state.held {
            return None;
        }
        *state = KeyState {
            held: true,
            charged: false,
            last_ms: now_ms,
        };
        Some(key.action())
    }

    pub fn release(&mut self, key: RepeatKey) {
        self.keys[key.index()] = KeyState::default();
    }

    /// Repeats due at `now_ms`, at most one per held key, in left/right/down order.
    pub fn update(&mut self, now_ms: u64) -> ArrayVec<GameAction, 3> {
        let mut actions = ArrayVec::<GameAction, 3>::new();
        let (das_ms, arr_ms) = (self.das_ms, self.arr_ms);

        for key in RepeatKey::ALL {
            let state = &mut self.keys[key.index()];
            if !state.held {
                continue;
            }

            let elapsed = now_ms.saturating_sub(state.last_ms);
            let threshold = if state.charged { arr_ms } else { das_ms };
            if elapsed >= u64::from(threshold) {
                state.charged = true;
                state.last_ms = now_ms;
                actions.push(key.action());
            }
        }

        actions
    }

    /// Release every key (e.g. on pause, focus loss or restart)
    pub fn reset(&mut self) {
        self.keys = [KeyState::default(); 3];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
