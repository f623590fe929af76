//! Read-only view of a session for renderers and other collaborators
//!
//! [`GameSnapshot`] is plain `Copy` data and can be refilled in place with
//! [`GameState::snapshot_into`](crate::GameState::snapshot_into) every frame.

use crate::game_state::Tetromino;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Cell-id grid, row 0 at the top (0 = empty, 1..=7 = piece kind)
pub type CellGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimersSnapshot {
    pub drop_ms: u32,
    pub lock_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board: CellGrid,
    pub active: Option<ActiveSnapshot>,
    /// Landing row of the active piece's mask origin
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub preview: Option<PieceKind>,
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: i32,
    pub back_to_back: bool,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    /// Cell id at `(x, y)`, with the active piece drawn over the board
    pub fn cell_with_active(&self, x: usize, y: usize) -> u8 {
        if let Some(active) = self.active {
            let hit = crate::pieces::get_shape(active.kind, active.rotation)
                .iter()
                .any(|&(dx, dy)| {
                    (active.x + dx) as isize == x as isize && (active.y + dy) as isize == y as isize
                });
            if hit {
                return active.kind.cell_id();
            }
        }
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: true,
            preview: None,
            score: 0,
            best_score: 0,
            level: 1,
            lines: 0,
            combo: -1,
            back_to_back: false,
            started: false,
            paused: false,
            game_over: false,
            timers: TimersSnapshot::default(),
        }
    }
}
