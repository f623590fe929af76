//! Shared types - constants, piece identifiers, actions, events and rules
//!
//! Everything in this crate is plain data. With the `serde` feature enabled the
//! public types derive `Serialize`/`Deserialize` so collaborators can persist
//! rules or stream snapshots and events.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn origin**: column 3, row -1 (one row above the visible board)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_DELAY_MS` | 500 | Grounded time before a piece is forced to lock |
//! | `DEFAULT_DAS_MS` | 170 | Delay before a held key starts repeating |
//! | `DEFAULT_ARR_MS` | 50 | Interval between repeats once charged |
//!
//! # Gravity Curve
//!
//! The drop interval for level `n` is `max(80, 800 - 45 * n)` milliseconds, with
//! `n` capped at 30. Speed mode scales it to 35% with a 30ms floor.
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 755ms |
//! | 2 | 710ms |
//! | 5 | 575ms |
//! | 10 | 350ms |
//! | 16+ | 80ms |
//!
//! # Examples
//!
//! ```
//! use sakura_tetris_types::{PieceKind, Rotation, RotateDirection, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.cell_id(), 3);
//! assert_eq!(PieceKind::from_cell_id(3), Some(PieceKind::T));
//!
//! let rotated = Rotation::North.rotate(RotateDirection::Clockwise);
//! assert_eq!(rotated, Rotation::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the 4x4 mask origin for a freshly spawned piece
pub const SPAWN_X: i8 = 3;

/// Row of the 4x4 mask origin for a freshly spawned piece (above the board)
pub const SPAWN_Y: i8 = -1;

/// Grounded time before a piece is forced to lock
pub const LOCK_DELAY_MS: u32 = 500;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 170;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 50;

/// Drop interval at level 0 before the per-level step is applied
pub const GRAVITY_BASE_MS: u32 = 800;

/// Interval reduction per level
pub const GRAVITY_STEP_MS: u32 = 45;

/// Slowest gravity can never be faster than this
pub const GRAVITY_FLOOR_MS: u32 = 80;

/// Levels above this share the same interval
pub const GRAVITY_MAX_LEVEL: u32 = 30;

/// Speed mode keeps this percentage of the normal interval
pub const FAST_PERCENT: u32 = 35;

/// Minimum interval while speed mode is active
pub const FAST_FLOOR_MS: u32 = 30;

/// Line clear scoring table, multiplied by the current level
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Combo bonus per cleared line per combo step
pub const COMBO_BONUS: u32 = 50;

/// Points per cell moved by a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell moved by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Number of rows that make a "difficult" clear
pub const DIFFICULT_CLEAR_LINES: usize = 4;

/// The seven tetromino piece kinds
///
/// Each kind is stored on the board by its cell id:
/// I=1, O=2, T=3, S=4, Z=5, J=6, L=7 (0 is an empty cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in cell-id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Board cell value for this kind (1..=7)
    pub fn cell_id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::cell_id`]; `None` for 0 or anything above 7
    pub fn from_cell_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use sakura_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Direction of a single rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation states following the Super Rotation System (SRS)
///
/// State indices 0..=3 map to North (spawn), East, South and West.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation state index (0 = North, 1 = East, 2 = South, 3 = West)
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from a state index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use sakura_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotate one step in the given direction
    pub fn rotate(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Clockwise => self.rotate_cw(),
            RotateDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Gravity speed selected by the presentation layer
///
/// `Fast` is the "speed mode" toggle: the level interval is scaled down and
/// floored at [`FAST_FLOOR_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpeedMode {
    #[default]
    Normal,
    Fast,
}

/// Game actions that can be applied to modify game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per piece)
    Hold,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use sakura_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Notification emitted by the core for presentation collaborators
/// (sound, theme changes, overlays).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GameEvent {
    /// Rows were cleared after a lock. `difficult` is set for a 4-row clear.
    LineCleared { count: u32, difficult: bool },
    /// The level increased
    LeveledUp { level: u32 },
    /// The board overflowed. `best_score` already includes `final_score`.
    GameOver { final_score: u32, best_score: u32 },
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Tunable rule parameters
///
/// `Rules::default()` reproduces the reference timings. With the `serde`
/// feature, missing fields fall back to their defaults so a partial rules file
/// only overrides what it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Rules {
    pub lock_delay_ms: u32,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub gravity_base_ms: u32,
    pub gravity_step_ms: u32,
    pub gravity_floor_ms: u32,
    pub gravity_max_level: u32,
    pub fast_percent: u32,
    pub fast_floor_ms: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            lock_delay_ms: LOCK_DELAY_MS,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            gravity_base_ms: GRAVITY_BASE_MS,
            gravity_step_ms: GRAVITY_STEP_MS,
            gravity_floor_ms: GRAVITY_FLOOR_MS,
            gravity_max_level: GRAVITY_MAX_LEVEL,
            fast_percent: FAST_PERCENT,
            fast_floor_ms: FAST_FLOOR_MS,
        }
    }
}
