//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on rendering, audio, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or injected random source) produces identical games
//! - **Testable**: Time only enters through [`GameState::tick`]
//! - **Portable**: Can run in any environment (browser glue, terminal, headless)
//! - **Fast**: Zero-allocation hot paths for ticks, moves and line clears
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision queries, row scan and compaction
//! - [`pieces`]: Tetromino masks and SRS rotation with wall kicks
//! - [`rng`]: 7-bag randomizer over an injectable [`rng::RandomSource`]
//! - [`scoring`]: Line clear, combo and back-to-back scoring, level curve
//! - [`gravity`]: Gravity interval curve and the drop/lock-delay clock
//! - [`game_state`]: The session: active piece, hold, preview, events, lifecycle
//! - [`snapshot`]: Read-only copy of the session for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every run of 7 consecutive pieces from a bag boundary is a permutation
//! - **SRS Rotation**: 5 kick candidates per transition, O never rotates
//! - **Lock Delay**: 500ms grounded before a forced lock, reset by every successful move or rotation
//! - **Ghost Piece**: landing row of the active piece
//! - **Hold**: once per piece, released again by the next lock
//! - **Scoring**: 100/300/500/800 x level, combo bonus, back-to-back tetris bonus
//!
//! # Example
//!
//! ```
//! use sakura_tetris_core::GameState;
//! use sakura_tetris_core::types::{GameAction, SpeedMode};
//!
//! // Create and start a game
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! // Apply game actions
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Advance time
//! game.tick(16, SpeedMode::Normal);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use sakura_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockError, LockedRows};
pub use game_state::{GameState, HardDrop, LockOutcome, PiecePhase, Tetromino, TickResult};
pub use gravity::GravityClock;
pub use pieces::{get_shape, mask, try_rotate};
pub use rng::{PieceBag, RandomSource, SimpleRng};
pub use scoring::{ClearScore, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
