//! Input module (engine-facing).
//!
//! This crate is intentionally independent of any UI framework. It maps
//! device-neutral key names into [`crate::types::GameAction`] and provides a
//! timestamp-driven DAS/ARR repeat throttle for the three repeatable
//! directions (left, right, soft drop).

pub mod handler;
pub mod keymap;

pub use sakura_tetris_types as types;

pub use handler::{InputHandler, RepeatKey};
pub use keymap::{action_for_key, repeat_key_for};
