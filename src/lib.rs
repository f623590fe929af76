//! Sakura Tetris (workspace facade crate).
//!
//! The rules live in dedicated crates under `crates/`; this package re-exports
//! them as `sakura_tetris::{core,engine,input,types}` and hosts the headless
//! [`runner`] used by the binary.

pub mod runner;

pub use sakura_tetris_core as core;
pub use sakura_tetris_engine as engine;
pub use sakura_tetris_input as input;
pub use sakura_tetris_types as types;
