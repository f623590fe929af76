//! Placement helpers built on the core session.
//!
//! - [`place`]: move the active piece to a target rotation and column, then hard drop
//! - [`autoplay`]: greedy one-piece lookahead that picks placements by board features

pub mod autoplay;
pub mod place;

pub use sakura_tetris_core as core;
pub use sakura_tetris_types as types;

pub use autoplay::{Autoplayer, BoardFeatures, Placement, Weights};
pub use place::{apply_place, PlaceError};
