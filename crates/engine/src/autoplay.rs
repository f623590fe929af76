//! Greedy autoplayer
//!
//! Every reachable (hold, rotation, column) placement of the current piece is
//! simulated on a copy of the session. The resulting board is scored with a
//! weighted sum of four features and the best placement wins.
//!
//! Features (computed after line clears):
//! - aggregate height: sum of column heights
//! - holes: empty cells with a filled cell somewhere above them
//! - bumpiness: sum of height differences between neighbouring columns
//! - lines: rows cleared by the placement

use arrayvec::ArrayVec;

use crate::core::{Board, GameState, HardDrop, RandomSource};
use crate::place::{apply_place, PlaceError};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

/// Feature weights; positive values reward, negative values penalize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub aggregate_height: f64,
    pub holes: f64,
    pub bumpiness: f64,
    pub lines: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            aggregate_height: -0.510066,
            holes: -0.35663,
            bumpiness: -0.184483,
            lines: 0.760666,
        }
    }
}

/// Board features used by [`Weights`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    pub heights: [u32; W],
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
}

impl BoardFeatures {
    pub fn from_board(board: &Board) -> Self {
        let mut heights = [0u32; W];
        let mut holes = 0;

        for (c, height) in heights.iter_mut().enumerate() {
            let mut seen_block = false;
            for r in 0..H {
                if board.is_occupied(c as i8, r as i8) {
                    if !seen_block {
                        *height = (H - r) as u32;
                        seen_block = true;
                    }
                } else if seen_block {
                    holes += 1;
                }
            }
        }

        let aggregate_height = heights.iter().sum();
        let bumpiness = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();

        Self {
            heights,
            aggregate_height,
            holes,
            bumpiness,
        }
    }

    pub fn max_height(&self) -> u32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    pub fn score(&self, lines: u32, weights: &Weights) -> f64 {
        weights.aggregate_height * f64::from(self.aggregate_height)
            + weights.holes * f64::from(self.holes)
            + weights.bumpiness * f64::from(self.bumpiness)
            + weights.lines * f64::from(lines)
    }
}

/// A candidate placement and its evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub use_hold: bool,
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Column of the mask origin
    pub x: i8,
    pub lines: u32,
    pub score: f64,
}

/// Upper bound of candidates: 2 hold choices x 4 rotations x 13 origins
pub const MAX_CANDIDATES: usize = 2 * 4 * (W + 3);

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

#[derive(Debug, Clone, Copy)]
pub struct Autoplayer {
    weights: Weights,
    allow_hold: bool,
}

impl Default for Autoplayer {
    fn default() -> Self {
        Self::new(Weights::default())
    }
}

impl Autoplayer {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            allow_hold: true,
        }
    }

    pub fn with_hold(mut self, allow_hold: bool) -> Self {
        self.allow_hold = allow_hold;
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Every placement that locks without ending the game, unsorted
    pub fn candidates<R: RandomSource + Clone>(
        &self,
        state: &GameState<R>,
    ) -> ArrayVec<Placement, MAX_CANDIDATES> {
        let mut out = ArrayVec::new();
        if !state.is_playing() {
            return out;
        }

        let hold_options: &[bool] = if self.allow_hold && state.can_hold() {
            &[false, true]
        } else {
            &[false]
        };

        for &use_hold in hold_options {
            let kind = if use_hold {
                state.hold_piece().or(state.preview())
            } else {
                state.active().map(|a| a.kind)
            };
            let Some(kind) = kind else {
                continue;
            };
            // The O looks the same in every rotation.
            let rotations = if kind == PieceKind::O {
                &ROTATIONS[..1]
            } else {
                &ROTATIONS[..]
            };

            for &rotation in rotations {
                for x in -3..W as i8 {
                    let mut trial = state.clone();
                    let Ok(drop) = apply_place(&mut trial, x, rotation, use_hold) else {
                        continue;
                    };
                    if drop.lock.game_over {
                        continue;
                    }

                    let lines = drop.lock.score.lines;
                    let features = BoardFeatures::from_board(trial.board());
                    out.push(Placement {
                        use_hold,
                        kind,
                        rotation,
                        x,
                        lines,
                        score: features.score(lines, &self.weights),
                    });
                }
            }
        }

        out
    }

    /// Highest-scoring placement; ties keep the first candidate found
    pub fn choose<R: RandomSource + Clone>(&self, state: &GameState<R>) -> Option<Placement> {
        self.candidates(state)
            .into_iter()
            .fold(None, |best: Option<Placement>, p| match best {
                Some(b) if b.score >= p.score => Some(b),
                _ => Some(p),
            })
    }

    /// Choose and apply a placement.
    ///
    /// When no placement survives, the active piece is hard dropped where it
    /// is, which ends the game.
    pub fn play_piece<R: RandomSource + Clone>(
        &self,
        state: &mut GameState<R>,
    ) -> Result<HardDrop, PlaceError> {
        match self.choose(state) {
            Some(p) => apply_place(state, p.x, p.rotation, p.use_hold),
            None => state.hard_drop().ok_or(PlaceError::NotPlayable),
        }
    }
}
