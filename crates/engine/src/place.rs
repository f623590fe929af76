use crate::core::{GameState, HardDrop, RandomSource};
use crate::types::{PieceKind, RotateDirection, Rotation, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    HoldUnavailable,
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold_unavailable",
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NoActive => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::HoldUnavailable => "hold requested when unavailable",
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Rotate the active piece to `target_rot`, shift it to column `target_x`
/// (mask origin), then hard drop. Optionally hold first.
///
/// The O piece ignores `target_rot`. On error the session is left exactly as
/// it was before the call.
pub fn apply_place<R: RandomSource + Clone>(
    state: &mut GameState<R>,
    target_x: i8,
    target_rot: Rotation,
    use_hold: bool,
) -> Result<HardDrop, PlaceError> {
    if !state.is_playing() {
        return Err(PlaceError::NotPlayable);
    }

    let before = state.clone();
    let result = place_inner(state, target_x, target_rot, use_hold);
    if result.is_err() {
        *state = before;
    }
    result
}

fn place_inner<R: RandomSource + Clone>(
    state: &mut GameState<R>,
    target_x: i8,
    target_rot: Rotation,
    use_hold: bool,
) -> Result<HardDrop, PlaceError> {
    // Hold first if requested.
    if use_hold && !state.hold() {
        return Err(PlaceError::HoldUnavailable);
    }

    let Some(active0) = state.active() else {
        return Err(PlaceError::NoActive);
    };

    let target_rot = if active0.kind == PieceKind::O {
        active0.rotation
    } else {
        target_rot
    };

    // Try the shorter direction first; a half turn tries both.
    let cur = active0.rotation.index() as i8;
    let tgt = target_rot.index() as i8;
    let cw = (tgt - cur).rem_euclid(4) as u8;
    let ccw = (cur - tgt).rem_euclid(4) as u8;

    let mut plans = [
        (RotateDirection::Clockwise, cw),
        (RotateDirection::CounterClockwise, ccw),
    ];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let start = state.clone();
    let mut rotated = false;
    for (direction, steps) in plans {
        *state = start.clone();
        if (0..steps).all(|_| state.rotate(direction)) {
            rotated = true;
            break;
        }
    }
    if !rotated {
        return Err(PlaceError::RotationBlocked);
    }

    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };
    if active.rotation != target_rot {
        return Err(PlaceError::RotationBlocked);
    }

    // Validate x bounds based on current shape.
    let shape = active.shape();
    let min_dx = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
    let max_dx = shape.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
    let target_x16 = i16::from(target_x);
    if target_x16 + i16::from(min_dx) < 0
        || target_x16 + i16::from(max_dx) >= i16::from(BOARD_WIDTH)
    {
        return Err(PlaceError::XOutOfBounds);
    }

    while let Some(active) = state.active() {
        let moved = match target_x.cmp(&active.x) {
            std::cmp::Ordering::Equal => break,
            std::cmp::Ordering::Greater => state.move_right(),
            std::cmp::Ordering::Less => state.move_left(),
        };
        if !moved {
            return Err(PlaceError::XBlocked);
        }
    }

    state.hard_drop().ok_or(PlaceError::NoActive)
}
