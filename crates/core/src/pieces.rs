//! Pieces module - Tetromino shapes and SRS rotation system
//!
//! Shapes are the four occupied cells of each 4x4 rotation mask, given as
//! `(column, row)` offsets from the mask's top-left corner.
//!
//! Kick offsets are `(dx, dy)` with `dy` pointing *up*: a candidate is tried at
//! `(x + dx, y - dy)` in board coordinates (row 0 is the top).
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, RotateDirection, Rotation};

/// Offset of a single mino relative to the mask origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the mask origin
pub type PieceShape = [MinoOffset; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// The 4x4 occupancy mask for a kind and rotation, indexed `[row][column]`
pub fn mask(kind: PieceKind, rotation: Rotation) -> [[bool; 4]; 4] {
    let mut out = [[false; 4]; 4];
    for (x, y) in get_shape(kind, rotation) {
        out[y as usize][x as usize] = true;
    }
    out
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // horizontal on mask row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // vertical on mask column 2
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // horizontal on mask row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // vertical on mask column 1
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Ordered kick candidates for one directed transition
pub type Kicks = [(i8, i8); 5];

/// Kick table indexed by `[from.index()][direction]`, clockwise first.
///
/// Every `(from, direction)` pair names exactly one of the eight SRS
/// transitions, so the table is complete by construction.
pub type KickTable = [[Kicks; 2]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    [
        // 0>1
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // 0>3
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    [
        // 1>2
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // 1>0
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    ],
    [
        // 2>3
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // 2>1
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    ],
    [
        // 3>0
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // 3>2
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    ],
];

/// I piece kick table
const I_KICKS: KickTable = [
    [
        // 0>1
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        // 0>3
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    ],
    [
        // 1>2
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        // 1>0
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    ],
    [
        // 2>3
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        // 2>1
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    ],
    [
        // 3>0
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        // 3>2
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    ],
];

/// Get the kick table for a piece kind. The O piece has none.
pub fn get_kick_table(kind: PieceKind) -> Option<&'static KickTable> {
    match kind {
        PieceKind::O => None,
        PieceKind::I => Some(&I_KICKS),
        _ => Some(&JLSTZ_KICKS),
    }
}

/// Ordered kick candidates for rotating `kind` out of `from` in `direction`
pub fn kicks(kind: PieceKind, from: Rotation, direction: RotateDirection) -> &'static [(i8, i8)] {
    let column = match direction {
        RotateDirection::Clockwise => 0,
        RotateDirection::CounterClockwise => 1,
    };
    match get_kick_table(kind) {
        Some(table) => &table[from.index()][column],
        None => &[],
    }
}

/// Try to rotate a piece with wall kicks
///
/// `is_free(x, y)` reports whether a single board cell may hold a mino.
/// Returns the new rotation and the accepted `(dx, dy)` kick if any candidate
/// fits; the first fitting candidate in table order always wins.
/// Returns `None` for the O piece, which has no kick table.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    direction: RotateDirection,
    is_free: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, (i8, i8))> {
    let new_rotation = rotation.rotate(direction);
    let new_shape = get_shape(kind, new_rotation);

    for &(dx, dy) in kicks(kind, rotation, direction) {
        // A trial whose coordinates leave the i8 range never fits.
        let (Some(new_x), Some(new_y)) = (x.checked_add(dx), y.checked_sub(dy)) else {
            continue;
        };

        let fits = new_shape.iter().all(|&(mx, my)| {
            match (new_x.checked_add(mx), new_y.checked_add(my)) {
                (Some(px), Some(py)) => is_free(px, py),
                _ => false,
            }
        });

        if fits {
            return Some((new_rotation, (dx, dy)));
        }
    }

    None
}
