//! Board tests: bounds, collision against walls/floor/cells, locking and clears

use sakura_tetris::core::{get_shape, Board, LockError};
use sakura_tetris::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_and_set_out_of_bounds() {
    let mut board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
    assert_eq!(board, Board::new());
}

#[test]
fn test_rows_above_board_are_free_but_walls_are_not() {
    let board = Board::new();

    assert!(board.is_free(0, -1));
    assert!(board.is_free(9, -3));
    assert!(!board.is_free(-1, -1));
    assert!(!board.is_free(10, -1));
    assert!(!board.is_free(4, 20));
}

/// Every kind, rotation and origin in a window around the board agrees with a
/// cell-by-cell check of walls, floor and occupied cells.
fn assert_collides_matches_cellwise(board: &Board) {
    for kind in PieceKind::ALL {
        for r in 0..4 {
            let rotation = Rotation::from_index(r);
            let shape = get_shape(kind, rotation);
            for y in -4..=BOARD_HEIGHT as i8 {
                for x in -4..=BOARD_WIDTH as i8 {
                    let expected = shape.iter().any(|&(dx, dy)| {
                        let (px, py) = (x + dx, y + dy);
                        px < 0
                            || px >= BOARD_WIDTH as i8
                            || py >= BOARD_HEIGHT as i8
                            || (py >= 0 && board.get(px, py) != Some(None))
                    });
                    assert_eq!(
                        board.collides(kind, rotation, x, y),
                        expected,
                        "{:?} {:?} at ({}, {})",
                        kind,
                        rotation,
                        x,
                        y
                    );
                }
            }
        }
    }
}

#[test]
fn test_collides_matches_cellwise_check() {
    let mut board = Board::new();
    board.set(4, 10, Some(PieceKind::Z));
    assert_collides_matches_cellwise(&board);
}

#[test]
fn test_collides_matches_cellwise_check_over_stack_with_well() {
    // Ragged stack on rows 14..19 with column 7 left open as a well.
    let mut board = Board::new();
    for y in 14..20i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if x != 7 && (y >= 17 || x % (y - 12) != 0) {
                board.set(x, y, Some(PieceKind::L));
            }
        }
    }
    assert!(board.is_free(7, 19));
    assert!(!board.is_free(0, 19));
    assert_collides_matches_cellwise(&board);
}

#[test]
fn test_collides_at_extreme_origins() {
    let board = Board::new();

    assert!(board.collides(PieceKind::O, Rotation::North, i8::MAX, 0));
    assert!(board.collides(PieceKind::I, Rotation::South, 0, i8::MAX));
    assert!(board.collides(PieceKind::T, Rotation::North, i8::MIN, 0));
    assert!(board.collides(PieceKind::J, Rotation::East, i8::MAX, i8::MAX));
}

#[test]
fn test_lock_piece_at_extreme_origin_is_rejected() {
    let mut board = Board::new();

    let result = board.lock_piece(PieceKind::O, Rotation::North, i8::MAX, 0);
    assert_eq!(result, Err(LockError::Blocked));
    assert_eq!(board, Board::new());
}

#[test]
fn test_lock_piece_writes_kind_and_reports_rows() {
    let mut board = Board::new();

    let rows = board
        .lock_piece(PieceKind::T, Rotation::North, 3, 18)
        .unwrap();
    assert_eq!(rows.as_slice(), &[18, 19]);

    assert_eq!(board.get(4, 18), Some(Some(PieceKind::T)));
    for x in 3..6 {
        assert_eq!(board.get(x, 19), Some(Some(PieceKind::T)));
    }
}

#[test]
fn test_lock_piece_above_board_writes_nothing() {
    let mut board = Board::new();

    // Z North at y = -1 puts its top row at -1.
    let result = board.lock_piece(PieceKind::Z, Rotation::North, 3, -1);
    assert_eq!(result, Err(LockError::Overflow));
    assert_eq!(board, Board::new());
}

#[test]
fn test_clear_rows_keeps_order_of_remaining_rows() {
    let mut board = Board::new();
    board.set(0, 15, Some(PieceKind::I));
    fill_row(&mut board, 16, PieceKind::J);
    board.set(1, 17, Some(PieceKind::O));
    fill_row(&mut board, 18, PieceKind::L);
    board.set(2, 19, Some(PieceKind::S));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[16, 18]);

    assert_eq!(board.get(0, 17), Some(Some(PieceKind::I)));
    assert_eq!(board.get(1, 18), Some(Some(PieceKind::O)));
    assert_eq!(board.get(2, 19), Some(Some(PieceKind::S)));
    for y in 0..17 {
        assert!(board.is_row_empty(y), "row {} should be empty", y);
    }
}

#[test]
fn test_no_full_rows_remain_after_clear() {
    let mut board = Board::new();
    for y in 12..20 {
        if y % 2 == 0 {
            fill_row(&mut board, y, PieceKind::T);
        } else {
            board.set(y % 10, y, Some(PieceKind::I));
        }
    }

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 4);
    assert!(board.scan_completed_rows().is_empty());
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 4);
}

#[test]
fn test_clear_four_rows_at_once() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y, PieceKind::I);
    }
    board.set(5, 15, Some(PieceKind::T));

    assert_eq!(board.clear_rows(&[16, 17, 18, 19]), 4);
    assert_eq!(board.get(5, 19), Some(Some(PieceKind::T)));
    assert!(board.is_row_empty(15));
}

#[test]
fn test_cell_id_grid_round_trip() {
    let mut board = Board::new();
    board.set(0, 19, Some(PieceKind::I));
    board.set(9, 0, Some(PieceKind::L));

    let mut grid = [[0u8; 10]; 20];
    board.write_u8_grid(&mut grid);
    assert_eq!(grid[19][0], PieceKind::I.cell_id());
    assert_eq!(grid[0][9], PieceKind::L.cell_id());

    assert_eq!(Board::from_cell_ids(&grid), board);
}
