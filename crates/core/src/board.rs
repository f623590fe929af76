//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are open space: they never hold locked cells
//! and never collide with board contents.

use arrayvec::ArrayVec;

use crate::pieces::get_shape;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices produced by a scan or a clear, top to bottom
pub type RowList = ArrayVec<usize, HEIGHT>;

/// Rows touched by a single locked piece, top to bottom
pub type LockedRows = ArrayVec<usize, 4>;

/// Why a piece could not be written into the board.
///
/// Nothing is written to the board when either is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockError {
    /// At least one mino lies above the visible board (game over)
    Overflow,
    /// A mino lies outside the walls or floor, or on a locked cell
    Blocked,
}

/// Absolute cell of a mino, `None` when the coordinate leaves the `i8` range
#[inline]
fn mino_at(x: i8, y: i8, (dx, dy): (i8, i8)) -> Option<(i8, i8)> {
    Some((x.checked_add(dx)?, y.checked_add(dy)?))
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from a grid of cell ids (0 = empty, 1..=7 = piece kind).
    /// Unknown ids are treated as empty.
    pub fn from_cell_ids(rows: &[[u8; WIDTH]; HEIGHT]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                board.cells[y * WIDTH + x] = PieceKind::from_cell_id(id);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the board and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if a mino may occupy (x, y): inside the side walls, above the
    /// floor, and either above the board or on an empty cell.
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || self.is_valid(x, y)
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `kind` in `rotation` with its mask origin at `(x, y)` overlaps a
    /// wall, the floor, or a locked cell.
    pub fn collides(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        get_shape(kind, rotation)
            .iter()
            .any(|&offset| mino_at(x, y, offset).map_or(true, |(px, py)| !self.is_free(px, py)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Check if a row is completely empty
    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_none())
    }

    /// Write a piece into the board using its kind as the cell value.
    ///
    /// Returns the rows touched, top to bottom. The piece is checked as a
    /// whole first: if any mino lies above the board, outside it, or on a
    /// locked cell, the board is left untouched.
    pub fn lock_piece(
        &mut self,
        kind: PieceKind,
        rotation: Rotation,
        x: i8,
        y: i8,
    ) -> Result<LockedRows, LockError> {
        let mut cells = [(0usize, 0usize); 4];
        let mut above = false;
        for (slot, offset) in cells.iter_mut().zip(get_shape(kind, rotation)) {
            let (px, py) = mino_at(x, y, offset).ok_or(LockError::Blocked)?;
            if py < 0 {
                if !self.is_free(px, py) {
                    return Err(LockError::Blocked);
                }
                above = true;
                continue;
            }
            let idx = Self::index(px, py).ok_or(LockError::Blocked)?;
            if self.cells[idx].is_some() {
                return Err(LockError::Blocked);
            }
            *slot = (idx, py as usize);
        }
        if above {
            return Err(LockError::Overflow);
        }

        let mut rows = LockedRows::new();
        for (idx, row) in cells {
            self.cells[idx] = Some(kind);
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
        rows.sort_unstable();
        Ok(rows)
    }

    /// Indices of all completely filled rows, top to bottom
    pub fn scan_completed_rows(&self) -> RowList {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given rows and insert the same number of empty rows at the
    /// top. Remaining rows keep their relative order. Out-of-range indices are
    /// ignored. Returns how many rows were removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut remove = [false; HEIGHT];
        for &y in rows {
            if y < HEIGHT {
                remove[y] = true;
            }
        }

        // Compact from the bottom up; copy_within handles the overlap.
        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        for cell in &mut self.cells[..write_y * WIDTH] {
            *cell = None;
        }

        write_y
    }

    /// Scan and clear all full rows, returning the cleared indices top to bottom
    pub fn clear_full_rows(&mut self) -> RowList {
        let rows = self.scan_completed_rows();
        self.clear_rows(&rows);
        rows
    }

    /// Copy the board into a grid of cell ids (0 = empty)
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * WIDTH + x].map_or(0, PieceKind::cell_id);
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
