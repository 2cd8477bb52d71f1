//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of the piece that
//! was locked there. Storage is a flat row-major array, so nothing here allocates.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Sorted, de-duplicated set of row indices.
pub type RowSet = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Board cell coordinate (x, y)
pub type Point = (i8, i8);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::in_bounds(x, y) {
            Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y), or None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether the cell at (x, y) holds a locked block.
    ///
    /// Callers bounds-check first; an out-of-range query is a logic error and panics.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        match Self::index(x, y) {
            Some(idx) => self.cells[idx].is_some(),
            None => panic!("cell ({x}, {y}) is outside the {BOARD_WIDTH}x{BOARD_HEIGHT} board"),
        }
    }

    /// In bounds and empty: a piece cell may move here.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Mark each cell occupied with `color`.
    pub fn place(&mut self, cells: &[Point], color: Color) {
        for &(x, y) in cells {
            match Self::index(x, y) {
                Some(idx) => self.cells[idx] = Some(color),
                None => panic!("cannot place a block at ({x}, {y})"),
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// The candidate rows whose every column is occupied, sorted top to bottom.
    pub fn filled_rows(&self, candidates: impl IntoIterator<Item = usize>) -> RowSet {
        let mut rows = RowSet::new();
        for y in candidates {
            if self.is_row_full(y) && !rows.contains(&y) {
                rows.push(y);
            }
        }
        rows.sort_unstable();
        rows
    }

    /// Remove the given rows and let every surviving row settle downward.
    ///
    /// Relative order of surviving rows is preserved and the top `rows.len()` rows end up
    /// empty. Two-pointer scan from the bottom; copy_within handles the overlap.
    pub fn clear_and_compact(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
    }

    /// Number of occupied cells (used by tests and the view)
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from text rows, bottom-aligned: `#` is occupied, anything else is empty.
    ///
    /// Handy for setting up collision scenarios in tests and benches.
    pub fn from_rows(rows: &[&str], color: Color) -> Self {
        assert!(rows.len() <= BOARD_HEIGHT as usize, "too many rows");
        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch == '#' {
                    board.cells[(top + i) * BOARD_WIDTH as usize + x] = Some(color);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
