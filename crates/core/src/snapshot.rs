//! Read-only view of a game for the presentation layer

use crate::board::{Point, RowSet};
use crate::pieces::Piece;
use crate::types::{Cell, Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, UPCOMING_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub cells: [Point; 4],
    pub color: Color,
    /// Rows until the piece rests, for the landing preview
    pub drop_distance: u8,
}

impl ActiveSnapshot {
    pub fn landing_cells(&self) -> [Point; 4] {
        let d = self.drop_distance as i8;
        self.cells.map(|(x, y)| (x, y + d))
    }
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            cells: *value.cells(),
            color: value.color(),
            drop_distance: value.drop_distance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub hold: Option<PieceKind>,
    pub upcoming: [PieceKind; UPCOMING_COUNT],
    /// Rows flashing before removal
    pub clearing_rows: RowSet,
    pub score: u32,
    pub highscore: u32,
    pub level: u32,
    pub rows_cleared_this_level: u32,
    pub elapsed_secs: u32,
    pub game_over: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            hold: None,
            upcoming: [PieceKind::I; UPCOMING_COUNT],
            clearing_rows: RowSet::new(),
            score: 0,
            highscore: 0,
            level: 1,
            rows_cleared_this_level: 0,
            elapsed_secs: 0,
            game_over: false,
        }
    }
}
