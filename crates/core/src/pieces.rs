//! Pieces module - shape table and the falling-piece state machine
//!
//! A piece stores its four cells as absolute board coordinates. Every transform recomputes all
//! four cells, which keeps collision checks trivial. Rotation turns the cells around one of them
//! (the pivot) and nudges the piece back inside the walls or off the floor when the turned cells
//! would leave the board.

use crate::board::{Board, Point};
use crate::types::{Color, PieceKind, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_COLUMN};

/// Offsets of the four cells relative to (SPAWN_COLUMN, 0)
pub type Footprint = [Point; 4];

/// Static per-kind data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSpec {
    pub footprint: Footprint,
    /// Index into the cell array of the rotation center
    pub pivot: usize,
}

/// Wall/floor shifts allowed while resolving one rotation.
///
/// No cell sits more than two cells from its pivot, so two shifts always suffice.
pub const MAX_ROTATION_SHIFTS: usize = 2;

/// Look up the spawn footprint and pivot for a kind
pub fn shape_spec(kind: PieceKind) -> ShapeSpec {
    match kind {
        PieceKind::I => ShapeSpec {
            footprint: [(0, 0), (1, 0), (2, 0), (3, 0)],
            pivot: 1,
        },
        // Pivot 0 disables rotation (see `Piece::rotate`)
        PieceKind::O => ShapeSpec {
            footprint: [(1, 0), (2, 0), (1, 1), (2, 1)],
            pivot: 0,
        },
        PieceKind::T => ShapeSpec {
            footprint: [(0, 1), (1, 1), (1, 0), (2, 1)],
            pivot: 1,
        },
        PieceKind::S => ShapeSpec {
            footprint: [(0, 1), (1, 1), (1, 0), (2, 0)],
            pivot: 1,
        },
        PieceKind::Z => ShapeSpec {
            footprint: [(0, 0), (1, 0), (1, 1), (2, 1)],
            pivot: 2,
        },
        PieceKind::J => ShapeSpec {
            footprint: [(0, 0), (0, 1), (1, 1), (2, 1)],
            pivot: 2,
        },
        PieceKind::L => ShapeSpec {
            footprint: [(0, 1), (1, 1), (2, 1), (2, 0)],
            pivot: 1,
        },
    }
}

/// Absolute cells of a kind at the spawn position
pub fn spawn_cells(kind: PieceKind) -> [Point; 4] {
    shape_spec(kind)
        .footprint
        .map(|(dx, dy)| (SPAWN_COLUMN + dx, dy))
}

/// Outcome of resolving one rotation candidate
enum RotationStep {
    Done([Point; 4]),
    Shift(i8, i8),
    Abandon,
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    cells: [Point; 4],
    pivot: usize,
    color: Color,
    drop_distance: u8,
    lock_grace: bool,
    already_held: bool,
}

impl Piece {
    /// Create a piece at the spawn position with its drop distance computed
    pub fn spawn(kind: PieceKind, board: &Board) -> Self {
        let spec = shape_spec(kind);
        let mut piece = Self {
            kind,
            cells: spawn_cells(kind),
            pivot: spec.pivot,
            color: kind.color(),
            drop_distance: 0,
            lock_grace: false,
            already_held: false,
        };
        piece.recompute_drop_distance(board);
        piece
    }

    pub fn cells(&self) -> &[Point; 4] {
        &self.cells
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn drop_distance(&self) -> u8 {
        self.drop_distance
    }

    pub fn lock_grace(&self) -> bool {
        self.lock_grace
    }

    pub fn already_held(&self) -> bool {
        self.already_held
    }

    pub(crate) fn mark_held(&mut self) {
        self.already_held = true;
    }

    /// Distinct rows the piece covers, in cell order
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(i, &(_, y))| self.cells[..i].iter().all(|&(_, py)| py != y))
            .map(|(_, &(_, y))| y as usize)
    }

    fn can_shift(cells: &[Point; 4], board: &Board, dx: i8, dy: i8) -> bool {
        cells.iter().all(|&(x, y)| board.is_free(x + dx, y + dy))
    }

    fn shifted(cells: &[Point; 4], dx: i8, dy: i8) -> [Point; 4] {
        cells.map(|(x, y)| (x + dx, y + dy))
    }

    /// Move one column left (`dx = -1`) or right (`dx = 1`).
    ///
    /// Returns false and leaves the piece untouched when any destination is blocked.
    pub fn move_horizontal(&mut self, board: &Board, dx: i8) -> bool {
        debug_assert!(dx == 1 || dx == -1, "horizontal moves are one column");
        if !Self::can_shift(&self.cells, board, dx, 0) {
            return false;
        }
        self.cells = Self::shifted(&self.cells, dx, 0);
        self.recompute_drop_distance(board);
        true
    }

    /// Rotate around the pivot cell, shifting off walls and the floor when needed.
    ///
    /// Rotation is all-or-nothing: when it is abandoned, shifts tried on its behalf are
    /// discarded as well. Pieces whose pivot index is 0 never rotate.
    pub fn rotate(&mut self, board: &Board, direction: RotationDirection) -> bool {
        if self.pivot == 0 {
            return false;
        }

        let mut cells = self.cells;
        let mut shifts = 0;
        loop {
            match Self::rotation_step(&cells, self.pivot, direction, board) {
                RotationStep::Done(rotated) => {
                    self.cells = rotated;
                    self.recompute_drop_distance(board);
                    return true;
                }
                RotationStep::Shift(dx, dy) => {
                    if shifts == MAX_ROTATION_SHIFTS || !Self::can_shift(&cells, board, dx, dy) {
                        return false;
                    }
                    cells = Self::shifted(&cells, dx, dy);
                    shifts += 1;
                }
                RotationStep::Abandon => return false,
            }
        }
    }

    /// Rotate `cells` once. The first cell that fails a check decides the outcome.
    fn rotation_step(
        cells: &[Point; 4],
        pivot: usize,
        direction: RotationDirection,
        board: &Board,
    ) -> RotationStep {
        let dir = direction.sign();
        let (px, py) = cells[pivot];
        let mut rotated = *cells;

        for (slot, &(x, y)) in rotated.iter_mut().zip(cells.iter()) {
            let nx = px - (y - py) * dir;
            let ny = py + (x - px) * dir;

            if nx < 0 {
                return RotationStep::Shift(1, 0);
            }
            if nx >= BOARD_WIDTH as i8 {
                return RotationStep::Shift(-1, 0);
            }
            if ny < 0 {
                return RotationStep::Abandon;
            }
            if ny >= BOARD_HEIGHT as i8 {
                return RotationStep::Shift(0, -1);
            }
            if board.is_occupied(nx, ny) {
                return RotationStep::Abandon;
            }
            *slot = (nx, ny);
        }

        RotationStep::Done(rotated)
    }

    /// One gravity tick. Returns false when the piece must lock.
    ///
    /// A grounded piece gets one grace tick before it reports false.
    pub fn gravity_step(&mut self) -> bool {
        if self.drop_distance == 0 {
            if self.lock_grace {
                return false;
            }
            self.lock_grace = true;
            return true;
        }

        self.drop_distance -= 1;
        self.lock_grace = false;
        self.cells = Self::shifted(&self.cells, 0, 1);
        true
    }

    /// Minimum number of empty rows below any cell, down to the stack or the floor
    pub fn recompute_drop_distance(&mut self, board: &Board) {
        self.drop_distance = self
            .cells
            .iter()
            .map(|&(x, y)| {
                (y + 1..BOARD_HEIGHT as i8)
                    .take_while(|&below| !board.is_occupied(x, below))
                    .count() as u8
            })
            .min()
            .unwrap_or(0);
    }

    /// Back to the spawn footprint, grace cleared
    pub fn reset_to_spawn(&mut self, board: &Board) {
        self.cells = spawn_cells(self.kind);
        self.lock_grace = false;
        self.recompute_drop_distance(board);
    }
}
