//! Shared types and constants
//!
//! Pure data types used by every layer of the game (core rules, key mapping, terminal view).
//! Nothing in here performs I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn column**: 3 (left edge of every spawn footprint)
//! - **Spawn zone**: rows 0 and 1; locking a piece there ends the game
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `SOFT_DROP_DIVISOR` | 20 | Soft drop runs gravity 20x faster |
//! | `TIME_TICK_MS` | 1000 | Elapsed-time counter period |
//! | `CLEAR_FLASH_MS` | 100 | One toggle of the row-clear flash |
//! | `CLEAR_FLASH_TOGGLES` | 4 | Toggles before cleared rows disappear |
//! | `SOFT_DROP_RELEASE_MS` | 150 | Release timeout for terminals without key-up events |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, PieceKind, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::T;
//! assert_eq!(kind.color(), Color::Magenta);
//! assert_eq!(kind.as_str(), "T");
//!
//! assert_eq!(RotationDirection::CounterClockwise.sign(), -1);
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Leftmost column of every spawn footprint.
pub const SPAWN_COLUMN: i8 = 3;

/// A piece locked with any cell at or above this row ends the game.
pub const SPAWN_ZONE_LAST_ROW: i8 = 1;

/// Number of upcoming pieces shown to the player.
pub const UPCOMING_COUNT: usize = 6;

/// Number of distinct piece kinds (and the size of one bag).
pub const PIECE_KIND_COUNT: usize = 7;

/// Rows that must be cleared to advance one level.
pub const ROWS_PER_LEVEL: u32 = 10;

/// Game timing constants (in milliseconds)
pub const BASE_GRAVITY_MS: u32 = 1000;
pub const SOFT_DROP_DIVISOR: u32 = 20;
pub const MIN_GRAVITY_MS: u32 = 1;
pub const TIME_TICK_MS: u32 = 1000;
pub const CLEAR_FLASH_MS: u32 = 100;
pub const CLEAR_FLASH_TOGGLES: u32 = 4;
pub const SOFT_DROP_RELEASE_MS: u32 = 150;

/// Line clear scoring, indexed by rows cleared and multiplied by the level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row for the two drop styles.
pub const SOFT_DROP_POINTS: u32 = 1;
pub const HARD_DROP_POINTS: u32 = 2;

/// Piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order (the unshuffled bag).
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Fixed color of the kind
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Magenta,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }
}

/// Color tag stored in locked board cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
}

/// Cell on the board (None = empty, Some = occupied with that color)
pub type Cell = Option<Color>;

/// Rotation direction. The discriminant is the sign used by the rotation formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise = 1,
    CounterClockwise = -1,
}

impl RotationDirection {
    pub fn sign(self) -> i8 {
        self as i8
    }
}

/// Player commands, as produced by the input mapping layer.
///
/// Soft drop is a held input, so it comes as a start/end pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    SoftDropStart,
    SoftDropEnd,
    HardDrop,
    Hold,
}
