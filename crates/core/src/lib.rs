//! Core game logic - pure, deterministic and testable
//!
//! Everything that decides what happens in a game lives here: the board, the pieces and their
//! rotation, the piece queue and hold slot, levels, scoring and the event-driven game state.
//! Nothing in this crate reads a clock, a terminal or a file; timers and rendering belong to the
//! driver, and highscore persistence goes through the [`HighscoreStore`] trait.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of settled cells, row detection and compaction
//! - [`pieces`]: footprints, pivot rotation with wall and floor shifts, gravity with one grace tick
//! - [`rng`]: seeded LCG, double 7-bag queue and the hold slot
//! - [`level`]: rows-per-level progression and the gravity curve
//! - [`scoring`]: line clear and drop points
//! - [`highscore`]: the persistence seam and an in-memory store
//! - [`game_state`]: the state machine sequencing all of the above
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, MemoryHighscore, TickOutcome};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345, MemoryHighscore::default());
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! assert_eq!(game.on_hard_drop(), TickOutcome::Locked);
//!
//! // Hard drop awards 2 points per row fallen
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! The driver owns three timers and calls into the game when they fire:
//! - **Gravity**: [`GameState::gravity_interval_ms`], 1000ms at level 1 and shrinking per level,
//!   one twentieth of that while soft drop is held
//! - **Clock**: [`GameState::on_time_tick`] once per second
//! - **Row flash**: [`GameState::finish_line_clear`] once the clear animation has played

pub mod board;
pub mod game_state;
pub mod highscore;
pub mod level;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, Point, RowSet};
pub use game_state::{GameOverSummary, GameState, Phase, TickOutcome};
pub use highscore::{HighscoreStore, MemoryHighscore, StoreError};
pub use level::Level;
pub use pieces::Piece;
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{drop_score, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
