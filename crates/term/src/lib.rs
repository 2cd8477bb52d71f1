//! Terminal presentation for the game.
//!
//! The view renders a [`core::GameSnapshot`] into a plain framebuffer and the renderer flushes
//! framebuffers to the terminal with crossterm, writing only what changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{FrameInfo, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
