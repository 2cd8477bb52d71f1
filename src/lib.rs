//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and hosts the pieces the binary is built
//! from: environment configuration and the timer-driven session.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_store as store;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod session;

pub use config::Config;
pub use session::Session;
