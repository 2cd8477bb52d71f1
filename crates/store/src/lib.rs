//! File-backed highscore storage
//!
//! The highscore is kept as a single decimal integer in a text file. A missing file means no
//! highscore has been recorded yet; saving creates any missing parent directories.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use blockfall_core::highscore::{HighscoreStore, StoreError};

/// Default location, relative to the working directory
pub const DEFAULT_HIGHSCORE_PATH: &str = "save/highscore.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHighscore {
    path: PathBuf,
}

impl FileHighscore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileHighscore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_PATH)
    }
}

impl HighscoreStore for FileHighscore {
    fn load(&mut self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed
            .parse::<u32>()
            .map_err(|_| StoreError::Malformed(trimmed.to_string()))
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, format!("{score}\n"))?;
        Ok(())
    }
}
