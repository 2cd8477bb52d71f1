//! Runtime configuration read from the environment

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::DEFAULT_HIGHSCORE_PATH;
use crate::types::CLEAR_FLASH_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub highscore_path: PathBuf,
    /// Fixed piece-order seed; `None` seeds from the clock
    pub seed: Option<u32>,
    pub clear_flash_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_PATH),
            seed: None,
            clear_flash_ms: CLEAR_FLASH_MS,
        }
    }
}

impl Config {
    /// `BLOCKFALL_HIGHSCORE_PATH`, `BLOCKFALL_SEED`, `BLOCKFALL_CLEAR_FLASH_MS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset, empty or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let defaults = Self::default();
        Self {
            highscore_path: get("BLOCKFALL_HIGHSCORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.highscore_path),
            seed: get("BLOCKFALL_SEED").and_then(|s| s.parse().ok()),
            clear_flash_ms: get("BLOCKFALL_CLEAR_FLASH_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.clear_flash_ms),
        }
    }

    /// The configured seed, or one derived from the system clock
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0);
            (nanos ^ (nanos >> 32)) as u32
        })
    }
}
