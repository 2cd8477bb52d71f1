//! Highscore persistence seam
//!
//! The core only talks to a [`HighscoreStore`]. Failures are never fatal to a game: a failed
//! load counts as a highscore of 0 and a failed save is reported in the game-over summary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("highscore storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored highscore {0:?} is not a non-negative integer")]
    Malformed(String),

    #[error("highscore storage unavailable: {0}")]
    Unavailable(String),
}

pub trait HighscoreStore {
    /// Previously stored highscore; `Ok(0)` when nothing has been stored yet.
    fn load(&mut self) -> Result<u32, StoreError>;

    /// Durably store `score`, replacing any previous value.
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

impl<S: HighscoreStore + ?Sized> HighscoreStore for &mut S {
    fn load(&mut self) -> Result<u32, StoreError> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

impl<S: HighscoreStore + ?Sized> HighscoreStore for Box<S> {
    fn load(&mut self) -> Result<u32, StoreError> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHighscore {
    value: Option<u32>,
    /// When set, `save` fails with this message
    fail_saves: Option<String>,
}

impl MemoryHighscore {
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            fail_saves: None,
        }
    }

    /// A store whose saves always fail
    pub fn failing(message: &str) -> Self {
        Self {
            value: None,
            fail_saves: Some(message.to_string()),
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl HighscoreStore for MemoryHighscore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(message) = &self.fail_saves {
            return Err(StoreError::Unavailable(message.clone()));
        }
        self.value = Some(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryHighscore::default();
        assert_eq!(store.load().unwrap(), 0);
        store.save(1200).unwrap();
        assert_eq!(store.load().unwrap(), 1200);
    }

    #[test]
    fn test_failing_store_reports_message() {
        let mut store = MemoryHighscore::failing("read-only");
        let err = store.save(10).unwrap_err();
        assert!(err.to_string().contains("read-only"));
        assert_eq!(store.value(), None);
    }

    #[test]
    fn test_store_through_mut_ref() {
        fn save_through<S: HighscoreStore>(mut store: S) {
            store.save(7).unwrap();
        }

        let mut store = MemoryHighscore::default();
        save_through(&mut store);
        assert_eq!(store.value(), Some(7));
    }
}
