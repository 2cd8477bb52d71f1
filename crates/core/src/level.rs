//! Level progression and gravity speed

use crate::types::{BASE_GRAVITY_MS, MIN_GRAVITY_MS, ROWS_PER_LEVEL, SOFT_DROP_DIVISOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    number: u32,
    rows_cleared: u32,
}

impl Level {
    /// Level 1, nothing cleared
    pub fn new() -> Self {
        Self {
            number: 1,
            rows_cleared: 0,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn rows_cleared_this_level(&self) -> u32 {
        self.rows_cleared
    }

    /// Count cleared rows. Reaching the threshold starts the next level with an empty counter;
    /// rows beyond the threshold are not carried over. Returns true on a level change.
    pub fn on_rows_cleared(&mut self, rows: u32) -> bool {
        debug_assert!((1..=4).contains(&rows), "a lock clears 1 to 4 rows");
        self.rows_cleared += rows;
        if self.rows_cleared >= ROWS_PER_LEVEL {
            self.number = self.number.saturating_add(1);
            self.rows_cleared = 0;
            return true;
        }
        false
    }

    /// Gravity interval for this level: `1000 * (0.8 - (level-1) * 0.007)^(level-1)`, rounded.
    ///
    /// The curve turns degenerate far beyond playable levels, so the result is clamped
    /// to at least `MIN_GRAVITY_MS`.
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.number)
    }

    /// Interval while the soft drop input is held
    pub fn soft_drop_interval_ms(&self) -> u32 {
        (self.gravity_interval_ms() / SOFT_DROP_DIVISOR).max(MIN_GRAVITY_MS)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

pub fn gravity_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1);
    let base = 0.8 - steps as f64 * 0.007;
    let exponent = i32::try_from(steps).unwrap_or(i32::MAX);
    let ms = (BASE_GRAVITY_MS as f64 * base.powi(exponent)).round();

    if ms.is_finite() && ms >= MIN_GRAVITY_MS as f64 {
        ms.min(BASE_GRAVITY_MS as f64) as u32
    } else {
        MIN_GRAVITY_MS
    }
}
