//! Soft drop key tracking for terminal environments.
//!
//! Terminals that do not emit key release events only ever report presses and repeats of the
//! soft drop key. The handler ends a soft drop once no press has arrived for
//! `key_release_timeout_ms`; after the first real release event it trusts releases instead.

use std::time::{Duration, Instant};

use crate::types::{GameAction, SOFT_DROP_RELEASE_MS};

#[derive(Debug, Clone)]
pub struct InputHandler {
    down_held: bool,
    last_down: Option<Instant>,
    release_events_seen: bool,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down_held: false,
            last_down: None,
            release_events_seen: false,
            key_release_timeout_ms: SOFT_DROP_RELEASE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Filter a mapped action. Repeated soft drop presses only refresh the hold.
    pub fn handle_action(&mut self, action: GameAction, now: Instant) -> Option<GameAction> {
        match action {
            GameAction::SoftDropStart => {
                self.last_down = Some(now);
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    Some(GameAction::SoftDropStart)
                }
            }
            GameAction::SoftDropEnd => {
                self.release_events_seen = true;
                self.release()
            }
            other => Some(other),
        }
    }

    /// Emit the synthetic release once the timeout has passed without a press.
    pub fn update(&mut self, now: Instant) -> Option<GameAction> {
        if !self.down_held || self.release_events_seen {
            return None;
        }
        let last = self.last_down?;
        let timeout = Duration::from_millis(u64::from(self.key_release_timeout_ms));
        if now.saturating_duration_since(last) >= timeout {
            return self.release();
        }
        None
    }

    /// When the synthetic release fires next, if a soft drop is held
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.down_held || self.release_events_seen {
            return None;
        }
        let timeout = Duration::from_millis(u64::from(self.key_release_timeout_ms));
        self.last_down.map(|t| t + timeout)
    }

    fn release(&mut self) -> Option<GameAction> {
        if !self.down_held {
            return None;
        }
        self.down_held = false;
        self.last_down = None;
        Some(GameAction::SoftDropEnd)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_repeats_do_not_restart_soft_drop() {
        let t0 = Instant::now();
        let mut h = InputHandler::new();
        assert_eq!(
            h.handle_action(GameAction::SoftDropStart, t0),
            Some(GameAction::SoftDropStart)
        );
        assert_eq!(h.handle_action(GameAction::SoftDropStart, t0 + ms(30)), None);
        assert!(h.is_soft_drop_held());
    }

    #[test]
    fn test_timeout_releases_soft_drop() {
        let t0 = Instant::now();
        let mut h = InputHandler::new().with_key_release_timeout_ms(100);
        h.handle_action(GameAction::SoftDropStart, t0);
        h.handle_action(GameAction::SoftDropStart, t0 + ms(80));
        assert_eq!(h.update(t0 + ms(150)), None);
        assert_eq!(h.next_deadline(), Some(t0 + ms(180)));
        assert_eq!(h.update(t0 + ms(180)), Some(GameAction::SoftDropEnd));
        assert_eq!(h.update(t0 + ms(500)), None);
        assert!(!h.is_soft_drop_held());
    }

    #[test]
    fn test_real_release_disables_timeout() {
        let t0 = Instant::now();
        let mut h = InputHandler::new();
        h.handle_action(GameAction::SoftDropStart, t0);
        assert_eq!(
            h.handle_action(GameAction::SoftDropEnd, t0 + ms(10)),
            Some(GameAction::SoftDropEnd)
        );

        h.handle_action(GameAction::SoftDropStart, t0 + ms(20));
        assert_eq!(h.update(t0 + ms(5_000)), None);
        assert_eq!(h.next_deadline(), None);
        assert!(h.is_soft_drop_held());
    }

    #[test]
    fn test_other_actions_pass_through() {
        let mut h = InputHandler::new();
        let now = Instant::now();
        assert_eq!(
            h.handle_action(GameAction::HardDrop, now),
            Some(GameAction::HardDrop)
        );
        assert_eq!(h.handle_action(GameAction::SoftDropEnd, now), None);
    }
}
