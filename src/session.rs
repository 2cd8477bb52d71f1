//! Session driver: turns elapsed wall-clock time into game events.
//!
//! The session keeps three timers on a millisecond timeline that starts at 0: gravity, the
//! one-second clock, and the row-clear flash. [`Session::advance_to`] fires every timer that is
//! due, oldest first, so a late call catches up exactly as if it had been on time.
//!
//! A started or restarted gravity timer fires at once and then every interval. The flash hides
//! the rows the moment they fill and toggles every `clear_flash_ms` after that.

use crate::core::{GameState, HighscoreStore};
use crate::types::{GameAction, CLEAR_FLASH_TOGGLES, TIME_TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flash {
    due_ms: u64,
    toggles: u32,
    hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Clock,
    Flash,
    Gravity,
}

pub struct Session<S> {
    game: GameState<S>,
    now_ms: u64,
    gravity_due_ms: u64,
    clock_due_ms: u64,
    flash: Option<Flash>,
    clear_flash_ms: u32,
}

impl<S: HighscoreStore> Session<S> {
    pub fn new(game: GameState<S>, clear_flash_ms: u32) -> Self {
        Self {
            game,
            now_ms: 0,
            gravity_due_ms: 0,
            clock_due_ms: u64::from(TIME_TICK_MS),
            flash: None,
            clear_flash_ms,
        }
    }

    pub fn game(&self) -> &GameState<S> {
        &self.game
    }

    pub fn into_game(self) -> GameState<S> {
        self.game
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Whether the rows being cleared are on the hidden half of their flash
    pub fn flash_hidden(&self) -> bool {
        self.flash.is_some_and(|f| f.hidden)
    }

    /// Apply a player command at the current session time.
    ///
    /// Soft drop start and end, hard drop and hold restart the gravity timer.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let changed = self.game.apply_action(action);
        if !changed {
            return false;
        }

        if matches!(
            action,
            GameAction::SoftDropStart
                | GameAction::SoftDropEnd
                | GameAction::HardDrop
                | GameAction::Hold
        ) {
            self.restart_gravity(self.now_ms);
        }
        self.start_flash_if_clearing(self.now_ms);
        true
    }

    /// Fire every timer due at or before `now_ms`. Returns true if anything fired.
    pub fn advance_to(&mut self, now_ms: u64) -> bool {
        let mut fired = false;
        while let Some((due, timer)) = self.next_timer() {
            if due > now_ms {
                break;
            }
            self.now_ms = self.now_ms.max(due);
            match timer {
                Timer::Clock => {
                    self.game.on_time_tick();
                    self.clock_due_ms = due + u64::from(TIME_TICK_MS);
                }
                Timer::Gravity => {
                    self.game.on_gravity_tick();
                    self.gravity_due_ms = due + u64::from(self.game.gravity_interval_ms());
                    self.start_flash_if_clearing(due);
                }
                Timer::Flash => self.step_flash(due),
            }
            fired = true;
        }
        self.now_ms = self.now_ms.max(now_ms);
        fired
    }

    /// When the next timer fires; `None` once the game is over
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.next_timer().map(|(due, _)| due)
    }

    fn next_timer(&self) -> Option<(u64, Timer)> {
        if self.game.is_game_over() {
            return None;
        }
        let clock = Some((self.clock_due_ms, Timer::Clock));
        let flash = self.flash.map(|f| (f.due_ms, Timer::Flash));
        let gravity = self
            .game
            .active()
            .map(|_| (self.gravity_due_ms, Timer::Gravity));

        [clock, flash, gravity]
            .into_iter()
            .flatten()
            .min_by_key(|&(due, _)| due)
    }

    fn restart_gravity(&mut self, at_ms: u64) {
        self.gravity_due_ms = at_ms;
    }

    fn start_flash_if_clearing(&mut self, from_ms: u64) {
        if self.game.is_clearing() && self.flash.is_none() {
            self.flash = Some(Flash {
                due_ms: from_ms + u64::from(self.clear_flash_ms),
                toggles: 1,
                hidden: true,
            });
        }
    }

    fn step_flash(&mut self, at_ms: u64) {
        let Some(mut flash) = self.flash.take() else {
            return;
        };
        if flash.toggles >= CLEAR_FLASH_TOGGLES {
            self.game.finish_line_clear();
            self.restart_gravity(at_ms);
            return;
        }
        flash.toggles += 1;
        flash.hidden = !flash.hidden;
        flash.due_ms = at_ms + u64::from(self.clear_flash_ms);
        self.flash = Some(flash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, MemoryHighscore, PieceQueue};
    use crate::types::{Color, PieceKind};

    fn session_with(kind: PieceKind, board: Board) -> Session<MemoryHighscore> {
        let seed = (1..)
            .find(|&seed| PieceQueue::new(seed).peek_next() == kind)
            .unwrap();
        Session::new(
            GameState::with_board(seed, MemoryHighscore::default(), board),
            100,
        )
    }

    fn top_row(session: &Session<MemoryHighscore>) -> i8 {
        session.game().active().unwrap().cells()[0].1
    }

    #[test]
    fn first_gravity_tick_is_immediate() {
        let mut session = session_with(PieceKind::I, Board::new());
        assert_eq!(session.next_deadline_ms(), Some(0));
        assert!(session.advance_to(0));
        assert_eq!(top_row(&session), 1);
        assert_eq!(session.next_deadline_ms(), Some(1_000));
    }

    #[test]
    fn clock_ticks_once_per_second() {
        let mut session = session_with(PieceKind::I, Board::new());
        session.advance_to(999);
        assert_eq!(session.game().elapsed_secs(), 0);
        assert!(session.advance_to(3_500));
        assert_eq!(session.game().elapsed_secs(), 3);
        assert_eq!(session.now_ms(), 3_500);
    }

    #[test]
    fn gravity_follows_level_interval() {
        let mut session = session_with(PieceKind::I, Board::new());
        session.advance_to(999);
        assert_eq!(top_row(&session), 1);
        session.advance_to(1_000);
        assert_eq!(top_row(&session), 2);
        session.advance_to(5_000);
        assert_eq!(top_row(&session), 6);
    }

    #[test]
    fn soft_drop_restarts_gravity() {
        let mut session = session_with(PieceKind::I, Board::new());
        session.advance_to(500);
        assert_eq!(top_row(&session), 1);

        // Restarted gravity fires at once, then every 50ms.
        assert!(session.apply(GameAction::SoftDropStart));
        session.advance_to(500);
        assert_eq!(top_row(&session), 2);
        assert_eq!(session.game().score(), 1);
        session.advance_to(549);
        assert_eq!(top_row(&session), 2);
        session.advance_to(550);
        assert_eq!(top_row(&session), 3);
        assert_eq!(session.game().score(), 2);

        assert!(session.apply(GameAction::SoftDropEnd));
        session.advance_to(1_549);
        assert_eq!(top_row(&session), 4);
        assert_eq!(session.game().score(), 2);
        session.advance_to(1_550);
        assert_eq!(top_row(&session), 5);
    }

    #[test]
    fn clear_flashes_then_removes_rows() {
        let board = Board::from_rows(&["###....###"], Color::Red);
        let mut session = session_with(PieceKind::I, board);
        assert!(session.apply(GameAction::HardDrop));
        assert!(session.game().is_clearing());
        assert!(session.flash_hidden());

        session.advance_to(100);
        assert!(!session.flash_hidden());
        session.advance_to(200);
        assert!(session.flash_hidden());
        session.advance_to(300);
        assert!(!session.flash_hidden());
        assert!(session.game().is_clearing());

        // The next piece takes its first gravity step as the rows go.
        session.advance_to(400);
        assert!(!session.game().is_clearing());
        assert!(!session.flash_hidden());
        assert_eq!(session.game().board().occupied_count(), 0);
        assert_eq!(top_row(&session), 1);

        session.advance_to(1_399);
        assert_eq!(top_row(&session), 1);
        session.advance_to(1_400);
        assert_eq!(top_row(&session), 2);
    }

    #[test]
    fn game_over_stops_all_timers() {
        let board = Board::from_rows(&["....#....."; 18], Color::Green);
        let mut session = session_with(PieceKind::I, board);
        assert!(session.apply(GameAction::HardDrop));
        assert!(session.game().is_game_over());
        assert_eq!(session.next_deadline_ms(), None);
        assert!(!session.advance_to(10_000));
        assert_eq!(session.game().elapsed_secs(), 0);
    }
}
