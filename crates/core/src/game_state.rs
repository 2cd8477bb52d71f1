//! Game state module - the engine that sequences every rule
//!
//! `GameState` owns the board, the falling piece, the piece queue, the level, the score and the
//! clock. A driver feeds it discrete events (gravity ticks, time ticks, player commands); each
//! call runs to completion and the driver reads the new state back through accessors or a
//! [`GameSnapshot`].
//!
//! Line clears are split in two: the lock that fills rows scores them and moves the game into
//! [`Phase::ClearingRows`], and [`GameState::finish_line_clear`] removes them once the driver's
//! row-flash animation is over. Gravity ticks and commands are ignored in between.

use crate::board::{Board, RowSet};
use crate::highscore::HighscoreStore;
use crate::level::Level;
use crate::pieces::Piece;
use crate::rng::PieceQueue;
use crate::scoring::{drop_score, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind, RotationDirection, SPAWN_ZONE_LAST_ROW, UPCOMING_COUNT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// A piece is falling and commands are accepted
    Falling,
    /// Rows were filled by the last lock and wait for `finish_line_clear`
    ClearingRows(RowSet),
    /// Terminal: nothing mutates the game any more
    Over,
}

/// What a gravity tick or hard drop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not in the falling phase
    Ignored,
    /// Piece moved down one row
    Fell,
    /// Piece is resting; this was its grace tick
    Grace,
    /// Piece locked without filling a row; the next piece is falling
    Locked,
    /// Piece locked and filled this many rows
    RowsFilled(usize),
    /// Piece locked inside the spawn zone
    GameOver,
}

/// Final result handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    /// Best score including this game
    pub highscore: u32,
    pub new_highscore: bool,
    /// Non-fatal persistence failure, if saving the new highscore failed
    pub save_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GameState<S> {
    board: Board,
    active: Piece,
    queue: PieceQueue,
    level: Level,
    phase: Phase,
    score: u32,
    elapsed_secs: u32,
    highscore: u32,
    soft_dropping: bool,
    store: S,
    /// Message from a failed highscore load
    store_notice: Option<String>,
    summary: Option<GameOverSummary>,
}

impl<S: HighscoreStore> GameState<S> {
    /// New game on an empty board. The highscore is loaded from `store` once, here.
    pub fn new(seed: u32, store: S) -> Self {
        Self::with_board(seed, store, Board::new())
    }

    /// New game on a prepared board
    pub fn with_board(seed: u32, mut store: S, board: Board) -> Self {
        let (highscore, store_notice) = match store.load() {
            Ok(value) => (value, None),
            Err(err) => (0, Some(err.to_string())),
        };

        let mut queue = PieceQueue::new(seed);
        let active = Piece::spawn(queue.advance(), &board);

        Self {
            board,
            active,
            queue,
            level: Level::new(),
            phase: Phase::Falling,
            score: 0,
            elapsed_secs: 0,
            highscore,
            soft_dropping: false,
            store,
            store_notice,
            summary: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece, if one is falling
    pub fn active(&self) -> Option<&Piece> {
        match self.phase {
            Phase::Falling => Some(&self.active),
            _ => None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn is_clearing(&self) -> bool {
        matches!(self.phase, Phase::ClearingRows(_))
    }

    /// Rows waiting to be removed (empty outside the clearing phase)
    pub fn clearing_rows(&self) -> &[usize] {
        match &self.phase {
            Phase::ClearingRows(rows) => rows.as_slice(),
            _ => &[],
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn level(&self) -> u32 {
        self.level.number()
    }

    pub fn rows_cleared_this_level(&self) -> u32 {
        self.level.rows_cleared_this_level()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn upcoming(&self) -> [PieceKind; UPCOMING_COUNT] {
        self.queue.preview()
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.queue.held().map(|p| p.kind)
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Why the stored highscore could not be read, if it could not
    pub fn store_notice(&self) -> Option<&str> {
        self.store_notice.as_deref()
    }

    pub fn game_over_summary(&self) -> Option<&GameOverSummary> {
        self.summary.as_ref()
    }

    /// Current gravity interval, sped up while soft drop is held
    pub fn gravity_interval_ms(&self) -> u32 {
        if self.soft_dropping {
            self.level.soft_drop_interval_ms()
        } else {
            self.level.gravity_interval_ms()
        }
    }

    fn falling(&self) -> bool {
        self.phase == Phase::Falling
    }

    /// One gravity tick
    pub fn on_gravity_tick(&mut self) -> TickOutcome {
        if !self.falling() {
            return TickOutcome::Ignored;
        }

        if !self.active.gravity_step() {
            return self.lock_active();
        }

        if self.active.lock_grace() {
            return TickOutcome::Grace;
        }

        if self.soft_dropping {
            self.score = self.score.saturating_add(drop_score(1, false));
        }
        TickOutcome::Fell
    }

    /// One second of game time
    pub fn on_time_tick(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    pub fn on_move_left(&mut self) -> bool {
        self.falling() && self.active.move_horizontal(&self.board, -1)
    }

    pub fn on_move_right(&mut self) -> bool {
        self.falling() && self.active.move_horizontal(&self.board, 1)
    }

    pub fn on_rotate_cw(&mut self) -> bool {
        self.falling() && self.active.rotate(&self.board, RotationDirection::Clockwise)
    }

    pub fn on_rotate_ccw(&mut self) -> bool {
        self.falling()
            && self
                .active
                .rotate(&self.board, RotationDirection::CounterClockwise)
    }

    /// Soft drop input pressed. The held state survives line clears and new pieces.
    pub fn on_soft_drop_start(&mut self) -> bool {
        if self.is_game_over() || self.soft_dropping {
            return false;
        }
        self.soft_dropping = true;
        true
    }

    /// Soft drop input released
    pub fn on_soft_drop_end(&mut self) -> bool {
        if self.is_game_over() || !self.soft_dropping {
            return false;
        }
        self.soft_dropping = false;
        true
    }

    /// Drop to the landing row and lock, 2 points per row fallen
    pub fn on_hard_drop(&mut self) -> TickOutcome {
        if !self.falling() {
            return TickOutcome::Ignored;
        }

        while self.active.gravity_step() {
            if !self.active.lock_grace() {
                self.score = self.score.saturating_add(drop_score(1, true));
            }
        }
        self.lock_active()
    }

    /// Swap the falling piece with the hold slot; once per piece
    pub fn on_hold(&mut self) -> bool {
        self.falling() && self.queue.hold(&mut self.active, &self.board)
    }

    /// Remove the rows filled by the last lock and bring in the next piece
    pub fn finish_line_clear(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Falling) {
            Phase::ClearingRows(rows) => {
                self.board.clear_and_compact(&rows);
                self.spawn_next();
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    /// Dispatch a player command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.on_move_left(),
            GameAction::MoveRight => self.on_move_right(),
            GameAction::RotateCw => self.on_rotate_cw(),
            GameAction::RotateCcw => self.on_rotate_ccw(),
            GameAction::SoftDropStart => self.on_soft_drop_start(),
            GameAction::SoftDropEnd => self.on_soft_drop_end(),
            GameAction::HardDrop => self.on_hard_drop() != TickOutcome::Ignored,
            GameAction::Hold => self.on_hold(),
        }
    }

    fn spawn_next(&mut self) {
        self.active = Piece::spawn(self.queue.advance(), &self.board);
    }

    fn lock_active(&mut self) -> TickOutcome {
        let cells = *self.active.cells();
        self.board.place(&cells, self.active.color());

        if cells.iter().any(|&(_, y)| y <= SPAWN_ZONE_LAST_ROW) {
            self.end_game();
            return TickOutcome::GameOver;
        }

        let rows = self.board.filled_rows(self.active.rows());
        if rows.is_empty() {
            self.spawn_next();
            return TickOutcome::Locked;
        }

        let count = rows.len();
        self.level.on_rows_cleared(count as u32);
        self.score = self
            .score
            .saturating_add(line_clear_score(count, self.level.number()));
        self.phase = Phase::ClearingRows(rows);
        TickOutcome::RowsFilled(count)
    }

    fn end_game(&mut self) {
        self.phase = Phase::Over;
        self.soft_dropping = false;

        let new_highscore = self.score > self.highscore;
        let mut save_error = None;
        if new_highscore {
            self.highscore = self.score;
            if let Err(err) = self.store.save(self.score) {
                save_error = Some(err.to_string());
            }
        }

        self.summary = Some(GameOverSummary {
            score: self.score,
            highscore: self.highscore,
            new_highscore,
            save_error,
        });
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.active = self.active().map(ActiveSnapshot::from);
        out.hold = self.held();
        out.upcoming = self.upcoming();
        out.clearing_rows.clear();
        out.clearing_rows
            .extend(self.clearing_rows().iter().copied());
        out.score = self.score;
        out.highscore = self.highscore;
        out.level = self.level.number();
        out.rows_cleared_this_level = self.level.rows_cleared_this_level();
        out.elapsed_secs = self.elapsed_secs;
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
