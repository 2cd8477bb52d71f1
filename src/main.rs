//! Terminal game runner (default binary).
//!
//! crossterm for input, the framebuffer view for output, and a [`Session`] translating elapsed
//! time into gravity, clock and row-flash events.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::{GameSnapshot, GameState, HighscoreStore};
use blockfall::input::{map_key, should_quit, InputHandler};
use blockfall::store::FileHighscore;
use blockfall::term::{FrameBuffer, FrameInfo, GameView, TerminalRenderer, Viewport};
use blockfall::{Config, Session};

/// Upper bound on one input wait, so resizes are picked up even when idle
const MAX_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let config = Config::from_env();
    let seed = config.seed_or_clock();
    let store = FileHighscore::new(&config.highscore_path);
    let mut session = Session::new(GameState::new(seed, store), config.clear_flash_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session);
    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    report(&config, seed, session.game());
    Ok(())
}

fn run<S: HighscoreStore>(term: &mut TerminalRenderer, session: &mut Session<S>) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let start = Instant::now();
    let elapsed_ms = |at: Instant| at.saturating_duration_since(start).as_millis() as u64;

    loop {
        let now = Instant::now();
        if let Some(action) = input.update(now) {
            session.advance_to(elapsed_ms(now));
            session.apply(action);
        }
        session.advance_to(elapsed_ms(now));

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let info = FrameInfo {
            flash_hidden: session.flash_hidden(),
        };
        session.game().snapshot_into(&mut snap);
        view.render_into(&snap, info, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let mut wait_ms = MAX_POLL_MS;
        if let Some(due) = session.next_deadline_ms() {
            wait_ms = wait_ms.min(due.saturating_sub(elapsed_ms(Instant::now())));
        }
        if let Some(due) = input.next_deadline() {
            wait_ms = wait_ms.min(due.saturating_duration_since(Instant::now()).as_millis() as u64);
        }

        if !event::poll(Duration::from_millis(wait_ms))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                let now = Instant::now();
                if let Some(action) = map_key(key).and_then(|a| input.handle_action(a, now)) {
                    session.advance_to(elapsed_ms(now));
                    session.apply(action);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

fn report<S: HighscoreStore>(config: &Config, seed: u32, game: &GameState<S>) {
    if let Some(notice) = game.store_notice() {
        eprintln!(
            "[Highscore] could not read {}: {}",
            config.highscore_path.display(),
            notice
        );
    }

    let Some(summary) = game.game_over_summary() else {
        eprintln!(
            "[Session] quit after {}s with score {} (seed {})",
            game.elapsed_secs(),
            game.score(),
            seed
        );
        return;
    };

    eprintln!(
        "[Session] game over after {}s: score {}, highscore {} (seed {})",
        game.elapsed_secs(),
        summary.score,
        summary.highscore,
        seed
    );
    if summary.new_highscore {
        eprintln!("[Highscore] new highscore: {}", summary.highscore);
    }
    if let Some(err) = &summary.save_error {
        eprintln!(
            "[Highscore] could not save to {}: {}",
            config.highscore_path.display(),
            err
        );
    }
}
