//! Terminal runner (default binary).
//!
//! Reads flags and `TETRIS_*` variables, validates the configuration before
//! touching the terminal, then runs the game until the player quits.

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;

use termtris::cli::Args;
use termtris::engine::{Clock, Game, MonotonicClock};
use termtris::input::TerminalInput;
use termtris::session::{Session, SessionSummary};
use termtris::session_log::SessionLog;
use termtris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args = Args::parse();
    let clock = MonotonicClock;
    let started = clock.now();

    let game = Game::new(args.game_config(), started).context("invalid configuration")?;
    let mut log = args
        .log_path
        .as_deref()
        .map(|path| SessionLog::append_to(path, started))
        .transpose()?;
    let view = GameView::default().with_glyphs(args.glyphs());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &view, game, log.as_mut(), &clock);

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    eprintln!(
        "[termtris] final score {} (level {}, {} lines, {} game{})",
        summary.score,
        summary.level,
        summary.lines,
        summary.games,
        if summary.games == 1 { "" } else { "s" }
    );
    if let Some(path) = &args.log_path {
        eprintln!("[termtris] session log written to {}", path.display());
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    view: &GameView,
    game: Game,
    log: Option<&mut SessionLog<BufWriter<File>>>,
    clock: &MonotonicClock,
) -> Result<SessionSummary> {
    let mut input = TerminalInput::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut session = Session::new(game, log);

    session.run(&mut input, clock, |snap| {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)
    })
}
