use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Board;
use crate::game::SnakeGame;
use crate::input::{command_for, is_quit, Command};
use crate::term::TermManager;

const INTRO: &[&str] = &[
    "Arrow keys or WASD to move",
    "Esc to pause",
    "q or CTRL+C to quit",
    "",
    "Press any key to begin"
];

const PAUSED: &[&str] = &["Paused", "Press Esc to resume", "or q to quit"];

/// Runs the game on the terminal until the player quits.
pub fn run(board: Board, seed: Option<u64>) -> Result<()> {
    let mut term = TermManager::new(board.cell_size).context("Error reading terminal size")?;
    term.fit(&board)?;
    term.setup().context("Error preparing the terminal")?;

    let mut game = SnakeGame::new(board, seed)?;
    let mut paused = false;

    term.show_message(INTRO)?;
    if is_quit(&term.read_key_blocking()?) {
        return finish(term, &game);
    }
    term.clear()?;

    game.start(Instant::now())?;
    game.render(&mut term)?;
    term.flush()?;

    loop {
        let now = Instant::now();
        let ticker = game.ticker().copied().context("game loop running without a schedule")?;

        if !paused && ticker.is_due(now) {
            game.tick(&mut term).context("Error drawing the board")?;
            term.flush()?;
            if let Some(t) = game.ticker_mut() {
                t.advance(now);
            }
            continue;
        }

        // Paused games wait on input alone
        let wait = if paused { ticker.interval() } else { ticker.time_left(now) };
        let key = match term.poll_key(wait)? {
            Some(key) => key,
            None => continue,
        };

        match command_for(&key) {
            Some(Command::Quit) => break,
            Some(Command::Steer(dir)) if !paused => game.steer(dir),
            Some(Command::TogglePause) => {
                paused = !paused;
                if paused {
                    term.show_message(PAUSED)?;
                } else {
                    game.render(&mut term)?;
                    term.flush()?;
                    if let Some(t) = game.ticker_mut() {
                        t.restart(Instant::now());
                    }
                }
                info!(paused, "Pause toggled");
            },
            _ => {}
        }
    }

    finish(term, &game)
}

fn finish(mut term: TermManager, game: &SnakeGame) -> Result<()> {
    term.restore().context("Error restoring the terminal")?;
    info!(score = game.score(), speed = game.speed(), "Exiting");
    Ok(())
}
