//! LED-matrix Tetris runner (terminal simulator).
//!
//! Drives the board engine with crossterm standing in for the 8x8 LED
//! matrix and the four control buttons. A single cooperative loop applies
//! queued commands, advances one tick per drop interval and redraws; no two
//! board mutations ever run concurrently.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use matrix_tetris::core::GameState;
use matrix_tetris::input::{map_key, should_quit, CommandQueue};
use matrix_tetris::term::{MatrixView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = GameState::new(clock_seed());
    let queue = CommandQueue::new();
    let view = MatrixView::default();

    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let canvas = view.render(&game, Viewport::new(w, h));
        term.draw(&canvas)?;

        // Input with timeout until the next tick. After game over there is
        // no tick to wait for, only the restart/quit keys.
        let interval = Duration::from_millis(game.drop_interval_ms() as u64);
        let timeout = if game.game_over() {
            Duration::from_millis(250)
        } else {
            interval
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if game.game_over() && key.code == KeyCode::Char('r') {
                        game.reset();
                        last_tick = Instant::now();
                    } else if let Some(command) = map_key(key.code) {
                        queue.push(command);
                    }
                }
            }
        }

        // Commands are applied between ticks, serialized on this loop.
        for command in queue.drain() {
            game.apply(command);
        }

        // Tick. The loop keeps rendering after game over so the banner
        // stays up until restart or quit.
        if !game.game_over() && last_tick.elapsed() >= interval {
            last_tick = Instant::now();
            game.tick();
        }
    }
}
