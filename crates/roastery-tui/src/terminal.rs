// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(120);

/// Set while raw mode is on; restore is a no-op otherwise.
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// One full-screen window driven by the shared event loop.
pub(crate) trait Screen {
    fn draw(&self, frame: &mut ratatui::Frame<'_>);

    /// Returns `Ok(true)` when the window should close.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool>;

    fn tick(&mut self, now: Instant);
}

pub(crate) fn run_screen<S: Screen>(screen: &mut S) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    SCREEN_ACTIVE.store(true, Ordering::SeqCst);

    let mut stdout = io::stdout();
    let result = execute!(stdout, EnterAlternateScreen)
        .context("enter alternate screen")
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)).context("create terminal"))
        .and_then(|mut terminal| drive(&mut terminal, screen));

    let restored = restore_terminal();
    result.and(restored)
}

fn drive<B: Backend, S: Screen>(terminal: &mut Terminal<B>, screen: &mut S) -> Result<()> {
    loop {
        screen.tick(Instant::now());
        terminal
            .draw(|frame| screen.draw(frame))
            .context("draw frame")?;

        if !event::poll(POLL_INTERVAL).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if screen.handle_key(key)? {
                    return Ok(());
                }
            }
            Event::Resize(_, _) => {}
            _ => {}
        }
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once,
/// including from a panic hook raised before any screen was shown.
pub fn restore_terminal() -> Result<()> {
    if !SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show).context("leave alternate screen")
}
