// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::UiOptions;
use crate::cursor::Cursor;
use crate::input::{InputOutcome, LineInput, path_prefill, resolve_path};
use crate::notice_for;
use crate::status::StatusClock;
use crate::terminal::{Screen, run_screen};
use crate::widgets::{render_grid, render_input, render_notice, render_status, screen_layout};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use roastery_app::{BrowserCommand, BrowserEvent, BrowserState, CatalogItem};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Storage seam for the read-only catalog window.
pub trait BrowserRuntime {
    fn open_catalog(&mut self, path: &Path) -> Result<Vec<CatalogItem>>;
}

pub fn run_browser<R: BrowserRuntime>(
    state: &mut BrowserState,
    runtime: &mut R,
    options: &UiOptions,
) -> Result<()> {
    let mut screen = BrowserScreen {
        state,
        runtime,
        view: BrowserView::new(options),
    };
    run_screen(&mut screen)
}

#[derive(Debug, Clone, Default)]
struct BrowserView {
    cursor: Cursor,
    prompt: Option<LineInput>,
    clock: StatusClock,
    start_dir: Option<PathBuf>,
}

impl BrowserView {
    fn new(options: &UiOptions) -> Self {
        Self {
            start_dir: options.start_dir.clone(),
            ..Self::default()
        }
    }
}

struct BrowserScreen<'a, R> {
    state: &'a mut BrowserState,
    runtime: &'a mut R,
    view: BrowserView,
}

impl<R: BrowserRuntime> Screen for BrowserScreen<'_, R> {
    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        render(frame, &*self.state, &self.view);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        handle_key_event(self.state, self.runtime, &mut self.view, key)
    }

    fn tick(&mut self, now: Instant) {
        if self.view.clock.take_expired(now) {
            self.state.dispatch(BrowserCommand::ClearStatus);
        }
    }
}

fn handle_key_event<R: BrowserRuntime>(
    state: &mut BrowserState,
    runtime: &mut R,
    view: &mut BrowserView,
    key: KeyEvent,
) -> Result<bool> {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    if state.notice.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
            dispatch(state, view, BrowserCommand::DismissNotice);
        }
        return Ok(false);
    }

    if let Some(prompt) = view.prompt.as_mut() {
        match prompt.handle_key(key) {
            InputOutcome::Pending => {}
            InputOutcome::Cancel => view.prompt = None,
            InputOutcome::Submit(text) => {
                view.prompt = None;
                if let Some(path) = resolve_path(&text) {
                    open_path(state, runtime, view, &path)?;
                }
            }
        }
        return Ok(false);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return Ok(true),
        (KeyCode::Char('o'), _) => {
            view.prompt = Some(LineInput::new(path_prefill(view.start_dir.as_deref())));
        }
        (KeyCode::Char('j') | KeyCode::Down, _) => view.cursor.move_rows(&state.grid, 1),
        (KeyCode::Char('k') | KeyCode::Up, _) => view.cursor.move_rows(&state.grid, -1),
        (KeyCode::Char('l') | KeyCode::Right, _) => view.cursor.move_columns(&state.grid, 1),
        (KeyCode::Char('h') | KeyCode::Left, _) => view.cursor.move_columns(&state.grid, -1),
        (KeyCode::Char('g') | KeyCode::Home, _) => view.cursor.first_row(),
        (KeyCode::Char('G') | KeyCode::End, _) => view.cursor.last_row(&state.grid),
        (KeyCode::Char(' ') | KeyCode::Enter, _) => {
            let command = BrowserCommand::ClickCell {
                row: view.cursor.row,
                column: view.cursor.column,
            };
            dispatch(state, view, command);
        }
        _ => {}
    }
    Ok(false)
}

fn open_path<R: BrowserRuntime>(
    state: &mut BrowserState,
    runtime: &mut R,
    view: &mut BrowserView,
    path: &Path,
) -> Result<()> {
    info!(path = %path.display(), "opening catalog");
    match runtime.open_catalog(path) {
        Ok(items) => {
            let command = BrowserCommand::Loaded {
                path: path.to_path_buf(),
                items,
            };
            dispatch(state, view, command);
            view.cursor = Cursor::default();
        }
        Err(error) => {
            let notice = notice_for(error)?;
            dispatch(state, view, BrowserCommand::OpenFailed(notice));
        }
    }
    Ok(())
}

fn dispatch(state: &mut BrowserState, view: &mut BrowserView, command: BrowserCommand) {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, BrowserEvent::StatusUpdated(_)))
    {
        view.clock.touch(Instant::now());
    }
    debug!(?events, "browser events");
}

fn render(frame: &mut ratatui::Frame<'_>, state: &BrowserState, view: &BrowserView) {
    let [header_area, body_area, status_area] = screen_layout(frame.area());

    let header = Paragraph::new(header_text(state))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().title("roastery").borders(Borders::ALL));
    frame.render_widget(header, header_area);

    render_grid(frame, body_area, &state.grid, view.cursor, "catalog");
    render_status(frame, status_area, status_text(state));

    if let Some(prompt) = &view.prompt {
        render_input(frame, "open catalog", prompt);
    }
    if let Some(notice) = state.notice {
        render_notice(frame, state.locale, notice);
    }
}

fn header_text(state: &BrowserState) -> String {
    match state.phase.path() {
        Some(path) => path.display().to_string(),
        None => "no catalog open".to_owned(),
    }
}

fn status_text(state: &BrowserState) -> String {
    let default = "o open | j/k/h/l move | space select | q quit";
    match &state.status_line {
        Some(status) => format!("{status} | {default}"),
        None => default.to_owned(),
    }
}
