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
use ratatui::widgets::{Block, Borders, Tabs};
use roastery_app::{CatalogTables, EditorCommand, EditorEvent, EditorState, TableKind};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Storage seam for the three-table editor window.
pub trait EditorRuntime {
    fn open_tables(&mut self, path: &Path) -> Result<CatalogTables>;
    /// Replaces the contents of the open catalog with `tables`.
    fn save_tables(&mut self, tables: &CatalogTables) -> Result<()>;
}

pub fn run_editor<R: EditorRuntime>(
    state: &mut EditorState,
    runtime: &mut R,
    options: &UiOptions,
) -> Result<()> {
    let mut screen = EditorScreen {
        state,
        runtime,
        view: EditorView::new(options),
    };
    run_screen(&mut screen)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    OpenPath(LineInput),
    EditCell {
        row: usize,
        column: usize,
        input: LineInput,
    },
}

#[derive(Debug, Clone, Default)]
struct EditorView {
    cursors: [Cursor; 3],
    overlay: Option<Overlay>,
    clock: StatusClock,
    start_dir: Option<PathBuf>,
}

impl EditorView {
    fn new(options: &UiOptions) -> Self {
        Self {
            start_dir: options.start_dir.clone(),
            ..Self::default()
        }
    }

    fn cursor(&self, tab: TableKind) -> Cursor {
        self.cursors[tab.index()]
    }

    fn cursor_mut(&mut self, tab: TableKind) -> &mut Cursor {
        &mut self.cursors[tab.index()]
    }
}

struct EditorScreen<'a, R> {
    state: &'a mut EditorState,
    runtime: &'a mut R,
    view: EditorView,
}

impl<R: EditorRuntime> Screen for EditorScreen<'_, R> {
    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        render(frame, &*self.state, &self.view);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        handle_key_event(self.state, self.runtime, &mut self.view, key)
    }

    fn tick(&mut self, now: Instant) {
        if self.view.clock.take_expired(now) {
            self.state.dispatch(EditorCommand::ClearStatus);
        }
    }
}

fn handle_key_event<R: EditorRuntime>(
    state: &mut EditorState,
    runtime: &mut R,
    view: &mut EditorView,
    key: KeyEvent,
) -> Result<bool> {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    if state.notice.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
            dispatch(state, view, EditorCommand::DismissNotice);
        }
        return Ok(false);
    }

    if view.overlay.is_some() {
        handle_overlay_key(state, runtime, view, key)?;
        return Ok(false);
    }

    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        save(state, runtime, view)?;
        return Ok(false);
    }

    let tab = state.active_tab;
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return Ok(true),
        (KeyCode::Char('o'), _) => {
            let input = LineInput::new(path_prefill(view.start_dir.as_deref()));
            view.overlay = Some(Overlay::OpenPath(input));
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => save(state, runtime, view)?,
        (KeyCode::Tab, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
            dispatch(state, view, EditorCommand::NextTab);
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            dispatch(state, view, EditorCommand::PrevTab);
        }
        (KeyCode::Char(digit @ '1'..='3'), KeyModifiers::NONE) => {
            let index = usize::from(digit as u8 - b'1');
            dispatch(state, view, EditorCommand::SelectTab(TableKind::ALL[index]));
        }
        (KeyCode::Char('j') | KeyCode::Down, _) => {
            view.cursor_mut(tab).move_rows(state.grid(tab), 1);
        }
        (KeyCode::Char('k') | KeyCode::Up, _) => {
            view.cursor_mut(tab).move_rows(state.grid(tab), -1);
        }
        (KeyCode::Char('l') | KeyCode::Right, _) => {
            view.cursor_mut(tab).move_columns(state.grid(tab), 1);
        }
        (KeyCode::Char('h') | KeyCode::Left, _) => {
            view.cursor_mut(tab).move_columns(state.grid(tab), -1);
        }
        (KeyCode::Char('g') | KeyCode::Home, _) => view.cursor_mut(tab).first_row(),
        (KeyCode::Char('G') | KeyCode::End, _) => {
            view.cursor_mut(tab).last_row(state.grid(tab));
        }
        (KeyCode::Char(' '), _) => {
            let cursor = view.cursor(tab);
            let command = EditorCommand::ClickCell {
                row: cursor.row,
                column: cursor.column,
            };
            dispatch(state, view, command);
        }
        (KeyCode::Enter | KeyCode::Char('e'), _) => begin_cell_edit(state, view),
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            let events = dispatch(state, view, EditorCommand::AddRow);
            for event in events {
                if let EditorEvent::RowAdded { tab, row } = event {
                    view.cursor_mut(tab).row = row;
                }
            }
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => {
            let events = dispatch(state, view, EditorCommand::DeleteRow);
            if events.is_empty() {
                dispatch(
                    state,
                    view,
                    EditorCommand::SetStatus("select a row with space before deleting".to_owned()),
                );
            } else {
                view.cursor_mut(tab).clamp(state.grid(tab));
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_overlay_key<R: EditorRuntime>(
    state: &mut EditorState,
    runtime: &mut R,
    view: &mut EditorView,
    key: KeyEvent,
) -> Result<()> {
    let Some(overlay) = view.overlay.as_mut() else {
        return Ok(());
    };

    match overlay {
        Overlay::OpenPath(input) => match input.handle_key(key) {
            InputOutcome::Pending => {}
            InputOutcome::Cancel => view.overlay = None,
            InputOutcome::Submit(text) => {
                view.overlay = None;
                if let Some(path) = resolve_path(&text) {
                    open_path(state, runtime, view, &path)?;
                }
            }
        },
        Overlay::EditCell { row, column, input } => {
            let (row, column) = (*row, *column);
            match input.handle_key(key) {
                InputOutcome::Pending => {}
                InputOutcome::Cancel => view.overlay = None,
                InputOutcome::Submit(text) => {
                    view.overlay = None;
                    dispatch(state, view, EditorCommand::EditCell { row, column, text });
                }
            }
        }
    }
    Ok(())
}

fn begin_cell_edit(state: &mut EditorState, view: &mut EditorView) {
    let tab = state.active_tab;
    let cursor = view.cursor(tab);
    let grid = state.grid(tab);
    if !cursor.on_cell(grid) {
        dispatch(
            state,
            view,
            EditorCommand::SetStatus("nothing to edit; press a to add a row".to_owned()),
        );
        return;
    }
    let current = grid.cell(cursor.row, cursor.column).unwrap_or_default();
    view.overlay = Some(Overlay::EditCell {
        row: cursor.row,
        column: cursor.column,
        input: LineInput::new(current),
    });
}

fn open_path<R: EditorRuntime>(
    state: &mut EditorState,
    runtime: &mut R,
    view: &mut EditorView,
    path: &Path,
) -> Result<()> {
    info!(path = %path.display(), "opening catalog for editing");
    match runtime.open_tables(path) {
        Ok(tables) => {
            let command = EditorCommand::Loaded {
                path: path.to_path_buf(),
                tables,
            };
            dispatch(state, view, command);
            view.cursors = Default::default();
        }
        Err(error) => {
            let notice = notice_for(error)?;
            dispatch(state, view, EditorCommand::OpenFailed(notice));
        }
    }
    Ok(())
}

fn save<R: EditorRuntime>(
    state: &mut EditorState,
    runtime: &mut R,
    view: &mut EditorView,
) -> Result<()> {
    let Some((tables, summary)) = state.save_payload() else {
        dispatch(
            state,
            view,
            EditorCommand::SetStatus("open a catalog with o before saving".to_owned()),
        );
        return Ok(());
    };

    match runtime.save_tables(&tables) {
        Ok(()) => {
            info!(
                coffee = summary.coffee,
                roasting_levels = summary.roasting_levels,
                states = summary.states,
                blank_cells = summary.blank_cells,
                "catalog saved"
            );
            dispatch(state, view, EditorCommand::Saved(summary));
        }
        Err(error) => {
            let notice = notice_for(error)?;
            dispatch(state, view, EditorCommand::SaveFailed(notice));
        }
    }
    Ok(())
}

fn dispatch(
    state: &mut EditorState,
    view: &mut EditorView,
    command: EditorCommand,
) -> Vec<EditorEvent> {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, EditorEvent::StatusUpdated(_)))
    {
        view.clock.touch(Instant::now());
    }
    debug!(?events, "editor events");
    events
}

fn render(frame: &mut ratatui::Frame<'_>, state: &EditorState, view: &EditorView) {
    let [tabs_area, body_area, status_area] = screen_layout(frame.area());

    let titles = TableKind::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| tab_title(state, *tab, index))
        .collect::<Vec<_>>();
    let block_title = match state.phase.path() {
        Some(path) => format!("roastery editor | {}", path.display()),
        None => "roastery editor".to_owned(),
    };
    let tabs = Tabs::new(titles)
        .block(Block::default().title(block_title).borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(state.active_tab.index());
    frame.render_widget(tabs, tabs_area);

    let tab = state.active_tab;
    render_grid(
        frame,
        body_area,
        state.grid(tab),
        view.cursor(tab),
        state.locale.tab_label(tab),
    );
    render_status(frame, status_area, status_text(state));

    match &view.overlay {
        Some(Overlay::OpenPath(input)) => render_input(frame, "open catalog", input),
        Some(Overlay::EditCell { column, input, .. }) => {
            let label = state
                .active_grid()
                .columns()
                .get(*column)
                .map(String::as_str)
                .unwrap_or("cell");
            render_input(frame, label, input);
        }
        None => {}
    }
    if let Some(notice) = state.notice {
        render_notice(frame, state.locale, notice);
    }
}

fn tab_title(state: &EditorState, tab: TableKind, index: usize) -> String {
    format!(
        "{} {} ({})",
        index + 1,
        state.locale.tab_label(tab),
        state.grid(tab).row_count()
    )
}

fn status_text(state: &EditorState) -> String {
    let default =
        "o open | s save | a add | d delete | space select | enter edit | tab/1-3 table | q quit";
    match &state.status_line {
        Some(status) => format!("{status} | {default}"),
        None => default.to_owned(),
    }
}
