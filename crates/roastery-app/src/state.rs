// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::path::PathBuf;

use crate::{
    CatalogItem, CatalogTables, CoffeeRow, Grid, Locale, Notice, RoastingLevel, State, TableKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NoDatabase,
    Loaded {
        path: PathBuf,
    },
}

impl Phase {
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NoDatabase => None,
            Self::Loaded { path } => Some(path),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    pub locale: Locale,
    pub phase: Phase,
    pub grid: Grid,
    pub notice: Option<Notice>,
    pub status_line: Option<String>,
}

impl BrowserState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            phase: Phase::NoDatabase,
            grid: Grid::new(locale.catalog_columns().iter().copied()),
            notice: None,
            status_line: None,
        }
    }
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCommand {
    Loaded {
        path: PathBuf,
        items: Vec<CatalogItem>,
    },
    OpenFailed(Notice),
    DismissNotice,
    ClickCell {
        row: usize,
        column: usize,
    },
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    Loaded { rows: usize },
    NoticeShown(Notice),
    NoticeDismissed,
    SelectionChanged(Option<usize>),
    StatusUpdated(String),
    StatusCleared,
}

impl BrowserState {
    pub fn dispatch(&mut self, command: BrowserCommand) -> Vec<BrowserEvent> {
        match command {
            BrowserCommand::Loaded { path, items } => {
                self.grid.populate(
                    self.locale.catalog_columns().iter().copied(),
                    items.iter().map(CatalogItem::fields),
                );
                let rows = self.grid.row_count();
                let status = format!("{} -- {rows} rows", path.display());
                self.phase = Phase::Loaded { path };
                self.notice = None;
                vec![BrowserEvent::Loaded { rows }, self.set_status(status)]
            }
            BrowserCommand::OpenFailed(notice) => {
                self.notice = Some(notice);
                vec![BrowserEvent::NoticeShown(notice)]
            }
            BrowserCommand::DismissNotice => {
                if self.notice.take().is_some() {
                    vec![BrowserEvent::NoticeDismissed]
                } else {
                    Vec::new()
                }
            }
            BrowserCommand::ClickCell { row, column } => {
                if self.grid.click(row, column) {
                    vec![BrowserEvent::SelectionChanged(self.grid.selected_row())]
                } else {
                    Vec::new()
                }
            }
            BrowserCommand::SetStatus(message) => vec![self.set_status(message)],
            BrowserCommand::ClearStatus => {
                self.status_line = None;
                vec![BrowserEvent::StatusCleared]
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) -> BrowserEvent {
        let message = message.into();
        self.status_line = Some(message.clone());
        BrowserEvent::StatusUpdated(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub locale: Locale,
    pub phase: Phase,
    pub active_tab: TableKind,
    pub coffee: Grid,
    pub roasting_levels: Grid,
    pub states: Grid,
    pub notice: Option<Notice>,
    pub status_line: Option<String>,
}

impl EditorState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            phase: Phase::NoDatabase,
            active_tab: TableKind::Coffee,
            coffee: Grid::new(locale.columns(TableKind::Coffee).iter().copied()),
            roasting_levels: Grid::new(locale.columns(TableKind::RoastingLevels).iter().copied()),
            states: Grid::new(locale.columns(TableKind::States).iter().copied()),
            notice: None,
            status_line: None,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    NextTab,
    PrevTab,
    SelectTab(TableKind),
    AddRow,
    DeleteRow,
    ClickCell {
        row: usize,
        column: usize,
    },
    EditCell {
        row: usize,
        column: usize,
        text: String,
    },
    Loaded {
        path: PathBuf,
        tables: CatalogTables,
    },
    OpenFailed(Notice),
    Saved(SaveSummary),
    SaveFailed(Notice),
    DismissNotice,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    TabChanged(TableKind),
    RowAdded { tab: TableKind, row: usize },
    RowDeleted { tab: TableKind, row: usize },
    SelectionChanged { tab: TableKind, row: Option<usize> },
    CellEdited { tab: TableKind, row: usize, column: usize },
    Loaded,
    Saved(SaveSummary),
    NoticeShown(Notice),
    NoticeDismissed,
    StatusUpdated(String),
    StatusCleared,
}

/// Row counts written by one save, plus how many unset cells were stored as
/// empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveSummary {
    pub coffee: usize,
    pub roasting_levels: usize,
    pub states: usize,
    pub blank_cells: usize,
}

impl SaveSummary {
    pub fn message(&self) -> String {
        let mut message = format!(
            "saved {} coffee, {} roasting levels, {} states",
            self.coffee, self.roasting_levels, self.states
        );
        if self.blank_cells > 0 {
            message.push_str(&format!(" ({} empty cells stored blank)", self.blank_cells));
        }
        message
    }
}

impl EditorState {
    pub fn grid(&self, tab: TableKind) -> &Grid {
        match tab {
            TableKind::Coffee => &self.coffee,
            TableKind::RoastingLevels => &self.roasting_levels,
            TableKind::States => &self.states,
        }
    }

    pub fn grid_mut(&mut self, tab: TableKind) -> &mut Grid {
        match tab {
            TableKind::Coffee => &mut self.coffee,
            TableKind::RoastingLevels => &mut self.roasting_levels,
            TableKind::States => &mut self.states,
        }
    }

    pub fn active_grid(&self) -> &Grid {
        self.grid(self.active_tab)
    }

    /// Rows to persist, keyed by grid position. `None` while no database is
    /// open.
    pub fn save_payload(&self) -> Option<(CatalogTables, SaveSummary)> {
        if !self.phase.is_loaded() {
            return None;
        }

        let tables = CatalogTables {
            coffee: self
                .coffee
                .extract()
                .into_iter()
                .enumerate()
                .map(|(position, cells)| CoffeeRow::from_cells(position, cells))
                .collect(),
            roasting_levels: self
                .roasting_levels
                .extract()
                .into_iter()
                .enumerate()
                .map(|(position, cells)| RoastingLevel::from_cells(position, cells))
                .collect(),
            states: self
                .states
                .extract()
                .into_iter()
                .enumerate()
                .map(|(position, cells)| State::from_cells(position, cells))
                .collect(),
        };
        let summary = SaveSummary {
            coffee: tables.coffee.len(),
            roasting_levels: tables.roasting_levels.len(),
            states: tables.states.len(),
            blank_cells: TableKind::ALL
                .iter()
                .map(|tab| self.grid(*tab).unset_cells())
                .sum(),
        };
        Some((tables, summary))
    }

    pub fn dispatch(&mut self, command: EditorCommand) -> Vec<EditorEvent> {
        match command {
            EditorCommand::NextTab => self.rotate_tab(1),
            EditorCommand::PrevTab => self.rotate_tab(-1),
            EditorCommand::SelectTab(tab) => {
                self.active_tab = tab;
                vec![EditorEvent::TabChanged(tab)]
            }
            EditorCommand::AddRow => {
                let tab = self.active_tab;
                let row = self.grid_mut(tab).append_empty_row();
                vec![EditorEvent::RowAdded { tab, row }]
            }
            EditorCommand::DeleteRow => {
                let tab = self.active_tab;
                match self.grid_mut(tab).remove_selected_row() {
                    Some(row) => vec![
                        EditorEvent::RowDeleted { tab, row },
                        EditorEvent::SelectionChanged { tab, row: None },
                    ],
                    None => Vec::new(),
                }
            }
            EditorCommand::ClickCell { row, column } => {
                let tab = self.active_tab;
                let grid = self.grid_mut(tab);
                if grid.click(row, column) {
                    vec![EditorEvent::SelectionChanged {
                        tab,
                        row: grid.selected_row(),
                    }]
                } else {
                    Vec::new()
                }
            }
            EditorCommand::EditCell { row, column, text } => {
                let tab = self.active_tab;
                let grid = self.grid_mut(tab);
                if !grid.set_cell(row, column, text) {
                    return Vec::new();
                }
                grid.click(row, column);
                vec![
                    EditorEvent::CellEdited { tab, row, column },
                    EditorEvent::SelectionChanged {
                        tab,
                        row: Some(row),
                    },
                ]
            }
            EditorCommand::Loaded { path, tables } => {
                for tab in TableKind::ALL {
                    let columns = self.locale.columns(tab).iter().copied();
                    let rows = tables.cells(tab);
                    self.grid_mut(tab).populate(columns, rows);
                }
                let status = format!(
                    "{} -- {} coffee, {} roasting levels, {} states",
                    path.display(),
                    tables.coffee.len(),
                    tables.roasting_levels.len(),
                    tables.states.len()
                );
                self.phase = Phase::Loaded { path };
                self.notice = None;
                vec![EditorEvent::Loaded, self.set_status(status)]
            }
            EditorCommand::OpenFailed(notice) | EditorCommand::SaveFailed(notice) => {
                self.notice = Some(notice);
                vec![EditorEvent::NoticeShown(notice)]
            }
            EditorCommand::Saved(summary) => {
                vec![EditorEvent::Saved(summary), self.set_status(summary.message())]
            }
            EditorCommand::DismissNotice => {
                if self.notice.take().is_some() {
                    vec![EditorEvent::NoticeDismissed]
                } else {
                    Vec::new()
                }
            }
            EditorCommand::SetStatus(message) => vec![self.set_status(message)],
            EditorCommand::ClearStatus => {
                self.status_line = None;
                vec![EditorEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<EditorEvent> {
        let tabs = TableKind::ALL;
        let current = self.active_tab.index() as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![EditorEvent::TabChanged(self.active_tab)]
    }

    fn set_status(&mut self, message: impl Into<String>) -> EditorEvent {
        let message = message.into();
        self.status_line = Some(message.clone());
        EditorEvent::StatusUpdated(message)
    }
}
