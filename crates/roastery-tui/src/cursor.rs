// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use roastery_app::Grid;

/// Keyboard focus inside a grid. Distinct from the grid's selected row,
/// which only changes when a cell is clicked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub row: usize,
    pub column: usize,
}

impl Cursor {
    pub fn move_rows(&mut self, grid: &Grid, delta: isize) {
        self.row = shift(self.row, delta, grid.row_count());
    }

    pub fn move_columns(&mut self, grid: &Grid, delta: isize) {
        self.column = shift(self.column, delta, grid.column_count());
    }

    pub fn first_row(&mut self) {
        self.row = 0;
    }

    pub fn last_row(&mut self, grid: &Grid) {
        self.row = grid.row_count().saturating_sub(1);
    }

    pub fn clamp(&mut self, grid: &Grid) {
        self.row = self.row.min(grid.row_count().saturating_sub(1));
        self.column = self.column.min(grid.column_count().saturating_sub(1));
    }

    /// Whether the cursor sits on a real cell.
    pub fn on_cell(&self, grid: &Grid) -> bool {
        self.row < grid.row_count() && self.column < grid.column_count()
    }
}

fn shift(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    next.min(len - 1)
}
