// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// In-memory model of one tabular widget: header labels, text cells and the
/// row last clicked by the user.
///
/// Cells of freshly appended rows are unset (`None`) until written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    selected_row: Option<usize>,
}

impl Grid {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            selected_row: None,
        }
    }

    /// Replaces headers and contents. Each row fills cells in field order;
    /// fields past the last column are dropped, missing ones stay unset.
    pub fn populate<C, R, F, S>(&mut self, columns: impl IntoIterator<Item = C>, rows: R)
    where
        C: Into<String>,
        R: IntoIterator<Item = F>,
        F: IntoIterator<Item = S>,
        S: ToString,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        let width = self.columns.len();
        self.rows = rows
            .into_iter()
            .map(|fields| {
                let mut cells = fields
                    .into_iter()
                    .take(width)
                    .map(|field| Some(field.to_string()))
                    .collect::<Vec<_>>();
                cells.resize(width, None);
                cells
            })
            .collect();
        self.selected_row = None;
    }

    /// Reads every cell as text. Unset cells read as empty strings.
    pub fn extract(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.clone().unwrap_or_default()).collect())
            .collect()
    }

    pub fn unset_cells(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_none()).count())
            .sum()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    /// Appends a row of unset cells and returns its index.
    pub fn append_empty_row(&mut self) -> usize {
        self.rows.push(vec![None; self.columns.len()]);
        self.rows.len() - 1
    }

    /// Marks the row of the clicked cell as selected. Clicks outside the grid
    /// are ignored.
    pub fn click(&mut self, row: usize, column: usize) -> bool {
        if row >= self.rows.len() || column >= self.columns.len() {
            return false;
        }
        self.selected_row = Some(row);
        true
    }

    /// Removes the selected row, if any, and clears the selection.
    pub fn remove_selected_row(&mut self) -> Option<usize> {
        let row = self.selected_row.take()?;
        if row >= self.rows.len() {
            return None;
        }
        self.rows.remove(row);
        Some(row)
    }

    pub fn set_cell(&mut self, row: usize, column: usize, text: impl Into<String>) -> bool {
        let Some(cell) = self
            .rows
            .get_mut(row)
            .and_then(|cells| cells.get_mut(column))
        else {
            return false;
        };
        *cell = Some(text.into());
        true
    }
}
