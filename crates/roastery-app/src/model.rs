// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

/// One row of the joined catalog listing shown by the browser.
///
/// Cost and volume hold whatever the column stores, rendered as text, so a
/// blank or non-numeric cell still lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub roasting_level: String,
    pub state: String,
    pub taste_description: String,
    pub cost: String,
    pub volume: String,
}

pub type CatalogFields<C = String, V = String> = (String, String, String, String, C, V);

impl CatalogItem {
    pub const FIELD_COUNT: usize = 6;

    pub fn from_fields<C: ToString, V: ToString>(fields: CatalogFields<C, V>) -> Self {
        let (name, roasting_level, state, taste_description, cost, volume) = fields;
        Self {
            name,
            roasting_level,
            state,
            taste_description,
            cost: cost.to_string(),
            volume: volume.to_string(),
        }
    }

    /// Display values in column order.
    pub fn fields(&self) -> [String; Self::FIELD_COUNT] {
        [
            self.name.clone(),
            self.roasting_level.clone(),
            self.state.clone(),
            self.taste_description.clone(),
            self.cost.clone(),
            self.volume.clone(),
        ]
    }
}

/// Raw `coffee` row as edited in the grid.
///
/// Everything except `id` is kept as the text the user typed; SQLite column
/// affinity turns numeric text into integers on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeRow {
    pub id: CoffeeId,
    pub name: String,
    pub roasting_level: String,
    pub state: String,
    pub taste_description: String,
    pub cost: String,
    pub volume: String,
}

impl CoffeeRow {
    pub const CELL_COUNT: usize = 6;

    /// Builds the row saved from grid position `position`. Missing trailing
    /// cells become empty text.
    pub fn from_cells(position: usize, cells: Vec<String>) -> Self {
        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        Self {
            id: CoffeeId::from_position(position),
            name: next(),
            roasting_level: next(),
            state: next(),
            taste_description: next(),
            cost: next(),
            volume: next(),
        }
    }

    pub fn cells(&self) -> [String; Self::CELL_COUNT] {
        [
            self.name.clone(),
            self.roasting_level.clone(),
            self.state.clone(),
            self.taste_description.clone(),
            self.cost.clone(),
            self.volume.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRow<Id> {
    pub id: Id,
    pub name: String,
}

pub type RoastingLevel = LookupRow<RoastingLevelId>;
pub type State = LookupRow<StateId>;

/// Lookup tables expose only their name column to the grid.
pub const LOOKUP_CELL_COUNT: usize = 1;

impl<Id> LookupRow<Id> {
    pub fn cells(&self) -> [String; LOOKUP_CELL_COUNT] {
        [self.name.clone()]
    }
}

impl RoastingLevel {
    pub fn from_cells(position: usize, cells: Vec<String>) -> Self {
        Self {
            id: RoastingLevelId::from_position(position),
            name: cells.into_iter().next().unwrap_or_default(),
        }
    }
}

impl State {
    pub fn from_cells(position: usize, cells: Vec<String>) -> Self {
        Self {
            id: StateId::from_position(position),
            name: cells.into_iter().next().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    Coffee,
    RoastingLevels,
    States,
}

impl TableKind {
    pub const ALL: [Self; 3] = [Self::Coffee, Self::RoastingLevels, Self::States];

    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::RoastingLevels => "roasting_levels",
            Self::States => "states",
        }
    }

    pub const fn cell_count(self) -> usize {
        match self {
            Self::Coffee => CoffeeRow::CELL_COUNT,
            Self::RoastingLevels | Self::States => LOOKUP_CELL_COUNT,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupTable {
    RoastingLevels,
    States,
}

impl LookupTable {
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::RoastingLevels => "roasting_levels",
            Self::States => "states",
        }
    }
}

impl From<LookupTable> for TableKind {
    fn from(value: LookupTable) -> Self {
        match value {
            LookupTable::RoastingLevels => Self::RoastingLevels,
            LookupTable::States => Self::States,
        }
    }
}

/// The three editable tables, loaded or about to be saved together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogTables {
    pub coffee: Vec<CoffeeRow>,
    pub roasting_levels: Vec<RoastingLevel>,
    pub states: Vec<State>,
}

impl CatalogTables {
    pub fn row_count(&self, table: TableKind) -> usize {
        match table {
            TableKind::Coffee => self.coffee.len(),
            TableKind::RoastingLevels => self.roasting_levels.len(),
            TableKind::States => self.states.len(),
        }
    }

    pub fn cells(&self, table: TableKind) -> Vec<Vec<String>> {
        match table {
            TableKind::Coffee => self.coffee.iter().map(|row| row.cells().to_vec()).collect(),
            TableKind::RoastingLevels => self
                .roasting_levels
                .iter()
                .map(|row| row.cells().to_vec())
                .collect(),
            TableKind::States => self.states.iter().map(|row| row.cells().to_vec()).collect(),
        }
    }
}
