// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};
use std::collections::BTreeSet;

pub(crate) const SCHEMA_SQL: &str = include_str!("sql/schema.sql");

pub(crate) const COFFEE_TABLE: &str = "coffee";
pub(crate) const LOOKUP_TABLES: [&str; 2] = ["roasting_levels", "states"];
const LOOKUP_COLUMNS: [&str; 2] = ["id", "name"];

/// Accepted physical names for each logical `coffee` column, preferred name
/// first. Older files use the unsuffixed foreign keys and `taste_description`.
const COFFEE_COLUMN_ALIASES: [(&str, &[&str]); 7] = [
    ("id", &["id"]),
    ("name", &["name"]),
    ("roasting_level", &["roasting_level_id", "roasting_level"]),
    ("state", &["state_id", "state"]),
    ("description", &["description", "taste_description"]),
    ("cost", &["cost"]),
    ("volume", &["volume"]),
];

/// Physical column names of the `coffee` table in the open file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CoffeeColumns {
    pub id: &'static str,
    pub name: &'static str,
    pub roasting_level: &'static str,
    pub state: &'static str,
    pub description: &'static str,
    pub cost: &'static str,
    pub volume: &'static str,
}

impl CoffeeColumns {
    pub fn select_list(&self, qualifier: &str) -> String {
        self.ordered()
            .iter()
            .map(|column| format!("{qualifier}.{column}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn insert_sql(&self) -> String {
        let columns = self.ordered();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {COFFEE_TABLE} ({}) VALUES ({placeholders})",
            columns.join(", ")
        )
    }

    fn ordered(&self) -> [&'static str; 7] {
        [
            self.id,
            self.name,
            self.roasting_level,
            self.state,
            self.description,
            self.cost,
            self.volume,
        ]
    }
}

pub(crate) fn resolve_schema(conn: &Connection) -> Result<CoffeeColumns> {
    for table in LOOKUP_TABLES {
        let columns = required_table_columns(conn, table)?;
        let missing = LOOKUP_COLUMNS
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}",
                missing.join(", ")
            );
        }
    }

    let columns = required_table_columns(conn, COFFEE_TABLE)?;
    let mut resolved = Vec::with_capacity(COFFEE_COLUMN_ALIASES.len());
    let mut missing = Vec::new();
    for (logical, aliases) in COFFEE_COLUMN_ALIASES {
        match aliases.iter().copied().find(|alias| columns.contains(*alias)) {
            Some(alias) => resolved.push(alias),
            None => missing.push(logical),
        }
    }
    if !missing.is_empty() {
        bail!(
            "table `{COFFEE_TABLE}` is missing required columns: {}",
            missing.join(", ")
        );
    }

    Ok(CoffeeColumns {
        id: resolved[0],
        name: resolved[1],
        roasting_level: resolved[2],
        state: resolved[3],
        description: resolved[4],
        cost: resolved[5],
        volume: resolved[6],
    })
}

fn required_table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    if !table_exists(conn, table)? {
        bail!("database is missing required table `{table}`; open a coffee catalog database");
    }
    table_columns(conn, table)
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}
