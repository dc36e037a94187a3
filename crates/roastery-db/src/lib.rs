// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod schema;

use anyhow::{Context, Result, anyhow, bail};
use roastery_app::{
    CatalogError, CatalogItem, CatalogTables, CoffeeId, CoffeeRow, LookupRow, LookupTable,
    RoastingLevel, RoastingLevelId, State, StateId,
};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Transaction, params};
use schema::{COFFEE_TABLE, CoffeeColumns, SCHEMA_SQL, resolve_schema};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_NAME: &str = "roastery";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

impl AccessMode {
    fn flags(self) -> OpenFlags {
        let base = match self {
            Self::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
            Self::ReadWrite => OpenFlags::SQLITE_OPEN_READ_WRITE,
        };
        base | OpenFlags::SQLITE_OPEN_NO_MUTEX
    }
}

/// Rows for a single table's replace-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRows<'a> {
    Coffee(&'a [CoffeeRow]),
    RoastingLevels(&'a [RoastingLevel]),
    States(&'a [State]),
}

#[derive(Debug)]
pub struct Store {
    conn: Connection,
    path: PathBuf,
    columns: CoffeeColumns,
}

impl Store {
    /// Opens an existing catalog file. Never creates one.
    pub fn open(path: &Path, mode: AccessMode) -> Result<Self, CatalogError> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable).map_err(|error| CatalogError::storage_read(path, error))?;

        match fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => {
                return Err(CatalogError::storage_read(
                    path,
                    anyhow!("{} is a directory", path.display()),
                ));
            }
            Ok(_) => {}
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(error) => return Err(CatalogError::storage_read(path, error)),
        }

        Self::connect(path, mode).map_err(|error| CatalogError::storage_read(path, error))
    }

    /// Creates a new catalog file with empty tables.
    pub fn create(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        if path.exists() {
            bail!(
                "{} already exists; pick a new file name for the catalog",
                path.display()
            );
        }

        let conn = Connection::open(path)
            .with_context(|| format!("create database at {}", path.display()))?;
        conn.execute_batch(SCHEMA_SQL).context("create schema")?;
        drop(conn);
        info!(path = %path.display(), "created catalog database");

        Self::connect(path, AccessMode::ReadWrite)
    }

    fn connect(path: &Path, mode: AccessMode) -> Result<Self> {
        let conn = Connection::open_with_flags(path, mode.flags())
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        let columns = resolve_schema(&conn)?;
        info!(path = %path.display(), ?mode, "opened catalog database");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
            columns,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    /// Joined listing for the browser. Coffee rows whose roasting level or
    /// state does not resolve are left out.
    pub fn fetch_catalog_view(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        self.query_catalog_view().map_err(|error| self.read_error(error))
    }

    pub fn fetch_lookup<Id: From<i64>>(
        &self,
        table: LookupTable,
    ) -> Result<Vec<LookupRow<Id>>, CatalogError> {
        self.query_lookup(table).map_err(|error| self.read_error(error))
    }

    pub fn fetch_coffee_rows(&self) -> Result<Vec<CoffeeRow>, CatalogError> {
        self.query_coffee_rows().map_err(|error| self.read_error(error))
    }

    /// Raw contents of the three editable tables.
    pub fn fetch_tables(&self) -> Result<CatalogTables, CatalogError> {
        Ok(CatalogTables {
            coffee: self.fetch_coffee_rows()?,
            roasting_levels: self.fetch_lookup::<RoastingLevelId>(LookupTable::RoastingLevels)?,
            states: self.fetch_lookup::<StateId>(LookupTable::States)?,
        })
    }

    /// Deletes every row of one table and inserts `rows` in their place.
    pub fn replace_all(&mut self, rows: TableRows<'_>) -> Result<(), CatalogError> {
        let columns = self.columns.clone();
        self.in_transaction(|tx| replace_table(tx, &columns, rows))
    }

    /// Replaces all three tables in one transaction; on any failure none of
    /// them change.
    pub fn save_tables(&mut self, tables: &CatalogTables) -> Result<(), CatalogError> {
        let columns = self.columns.clone();
        self.in_transaction(|tx| {
            replace_table(tx, &columns, TableRows::Coffee(&tables.coffee))?;
            replace_table(
                tx,
                &columns,
                TableRows::RoastingLevels(&tables.roasting_levels),
            )?;
            replace_table(tx, &columns, TableRows::States(&tables.states))
        })?;
        info!(
            path = %self.path.display(),
            coffee = tables.coffee.len(),
            roasting_levels = tables.roasting_levels.len(),
            states = tables.states.len(),
            "saved catalog tables"
        );
        Ok(())
    }

    fn in_transaction<F>(&mut self, body: F) -> Result<(), CatalogError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<()>,
    {
        let path = self.path.clone();
        let run = || -> Result<()> {
            let tx = self.conn.transaction().context("begin transaction")?;
            body(&tx)?;
            tx.commit().context("commit transaction")
        };
        run().map_err(|error| CatalogError::storage_read(path, error))
    }

    fn query_catalog_view(&self) -> Result<Vec<CatalogItem>> {
        let columns = &self.columns;
        let sql = format!(
            "
            SELECT
              coffee.{name}, roasting_levels.name, states.name,
              coffee.{description}, coffee.{cost}, coffee.{volume}
            FROM {COFFEE_TABLE} AS coffee
            INNER JOIN roasting_levels ON coffee.{roasting_level} = roasting_levels.id
            INNER JOIN states ON coffee.{state} = states.id
            ORDER BY coffee.rowid ASC
            ",
            name = columns.name,
            description = columns.description,
            cost = columns.cost,
            volume = columns.volume,
            roasting_level = columns.roasting_level,
            state = columns.state,
        );

        let mut stmt = self.conn.prepare(&sql).context("prepare catalog query")?;
        let rows = stmt
            .query_map([], |row| {
                let text = |index: usize| row.get_ref(index).map(value_ref_to_string);
                Ok(CatalogItem::from_fields((
                    text(0)?,
                    text(1)?,
                    text(2)?,
                    text(3)?,
                    text(4)?,
                    text(5)?,
                )))
            })
            .context("query catalog")?;

        let items = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("collect catalog rows")?;
        debug!(rows = items.len(), "fetched catalog view");
        Ok(items)
    }

    fn query_lookup<Id: From<i64>>(&self, table: LookupTable) -> Result<Vec<LookupRow<Id>>> {
        let name = table.table_name();
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT id, name FROM {name} ORDER BY rowid ASC"))
            .with_context(|| format!("prepare {name} query"))?;
        let rows = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                Ok(LookupRow {
                    id: Id::from(id),
                    name: row.get_ref(1).map(value_ref_to_string)?,
                })
            })
            .with_context(|| format!("query {name}"))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("collect {name}"))
    }

    fn query_coffee_rows(&self) -> Result<Vec<CoffeeRow>> {
        let sql = format!(
            "SELECT {} FROM {COFFEE_TABLE} AS coffee ORDER BY coffee.rowid ASC",
            self.columns.select_list("coffee")
        );
        let mut stmt = self.conn.prepare(&sql).context("prepare coffee query")?;
        let rows = stmt
            .query_map([], |row| {
                let text = |index: usize| row.get_ref(index).map(value_ref_to_string);
                Ok(CoffeeRow {
                    id: CoffeeId::new(row.get(0)?),
                    name: text(1)?,
                    roasting_level: text(2)?,
                    state: text(3)?,
                    taste_description: text(4)?,
                    cost: text(5)?,
                    volume: text(6)?,
                })
            })
            .context("query coffee")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect coffee rows")
    }

    fn read_error(&self, error: anyhow::Error) -> CatalogError {
        CatalogError::storage_read(&self.path, error)
    }
}

fn replace_table(tx: &Transaction<'_>, columns: &CoffeeColumns, rows: TableRows<'_>) -> Result<()> {
    match rows {
        TableRows::Coffee(rows) => {
            tx.execute(&format!("DELETE FROM {COFFEE_TABLE}"), [])
                .context("clear coffee")?;
            let mut stmt = tx
                .prepare(&columns.insert_sql())
                .context("prepare coffee insert")?;
            for row in rows {
                stmt.execute(params![
                    row.id.get(),
                    row.name,
                    row.roasting_level,
                    row.state,
                    row.taste_description,
                    row.cost,
                    row.volume,
                ])
                .with_context(|| format!("insert coffee row {}", row.id.get()))?;
            }
            debug!(rows = rows.len(), "replaced coffee");
        }
        TableRows::RoastingLevels(rows) => {
            let rows = rows
                .iter()
                .map(|row| (row.id.get(), row.name.as_str()))
                .collect::<Vec<_>>();
            replace_lookup(tx, LookupTable::RoastingLevels, &rows)?;
        }
        TableRows::States(rows) => {
            let rows = rows
                .iter()
                .map(|row| (row.id.get(), row.name.as_str()))
                .collect::<Vec<_>>();
            replace_lookup(tx, LookupTable::States, &rows)?;
        }
    }
    Ok(())
}

fn replace_lookup(tx: &Transaction<'_>, table: LookupTable, rows: &[(i64, &str)]) -> Result<()> {
    let name = table.table_name();
    tx.execute(&format!("DELETE FROM {name}"), [])
        .with_context(|| format!("clear {name}"))?;
    let mut stmt = tx
        .prepare(&format!("INSERT INTO {name} (id, name) VALUES (?, ?)"))
        .with_context(|| format!("prepare {name} insert"))?;
    for (id, value) in rows {
        stmt.execute(params![id, value])
            .with_context(|| format!("insert {name} row {id}"))?;
    }
    debug!(table = name, rows = rows.len(), "replaced lookup table");
    Ok(())
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn value_ref_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(value) => value.to_string(),
        ValueRef::Real(value) => value.to_string(),
        ValueRef::Text(value) => String::from_utf8_lossy(value).into_owned(),
        ValueRef::Blob(value) => format!("{value:?}"),
    }
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = OFF;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}
