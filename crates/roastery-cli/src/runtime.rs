// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use roastery_app::{CatalogItem, CatalogTables};
use roastery_db::{AccessMode, Store};
use roastery_tui::{BrowserRuntime, EditorRuntime};
use std::path::Path;
use tracing::info;

/// Binds the interface traits to a SQLite catalog.
///
/// A failed open leaves the previously opened catalog in place, so a save
/// after a bad open still targets the file the grids came from.
pub struct StoreRuntime {
    mode: AccessMode,
    store: Option<Store>,
}

impl StoreRuntime {
    pub fn new(mode: AccessMode) -> Self {
        Self { mode, store: None }
    }

    pub fn open_path(&self) -> Option<&Path> {
        self.store.as_ref().map(Store::path)
    }

    fn open(&self, path: &Path) -> Result<Store> {
        Ok(Store::open(path, self.mode)?)
    }
}

impl BrowserRuntime for StoreRuntime {
    fn open_catalog(&mut self, path: &Path) -> Result<Vec<CatalogItem>> {
        let store = self.open(path)?;
        let items = store.fetch_catalog_view()?;
        info!(path = %path.display(), rows = items.len(), "catalog listing loaded");
        self.store = Some(store);
        Ok(items)
    }
}

impl EditorRuntime for StoreRuntime {
    fn open_tables(&mut self, path: &Path) -> Result<CatalogTables> {
        let store = self.open(path)?;
        let tables = store.fetch_tables()?;
        info!(
            path = %path.display(),
            coffee = tables.coffee.len(),
            roasting_levels = tables.roasting_levels.len(),
            states = tables.states.len(),
            "catalog tables loaded"
        );
        self.store = Some(store);
        Ok(tables)
    }

    fn save_tables(&mut self, tables: &CatalogTables) -> Result<()> {
        let store = self
            .store
            .as_mut()
            .ok_or_else(|| anyhow!("save requested with no catalog open"))?;
        store.save_tables(tables)?;
        Ok(())
    }
}
