// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use roastery_app::{
    CatalogError, CatalogItem, CatalogTables, CoffeeId, CoffeeRow, LookupTable, Notice,
    RoastingLevel, RoastingLevelId, State, StateId,
};
use roastery_db::{AccessMode, Store, TableRows, validate_db_path};
use roastery_testkit::{CatalogFixture, ColumnLayout, FixtureCoffee, TempCatalog};
use rusqlite::Connection;

fn brazil() -> CatalogItem {
    CatalogItem::from_fields((
        "Brazil".to_owned(),
        "Light".to_owned(),
        "Fresh".to_owned(),
        "Nutty".to_owned(),
        500,
        1000,
    ))
}

fn coffee_row(position: usize, cells: [&str; 6]) -> CoffeeRow {
    CoffeeRow::from_cells(position, cells.map(str::to_owned).to_vec())
}

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:coffee.db").is_err());
    assert!(validate_db_path("https://example.com/coffee.sqlite").is_err());
    assert!(validate_db_path("coffee.sqlite?mode=ro").is_err());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path("/tmp/coffee.sqlite").is_ok());
}

#[test]
fn catalog_view_resolves_lookup_names() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let store = Store::open(catalog.path(), AccessMode::ReadOnly)?;

    assert_eq!(store.fetch_catalog_view()?, vec![brazil()]);
    assert_eq!(store.path(), catalog.path());
    Ok(())
}

#[test]
fn catalog_view_skips_rows_with_unresolved_references() -> Result<()> {
    let fixture = CatalogFixture::sample().with_coffee(FixtureCoffee {
        id: 1,
        name: "Kenya".to_owned(),
        roasting_level: 9,
        state: 0,
        taste_description: "Citrus".to_owned(),
        cost: 700,
        volume: 250,
    });
    let catalog = TempCatalog::new(&fixture)?;
    let store = Store::open(catalog.path(), AccessMode::ReadOnly)?;

    assert_eq!(store.fetch_catalog_view()?, vec![brazil()]);

    // The raw table still has both rows.
    let tables = store.fetch_tables()?;
    assert_eq!(tables.coffee.len(), 2);
    assert_eq!(tables.coffee[1].roasting_level, "9");
    Ok(())
}

#[test]
fn catalog_view_follows_storage_order() -> Result<()> {
    let fixture = CatalogFixture::generated(11, 25);
    let catalog = TempCatalog::new(&fixture)?;
    let store = Store::open(catalog.path(), AccessMode::ReadOnly)?;

    let names = store
        .fetch_catalog_view()?
        .into_iter()
        .map(|item| item.name)
        .collect::<Vec<_>>();
    let expected = fixture
        .coffee
        .iter()
        .map(|coffee| coffee.name.clone())
        .collect::<Vec<_>>();
    assert_eq!(names, expected);
    Ok(())
}

#[test]
fn legacy_column_names_open_and_save() -> Result<()> {
    let fixture = CatalogFixture::sample().with_layout(ColumnLayout::Legacy);
    let catalog = TempCatalog::new(&fixture)?;
    let mut store = Store::open(catalog.path(), AccessMode::ReadWrite)?;
    assert_eq!(store.fetch_catalog_view()?, vec![brazil()]);

    let mut tables = store.fetch_tables()?;
    tables.coffee[0].taste_description = "Hazelnut".to_owned();
    store.save_tables(&tables)?;

    let description: String = store.raw_connection().query_row(
        "SELECT taste_description FROM coffee",
        [],
        |row| row.get(0),
    )?;
    assert_eq!(description, "Hazelnut");
    Ok(())
}

#[test]
fn missing_file_is_reported_and_not_created() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let missing = catalog.missing_path();

    for mode in [AccessMode::ReadOnly, AccessMode::ReadWrite] {
        let error = Store::open(&missing, mode).expect_err("missing file must not open");
        assert!(matches!(error, CatalogError::FileNotFound { .. }));
        assert_eq!(error.notice(), Notice::FileNotFound);
        assert_eq!(error.path(), missing.as_path());
    }
    assert!(!missing.exists());
    Ok(())
}

#[test]
fn non_database_file_is_a_read_error() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let junk = catalog.garbage_file("notes.txt")?;

    let error = Store::open(&junk, AccessMode::ReadOnly).expect_err("junk must not open");
    assert_eq!(error.notice(), Notice::ReadError);
    Ok(())
}

#[test]
fn directory_is_a_read_error() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let error =
        Store::open(catalog.dir(), AccessMode::ReadOnly).expect_err("directory must not open");
    assert_eq!(error.notice(), Notice::ReadError);
    Ok(())
}

#[test]
fn foreign_schema_is_a_read_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("other.sqlite");
    Connection::open(&path)?.execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY);")?;

    let error = Store::open(&path, AccessMode::ReadOnly).expect_err("schema must be rejected");
    assert_eq!(error.notice(), Notice::ReadError);
    assert!(
        format!("{:#}", anyhow::Error::new(error)).contains("roasting_levels"),
        "error chain should name the missing table"
    );
    Ok(())
}

#[test]
fn save_reassigns_ids_by_position() -> Result<()> {
    let fixture = CatalogFixture {
        layout: ColumnLayout::Documented,
        roasting_levels: vec![(4, "Light".to_owned()), (8, "Dark".to_owned())],
        states: vec![(3, "Beans".to_owned())],
        coffee: Vec::new(),
    };
    let catalog = TempCatalog::new(&fixture)?;
    let mut store = Store::open(catalog.path(), AccessMode::ReadWrite)?;

    let tables = store.fetch_tables()?;
    assert_eq!(tables.roasting_levels[1].id, RoastingLevelId::new(8));

    let renumbered = CatalogTables {
        coffee: Vec::new(),
        roasting_levels: tables
            .roasting_levels
            .iter()
            .enumerate()
            .map(|(position, row)| RoastingLevel::from_cells(position, row.cells().to_vec()))
            .collect(),
        states: tables
            .states
            .iter()
            .enumerate()
            .map(|(position, row)| State::from_cells(position, row.cells().to_vec()))
            .collect(),
    };
    store.save_tables(&renumbered)?;

    let levels = store.fetch_lookup::<RoastingLevelId>(LookupTable::RoastingLevels)?;
    assert_eq!(
        levels
            .iter()
            .map(|row| (row.id.get(), row.name.as_str()))
            .collect::<Vec<_>>(),
        vec![(0, "Light"), (1, "Dark")]
    );
    let states = store.fetch_lookup::<StateId>(LookupTable::States)?;
    assert_eq!(states[0].id, StateId::new(0));
    Ok(())
}

#[test]
fn saved_catalog_is_visible_to_the_browser_query() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fresh.sqlite");
    let mut store = Store::create(&path)?;
    assert_eq!(store.fetch_tables()?, CatalogTables::default());

    let tables = CatalogTables {
        coffee: vec![coffee_row(0, ["Brazil", "0", "0", "Nutty", "500", "1000"])],
        roasting_levels: vec![RoastingLevel::from_cells(0, vec!["Light".to_owned()])],
        states: vec![State::from_cells(0, vec!["Fresh".to_owned()])],
    };
    store.save_tables(&tables)?;
    drop(store);

    let reopened = Store::open(&path, AccessMode::ReadOnly)?;
    assert_eq!(reopened.fetch_catalog_view()?, vec![brazil()]);
    assert_eq!(reopened.fetch_tables()?, tables);
    Ok(())
}

#[test]
fn blank_cells_are_saved_as_empty_text() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let mut store = Store::open(catalog.path(), AccessMode::ReadWrite)?;

    let rows = vec![coffee_row(0, ["Decaf", "", "", "", "", ""])];
    store.replace_all(TableRows::Coffee(&rows))?;

    let saved = store.fetch_coffee_rows()?;
    assert_eq!(saved, rows);
    assert_eq!(saved[0].id, CoffeeId::new(0));
    // Without a resolvable roasting level the row drops out of the listing.
    assert!(store.fetch_catalog_view()?.is_empty());
    Ok(())
}

#[test]
fn non_numeric_cost_and_volume_still_list() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let mut store = Store::open(catalog.path(), AccessMode::ReadWrite)?;

    let rows = vec![
        coffee_row(0, ["Brazil", "0", "0", "Nutty", "500", "1000"]),
        coffee_row(1, ["Kenya", "0", "0", "Citrus", "", "abc"]),
        coffee_row(2, ["Peru", "0", "0", "Cocoa", "700", "250"]),
    ];
    store.replace_all(TableRows::Coffee(&rows))?;
    store
        .raw_connection()
        .execute("UPDATE coffee SET cost = NULL, volume = 2.5 WHERE id = 2", [])?;

    let listed = store
        .fetch_catalog_view()?
        .into_iter()
        .map(|item| (item.name, item.cost, item.volume))
        .collect::<Vec<_>>();
    assert_eq!(
        listed,
        vec![
            ("Brazil".to_owned(), "500".to_owned(), "1000".to_owned()),
            ("Kenya".to_owned(), String::new(), "abc".to_owned()),
            ("Peru".to_owned(), String::new(), "2.5".to_owned()),
        ]
    );
    Ok(())
}

#[test]
fn replace_all_touches_only_the_named_table() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let mut store = Store::open(catalog.path(), AccessMode::ReadWrite)?;

    let states = vec![
        State::from_cells(0, vec!["Fresh".to_owned()]),
        State::from_cells(1, vec!["Ground".to_owned()]),
    ];
    store.replace_all(TableRows::States(&states))?;

    let tables = store.fetch_tables()?;
    assert_eq!(tables.states, states);
    assert_eq!(tables.coffee.len(), 1);
    assert_eq!(tables.roasting_levels.len(), 1);
    Ok(())
}

#[test]
fn failed_save_leaves_every_table_unchanged() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    Connection::open(catalog.path())?.execute_batch(
        "
        CREATE TRIGGER states_frozen BEFORE INSERT ON states
        BEGIN
          SELECT RAISE(ABORT, 'states are frozen');
        END;
        ",
    )?;
    let mut store = Store::open(catalog.path(), AccessMode::ReadWrite)?;
    let before = store.fetch_tables()?;

    let tables = CatalogTables {
        coffee: vec![coffee_row(0, ["Kenya", "0", "0", "Citrus", "700", "250"])],
        roasting_levels: vec![RoastingLevel::from_cells(0, vec!["Dark".to_owned()])],
        states: vec![State::from_cells(0, vec!["Ground".to_owned()])],
    };
    let error = store
        .save_tables(&tables)
        .expect_err("trigger should abort the save");
    assert_eq!(error.notice(), Notice::ReadError);

    assert_eq!(store.fetch_tables()?, before);
    Ok(())
}

#[test]
fn read_only_store_rejects_saves() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let mut store = Store::open(catalog.path(), AccessMode::ReadOnly)?;
    let tables = store.fetch_tables()?;

    let error = store
        .save_tables(&CatalogTables::default())
        .expect_err("read-only connection cannot write");
    assert!(matches!(error, CatalogError::StorageRead { .. }));
    assert_eq!(store.fetch_tables()?, tables);
    Ok(())
}

#[test]
fn create_refuses_existing_files() -> Result<()> {
    let catalog = TempCatalog::sample()?;
    let error = Store::create(catalog.path()).expect_err("existing file must be kept");
    assert!(error.to_string().contains("already exists"));

    let store = Store::open(catalog.path(), AccessMode::ReadOnly)?;
    assert_eq!(store.fetch_catalog_view()?.len(), 1);
    Ok(())
}
