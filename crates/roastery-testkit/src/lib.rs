// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ORIGINS: [&str; 12] = [
    "Brazil",
    "Colombia",
    "Ethiopia",
    "Kenya",
    "Guatemala",
    "Costa Rica",
    "Sumatra",
    "Yemen",
    "Rwanda",
    "Honduras",
    "Peru",
    "Panama",
];

const PROCESSES: [&str; 4] = ["Washed", "Natural", "Honey", "Anaerobic"];

const TASTE_NOTES: [&str; 14] = [
    "Nutty",
    "Chocolate",
    "Caramel",
    "Citrus",
    "Berry",
    "Floral",
    "Stone fruit",
    "Spice",
    "Honey",
    "Molasses",
    "Jasmine",
    "Toffee",
    "Black tea",
    "Cocoa",
];

const ROASTING_LEVELS: [&str; 4] = ["Light", "Medium", "Medium-dark", "Dark"];
const STATES: [&str; 2] = ["Beans", "Ground"];
const VOLUMES: [i64; 4] = [250, 500, 1000, 2000];

/// Physical layout of the `coffee` table written by a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `roasting_level_id`, `state_id`, `description`.
    Documented,
    /// `roasting_level`, `state`, `taste_description`.
    Legacy,
}

impl ColumnLayout {
    fn schema_sql(self) -> &'static str {
        match self {
            Self::Documented => {
                "
                CREATE TABLE roasting_levels (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
                CREATE TABLE states (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
                CREATE TABLE coffee (
                  id INTEGER PRIMARY KEY,
                  name TEXT NOT NULL,
                  roasting_level_id INTEGER,
                  state_id INTEGER,
                  description TEXT,
                  cost INTEGER,
                  volume INTEGER
                );
                "
            }
            Self::Legacy => {
                "
                CREATE TABLE roasting_levels (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
                CREATE TABLE states (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
                CREATE TABLE coffee (
                  id INTEGER PRIMARY KEY,
                  name TEXT NOT NULL,
                  roasting_level INTEGER,
                  state INTEGER,
                  taste_description TEXT,
                  cost INTEGER,
                  volume INTEGER
                );
                "
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCoffee {
    pub id: i64,
    pub name: String,
    pub roasting_level: i64,
    pub state: i64,
    pub taste_description: String,
    pub cost: i64,
    pub volume: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFixture {
    pub layout: ColumnLayout,
    pub roasting_levels: Vec<(i64, String)>,
    pub states: Vec<(i64, String)>,
    pub coffee: Vec<FixtureCoffee>,
}

impl CatalogFixture {
    pub fn empty(layout: ColumnLayout) -> Self {
        Self {
            layout,
            roasting_levels: Vec::new(),
            states: Vec::new(),
            coffee: Vec::new(),
        }
    }

    /// One roasting level, one state and one coffee referencing both.
    pub fn sample() -> Self {
        Self {
            layout: ColumnLayout::Documented,
            roasting_levels: vec![(0, "Light".to_owned())],
            states: vec![(0, "Fresh".to_owned())],
            coffee: vec![FixtureCoffee {
                id: 0,
                name: "Brazil".to_owned(),
                roasting_level: 0,
                state: 0,
                taste_description: "Nutty".to_owned(),
                cost: 500,
                volume: 1000,
            }],
        }
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_coffee(mut self, coffee: FixtureCoffee) -> Self {
        self.coffee.push(coffee);
        self
    }

    /// A seeded catalog with every roasting level and state plus `rows`
    /// coffees.
    pub fn generated(seed: u64, rows: usize) -> Self {
        let mut faker = CoffeeFaker::new(seed);
        Self {
            layout: ColumnLayout::Documented,
            roasting_levels: enumerate_names(&ROASTING_LEVELS),
            states: enumerate_names(&STATES),
            coffee: (0..rows).map(|index| faker.coffee(index as i64)).collect(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if path.exists() {
            bail!("fixture target {} already exists", path.display());
        }

        let conn = Connection::open(path)
            .with_context(|| format!("create fixture database {}", path.display()))?;
        conn.execute_batch(self.layout.schema_sql())
            .context("create fixture schema")?;

        for (id, name) in &self.roasting_levels {
            conn.execute(
                "INSERT INTO roasting_levels VALUES (?, ?)",
                params![id, name],
            )
            .with_context(|| format!("insert roasting level {id}"))?;
        }
        for (id, name) in &self.states {
            conn.execute("INSERT INTO states VALUES (?, ?)", params![id, name])
                .with_context(|| format!("insert state {id}"))?;
        }
        for coffee in &self.coffee {
            conn.execute(
                "INSERT INTO coffee VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    coffee.id,
                    coffee.name,
                    coffee.roasting_level,
                    coffee.state,
                    coffee.taste_description,
                    coffee.cost,
                    coffee.volume,
                ],
            )
            .with_context(|| format!("insert coffee {}", coffee.id))?;
        }
        Ok(())
    }
}

fn enumerate_names(names: &[&str]) -> Vec<(i64, String)> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| (index as i64, (*name).to_owned()))
        .collect()
}

/// Scratch directory holding catalog files for one test.
#[derive(Debug)]
pub struct TempCatalog {
    dir: TempDir,
    path: PathBuf,
}

impl TempCatalog {
    pub fn new(fixture: &CatalogFixture) -> Result<Self> {
        let dir = tempfile::tempdir().context("create fixture directory")?;
        let path = dir.path().join("coffee.sqlite");
        fixture.write(&path)?;
        Ok(Self { dir, path })
    }

    pub fn sample() -> Result<Self> {
        Self::new(&CatalogFixture::sample())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A path inside the scratch directory that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.dir.path().join("missing.sqlite")
    }

    /// Writes a file that is not a SQLite database and returns its path.
    pub fn garbage_file(&self, name: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, b"this is not a sqlite database, just some bytes\n")
            .with_context(|| format!("write garbage file {}", path.display()))?;
        Ok(path)
    }

    /// Writes a second catalog next to the first one.
    pub fn sibling(&self, name: &str, fixture: &CatalogFixture) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fixture.write(&path)?;
        Ok(path)
    }
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

#[derive(Debug, Clone)]
pub struct CoffeeFaker {
    rng: DeterministicRng,
}

impl CoffeeFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn coffee(&mut self, id: i64) -> FixtureCoffee {
        let origin = self.pick(&ORIGINS);
        let process = self.pick(&PROCESSES);
        let first = self.pick(&TASTE_NOTES);
        let mut second = self.pick(&TASTE_NOTES);
        if second == first {
            second = TASTE_NOTES[(self.int_n(TASTE_NOTES.len() - 1) + 1) % TASTE_NOTES.len()];
        }

        FixtureCoffee {
            id,
            name: format!("{origin} {process}"),
            roasting_level: self.int_n(ROASTING_LEVELS.len()) as i64,
            state: self.int_n(STATES.len()) as i64,
            taste_description: format!("{first}, {}", second.to_ascii_lowercase()),
            cost: 300 + (self.int_n(40) as i64) * 25,
            volume: VOLUMES[self.int_n(VOLUMES.len())],
        }
    }

    fn pick<'a>(&mut self, values: &[&'a str]) -> &'a str {
        values[self.int_n(values.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogFixture, CoffeeFaker, ColumnLayout, ROASTING_LEVELS, STATES, TempCatalog};
    use anyhow::Result;
    use rusqlite::Connection;
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = CoffeeFaker::new(42);
        let mut right = CoffeeFaker::new(42);
        assert_eq!(left.coffee(0), right.coffee(0));
    }

    #[test]
    fn coffee_references_known_lookups() {
        let mut faker = CoffeeFaker::new(7);
        for id in 0..50 {
            let coffee = faker.coffee(id);
            assert!(!coffee.name.is_empty());
            assert!((coffee.roasting_level as usize) < ROASTING_LEVELS.len());
            assert!((coffee.state as usize) < STATES.len());
            assert!((300..1300).contains(&coffee.cost));
        }
    }

    #[test]
    fn variety_across_seeds() {
        let mut names = BTreeSet::new();
        for seed in 0_u64..20_u64 {
            let mut faker = CoffeeFaker::new(seed);
            names.insert(faker.coffee(0).name);
        }
        assert!(names.len() >= 8, "got {}", names.len());
    }

    #[test]
    fn sample_fixture_writes_all_tables() -> Result<()> {
        let catalog = TempCatalog::sample()?;
        let conn = Connection::open(catalog.path())?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM coffee", [], |row| row.get(0))?;
        assert_eq!(count, 1);
        let level: String =
            conn.query_row("SELECT name FROM roasting_levels", [], |row| row.get(0))?;
        assert_eq!(level, "Light");
        Ok(())
    }

    #[test]
    fn legacy_layout_uses_original_column_names() -> Result<()> {
        let fixture = CatalogFixture::sample().with_layout(ColumnLayout::Legacy);
        let catalog = TempCatalog::new(&fixture)?;
        let conn = Connection::open(catalog.path())?;
        let description: String = conn.query_row(
            "SELECT taste_description FROM coffee WHERE roasting_level = 0",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(description, "Nutty");
        Ok(())
    }

    #[test]
    fn write_refuses_to_overwrite() -> Result<()> {
        let catalog = TempCatalog::sample()?;
        let error = CatalogFixture::sample()
            .write(catalog.path())
            .expect_err("existing file must not be overwritten");
        assert!(error.to_string().contains("already exists"));
        Ok(())
    }

    #[test]
    fn missing_path_does_not_exist() -> Result<()> {
        let catalog = TempCatalog::new(&CatalogFixture::empty(ColumnLayout::Documented))?;
        assert!(!catalog.missing_path().exists());
        assert!(catalog.garbage_file("junk.db")?.exists());
        Ok(())
    }

    #[test]
    fn generated_fixture_has_requested_rows() {
        let fixture = CatalogFixture::generated(3, 12);
        assert_eq!(fixture.coffee.len(), 12);
        assert_eq!(fixture.roasting_levels.len(), ROASTING_LEVELS.len());
        assert_eq!(fixture.coffee[11].id, 11);
    }
}
