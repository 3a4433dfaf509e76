//! CSV loaders for the demographic and turnout tables.
//!
//! # CSV formats
//!
//! One row per city × age group × sex:
//!
//! ```csv
//! city,age_group,sex,population
//! Manila,18-24,F,120000
//! Manila,18-24,M,115000
//! ```
//!
//! One row per city:
//!
//! ```csv
//! city,registered
//! Manila,1100000
//! ```
//!
//! Surrounding whitespace in every field is trimmed; city names are otherwise
//! matched exactly.  Both files are read in full; the tables are small
//! (hundreds of rows).

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{PopulationError, PopulationResult, PopulationTables};

/// File name of the demographic table inside a data directory.
pub const DEMOGRAPHIC_FILE: &str = "demographic.csv";

/// File name of the turnout table inside a data directory.
pub const TURNOUT_FILE: &str = "turnout.csv";

// ── CSV records ───────────────────────────────────────────────────────────────

/// Population of one demographic segment in one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicRow {
    pub city:       String,
    pub age_group:  String,
    pub sex:        String,
    pub population: u64,
}

/// Registered voters for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoutRow {
    pub city:       String,
    pub registered: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the demographic table from a CSV file.
pub fn load_demographic_csv(path: &Path) -> PopulationResult<Vec<DemographicRow>> {
    let file = std::fs::File::open(path).map_err(PopulationError::Io)?;
    load_demographic_reader(file)
}

/// Like [`load_demographic_csv`] but accepts any `Read` source.
pub fn load_demographic_reader<R: Read>(reader: R) -> PopulationResult<Vec<DemographicRow>> {
    read_rows(reader)
}

/// Load the turnout table from a CSV file.
pub fn load_turnout_csv(path: &Path) -> PopulationResult<Vec<TurnoutRow>> {
    let file = std::fs::File::open(path).map_err(PopulationError::Io)?;
    load_turnout_reader(file)
}

/// Like [`load_turnout_csv`] but accepts any `Read` source.
pub fn load_turnout_reader<R: Read>(reader: R) -> PopulationResult<Vec<TurnoutRow>> {
    read_rows(reader)
}

/// Load `demographic.csv` and `turnout.csv` from `dir`.
pub fn load_tables(dir: &Path) -> PopulationResult<PopulationTables> {
    let demographic = load_demographic_csv(&dir.join(DEMOGRAPHIC_FILE))?;
    let turnout = load_turnout_csv(&dir.join(TURNOUT_FILE))?;
    log::info!(
        "Loaded {} demographic rows and {} turnout rows from {}",
        demographic.len(),
        turnout.len(),
        dir.display()
    );
    Ok(PopulationTables::new(demographic, turnout))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_rows<R: Read, T: for<'de> Deserialize<'de>>(reader: R) -> PopulationResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<T>()
        .map(|row| row.map_err(|e| PopulationError::Parse(e.to_string())))
        .collect()
}
