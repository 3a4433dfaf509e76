//! `vt-population` — demographic input tables and the population allocator.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`loader`]   | `DemographicRow`, `TurnoutRow`, CSV loaders                    |
//! | [`tables`]   | `PopulationTables` with per-city population / turnout lookups  |
//! | [`allocate`] | `allocate`, `Allocation`, `SegmentAllocation`                  |
//! | [`error`]    | `PopulationError`, `PopulationResult<T>`                       |
//!
//! # Allocation model (summary)
//!
//! Each demographic row (city × age group × sex) receives a share of the
//! city's registered voters proportional to its share of the city's
//! population.  Those turnout-weighted counts are normalised across all rows
//! and scaled to the target agent count N:
//!
//! ```text
//! proportion    = population_row / total_population_by_city[city]
//! segment_count = registered[city] * proportion
//! agents_row    = floor(N * segment_count / Σ segment_count)
//! ```
//!
//! Floor rounding means the realised total can fall short of N by at most
//! one agent per row; the shortfall is reported, never redistributed.

pub mod allocate;
pub mod error;
pub mod loader;
pub mod tables;


pub use allocate::{Allocation, SegmentAllocation, allocate};
pub use error::{PopulationError, PopulationResult};
pub use loader::{
    DemographicRow, TurnoutRow, load_demographic_csv, load_demographic_reader, load_tables,
    load_turnout_csv, load_turnout_reader,
};
pub use tables::PopulationTables;
