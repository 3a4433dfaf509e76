//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use serde::Deserialize;

/// Simulate voter turnout intention over demographic and turnout tables.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// TOML settings file; command-line flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Overrides for individual settings.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Target number of agents N.
    #[arg(short = 'n', long)]
    pub agents: Option<usize>,
    /// Grid width in cells.
    #[arg(long)]
    pub width: Option<u32>,
    /// Grid height in cells.
    #[arg(long)]
    pub height: Option<u32>,
    /// Number of ticks to run.
    #[arg(short, long)]
    pub ticks: Option<u64>,
    /// Master RNG seed.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Clip neighborhoods at the grid edge instead of wrapping.
    #[arg(long)]
    pub bounded: bool,
    /// What the willing-neighbor count is divided by.
    #[arg(long, value_enum)]
    pub divisor: Option<Divisor>,
    /// Move every agent one random step after each tick.
    #[arg(long)]
    pub wander: bool,
    /// Directory holding demographic.csv and turnout.csv.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
    /// off, error, warn, info, debug or trace.
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Divisor {
    /// Always divide by the 8 Moore neighbor slots.
    Fixed,
    /// Divide by the number of cells the neighborhood actually held.
    Observed,
}
