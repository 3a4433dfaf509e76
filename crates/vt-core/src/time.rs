//! Simulation time and run configuration.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one round
//! of simultaneous agent decisions; it has no wall-clock meaning.

use std::fmt;

use crate::{Topology, VtError, VtResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML file by the driver binary (with the `serde`
/// feature) and passed to the simulation builder.  Missing keys fall back to
/// [`SimConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimConfig {
    /// Target number of agents N handed to the population allocator.
    /// Floor rounding means the realised population may be slightly smaller.
    pub agent_count: usize,

    /// Grid width in cells.
    pub grid_width: u32,

    /// Grid height in cells.
    pub grid_height: u32,

    /// Edge handling for neighborhood queries.
    pub topology: Topology,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agent_count: 200,
            grid_width:  30,
            grid_height: 30,
            topology:    Topology::Torus,
            total_ticks: 100,
            seed:        42,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Number of cells on the configured grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Reject configurations the model cannot run with.
    pub fn validate(&self) -> VtResult<()> {
        if self.agent_count == 0 {
            return Err(VtError::Config("agent_count must be at least 1".into()));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(VtError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        Ok(())
    }
}
