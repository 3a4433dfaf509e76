//! Fluent builder for constructing a [`Sim`].

use vt_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use vt_behavior::BehaviorModel;
use vt_core::{AgentId, GridPos, SimConfig, SimRng, Tick};
use vt_grid::MultiGrid;
use vt_population::{PopulationTables, allocate};

use crate::{Sim, SimError, SimResult, StopHandle};

/// Offset of the placement stream derived from the run's `SimRng`.
const PLACEMENT_STREAM: u64 = 1;

/// Fluent builder for [`Sim<B>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — grid size, topology, total ticks, seed
/// - [`AgentStore`] + [`AgentRngs`] — from [`vt_agent::AgentStoreBuilder`],
///   or let [`SimBuilder::from_population`] allocate them
/// - `B: BehaviorModel` — the behavior implementation
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.initial_positions(v)`  | Uniform random cell per agent, seeded     |
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::with_count(n, seed).build();
/// let mut sim = SimBuilder::new(config, store, rngs, TurnoutBehavior::default())
///     .initial_positions(positions)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel> {
    config:    SimConfig,
    agents:    AgentStore,
    rngs:      AgentRngs,
    positions: Option<Vec<GridPos>>,
    behavior:  B,
}

impl<B: BehaviorModel> SimBuilder<B> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, agents: AgentStore, rngs: AgentRngs, behavior: B) -> Self {
        Self {
            config,
            agents,
            rngs,
            positions: None,
            behavior,
        }
    }

    /// Allocate `config.agent_count` agents from `tables` and create a builder
    /// for them.
    ///
    /// Any allocation error is returned before a model exists.  Floor
    /// rounding may leave fewer agents than requested.
    pub fn from_population(config: SimConfig, tables: &PopulationTables, behavior: B) -> SimResult<Self> {
        config.validate()?;
        let allocation = allocate(tables, config.agent_count)?;
        let (agents, rngs) = AgentStoreBuilder::new(allocation.profiles(), config.seed).build();
        Ok(Self::new(config, agents, rngs, behavior))
    }

    /// Supply the starting cell for each agent (must be length `agent_count`).
    pub fn initial_positions(mut self, positions: Vec<GridPos>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate inputs, place every agent on a fresh grid, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        self.config.validate()?;
        let agent_count = self.agents.count;

        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        if agent_count != self.config.agent_count {
            log::info!(
                "Building with {agent_count} agents ({} requested)",
                self.config.agent_count
            );
        }

        let mut grid = MultiGrid::from_config(&self.config)?;

        // ── Resolve positions ─────────────────────────────────────────────
        let positions = match self.positions {
            Some(p) => {
                if p.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      p.len(),
                        what:     "initial positions",
                    });
                }
                p
            }
            None => {
                let mut rng = SimRng::new(self.config.seed).child(PLACEMENT_STREAM);
                (0..agent_count).map(|_| grid.random_position(rng.inner())).collect()
            }
        };

        for (i, &pos) in positions.iter().enumerate() {
            grid.place_agent(AgentId(i as u32), pos)?;
        }

        Ok(Sim {
            current_tick: Tick::ZERO,
            config:       self.config,
            agents:       self.agents,
            rngs:         self.rngs,
            grid,
            behavior:     self.behavior,
            stop:         StopHandle::new(),
        })
    }
}
