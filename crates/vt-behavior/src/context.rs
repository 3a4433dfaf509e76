//! Read-only simulation state passed to every behavior callback.

use vt_agent::{AgentStore, VoterState};
use vt_core::{AgentId, GridPos, Tick};
use vt_grid::{GridError, MultiGrid, Neighborhood};

use crate::{BehaviorError, BehaviorResult};

/// A read-only snapshot of the simulation state passed to every
/// [`BehaviorModel`][crate::BehaviorModel] callback.
///
/// `SimContext` is built once per tick by vt-sim and shared (immutably)
/// across all agents during the decide phase, so every agent sees the
/// states and positions committed at the end of the previous tick.
pub struct SimContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Read-only view of every agent's SoA state arrays.
    pub agents: &'a AgentStore,

    /// Read-only view of the grid.
    pub grid: &'a MultiGrid,
}

/// Result of scanning a neighborhood for agents in a given state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct NeighborCount {
    /// Agents in the scanned cells whose state matched.
    pub matching: usize,
    /// Number of distinct cells the grid returned.
    pub cells:    usize,
}

impl<'a> SimContext<'a> {
    /// Build a new context for a single tick.
    #[inline]
    pub fn new(tick: Tick, agents: &'a AgentStore, grid: &'a MultiGrid) -> Self {
        Self { tick, agents, grid }
    }

    /// State of `agent` at the start of this tick.
    pub fn state_of(&self, agent: AgentId) -> BehaviorResult<VoterState> {
        self.agents
            .state
            .get(agent.index())
            .copied()
            .ok_or(BehaviorError::AgentNotFound(agent))
    }

    /// Cell `agent` occupies at the start of this tick.
    pub fn position_of(&self, agent: AgentId) -> BehaviorResult<GridPos> {
        self.grid
            .position_of(agent)
            .ok_or(BehaviorError::Grid(GridError::AgentNotPlaced(agent)))
    }

    /// Count agents in state `wanted` across the neighborhood of `pos`.
    ///
    /// Every occupant of a cell is counted, so on a multi-occupancy grid the
    /// count can exceed the number of cells.
    pub fn count_neighbors_in(
        &self,
        pos:            GridPos,
        kind:           Neighborhood,
        include_center: bool,
        wanted:         VoterState,
    ) -> BehaviorResult<NeighborCount> {
        let cells = self.grid.neighborhood(pos, kind, include_center)?;
        let mut matching = 0;
        for &cell in &cells {
            for &other in self.grid.agents_at(cell)? {
                if self.state_of(other)? == wanted {
                    matching += 1;
                }
            }
        }
        Ok(NeighborCount { matching, cells: cells.len() })
    }
}
