//! Random-walk movement.
//!
//! Movement is not part of the turnout rule and is never applied
//! automatically.  Callers invoke it explicitly (`Sim::move_agent`) or a
//! behavior model returns its result as [`Intent::MoveTo`][crate::Intent::MoveTo].

use vt_core::{AgentId, AgentRng, GridPos};
use vt_grid::{GridError, MultiGrid, Neighborhood};

use crate::BehaviorResult;

/// Pick a destination for `agent` uniformly among its current cell and the
/// von Neumann neighbors of that cell.
///
/// At most 5 candidates; fewer at the edge of a bounded grid.  The grid only
/// ever returns in-range cells, so the result is always a valid position.
pub fn random_step(grid: &MultiGrid, agent: AgentId, rng: &mut AgentRng) -> BehaviorResult<GridPos> {
    let from = grid.position_of(agent).ok_or(GridError::AgentNotPlaced(agent))?;
    let candidates = grid.neighborhood(from, Neighborhood::VonNeumann, true)?;
    Ok(rng.choose(&candidates).copied().unwrap_or(from))
}
