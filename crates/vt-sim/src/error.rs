use thiserror::Error;

use vt_agent::VoterState;
use vt_behavior::BehaviorError;
use vt_core::{AgentId, VtError};
use vt_grid::GridError;
use vt_population::PopulationError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent {agent} cannot go from {from} to {to}")]
    IllegalTransition {
        agent: AgentId,
        from:  VoterState,
        to:    VoterState,
    },

    #[error(transparent)]
    Core(#[from] VtError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Population(#[from] PopulationError),
}

pub type SimResult<T> = Result<T, SimError>;
