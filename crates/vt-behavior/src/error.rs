use thiserror::Error;

use vt_core::AgentId;
use vt_grid::GridError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("agent {0} is not in the agent store")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
