//! Grid error type.

use thiserror::Error;

use vt_core::{AgentId, GridPos};

/// Errors produced by `vt-grid`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("position {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: GridPos, width: u32, height: u32 },

    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("agent {0} is not placed on the grid")]
    AgentNotPlaced(AgentId),

    #[error("agent {agent} is already placed at {at}")]
    AlreadyPlaced { agent: AgentId, at: GridPos },
}

pub type GridResult<T> = Result<T, GridError>;
