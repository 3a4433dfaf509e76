use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("missing turnout data for city {city:?}")]
    MissingTurnout { city: String },

    #[error("more than one turnout row for city {city:?}")]
    DuplicateTurnout { city: String },

    #[error("city {city:?} has a total population of zero")]
    ZeroPopulation { city: String },

    #[error("invalid registered-voter value {value} for city {city:?}")]
    InvalidRegistered { city: String, value: f64 },

    #[error("no registered voters across all demographic rows; cannot normalise")]
    NoRegisteredVoters,

    #[error("population total for city {city:?} overflows u64")]
    PopulationOverflow { city: String },

    #[error("target agent count must be at least 1")]
    InvalidTarget,

    #[error("allocation for target {target} rounds every segment down to zero agents")]
    EmptyAllocation { target: usize },

    #[error("population parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PopulationError {
    /// `true` for errors caused by inconsistent input tables, as opposed to
    /// bad configuration or unreadable files.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            PopulationError::MissingTurnout { .. }
                | PopulationError::DuplicateTurnout { .. }
                | PopulationError::ZeroPopulation { .. }
                | PopulationError::InvalidRegistered { .. }
                | PopulationError::NoRegisteredVoters
                | PopulationError::PopulationOverflow { .. }
        )
    }
}

pub type PopulationResult<T> = Result<T, PopulationError>;
