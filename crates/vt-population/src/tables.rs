//! In-memory demographic and turnout tables with per-city lookups.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::{DemographicRow, PopulationError, PopulationResult, TurnoutRow};

/// The two input tables the allocator consumes.  Read-only after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationTables {
    pub demographic: Vec<DemographicRow>,
    pub turnout:     Vec<TurnoutRow>,
}

impl PopulationTables {
    pub fn new(demographic: Vec<DemographicRow>, turnout: Vec<TurnoutRow>) -> Self {
        Self { demographic, turnout }
    }

    /// Sum of `population` over every demographic row of each city.
    ///
    /// Fails if a city's total does not fit in a `u64`.
    pub fn total_population_by_city(&self) -> PopulationResult<HashMap<&str, u64>> {
        let mut totals: HashMap<&str, u64> = HashMap::new();
        for row in &self.demographic {
            let total = totals.entry(row.city.as_str()).or_default();
            *total = total
                .checked_add(row.population)
                .ok_or_else(|| PopulationError::PopulationOverflow { city: row.city.clone() })?;
        }
        Ok(totals)
    }

    /// Registered voters keyed by city.
    ///
    /// Fails on a city listed twice or a negative / non-finite count.
    pub fn registered_by_city(&self) -> PopulationResult<HashMap<&str, f64>> {
        let mut registered: HashMap<&str, f64> = HashMap::with_capacity(self.turnout.len());
        for row in &self.turnout {
            if !row.registered.is_finite() || row.registered < 0.0 {
                return Err(PopulationError::InvalidRegistered {
                    city:  row.city.clone(),
                    value: row.registered,
                });
            }
            match registered.entry(row.city.as_str()) {
                Entry::Occupied(_) => {
                    return Err(PopulationError::DuplicateTurnout { city: row.city.clone() });
                }
                Entry::Vacant(slot) => {
                    slot.insert(row.registered);
                }
            }
        }
        Ok(registered)
    }

    /// Check that every demographic city has turnout data and a non-zero
    /// population.  Cities are checked in demographic row order, so the
    /// error names the first offending city in the file.
    pub fn validate(&self) -> PopulationResult<()> {
        let totals = self.total_population_by_city()?;
        let registered = self.registered_by_city()?;
        for row in &self.demographic {
            let city = row.city.as_str();
            if !registered.contains_key(city) {
                return Err(PopulationError::MissingTurnout { city: row.city.clone() });
            }
            if totals.get(city).copied().unwrap_or(0) == 0 {
                return Err(PopulationError::ZeroPopulation { city: row.city.clone() });
            }
        }
        Ok(())
    }

    /// Distinct cities in the demographic table, in first-seen order.
    pub fn cities(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.demographic {
            if !seen.contains(&row.city.as_str()) {
                seen.push(row.city.as_str());
            }
        }
        seen
    }
}
