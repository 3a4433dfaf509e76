//! Turnout-weighted agent allocation.

use std::collections::BTreeMap;

use vt_agent::VoterProfile;

use crate::{PopulationError, PopulationResult, PopulationTables};

/// How many agents one demographic row receives, and the intermediate
/// quantities that produced that number.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAllocation {
    pub city:          String,
    pub age_group:     String,
    pub sex:           String,
    pub population:    u64,
    /// Share of the city's population in this segment, in `[0, 1]`.
    pub proportion:    f64,
    /// Registered voters attributed to this segment.
    pub segment_count: f64,
    /// Agents generated for this segment.
    pub agents:        usize,
}

/// The result of [`allocate`]: one entry per demographic row, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub segments:    Vec<SegmentAllocation>,
    /// Sum of `segment_count` over all rows (the normalisation constant).
    pub total_count: f64,
    /// The requested agent count N.
    pub target:      usize,
}

impl Allocation {
    /// Agents actually generated.  Never more than `target`.
    pub fn total_agents(&self) -> usize {
        self.segments.iter().map(|s| s.agents).sum()
    }

    /// Agents lost to floor rounding (`target - total_agents`).
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.total_agents())
    }

    /// Agents generated per city.
    pub fn agents_by_city(&self) -> BTreeMap<&str, usize> {
        let mut by_city: BTreeMap<&str, usize> = BTreeMap::new();
        for s in &self.segments {
            *by_city.entry(s.city.as_str()).or_default() += s.agents;
        }
        by_city
    }

    /// One profile per generated agent, segment by segment in row order.
    ///
    /// The index into the returned `Vec` is the agent's ID.
    pub fn profiles(&self) -> Vec<VoterProfile> {
        let mut out = Vec::with_capacity(self.total_agents());
        for s in &self.segments {
            let profile = VoterProfile::new(&s.city, &s.sex, &s.age_group);
            out.extend(std::iter::repeat_n(profile, s.agents));
        }
        out
    }
}

/// Distribute `target` agents over the demographic rows of `tables`.
///
/// The whole table is validated before any count is produced: a city
/// without turnout data, a duplicate turnout row, or a city whose population
/// sums to zero aborts the allocation.  So does a target so small that
/// every segment floors to zero agents.
pub fn allocate(tables: &PopulationTables, target: usize) -> PopulationResult<Allocation> {
    if target == 0 {
        return Err(PopulationError::InvalidTarget);
    }
    tables.validate()?;

    let totals = tables.total_population_by_city()?;
    let registered = tables.registered_by_city()?;

    // ── Pass 1: turnout-weighted count per row ────────────────────────────
    let weighted: Vec<(f64, f64)> = tables
        .demographic
        .iter()
        .map(|row| {
            let city = row.city.as_str();
            let city_total = match totals.get(city) {
                Some(&t) if t > 0 => t as f64,
                _ => return Err(PopulationError::ZeroPopulation { city: row.city.clone() }),
            };
            let city_registered = registered
                .get(city)
                .copied()
                .ok_or_else(|| PopulationError::MissingTurnout { city: row.city.clone() })?;
            let proportion = row.population as f64 / city_total;
            Ok((proportion, city_registered * proportion))
        })
        .collect::<PopulationResult<_>>()?;

    let total_count: f64 = weighted.iter().map(|&(_, c)| c).sum();
    if total_count <= 0.0 {
        return Err(PopulationError::NoRegisteredVoters);
    }

    // ── Pass 2: scale to the target and floor ─────────────────────────────
    let segments: Vec<SegmentAllocation> = tables
        .demographic
        .iter()
        .zip(weighted)
        .map(|(row, (proportion, segment_count))| SegmentAllocation {
            city:       row.city.clone(),
            age_group:  row.age_group.clone(),
            sex:        row.sex.clone(),
            population: row.population,
            proportion,
            segment_count,
            agents: (target as f64 * segment_count / total_count).floor() as usize,
        })
        .collect();

    let allocation = Allocation { segments, total_count, target };
    if allocation.total_agents() == 0 {
        return Err(PopulationError::EmptyAllocation { target });
    }
    log::info!(
        "Allocated {} of {} agents across {} segments ({} lost to rounding)",
        allocation.total_agents(),
        target,
        allocation.segments.len(),
        allocation.shortfall()
    );
    for (city, n) in allocation.agents_by_city() {
        log::debug!("  {city}: {n} agents");
    }
    Ok(allocation)
}
