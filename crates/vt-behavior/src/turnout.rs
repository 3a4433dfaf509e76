//! The turnout decision rule.
//!
//! Each tick, a `Registered` agent computes
//!
//! ```text
//! utility = benefit - cost + willing_neighbors / divisor
//! ```
//!
//! where `cost` is drawn fresh from the agent's RNG on `[0, 1)` and
//! `willing_neighbors` is the number of agents in the Moore neighborhood
//! (centre excluded) who were `WillVote` at the start of the tick.  If the
//! utility exceeds `threshold`, the agent moves to `WillVote`.
//!
//! Agents in any other state do nothing.

use vt_agent::VoterState;
use vt_core::{AgentId, AgentRng};
use vt_grid::Neighborhood;

use crate::{BehaviorError, BehaviorModel, BehaviorResult, Intent, SimContext};

/// Number of Moore neighbor slots on an unbounded grid.
pub const MOORE_SLOTS: f64 = 8.0;

/// What the willing-neighbor count is divided by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InfluenceDivisor {
    /// Always [`MOORE_SLOTS`], even where the grid clips or deduplicates
    /// the neighborhood.
    #[default]
    FixedSlots,
    /// The number of distinct cells the neighborhood actually contained.
    /// An empty neighborhood contributes no influence.
    ObservedCells,
}

/// The outcome of one evaluation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub utility: f64,
    /// `WillVote` if the utility cleared the threshold, else `Registered`.
    pub next:    VoterState,
}

/// Benefit / cost / social-influence turnout rule.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnoutBehavior {
    pub benefit:   f64,
    pub threshold: f64,
    pub divisor:   InfluenceDivisor,
}

impl Default for TurnoutBehavior {
    fn default() -> Self {
        Self { benefit: 1.0, threshold: 0.5, divisor: InfluenceDivisor::FixedSlots }
    }
}

impl TurnoutBehavior {
    /// Construct with explicit parameters, rejecting non-finite values.
    pub fn new(benefit: f64, threshold: f64, divisor: InfluenceDivisor) -> BehaviorResult<Self> {
        if !benefit.is_finite() || !threshold.is_finite() {
            return Err(BehaviorError::Config(format!(
                "benefit ({benefit}) and threshold ({threshold}) must be finite"
            )));
        }
        Ok(Self { benefit, threshold, divisor })
    }

    pub fn with_divisor(mut self, divisor: InfluenceDivisor) -> Self {
        self.divisor = divisor;
        self
    }

    /// Social-influence term for `willing` neighbors over `cells` cells.
    pub fn social_influence(&self, willing: usize, cells: usize) -> f64 {
        match self.divisor {
            InfluenceDivisor::FixedSlots => willing as f64 / MOORE_SLOTS,
            InfluenceDivisor::ObservedCells if cells == 0 => 0.0,
            InfluenceDivisor::ObservedCells => willing as f64 / cells as f64,
        }
    }

    /// Apply the rule to an already-drawn `cost`.
    pub fn evaluate(&self, cost: f64, willing: usize, cells: usize) -> Evaluation {
        let utility = self.benefit - cost + self.social_influence(willing, cells);
        let next = if utility > self.threshold {
            VoterState::WillVote
        } else {
            VoterState::Registered
        };
        Evaluation { utility, next }
    }
}

impl BehaviorModel for TurnoutBehavior {
    fn replan(
        &self,
        agent: AgentId,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> BehaviorResult<Vec<Intent>> {
        if ctx.state_of(agent)? != VoterState::Registered {
            return Ok(vec![]);
        }

        let cost: f64 = rng.random();
        let pos = ctx.position_of(agent)?;
        let seen = ctx.count_neighbors_in(pos, Neighborhood::Moore, false, VoterState::WillVote)?;
        log::debug!(
            "{} {agent} at {pos}: {} willing neighbors in {} cells",
            ctx.tick,
            seen.matching,
            seen.cells
        );

        let eval = self.evaluate(cost, seen.matching, seen.cells);
        let mut intents = vec![Intent::SetUtility(eval.utility)];
        if eval.next != VoterState::Registered {
            intents.push(Intent::Transition(eval.next));
        }
        Ok(intents)
    }
}
