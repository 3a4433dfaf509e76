//! A no-op behavior model — agents never produce intents.

use vt_core::{AgentId, AgentRng};

use crate::{BehaviorModel, BehaviorResult, Intent, SimContext};

/// A [`BehaviorModel`] that always returns an empty intent list.
///
/// Useful as a placeholder in tests or for populations that should hold
/// their initial state.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn replan(
        &self,
        _agent: AgentId,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> BehaviorResult<Vec<Intent>> {
        Ok(vec![])
    }
}
