//! The `BehaviorModel` trait — the main extension point for user code.

use vt_core::{AgentId, AgentRng};

use crate::{BehaviorResult, Intent, SimContext};

/// Pluggable voter behavior.
///
/// Implement this trait to define how agents decide what to do each tick.
/// `replan` receives a read-only [`SimContext`] and the agent's own
/// [`AgentRng`], so behavior is deterministic regardless of evaluation
/// order.
///
/// # Errors
///
/// An `Err` from any agent aborts the whole tick: nothing decided during
/// that tick is committed and the run stops.
///
/// # Thread safety
///
/// With vt-sim's `parallel` feature `replan` runs for many agents at once
/// via Rayon, so implementations must be `Send + Sync`.  Per-agent state
/// belongs in `AgentStore` (read through `ctx.agents`), not in the model.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysVote;
///
/// impl BehaviorModel for AlwaysVote {
///     fn replan(&self, agent: AgentId, ctx: &SimContext, _rng: &mut AgentRng)
///         -> BehaviorResult<Vec<Intent>>
///     {
///         Ok(match ctx.state_of(agent)? {
///             VoterState::Registered => vec![Intent::Transition(VoterState::WillVote)],
///             _ => vec![],
///         })
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Called once per agent per tick.
    ///
    /// Return the [`Intent`]s to apply at the end of the tick.  An empty
    /// `Vec` leaves the agent unchanged.
    fn replan(
        &self,
        agent: AgentId,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> BehaviorResult<Vec<Intent>>;
}
