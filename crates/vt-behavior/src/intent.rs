//! Agent intents — the changes an agent requests during the decide phase.

use vt_agent::VoterState;
use vt_core::GridPos;

/// A change an agent wants applied at the end of the current tick.
///
/// Intents are produced by [`BehaviorModel::replan`][crate::BehaviorModel::replan]
/// and applied by the commit phase in vt-sim, in ascending `AgentId` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Record the utility computed this tick.
    SetUtility(f64),

    /// Move to a new decision state.
    ///
    /// The commit phase rejects transitions that go backwards or skip a
    /// state; see [`VoterState::can_transition_to`].
    Transition(VoterState),

    /// Relocate on the grid.  The target must be a valid cell.
    MoveTo(GridPos),
}
