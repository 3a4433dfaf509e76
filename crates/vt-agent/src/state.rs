//! Voter decision state and demographic profile.

use std::fmt;

// ── VoterState ────────────────────────────────────────────────────────────────

/// Where a voter stands on the way to casting a ballot.
///
/// ```text
/// Undecided ──▶ Registered ──▶ WillVote ──▶ Voted
/// ```
///
/// Agents are created `Registered`.  The turnout rule only ever moves an
/// agent from `Registered` to `WillVote`; the outer states exist so that
/// richer behavior models can use them.  Transitions never go backwards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoterState {
    Undecided,
    Registered,
    WillVote,
    Voted,
}

impl VoterState {
    /// The state every allocated agent starts in.
    pub const INITIAL: VoterState = VoterState::Registered;

    /// All states in state-machine order.
    pub const ALL: [VoterState; 4] = [
        VoterState::Undecided,
        VoterState::Registered,
        VoterState::WillVote,
        VoterState::Voted,
    ];

    /// Position along the state machine; transitions must not decrease it.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            VoterState::Undecided  => 0,
            VoterState::Registered => 1,
            VoterState::WillVote   => 2,
            VoterState::Voted      => 3,
        }
    }

    /// `true` if moving from `self` to `next` is allowed: staying put, or a
    /// single step forward.
    #[inline]
    pub fn can_transition_to(self, next: VoterState) -> bool {
        next == self || next.rank() == self.rank() + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VoterState::Undecided  => "Undecided",
            VoterState::Registered => "Registered",
            VoterState::WillVote   => "WillVote",
            VoterState::Voted      => "Voted",
        }
    }
}

impl fmt::Display for VoterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VoterProfile ──────────────────────────────────────────────────────────────

/// Demographic attributes copied from the population row that produced the
/// agent.  Immutable for the life of the run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoterProfile {
    pub city:      String,
    pub sex:       String,
    pub age_group: String,
    /// Reserved; always [`VoterProfile::UNMODELED`] until income data is
    /// wired into the allocator.
    pub income:    u32,
    /// Reserved; always [`VoterProfile::UNMODELED`] until education data is
    /// wired into the allocator.
    pub education: u32,
}

impl VoterProfile {
    /// Sentinel for attributes the model does not yet populate.
    pub const UNMODELED: u32 = 0;

    pub fn new(
        city:      impl Into<String>,
        sex:       impl Into<String>,
        age_group: impl Into<String>,
    ) -> Self {
        Self {
            city:      city.into(),
            sex:       sex.into(),
            age_group: age_group.into(),
            income:    Self::UNMODELED,
            education: Self::UNMODELED,
        }
    }
}
