//! Core voter storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The decide phase needs `&mut AgentRngs` (each agent draws its own cost)
//! and `&AgentStore` (every agent reads its neighbors' states) at the same
//! time.  Keeping RNGs in a separate struct lets both borrows coexist:
//!
//! ```ignore
//! let store: &AgentStore = &sim.agents;
//! let intents: Vec<_> = sim.rngs.inner
//!     .iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| behavior.replan(AgentId(i as u32), &ctx, rng))
//!     .collect();
//! ```

use vt_core::{AgentId, AgentRng};

use crate::{VoterProfile, VoterState};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to enable
/// simultaneous `&mut AgentRngs` + `&AgentStore` borrows in the decide phase.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all voter state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let s = store.state[agent.index()];
/// ```
///
/// `profile` is fixed at construction.  `state` and `utility` are written
/// only by the simulation's commit phase.
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Demographic profile, copied from the generating population row.
    pub profile: Vec<VoterProfile>,

    /// Current decision state.
    pub state: Vec<VoterState>,

    /// Utility computed on the agent's most recent `Registered` tick.
    /// Transient: starts at 0 and is not meaningful across runs.
    pub utility: Vec<f64>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` if `agent` indexes into this store.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Number of agents currently in `state`.
    pub fn count_in(&self, state: VoterState) -> usize {
        self.state.iter().filter(|&&s| s == state).count()
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(profile: Vec<VoterProfile>, initial: VoterState) -> Self {
        let count = profile.len();
        Self {
            count,
            profile,
            state: vec![initial; count],
            utility: vec![0.0; count],
        }
    }
}
