//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use vt_agent::{AgentStoreBuilder, VoterProfile, VoterState};
//!
//! let profiles = vec![
//!     VoterProfile::new("Manila", "F", "18-24"),
//!     VoterProfile::new("Manila", "M", "25-34"),
//! ];
//! let (store, rngs) = AgentStoreBuilder::new(profiles, /*seed=*/ 42).build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(),  2);
//! assert_eq!(store.state[0], VoterState::Registered);
//! ```

use vt_core::AgentId;

use crate::{AgentRngs, AgentStore, VoterProfile, VoterState};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Agent `i` receives `profiles[i]` and `AgentId(i)`, so IDs follow the order
/// the allocator produced the profiles in.
pub struct AgentStoreBuilder {
    profiles: Vec<VoterProfile>,
    seed:     u64,
    initial:  VoterState,
}

impl AgentStoreBuilder {
    /// Create a builder for one agent per profile, using `seed` as the global
    /// RNG seed.
    pub fn new(profiles: Vec<VoterProfile>, seed: u64) -> Self {
        Self {
            profiles,
            seed,
            initial: VoterState::INITIAL,
        }
    }

    /// `count` agents with empty demographic profiles.  Handy for tests and
    /// for models that ignore demographics.
    pub fn with_count(count: usize, seed: u64) -> Self {
        Self::new(vec![VoterProfile::default(); count], seed)
    }

    /// Override the state every agent starts in (default `Registered`).
    pub fn initial_state(mut self, state: VoterState) -> Self {
        self.initial = state;
        self
    }

    /// Number of agents the builder will create.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// The ID the next pushed profile would receive.
    pub fn next_id(&self) -> AgentId {
        AgentId(self.profiles.len() as u32)
    }

    /// Append one more agent.
    pub fn push(mut self, profile: VoterProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Construct `AgentStore` and `AgentRngs`.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let count = self.profiles.len();
        let store = AgentStore::new(self.profiles, self.initial);
        let rngs = AgentRngs::new(count, self.seed);
        (store, rngs)
    }
}
