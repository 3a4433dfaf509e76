//! `vt-agent` — Structure-of-Arrays voter storage.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`state`]   | `VoterState` (decision state machine), `VoterProfile`     |
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                 |
//!
//! Positions are not stored here: the grid (`vt-grid`) owns them, the same
//! way the road-network position of an agent lives with its mobility state
//! rather than its demographic record.

pub mod builder;
pub mod state;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use state::{VoterProfile, VoterState};
pub use store::{AgentRngs, AgentStore};
