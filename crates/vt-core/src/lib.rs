//! `vt-core` — foundational types for the voter turnout model.
//!
//! This crate is a dependency of every other `vt-*` crate.  It intentionally
//! has no `vt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geo`]         | `GridPos`, `Topology`                                 |
//! | [`time`]        | `Tick`, `SimConfig`                                   |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `VtError`, `VtResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{VtError, VtResult};
pub use geo::{GridPos, Topology};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::{SimConfig, Tick};
