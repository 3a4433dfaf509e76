//! `vt-sim` — tick loop orchestrator for the voter turnout model.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ⓪ Stop?    — leave the loop if the StopHandle was triggered.
//!   ① Decide   — call BehaviorModel::replan for every agent against the
//!                state left by the previous tick
//!                (parallel with the `parallel` feature).
//!   ② Validate — check every staged intent; any error abandons the tick.
//!   ③ Commit   — for each agent in ascending AgentId order:
//!                  SetUtility(u)  → AgentStore::utility
//!                  Transition(s)  → AgentStore::state
//!                  MoveTo(p)      → MultiGrid::move_agent
//!   ④ Report   — TickReport handed to SimObserver::on_tick_end.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decide phase on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vt_behavior::TurnoutBehavior;
//! use vt_core::SimConfig;
//! use vt_population::load_tables;
//! use vt_sim::{SimBuilder, TurnoutRecorder};
//!
//! let tables = load_tables("demos/ncr/data")?;
//! let mut sim = SimBuilder::from_population(SimConfig::default(), &tables, TurnoutBehavior::default())?
//!     .build()?;
//! let mut recorder = TurnoutRecorder::default();
//! sim.run(&mut recorder)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stop;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickReport, TurnoutRecorder};
pub use sim::Sim;
pub use stop::StopHandle;
