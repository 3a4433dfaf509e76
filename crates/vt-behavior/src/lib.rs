//! `vt-behavior` — voter behavior model trait, intents, and the turnout rule.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`intent`]   | `Intent` enum (`SetUtility`, `Transition`, `MoveTo`)             |
//! | [`context`]  | `SimContext<'a>` — read-only tick snapshot shared by all agents  |
//! | [`model`]    | `BehaviorModel` trait                                            |
//! | [`turnout`]  | `TurnoutBehavior` — benefit / cost / social-influence rule       |
//! | [`movement`] | `random_step` — von Neumann random walk                          |
//! | [`noop`]     | `NoopBehavior` — placeholder that never produces intents         |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Design notes
//!
//! The two-phase tick loop in vt-sim works as follows:
//!
//! 1. **Decide phase**: for every agent, call `BehaviorModel::replan`.  All
//!    reads go through `&SimContext`, which reflects the world as it stood
//!    at the end of the previous tick; no mutation.
//!
//! 2. **Commit phase** (sequential): consume the collected `Vec<Intent>`s
//!    and write `AgentStore` and `MultiGrid` accordingly.
//!
//! Because nothing is written until every agent has decided, evaluation
//! order cannot change the outcome of a tick.

pub mod context;
pub mod error;
pub mod intent;
pub mod model;
pub mod movement;
pub mod noop;
pub mod turnout;


pub use context::{NeighborCount, SimContext};
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use model::BehaviorModel;
pub use movement::random_step;
pub use noop::NoopBehavior;
pub use turnout::{Evaluation, InfluenceDivisor, MOORE_SLOTS, TurnoutBehavior};
