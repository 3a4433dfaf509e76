//! `vt-grid` — the spatial grid agents live on.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`grid`]  | `MultiGrid` (cell occupancy + agent positions), `Neighborhood` |
//! | [`error`] | `GridError`, `GridResult<T>`                                  |
//!
//! # Neighborhood semantics
//!
//! ```text
//!   Moore (8)          von Neumann (4)
//!   . . . . .          . . . . .
//!   . x x x .          . . x . .
//!   . x o x .          . x o x .
//!   . x x x .          . . x . .
//!   . . . . .          . . . . .
//! ```
//!
//! `o` is included only when `include_center` is set.  On a
//! [`Topology::Torus`][vt_core::Topology::Torus] the offsets wrap; on a
//! [`Topology::Bounded`][vt_core::Topology::Bounded] grid they are clipped,
//! so an edge cell has 5 Moore neighbors and a corner cell 3.

pub mod error;
pub mod grid;


pub use error::{GridError, GridResult};
pub use grid::{MultiGrid, Neighborhood};
