//! Agent identifier.
//!
//! The inner integer is `pub` so SoA `Vec`s can be indexed directly, but
//! callers should prefer the `.index()` helper for clarity.

use std::fmt;

/// Index of a voter agent in SoA storage.  Assigned sequentially from 0
/// during population allocation and never reused within a run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
