//! Grid coordinate type and edge-handling policy.
//!
//! Coordinates are unsigned cell indices: a valid position on a
//! `width × height` grid satisfies `x < width && y < height`.  Validation
//! against a concrete grid happens in `vt-grid`; this module only defines
//! the value types shared by configuration and agents.

use std::fmt;

/// A cell coordinate on the model grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// `true` if this position lies inside a `width × height` grid.
    #[inline]
    pub fn within(self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }

    /// Manhattan (rook-move) distance, ignoring wraparound.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for GridPos {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// How neighborhood queries treat the grid edges.
///
/// The choice changes model behaviour: social influence divides by a fixed
/// 8 neighbor slots, so on a bounded grid edge and corner agents see at most
/// 5 or 3 cells and are under-weighted.  A torus has no edges.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Topology {
    /// Coordinates wrap in both axes.
    #[default]
    Torus,
    /// Cells beyond the edge do not exist and are clipped from neighborhoods.
    Bounded,
}

impl Topology {
    pub fn as_str(self) -> &'static str {
        match self {
            Topology::Torus   => "torus",
            Topology::Bounded => "bounded",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
