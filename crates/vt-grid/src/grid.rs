//! The `MultiGrid` — cell occupancy and agent positions.

use rand::Rng;

use vt_core::{AgentId, GridPos, SimConfig, Topology};

use crate::{GridError, GridResult};

/// Which cells count as "adjacent" in a neighborhood query.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Neighborhood {
    /// The 8 surrounding cells, diagonals included.
    Moore,
    /// The 4 orthogonally adjacent cells.
    VonNeumann,
}

impl Neighborhood {
    /// Does the offset `(dx, dy)` (each in `-1..=1`) belong to this shape?
    #[inline]
    fn admits(self, dx: i64, dy: i64) -> bool {
        match self {
            Neighborhood::Moore      => true,
            Neighborhood::VonNeumann => dx.abs() + dy.abs() <= 1,
        }
    }
}

/// A `width × height` grid where any number of agents may share a cell.
///
/// Two indexes are kept in sync by every mutation:
///
/// - `cells[y * width + x]` — agents in that cell, in arrival order.
/// - `positions[agent.index()]` — the cell each agent occupies, or `None`
///   before placement.
///
/// All position-taking methods reject coordinates outside the grid with
/// [`GridError::OutOfBounds`].
pub struct MultiGrid {
    width:     u32,
    height:    u32,
    topology:  Topology,
    cells:     Vec<Vec<AgentId>>,
    positions: Vec<Option<GridPos>>,
}

impl MultiGrid {
    /// Create an empty grid.
    pub fn new(width: u32, height: u32, topology: Topology) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let cell_count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            topology,
            cells: vec![Vec::new(); cell_count],
            positions: Vec::new(),
        })
    }

    /// Create an empty grid with the dimensions and topology of `config`.
    pub fn from_config(config: &SimConfig) -> GridResult<Self> {
        Self::new(config.grid_width, config.grid_height, config.topology)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of agents currently placed.
    pub fn placed_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    /// `true` if `pos` lies on the grid.
    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.within(self.width, self.height)
    }

    /// `Ok(())` if `pos` lies on the grid, otherwise `OutOfBounds`.
    #[inline]
    pub fn check(&self, pos: GridPos) -> GridResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds { pos, width: self.width, height: self.height })
        }
    }

    #[inline]
    fn cell_index(&self, pos: GridPos) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    // ── Placement and movement ────────────────────────────────────────────

    /// Register `agent` at `pos`.  Any number of agents may share a cell.
    pub fn place_agent(&mut self, agent: AgentId, pos: GridPos) -> GridResult<()> {
        self.check(pos)?;
        if let Some(at) = self.position_of(agent) {
            return Err(GridError::AlreadyPlaced { agent, at });
        }
        if self.positions.len() <= agent.index() {
            self.positions.resize(agent.index() + 1, None);
        }
        let idx = self.cell_index(pos);
        self.cells[idx].push(agent);
        self.positions[agent.index()] = Some(pos);
        Ok(())
    }

    /// Relocate an already-placed `agent` to `pos`.
    ///
    /// Moving to the current cell is a no-op.
    pub fn move_agent(&mut self, agent: AgentId, pos: GridPos) -> GridResult<()> {
        self.check(pos)?;
        let from = self.position_of(agent).ok_or(GridError::AgentNotPlaced(agent))?;
        if from == pos {
            return Ok(());
        }
        self.detach(agent, from);
        let idx = self.cell_index(pos);
        self.cells[idx].push(agent);
        self.positions[agent.index()] = Some(pos);
        Ok(())
    }

    /// Take `agent` off the grid, returning the cell it occupied.
    pub fn remove_agent(&mut self, agent: AgentId) -> GridResult<GridPos> {
        let from = self.position_of(agent).ok_or(GridError::AgentNotPlaced(agent))?;
        self.detach(agent, from);
        self.positions[agent.index()] = None;
        Ok(from)
    }

    fn detach(&mut self, agent: AgentId, from: GridPos) {
        let idx = self.cell_index(from);
        let cell = &mut self.cells[idx];
        if let Some(i) = cell.iter().position(|&a| a == agent) {
            cell.remove(i);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The cell `agent` occupies, or `None` if it was never placed.
    #[inline]
    pub fn position_of(&self, agent: AgentId) -> Option<GridPos> {
        self.positions.get(agent.index()).copied().flatten()
    }

    /// Agents occupying `pos`, in arrival order.
    pub fn agents_at(&self, pos: GridPos) -> GridResult<&[AgentId]> {
        self.check(pos)?;
        Ok(&self.cells[self.cell_index(pos)])
    }

    /// `true` if no agent occupies `pos` (out-of-range cells are never empty).
    pub fn is_cell_empty(&self, pos: GridPos) -> bool {
        self.agents_at(pos).is_ok_and(<[AgentId]>::is_empty)
    }

    /// Cells adjacent to `pos` under `kind`, plus `pos` itself when
    /// `include_center` is set.
    ///
    /// Offsets are visited with `dx` in the outer loop and `dy` in the inner
    /// loop, both from -1 to 1.  On a torus, offsets wrap; on grids narrower
    /// than 3 cells the wrapped duplicates (and any wrap back onto `pos`
    /// when the centre is excluded) are dropped, so every returned cell is
    /// distinct.  On a bounded grid, offsets that leave the grid are
    /// skipped.
    pub fn neighborhood(
        &self,
        pos:            GridPos,
        kind:           Neighborhood,
        include_center: bool,
    ) -> GridResult<Vec<GridPos>> {
        self.check(pos)?;
        let (w, h) = (self.width as i64, self.height as i64);
        let mut out = Vec::with_capacity(9);

        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                let is_center = dx == 0 && dy == 0;
                if (is_center && !include_center) || !kind.admits(dx, dy) {
                    continue;
                }
                let (nx, ny) = (pos.x as i64 + dx, pos.y as i64 + dy);
                let cell = match self.topology {
                    Topology::Torus => GridPos::new(nx.rem_euclid(w) as u32, ny.rem_euclid(h) as u32),
                    Topology::Bounded => {
                        if nx < 0 || ny < 0 || nx >= w || ny >= h {
                            continue;
                        }
                        GridPos::new(nx as u32, ny as u32)
                    }
                };
                if !include_center && cell == pos {
                    continue;
                }
                if !out.contains(&cell) {
                    out.push(cell);
                }
            }
        }
        Ok(out)
    }

    /// Agents occupying the cells returned by [`neighborhood`](Self::neighborhood).
    pub fn neighbors(
        &self,
        pos:            GridPos,
        kind:           Neighborhood,
        include_center: bool,
    ) -> GridResult<impl Iterator<Item = AgentId> + '_> {
        let cells = self.neighborhood(pos, kind, include_center)?;
        Ok(cells
            .into_iter()
            .flat_map(move |c| self.cells[self.cell_index(c)].iter().copied()))
    }

    /// A cell drawn uniformly from `[0, width) × [0, height)`.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> GridPos {
        GridPos::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }
}
