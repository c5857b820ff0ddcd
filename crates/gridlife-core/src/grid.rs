//! Square lattice of optional agent slots.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::{Agent, AgentKind, Behavior};
use crate::config::ConfigError;
use crate::engine::{self, TickReport};
use crate::{Coord, Lifecycle, MAX_GRID_SIZE, Rgb, Shape};

/// Result of [`Grid::set`].
///
/// Writes follow one fixed policy: barriers refuse every write, sinks swallow
/// cell-family agents, and everything else overwrites whatever was there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The slot was empty and now holds the agent.
    Placed,
    /// The agent overwrote a previous occupant, which is handed back.
    Replaced(Agent),
    /// A barrier occupies the slot; the agent is handed back untouched.
    Blocked(Agent),
    /// A sink occupies the slot and destroyed the incoming cell.
    Consumed,
    OutOfBounds(Agent),
}

impl Placement {
    /// Whether the agent now lives on the grid.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        matches!(self, Self::Placed | Self::Replaced(_))
    }
}

/// Observable copy of one occupied slot, handed to renderers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub coord: Coord,
    pub kind: AgentKind,
    pub lifecycle: Lifecycle,
    pub color: Rgb,
    pub shape: Shape,
    pub stuck: bool,
    pub steps: u64,
}

/// Per-kind occupancy counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub oscillators: usize,
    pub parity_cells: usize,
    pub seekers: usize,
    pub bouncers: usize,
    pub hazards: usize,
    pub barriers: usize,
    pub sinks: usize,
    pub active: usize,
    pub stuck: usize,
}

impl Census {
    /// Total number of occupied slots.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.oscillators
            + self.parity_cells
            + self.seekers
            + self.bouncers
            + self.hazards
            + self.barriers
            + self.sinks
    }

    /// Occupied slots holding cell-family agents.
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.oscillators + self.parity_cells + self.seekers + self.bouncers
    }

    fn record(&mut self, agent: &Agent) {
        let slot = match agent.kind() {
            AgentKind::Oscillator => &mut self.oscillators,
            AgentKind::ParityCell => &mut self.parity_cells,
            AgentKind::Seeker => &mut self.seekers,
            AgentKind::Bouncer => &mut self.bouncers,
            AgentKind::Hazard => &mut self.hazards,
            AgentKind::Barrier => &mut self.barriers,
            AgentKind::Sink => &mut self.sinks,
        };
        *slot += 1;
        if agent.is_active() {
            self.active += 1;
        }
        if agent.is_stuck() {
            self.stuck += 1;
        }
    }
}

/// N×N lattice that exclusively owns the agents placed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    slots: Vec<Option<Agent>>,
}

impl Grid {
    /// Empty `size`×`size` grid. Sizes above [`MAX_GRID_SIZE`] are clamped;
    /// use [`Grid::try_new`] to reject them instead.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let size = size.min(MAX_GRID_SIZE);
        Self {
            size,
            slots: vec![None; size * size],
        }
    }

    /// Empty `size`×`size` grid, refusing sizes that are zero, larger than
    /// [`MAX_GRID_SIZE`], or whose slot count overflows.
    pub fn try_new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidConfig("size must be non-zero"));
        }
        if size > MAX_GRID_SIZE {
            return Err(ConfigError::InvalidConfig("size exceeds MAX_GRID_SIZE"));
        }
        let cells = size
            .checked_mul(size)
            .ok_or(ConfigError::InvalidConfig("size exceeds MAX_GRID_SIZE"))?;
        Ok(Self {
            size,
            slots: vec![None; cells],
        })
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Centre cell, `(N/2, N/2)`.
    #[must_use]
    pub fn center(&self) -> Coord {
        let half = i32::try_from(self.size / 2).unwrap_or(i32::MAX);
        Coord::new(half, half)
    }

    /// Flat slot index for `coord`, or `None` outside the grid.
    #[inline]
    fn offset(&self, coord: Coord) -> Option<usize> {
        let row = usize::try_from(coord.row).ok()?;
        let col = usize::try_from(coord.col).ok()?;
        (row < self.size && col < self.size).then_some(row * self.size + col)
    }

    #[must_use]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        self.offset(Coord::new(row, col)).is_some()
    }

    /// Borrow the occupant of a slot. Out-of-range coordinates read as empty.
    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Option<&Agent> {
        self.get_at(Coord::new(row, col))
    }

    #[must_use]
    pub fn get_at(&self, coord: Coord) -> Option<&Agent> {
        self.offset(coord).and_then(|idx| self.slots[idx].as_ref())
    }

    /// True iff the cell is on the grid and unoccupied.
    #[must_use]
    pub fn is_empty(&self, row: i32, col: i32) -> bool {
        self.offset(Coord::new(row, col))
            .is_some_and(|idx| self.slots[idx].is_none())
    }

    /// Write `agent` into a slot, subject to the [`Placement`] policy.
    pub fn set(&mut self, row: i32, col: i32, agent: Agent) -> Placement {
        let coord = Coord::new(row, col);
        let Some(idx) = self.offset(coord) else {
            return Placement::OutOfBounds(agent);
        };
        match self.slots[idx].as_ref().map(Agent::kind) {
            Some(AgentKind::Barrier) => {
                debug!(%coord, kind = agent.kind().as_str(), "placement rejected by barrier");
                Placement::Blocked(agent)
            }
            Some(AgentKind::Sink) if agent.kind().is_cell() => {
                debug!(%coord, kind = agent.kind().as_str(), "placement consumed by sink");
                Placement::Consumed
            }
            _ => match self.slots[idx].replace(agent) {
                Some(previous) => Placement::Replaced(previous),
                None => Placement::Placed,
            },
        }
    }

    /// Remove and return the occupant of a slot.
    pub fn take(&mut self, row: i32, col: i32) -> Option<Agent> {
        self.lift(Coord::new(row, col))
    }

    pub(crate) fn lift(&mut self, coord: Coord) -> Option<Agent> {
        let idx = self.offset(coord)?;
        self.slots[idx].take()
    }

    /// Unconditional write used by the engine to put agents back after they
    /// commit. Callers have already checked the slot is free.
    pub(crate) fn restore(&mut self, coord: Coord, agent: Agent) {
        if let Some(idx) = self.offset(coord) {
            self.slots[idx] = Some(agent);
        }
    }

    /// Fill every column of `row` with copies of a static agent. Returns how
    /// many cells were written.
    pub fn span_row(&mut self, row: i32, agent: Agent) -> usize {
        let Ok(width) = i32::try_from(self.size) else {
            return 0;
        };
        (0..width)
            .filter(|&col| self.set(row, col, agent.clone()).is_placed())
            .count()
    }

    /// Number of active occupants in the Moore neighbourhood, centre
    /// excluded. Zero when `(row, col)` is off the grid.
    #[must_use]
    pub fn active_neighbor_count(&self, row: i32, col: i32) -> usize {
        let centre = Coord::new(row, col);
        if self.offset(centre).is_none() {
            return 0;
        }
        self.count_active(centre.moore())
    }

    /// Number of active occupants in the 3×3 block, centre included.
    #[must_use]
    pub fn active_block_count(&self, row: i32, col: i32) -> usize {
        let centre = Coord::new(row, col);
        if self.offset(centre).is_none() {
            return 0;
        }
        self.count_active(centre.block())
    }

    fn count_active(&self, cells: impl Iterator<Item = Coord>) -> usize {
        cells
            .filter_map(|coord| self.get_at(coord))
            .filter(|agent| agent.is_active())
            .count()
    }

    /// Whether a barrier sits on `(row, col)` or any Moore neighbour.
    #[must_use]
    pub fn barrier_adjacent(&self, row: i32, col: i32) -> bool {
        Coord::new(row, col)
            .block()
            .filter_map(|coord| self.get_at(coord))
            .any(Agent::is_barrier)
    }

    /// Occupied slots in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &Agent)> + '_ {
        let size = self.size;
        self.slots.iter().enumerate().filter_map(move |(idx, slot)| {
            let agent = slot.as_ref()?;
            let row = i32::try_from(idx / size).ok()?;
            let col = i32::try_from(idx % size).ok()?;
            Some((Coord::new(row, col), agent))
        })
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn population(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Copy out the observable state of every occupant, row-major.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.occupied()
            .map(|(coord, agent)| AgentSnapshot {
                coord,
                kind: agent.kind(),
                lifecycle: agent.lifecycle(),
                color: agent.color(),
                shape: agent.shape(),
                stuck: agent.is_stuck(),
                steps: agent.steps(),
            })
            .collect()
    }

    #[must_use]
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for (_, agent) in self.occupied() {
            census.record(agent);
        }
        census
    }

    /// Advance one tick: decide for every agent, then commit for every agent.
    pub fn step(&mut self) -> TickReport {
        engine::run_tick(self)
    }
}
