//! Core types for the GridLife lattice simulation.
//!
//! A [`Grid`] owns every [`Agent`] placed on it and advances them in
//! synchronized ticks: all agents decide against the state at the start of
//! the tick, then all agents commit in the same row-major order.

pub mod agent;
pub mod config;
pub mod engine;
pub mod grid;
pub mod world;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use agent::{
    Agent, AgentKind, Barrier, Behavior, Bouncer, Hazard, Heading, Oscillator, PALETTE, ParityCell,
    Seeker, Sink, Vitals,
};
pub use config::{ConfigError, GridLifeConfig, Scenario};
pub use engine::{Motion, Outcome, Plan, TickReport};
pub use grid::{AgentSnapshot, Census, Grid, Placement};
pub use world::{TickSummary, World};

/// Edge length used when no explicit size is configured.
pub const DEFAULT_GRID_SIZE: usize = 50;

/// Largest accepted edge length.
pub const MAX_GRID_SIZE: usize = 2048;

/// Simulation clock (ticks processed since the world was built).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tick(pub u64);

impl Tick {
    /// Returns the next sequential tick.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

/// Lattice coordinate. Signed so that neighbour arithmetic can step off the
/// edge and be rejected by bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Coordinate shifted by `(dr, dc)`.
    #[must_use]
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    /// Unit step (per-axis sign) from `self` toward `target`.
    #[must_use]
    pub const fn step_toward(self, target: Coord) -> Self {
        Self::new(
            self.row + (target.row - self.row).signum(),
            self.col + (target.col - self.col).signum(),
        )
    }

    /// The eight Moore neighbours, row-major, without the centre.
    pub fn moore(self) -> impl Iterator<Item = Coord> {
        self.block().filter(move |coord| *coord != self)
    }

    /// The full 3×3 block centred on `self`, row-major.
    pub fn block(self) -> impl Iterator<Item = Coord> {
        (-1..=1).flat_map(move |dr| (-1..=1).map(move |dc| self.offset(dr, dc)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Lifecycle state shared by every agent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    #[default]
    Unknown,
    Active,
    Inactive,
}

impl Lifecycle {
    #[must_use]
    pub const fn from_active(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Active becomes Inactive and vice versa; Unknown resolves to Active.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive | Self::Unknown => Self::Active,
        }
    }
}

/// Display shape requested by an agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Shape {
    Round,
    Square,
}

/// 8-bit RGB colour reported to renderers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const DARK_GRAY: Self = Self(64, 64, 64);
    pub const GRAY: Self = Self(128, 128, 128);
    pub const RED: Self = Self(255, 0, 0);
    pub const ORANGE: Self = Self(255, 200, 0);
    pub const YELLOW: Self = Self(255, 255, 0);
    pub const GREEN: Self = Self(0, 255, 0);
    pub const CYAN: Self = Self(0, 255, 255);
    pub const BLUE: Self = Self(0, 0, 255);
    pub const MAGENTA: Self = Self(255, 0, 255);
}
