//! Agent variants and the capability trait the engine drives them through.

mod bouncer;
mod cell;
mod hazard;
mod seeker;
mod wall;

pub use bouncer::{Bouncer, Heading};
pub use cell::{Oscillator, ParityCell};
pub use hazard::{Hazard, PALETTE};
pub use seeker::Seeker;
pub use wall::{Barrier, Sink};

use serde::{Deserialize, Serialize};

use crate::engine::{Motion, Outcome, Plan};
use crate::grid::Grid;
use crate::{Coord, Lifecycle, Rgb, Shape};

/// Capability set shared by every agent variant.
///
/// `decide` only sees shared borrows, so it cannot touch the grid. All
/// relocation happens through the [`Outcome`] returned by `commit`, which the
/// engine applies after the agent is done.
pub trait Behavior {
    /// Compute the staged change for this tick from the grid as it stood at
    /// the start of the tick.
    fn decide(&self, here: Coord, grid: &Grid) -> Plan;

    /// Apply a staged plan. `here` is the slot the agent decided from; the
    /// agent has been lifted out of it while it commits.
    fn commit(&mut self, plan: Plan, here: Coord, grid: &Grid) -> Outcome;

    fn lifecycle(&self) -> Lifecycle;

    fn is_active(&self) -> bool {
        self.lifecycle().is_active()
    }

    fn color(&self) -> Rgb;

    fn shape(&self) -> Shape {
        Shape::Square
    }

    /// Whether the agent has touched a barrier and can no longer relocate.
    fn is_stuck(&self) -> bool {
        false
    }

    /// Number of commits processed so far.
    fn steps(&self) -> u64 {
        0
    }
}

/// Common state carried by every cell-family agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    lifecycle: Lifecycle,
    steps: u64,
    stuck: bool,
}

impl Vitals {
    #[must_use]
    pub const fn new(active: bool) -> Self {
        Self {
            lifecycle: Lifecycle::from_active(active),
            steps: 0,
            stuck: false,
        }
    }

    #[must_use]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub const fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// Staged lifecycle from `plan`, falling back to the current one.
    #[must_use]
    pub fn staged(&self, plan: &Plan) -> Lifecycle {
        plan.next.unwrap_or(self.lifecycle)
    }

    /// Apply a lifecycle and count the step without any barrier check.
    pub fn apply(&mut self, next: Lifecycle) {
        self.lifecycle = next;
        self.steps += 1;
    }

    /// Oscillator commit: apply the staged lifecycle, count the step, and
    /// latch `stuck` once a barrier sits on or next to `here`.
    pub fn settle(&mut self, next: Lifecycle, here: Coord, grid: &Grid) {
        self.apply(next);
        if !self.stuck && grid.barrier_adjacent(here.row, here.col) {
            self.stuck = true;
        }
    }

    /// Turn a staged motion into an outcome for a mover that has already
    /// settled. Stuck movers stay put; plunging into a sink kills the mover.
    pub fn resolve(&mut self, motion: Motion) -> Outcome {
        if self.stuck {
            return Outcome::Stay;
        }
        match motion {
            Motion::Stay => Outcome::Stay,
            Motion::Step(dest) => Outcome::MoveTo(dest),
            Motion::Plunge(_) => {
                self.lifecycle = Lifecycle::Inactive;
                Outcome::Vanish
            }
        }
    }
}

/// Discriminant for [`Agent`] used in snapshots and census counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Oscillator,
    ParityCell,
    Seeker,
    Bouncer,
    Hazard,
    Barrier,
    Sink,
}

impl AgentKind {
    /// Cell-family agents. Sinks consume these when they land on one.
    #[must_use]
    pub const fn is_cell(self) -> bool {
        matches!(
            self,
            Self::Oscillator | Self::ParityCell | Self::Seeker | Self::Bouncer
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oscillator => "oscillator",
            Self::ParityCell => "parity_cell",
            Self::Seeker => "seeker",
            Self::Bouncer => "bouncer",
            Self::Hazard => "hazard",
            Self::Barrier => "barrier",
            Self::Sink => "sink",
        }
    }
}

/// Closed set of agents a [`Grid`] can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Agent {
    Oscillator(Oscillator),
    ParityCell(ParityCell),
    Seeker(Seeker),
    Bouncer(Bouncer),
    Hazard(Hazard),
    Barrier(Barrier),
    Sink(Sink),
}

macro_rules! dispatch {
    ($agent:expr, $inner:ident => $body:expr) => {
        match $agent {
            Agent::Oscillator($inner) => $body,
            Agent::ParityCell($inner) => $body,
            Agent::Seeker($inner) => $body,
            Agent::Bouncer($inner) => $body,
            Agent::Hazard($inner) => $body,
            Agent::Barrier($inner) => $body,
            Agent::Sink($inner) => $body,
        }
    };
}

impl Agent {
    #[must_use]
    pub const fn kind(&self) -> AgentKind {
        match self {
            Self::Oscillator(_) => AgentKind::Oscillator,
            Self::ParityCell(_) => AgentKind::ParityCell,
            Self::Seeker(_) => AgentKind::Seeker,
            Self::Bouncer(_) => AgentKind::Bouncer,
            Self::Hazard(_) => AgentKind::Hazard,
            Self::Barrier(_) => AgentKind::Barrier,
            Self::Sink(_) => AgentKind::Sink,
        }
    }

    #[must_use]
    pub const fn is_barrier(&self) -> bool {
        matches!(self, Self::Barrier(_))
    }

    #[must_use]
    pub const fn is_hazard(&self) -> bool {
        matches!(self, Self::Hazard(_))
    }

    #[must_use]
    pub const fn is_sink(&self) -> bool {
        matches!(self, Self::Sink(_))
    }
}

impl Behavior for Agent {
    fn decide(&self, here: Coord, grid: &Grid) -> Plan {
        dispatch!(self, inner => inner.decide(here, grid))
    }

    fn commit(&mut self, plan: Plan, here: Coord, grid: &Grid) -> Outcome {
        dispatch!(self, inner => inner.commit(plan, here, grid))
    }

    fn lifecycle(&self) -> Lifecycle {
        dispatch!(self, inner => inner.lifecycle())
    }

    fn color(&self) -> Rgb {
        dispatch!(self, inner => inner.color())
    }

    fn shape(&self) -> Shape {
        dispatch!(self, inner => inner.shape())
    }

    fn is_stuck(&self) -> bool {
        dispatch!(self, inner => inner.is_stuck())
    }

    fn steps(&self) -> u64 {
        dispatch!(self, inner => inner.steps())
    }
}

impl From<Oscillator> for Agent {
    fn from(value: Oscillator) -> Self {
        Self::Oscillator(value)
    }
}

impl From<ParityCell> for Agent {
    fn from(value: ParityCell) -> Self {
        Self::ParityCell(value)
    }
}

impl From<Seeker> for Agent {
    fn from(value: Seeker) -> Self {
        Self::Seeker(value)
    }
}

impl From<Bouncer> for Agent {
    fn from(value: Bouncer) -> Self {
        Self::Bouncer(value)
    }
}

impl From<Hazard> for Agent {
    fn from(value: Hazard) -> Self {
        Self::Hazard(value)
    }
}

impl From<Barrier> for Agent {
    fn from(value: Barrier) -> Self {
        Self::Barrier(value)
    }
}

impl From<Sink> for Agent {
    fn from(value: Sink) -> Self {
        Self::Sink(value)
    }
}
