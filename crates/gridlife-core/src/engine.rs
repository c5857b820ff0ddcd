//! Two-phase tick pipeline.
//!
//! Every occupied slot first produces a [`Plan`] against a shared borrow of
//! the grid. Only once all plans exist does the commit pass run, lifting each
//! agent out of its slot, letting it apply its plan, and writing it back
//! according to the returned [`Outcome`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::agent::Behavior;
use crate::grid::Grid;
use crate::{Coord, Lifecycle};

/// Movement staged during the decide pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Motion {
    #[default]
    Stay,
    /// Relocate to an empty neighbouring cell.
    Step(Coord),
    /// Step onto a sink and be destroyed.
    Plunge(Coord),
}

/// Staged change produced by [`Behavior::decide`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plan {
    /// Lifecycle to adopt on commit; `None` keeps the current one.
    pub next: Option<Lifecycle>,
    pub motion: Motion,
    /// Reverse the heading on commit (bouncers only).
    pub reflect: bool,
}

impl Plan {
    /// No change at all.
    #[must_use]
    pub const fn hold() -> Self {
        Self {
            next: None,
            motion: Motion::Stay,
            reflect: false,
        }
    }

    #[must_use]
    pub const fn with_state(next: Lifecycle) -> Self {
        Self {
            next: Some(next),
            motion: Motion::Stay,
            reflect: false,
        }
    }

    #[must_use]
    pub const fn step(dest: Coord) -> Self {
        Self {
            next: None,
            motion: Motion::Step(dest),
            reflect: false,
        }
    }

    #[must_use]
    pub const fn plunge(dest: Coord) -> Self {
        Self {
            next: None,
            motion: Motion::Plunge(dest),
            reflect: false,
        }
    }

    #[must_use]
    pub const fn reflect() -> Self {
        Self {
            next: None,
            motion: Motion::Stay,
            reflect: true,
        }
    }
}

/// What the engine should do with an agent after it commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Return the agent to the slot it decided from.
    Stay,
    /// Move the agent, provided the destination is still empty.
    MoveTo(Coord),
    /// Drop the agent; its slot stays empty.
    Vanish,
}

/// Counters collected while running one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Agents that took part in the tick.
    pub decided: usize,
    pub moved: usize,
    /// Moves dropped because an earlier committer claimed the cell first.
    pub conflicts: usize,
    /// Agents destroyed by sinks.
    pub consumed: usize,
    /// Agents that became stuck during this tick.
    pub newly_stuck: usize,
}

impl TickReport {
    /// Fold another report into this one.
    pub fn absorb(&mut self, other: &TickReport) {
        self.decided += other.decided;
        self.moved += other.moved;
        self.conflicts += other.conflicts;
        self.consumed += other.consumed;
        self.newly_stuck += other.newly_stuck;
    }
}

pub(crate) fn run_tick(grid: &mut Grid) -> TickReport {
    let plans = stage_decide(grid);
    let mut report = TickReport {
        decided: plans.len(),
        ..TickReport::default()
    };
    stage_commit(grid, plans, &mut report);
    report
}

fn stage_decide(grid: &Grid) -> Vec<(Coord, Plan)> {
    grid.occupied()
        .map(|(here, agent)| (here, agent.decide(here, grid)))
        .collect()
}

fn stage_commit(grid: &mut Grid, plans: Vec<(Coord, Plan)>, report: &mut TickReport) {
    // Walking the staged list rather than the grid keeps each agent to one
    // commit, even after it moves into a slot later in row-major order.
    for (origin, plan) in plans {
        let Some(mut agent) = grid.lift(origin) else {
            continue;
        };
        let was_stuck = agent.is_stuck();
        let outcome = agent.commit(plan, origin, grid);
        if !was_stuck && agent.is_stuck() {
            report.newly_stuck += 1;
            trace!(%origin, kind = agent.kind().as_str(), "agent stuck to barrier");
        }
        match outcome {
            Outcome::Stay => grid.restore(origin, agent),
            Outcome::MoveTo(dest) if dest == origin => grid.restore(origin, agent),
            Outcome::MoveTo(dest) if grid.is_empty(dest.row, dest.col) => {
                grid.restore(dest, agent);
                report.moved += 1;
            }
            Outcome::MoveTo(dest) => {
                report.conflicts += 1;
                trace!(%origin, %dest, "destination claimed earlier in the tick");
                grid.restore(origin, agent);
            }
            Outcome::Vanish => {
                report.consumed += 1;
                debug!(%origin, kind = agent.kind().as_str(), "agent consumed by sink");
            }
        }
    }
}
