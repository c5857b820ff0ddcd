use serde::{Deserialize, Serialize};

use super::{Behavior, Vitals};
use crate::engine::{Outcome, Plan};
use crate::grid::Grid;
use crate::{Coord, Lifecycle, Rgb, Shape};

/// Base cell: toggles with the parity of its own step counter and ignores
/// its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oscillator {
    vitals: Vitals,
}

impl Oscillator {
    #[must_use]
    pub const fn new(active: bool) -> Self {
        Self {
            vitals: Vitals::new(active),
        }
    }

    #[must_use]
    pub const fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}

impl Behavior for Oscillator {
    fn decide(&self, _here: Coord, _grid: &Grid) -> Plan {
        Plan::with_state(Lifecycle::from_active(self.vitals.steps() % 2 == 0))
    }

    fn commit(&mut self, plan: Plan, here: Coord, grid: &Grid) -> Outcome {
        let next = self.vitals.staged(&plan);
        self.vitals.settle(next, here, grid);
        Outcome::Stay
    }

    fn lifecycle(&self) -> Lifecycle {
        self.vitals.lifecycle()
    }

    fn color(&self) -> Rgb {
        Rgb::BLACK
    }

    fn shape(&self) -> Shape {
        Shape::Round
    }

    fn is_stuck(&self) -> bool {
        self.vitals.is_stuck()
    }

    fn steps(&self) -> u64 {
        self.vitals.steps()
    }
}

/// Stationary cell that turns active when the 3×3 block around it,
/// itself included, holds an odd number of active agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityCell {
    vitals: Vitals,
}

impl ParityCell {
    #[must_use]
    pub const fn new(active: bool) -> Self {
        Self {
            vitals: Vitals::new(active),
        }
    }
}

impl Behavior for ParityCell {
    fn decide(&self, here: Coord, grid: &Grid) -> Plan {
        let count = grid.active_block_count(here.row, here.col);
        Plan::with_state(Lifecycle::from_active(count % 2 == 1))
    }

    fn commit(&mut self, plan: Plan, _here: Coord, _grid: &Grid) -> Outcome {
        let next = self.vitals.staged(&plan);
        self.vitals.apply(next);
        Outcome::Stay
    }

    fn lifecycle(&self) -> Lifecycle {
        self.vitals.lifecycle()
    }

    fn color(&self) -> Rgb {
        Rgb::GRAY
    }

    fn shape(&self) -> Shape {
        Shape::Round
    }

    fn steps(&self) -> u64 {
        self.vitals.steps()
    }
}
