use serde::{Deserialize, Serialize};

use super::Behavior;
use crate::engine::{Outcome, Plan};
use crate::grid::Grid;
use crate::{Coord, Lifecycle, Rgb};

/// Full-row sticky wall. Cells that touch it stop relocating for good.
///
/// One `Barrier` value is stored per column; see [`Grid::span_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barrier {
    row: i32,
}

impl Barrier {
    #[must_use]
    pub const fn new(row: i32) -> Self {
        Self { row }
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

impl Behavior for Barrier {
    fn decide(&self, _here: Coord, _grid: &Grid) -> Plan {
        Plan::hold()
    }

    fn commit(&mut self, _plan: Plan, _here: Coord, _grid: &Grid) -> Outcome {
        Outcome::Stay
    }

    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::Active
    }

    fn color(&self) -> Rgb {
        Rgb::BLACK
    }
}

/// Full-row abyss. Cells that step onto it are removed from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sink {
    row: i32,
}

impl Sink {
    #[must_use]
    pub const fn new(row: i32) -> Self {
        Self { row }
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

impl Behavior for Sink {
    fn decide(&self, _here: Coord, _grid: &Grid) -> Plan {
        Plan::hold()
    }

    fn commit(&mut self, _plan: Plan, _here: Coord, _grid: &Grid) -> Outcome {
        Outcome::Stay
    }

    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::Active
    }

    fn color(&self) -> Rgb {
        Rgb::DARK_GRAY
    }
}
