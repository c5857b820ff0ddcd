use serde::{Deserialize, Serialize};

use super::{Agent, Behavior, Vitals};
use crate::engine::{Outcome, Plan};
use crate::grid::Grid;
use crate::{Coord, Lifecycle, Rgb, Shape};

/// Goal-directed mover. Heads for the lattice centre while active and for
/// the origin while inactive; any obstruction flips its lifecycle, and with
/// it the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seeker {
    vitals: Vitals,
}

impl Seeker {
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

    /// Current goal on `grid`.
    #[must_use]
    pub fn target(&self, grid: &Grid) -> Coord {
        if self.vitals.lifecycle().is_active() {
            grid.center()
        } else {
            Coord::new(0, 0)
        }
    }
}

impl Behavior for Seeker {
    fn decide(&self, here: Coord, grid: &Grid) -> Plan {
        if self.vitals.is_stuck() {
            return Plan::hold();
        }
        let dest = here.step_toward(self.target(grid));
        if grid.is_empty(dest.row, dest.col) {
            return Plan::step(dest);
        }
        match grid.get(dest.row, dest.col) {
            Some(Agent::Sink(_)) => Plan::plunge(dest),
            // Hazards, other occupants, and our own cell once the target is
            // reached all turn the seeker around.
            _ => Plan::with_state(self.vitals.lifecycle().flipped()),
        }
    }

    fn commit(&mut self, plan: Plan, here: Coord, grid: &Grid) -> Outcome {
        let next = self.vitals.staged(&plan);
        self.vitals.settle(next, here, grid);
        self.vitals.resolve(plan.motion)
    }

    fn lifecycle(&self) -> Lifecycle {
        self.vitals.lifecycle()
    }

    fn color(&self) -> Rgb {
        if self.vitals.lifecycle().is_active() {
            Rgb::ORANGE
        } else {
            Rgb::YELLOW
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Hazard, Oscillator, Sink};
    use crate::engine::Motion;

    #[test]
    fn active_seeker_heads_for_centre() {
        let grid = Grid::new(50);
        let seeker = Seeker::new(true);
        let plan = seeker.decide(Coord::new(0, 0), &grid);
        assert_eq!(plan.motion, Motion::Step(Coord::new(1, 1)));
        assert_eq!(plan.next, None);
    }

    #[test]
    fn inactive_seeker_heads_for_origin() {
        let grid = Grid::new(50);
        let seeker = Seeker::new(false);
        let plan = seeker.decide(Coord::new(10, 3), &grid);
        assert_eq!(plan.motion, Motion::Step(Coord::new(9, 2)));
    }

    #[test]
    fn hazard_in_path_flips_without_moving() {
        let mut grid = Grid::new(50);
        grid.set(1, 1, Hazard::new(2).into());
        let seeker = Seeker::new(true);
        let plan = seeker.decide(Coord::new(0, 0), &grid);
        assert_eq!(plan.motion, Motion::Stay);
        assert_eq!(plan.next, Some(Lifecycle::Inactive));
    }

    #[test]
    fn occupied_path_flips_inactive_seeker_active() {
        let mut grid = Grid::new(50);
        grid.set(4, 4, Oscillator::new(false).into());
        let seeker = Seeker::new(false);
        let plan = seeker.decide(Coord::new(5, 5), &grid);
        assert_eq!(plan.motion, Motion::Stay);
        assert_eq!(plan.next, Some(Lifecycle::Active));
    }

    #[test]
    fn reaching_the_target_turns_around() {
        let mut grid = Grid::new(50);
        let centre = grid.center();
        grid.set(centre.row, centre.col, Seeker::new(true).into());
        let seeker = Seeker::new(true);
        let plan = seeker.decide(centre, &grid);
        assert_eq!(plan.motion, Motion::Stay);
        assert_eq!(plan.next, Some(Lifecycle::Inactive));
    }

    #[test]
    fn sink_in_path_is_a_plunge() {
        let mut grid = Grid::new(10);
        grid.span_row(5, Sink::new(5).into());
        let mut seeker = Seeker::new(true);
        let here = Coord::new(4, 2);
        let plan = seeker.decide(here, &grid);
        assert_eq!(plan.motion, Motion::Plunge(Coord::new(5, 3)));
        assert_eq!(seeker.commit(plan, here, &grid), Outcome::Vanish);
        assert!(!seeker.is_active());
    }

    #[test]
    fn colour_tracks_lifecycle() {
        assert_eq!(Seeker::new(true).color(), Rgb::ORANGE);
        assert_eq!(Seeker::new(false).color(), Rgb::YELLOW);
    }
}
