use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::{Agent, Behavior, Vitals};
use crate::engine::{Outcome, Plan};
use crate::grid::Grid;
use crate::{Coord, Lifecycle, Rgb, Shape};

/// Unit direction of travel for a [`Bouncer`]. Never the zero vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    dr: i32,
    dc: i32,
}

impl Heading {
    /// All eight legal headings, row-major.
    pub const ALL: [Heading; 8] = [
        Heading { dr: -1, dc: -1 },
        Heading { dr: -1, dc: 0 },
        Heading { dr: -1, dc: 1 },
        Heading { dr: 0, dc: -1 },
        Heading { dr: 0, dc: 1 },
        Heading { dr: 1, dc: -1 },
        Heading { dr: 1, dc: 0 },
        Heading { dr: 1, dc: 1 },
    ];

    /// Build a heading from per-axis components in `-1..=1`. Returns `None`
    /// for out-of-range components and for `(0, 0)`, which would never move.
    #[must_use]
    pub const fn new(dr: i32, dc: i32) -> Option<Self> {
        if dr < -1 || dr > 1 || dc < -1 || dc > 1 || (dr == 0 && dc == 0) {
            None
        } else {
            Some(Self { dr, dc })
        }
    }

    /// Draw each component uniformly from `{-1, 0, 1}`, redrawing the zero
    /// vector.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        loop {
            let dr = rng.random_range(-1..=1);
            let dc = rng.random_range(-1..=1);
            if let Some(heading) = Self::new(dr, dc) {
                return heading;
            }
        }
    }

    #[must_use]
    pub const fn dr(self) -> i32 {
        self.dr
    }

    #[must_use]
    pub const fn dc(self) -> i32 {
        self.dc
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            dr: -self.dr,
            dc: -self.dc,
        }
    }
}

/// Random walker that keeps its heading until something bounces it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bouncer {
    vitals: Vitals,
    heading: Heading,
}

impl Bouncer {
    #[must_use]
    pub const fn new(active: bool, heading: Heading) -> Self {
        Self {
            vitals: Vitals::new(active),
            heading,
        }
    }

    /// Bouncer with a heading drawn from `rng`.
    pub fn random(active: bool, rng: &mut dyn RngCore) -> Self {
        Self::new(active, Heading::random(rng))
    }

    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    #[must_use]
    pub const fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}

impl Behavior for Bouncer {
    fn decide(&self, here: Coord, grid: &Grid) -> Plan {
        if self.vitals.is_stuck() {
            return Plan::hold();
        }
        let dest = here.offset(self.heading.dr, self.heading.dc);
        if !grid.in_bounds(dest.row, dest.col) {
            return Plan::reflect();
        }
        match grid.get(dest.row, dest.col) {
            None => Plan::step(dest),
            Some(Agent::Hazard(_)) => Plan::with_state(Lifecycle::Inactive),
            Some(Agent::Barrier(_)) => Plan::hold(),
            Some(Agent::Sink(_)) => Plan::plunge(dest),
            Some(_) => Plan::reflect(),
        }
    }

    fn commit(&mut self, plan: Plan, here: Coord, grid: &Grid) -> Outcome {
        let next = self.vitals.staged(&plan);
        self.vitals.settle(next, here, grid);
        // A bouncer pinned by this commit keeps the heading it arrived with.
        if plan.reflect && !self.vitals.is_stuck() {
            self.heading = self.heading.reversed();
        }
        self.vitals.resolve(plan.motion)
    }

    fn lifecycle(&self) -> Lifecycle {
        self.vitals.lifecycle()
    }

    fn color(&self) -> Rgb {
        if self.vitals.lifecycle().is_active() {
            Rgb::GREEN
        } else {
            Rgb::GRAY
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
