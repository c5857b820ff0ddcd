use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::Behavior;
use crate::engine::{Outcome, Plan};
use crate::grid::Grid;
use crate::{Coord, Lifecycle, Rgb};

/// Rainbow cycled by every [`Hazard`], one entry per commit.
pub const PALETTE: [Rgb; 7] = [
    Rgb::RED,
    Rgb::ORANGE,
    Rgb::YELLOW,
    Rgb::GREEN,
    Rgb::CYAN,
    Rgb::BLUE,
    Rgb::MAGENTA,
];

/// Static poison. Deactivates movers that run into it and shifts colour
/// every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hazard {
    palette_index: usize,
}

impl Hazard {
    /// Hazard starting at `palette_index` (wrapped onto the palette).
    #[must_use]
    pub const fn new(palette_index: usize) -> Self {
        Self {
            palette_index: palette_index % PALETTE.len(),
        }
    }

    /// Hazard starting at a palette entry drawn from `rng`.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::new(rng.random_range(0..PALETTE.len()))
    }

    #[must_use]
    pub const fn palette_index(&self) -> usize {
        self.palette_index
    }
}

impl Behavior for Hazard {
    fn decide(&self, _here: Coord, _grid: &Grid) -> Plan {
        Plan::hold()
    }

    fn commit(&mut self, _plan: Plan, _here: Coord, _grid: &Grid) -> Outcome {
        self.palette_index = (self.palette_index + 1) % PALETTE.len();
        Outcome::Stay
    }

    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::Active
    }

    fn color(&self) -> Rgb {
        PALETTE[self.palette_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;
    use rand::{SeedableRng, rngs::SmallRng};

    #[test]
    fn seven_commits_return_to_the_start() {
        let grid = Grid::new(3);
        let here = Coord::new(1, 1);
        for start in 0..PALETTE.len() {
            let mut hazard = Hazard::new(start);
            let initial = hazard.color();
            for step in 1..=PALETTE.len() {
                let plan = hazard.decide(here, &grid);
                hazard.commit(plan, here, &grid);
                assert_eq!(hazard.color(), PALETTE[(start + step) % PALETTE.len()]);
            }
            assert_eq!(hazard.color(), initial);
        }
    }

    #[test]
    fn random_start_is_on_the_palette() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..32 {
            let hazard = Hazard::random(&mut rng);
            assert!(PALETTE.contains(&hazard.color()));
        }
    }

    #[test]
    fn always_active_and_square() {
        let hazard = Hazard::new(9);
        assert_eq!(hazard.palette_index(), 2);
        assert!(hazard.is_active());
        assert_eq!(hazard.shape(), Shape::Square);
    }
}
