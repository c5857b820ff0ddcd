//! World wrapper: grid, clock, seeded randomness, and tick history.

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info};

use crate::agent::{Agent, Barrier, Bouncer, Hazard, Oscillator, ParityCell, Seeker, Sink};
use crate::config::{ConfigError, GridLifeConfig, SHOWCASE_BARRIER_ROWS, Scenario};
use crate::engine::TickReport;
use crate::grid::{Census, Grid, Placement};
use crate::{Coord, Tick};

/// Summary retained for each processed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: Tick,
    pub report: TickReport,
    pub census: Census,
}

/// Simulation state shared by the runner and any renderer.
pub struct World {
    config: GridLifeConfig,
    seed: u64,
    tick: Tick,
    rng: SmallRng,
    grid: Grid,
    history: VecDeque<TickSummary>,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("seed", &self.seed)
            .field("tick", &self.tick)
            .field("population", &self.grid.population())
            .finish()
    }
}

impl World {
    /// Instantiate a new world and lay out the configured scenario.
    pub fn new(config: GridLifeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (seed, rng) = config.seeded_rng();
        let history_capacity = config.history_capacity;
        let mut world = Self {
            grid: Grid::try_new(config.size)?,
            config,
            seed,
            tick: Tick::zero(),
            rng,
            history: VecDeque::with_capacity(history_capacity),
        };
        world.populate();
        info!(
            seed,
            size = world.config.size,
            scenario = world.config.scenario.label(),
            population = world.grid.population(),
            "world initialised"
        );
        Ok(world)
    }

    fn populate(&mut self) {
        match self.config.scenario.clone() {
            Scenario::Empty => {}
            Scenario::Showcase => self.populate_showcase(),
            Scenario::ParityField {
                top,
                left,
                extent,
                seeds,
            } => {
                for row in top..top + extent {
                    for col in left..left + extent {
                        let active = seeds.contains(&Coord::new(row, col));
                        self.place(row, col, ParityCell::new(active).into());
                    }
                }
            }
        }
    }

    fn populate_showcase(&mut self) {
        let last = i32::try_from(self.grid.size()).unwrap_or(i32::MAX) - 1;
        self.place(10, 10, Oscillator::new(true).into());
        self.place(15, 15, Oscillator::new(true).into());
        self.place(5, 5, Seeker::new(true).into());
        self.place(20, 20, Seeker::new(true).into());
        self.spawn_hazard(0, 0);
        self.spawn_hazard(0, last);
        self.spawn_bouncer(25, 25, true);
        self.spawn_bouncer(30, 30, true);
        // Written over the seeker at (5,5).
        self.spawn_bouncer(5, 5, true);
        for row in SHOWCASE_BARRIER_ROWS {
            self.span_barrier(row);
        }
    }

    /// Execute one tick and record its summary.
    pub fn step(&mut self) -> TickSummary {
        let report = self.grid.step();
        self.tick = self.tick.next();
        let summary = TickSummary {
            tick: self.tick,
            report,
            census: self.grid.census(),
        };
        debug!(
            tick = summary.tick.0,
            population = summary.census.total(),
            active = summary.census.active,
            moved = report.moved,
            conflicts = report.conflicts,
            consumed = report.consumed,
            newly_stuck = report.newly_stuck,
            "tick complete"
        );
        if self.history.len() == self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(summary);
        summary
    }

    /// Write an agent into the grid under the usual placement policy.
    pub fn place(&mut self, row: i32, col: i32, agent: Agent) -> Placement {
        self.grid.set(row, col, agent)
    }

    /// Place a bouncer whose heading is drawn from the world RNG.
    pub fn spawn_bouncer(&mut self, row: i32, col: i32, active: bool) -> Placement {
        let bouncer = Bouncer::random(active, &mut self.rng);
        self.place(row, col, bouncer.into())
    }

    /// Place a hazard whose starting colour is drawn from the world RNG.
    pub fn spawn_hazard(&mut self, row: i32, col: i32) -> Placement {
        let hazard = Hazard::random(&mut self.rng);
        self.place(row, col, hazard.into())
    }

    /// Lay a barrier across `row`; returns the number of cells written.
    pub fn span_barrier(&mut self, row: i32) -> usize {
        self.grid.span_row(row, Barrier::new(row).into())
    }

    /// Lay a sink across `row`; returns the number of cells written.
    pub fn span_sink(&mut self, row: i32) -> usize {
        self.grid.span_row(row, Sink::new(row).into())
    }

    #[must_use]
    pub fn config(&self) -> &GridLifeConfig {
        &self.config
    }

    /// Seed the world RNG was built from; replaying it reproduces the run.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Iterate over retained tick summaries, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &TickSummary> {
        self.history.iter()
    }
}
