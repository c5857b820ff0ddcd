//! World configuration and validation.

use rand::{SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coord, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

/// Errors that can occur when constructing a world.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A scenario placement falls outside the configured grid.
    #[error("cell ({row}, {col}) lies outside a {size}x{size} grid")]
    OutOfBounds { row: i32, col: i32, size: usize },
}

/// Initial population laid out when a world is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scenario {
    /// No agents.
    Empty,
    /// A little of everything: oscillators, seekers, hazards in the top
    /// corners, bouncers, and barrier rows at 4 and 19.
    #[default]
    Showcase,
    /// Square block of parity cells with selected cells switched on.
    ParityField {
        top: i32,
        left: i32,
        extent: i32,
        seeds: Vec<Coord>,
    },
}

impl Scenario {
    /// 10×10 parity field in the lower-left corner of a 50×50 grid, seeded
    /// with an L-shaped triple.
    #[must_use]
    pub fn parity_field() -> Self {
        Self::ParityField {
            top: 40,
            left: 0,
            extent: 10,
            seeds: vec![Coord::new(44, 5), Coord::new(45, 4), Coord::new(45, 5)],
        }
    }

    /// Stable identifier used in logs and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Showcase => "showcase",
            Self::ParityField { .. } => "parity_field",
        }
    }

    /// Cells the scenario writes to, for bounds validation.
    fn footprint(&self, size: usize) -> Vec<Coord> {
        match self {
            Self::Empty => Vec::new(),
            Self::Showcase => {
                let last = i32::try_from(size).map_or(i32::MAX, |n| n - 1);
                let mut cells = SHOWCASE_CELLS.to_vec();
                cells.push(Coord::new(0, last));
                cells.extend(SHOWCASE_BARRIER_ROWS.iter().map(|&row| Coord::new(row, 0)));
                cells
            }
            Self::ParityField {
                top,
                left,
                extent,
                seeds,
            } => {
                let far = extent.saturating_sub(1);
                let mut cells = vec![
                    Coord::new(*top, *left),
                    Coord::new(top.saturating_add(far), left.saturating_add(far)),
                ];
                cells.extend_from_slice(seeds);
                cells
            }
        }
    }
}

/// Fixed showcase positions (the top-right hazard depends on the size).
pub(crate) const SHOWCASE_CELLS: [Coord; 7] = [
    Coord::new(10, 10),
    Coord::new(15, 15),
    Coord::new(5, 5),
    Coord::new(20, 20),
    Coord::new(0, 0),
    Coord::new(25, 25),
    Coord::new(30, 30),
];

pub(crate) const SHOWCASE_BARRIER_ROWS: [i32; 2] = [4, 19];

/// Static configuration for a GridLife world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GridLifeConfig {
    /// Edge length of the square grid.
    pub size: usize,
    /// Optional RNG seed for reproducible worlds.
    pub rng_seed: Option<u64>,
    /// Population laid out at construction.
    pub scenario: Scenario,
    /// Maximum number of recent tick summaries retained in-memory.
    pub history_capacity: usize,
}

impl Default for GridLifeConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            rng_seed: None,
            scenario: Scenario::default(),
            history_capacity: 256,
        }
    }
}

impl GridLifeConfig {
    /// Checks sizes and that every scenario placement lands on the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::InvalidConfig("size must be non-zero"));
        }
        if self.size > MAX_GRID_SIZE {
            return Err(ConfigError::InvalidConfig("size exceeds MAX_GRID_SIZE"));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidConfig(
                "history_capacity must be non-zero",
            ));
        }
        if let Scenario::ParityField {
            top,
            left,
            extent,
            seeds,
        } = &self.scenario
        {
            if *extent <= 0 {
                return Err(ConfigError::InvalidConfig(
                    "parity field extent must be positive",
                ));
            }
            let (Some(bottom), Some(right)) = (top.checked_add(*extent), left.checked_add(*extent))
            else {
                return Err(ConfigError::InvalidConfig("parity field extent overflows"));
            };
            let inside = |coord: &Coord| {
                (*top..bottom).contains(&coord.row) && (*left..right).contains(&coord.col)
            };
            if !seeds.iter().all(inside) {
                return Err(ConfigError::InvalidConfig(
                    "parity seeds must lie inside the field",
                ));
            }
        }
        let limit = i32::try_from(self.size).unwrap_or(i32::MAX);
        let on_grid = |c: &Coord| (0..limit).contains(&c.row) && (0..limit).contains(&c.col);
        match self
            .scenario
            .footprint(self.size)
            .into_iter()
            .find(|coord| !on_grid(coord))
        {
            Some(coord) => Err(ConfigError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                size: self.size,
            }),
            None => Ok(()),
        }
    }

    /// Returns the seed to use, generating one from entropy if absent, along
    /// with an RNG seeded from it.
    #[must_use]
    pub fn seeded_rng(&self) -> (u64, SmallRng) {
        let seed = self.rng_seed.unwrap_or_else(rand::random);
        (seed, SmallRng::seed_from_u64(seed))
    }
}
