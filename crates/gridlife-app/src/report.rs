//! JSON summary of a headless run.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use gridlife_core::{Census, TickReport, TickSummary, World};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub size: usize,
    pub scenario: &'static str,
    pub renderer: &'static str,
    pub initial: Census,
    pub ticks: Vec<TickSummary>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunSummary {
    pub ticks_simulated: u64,
    pub final_tick: u64,
    pub frames_drawn: usize,
    pub totals: TickReport,
    pub final_census: Census,
    pub peak_active: usize,
}

impl RunReport {
    #[must_use]
    pub fn new(world: &World, renderer: &'static str) -> Self {
        let initial = world.grid().census();
        Self {
            seed: world.seed(),
            size: world.config().size,
            scenario: world.config().scenario.label(),
            renderer,
            initial,
            ticks: Vec::new(),
            summary: RunSummary {
                final_tick: world.tick().0,
                final_census: initial,
                peak_active: initial.active,
                ..RunSummary::default()
            },
        }
    }

    pub fn record(&mut self, summary: TickSummary) {
        self.summary.ticks_simulated += 1;
        self.summary.final_tick = summary.tick.0;
        self.summary.totals.absorb(&summary.report);
        self.summary.final_census = summary.census;
        self.summary.peak_active = self.summary.peak_active.max(summary.census.active);
        self.ticks.push(summary);
    }

    pub fn note_frame(&mut self) {
        self.summary.frames_drawn += 1;
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self).context("failed to serialize run report")?;
        Ok(())
    }
}
