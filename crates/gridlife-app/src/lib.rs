//! Shared application plumbing for the GridLife runner.

use std::io::Write;

use anyhow::Result;
use gridlife_core::World;
use tracing::info;

pub mod renderer;
pub mod report;

pub use renderer::{AsciiRenderer, Renderer};
pub use report::{RunReport, RunSummary};

/// Knobs for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Number of ticks to simulate.
    pub ticks: u64,
    /// Draw a frame every `frame_every` ticks; 0 disables frames.
    pub frame_every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ticks: 100,
            frame_every: 0,
        }
    }
}

/// Advance `world` for `options.ticks` ticks, drawing frames into `out` as
/// requested, and return the collected report.
pub fn run_headless(
    world: &mut World,
    renderer: &dyn Renderer,
    options: RunOptions,
    out: &mut dyn Write,
) -> Result<RunReport> {
    let mut report = RunReport::new(world, renderer.name());
    if options.frame_every > 0 {
        draw_frame(world, renderer, out)?;
        report.note_frame();
    }

    for _ in 0..options.ticks {
        let summary = world.step();
        report.record(summary);
        if options.frame_every > 0 && summary.tick.0 % options.frame_every == 0 {
            draw_frame(world, renderer, out)?;
            report.note_frame();
        }
    }
    out.flush()?;

    info!(
        seed = report.seed,
        scenario = report.scenario,
        ticks_simulated = report.summary.ticks_simulated,
        frames = report.summary.frames_drawn,
        moved = report.summary.totals.moved,
        conflicts = report.summary.totals.conflicts,
        consumed = report.summary.totals.consumed,
        stuck = report.summary.final_census.stuck,
        final_population = report.summary.final_census.total(),
        "headless run completed"
    );
    Ok(report)
}

fn draw_frame(world: &World, renderer: &dyn Renderer, out: &mut dyn Write) -> Result<()> {
    let census = world.grid().census();
    writeln!(
        out,
        "tick {} | population {} | active {} | stuck {}",
        world.tick().0,
        census.total(),
        census.active,
        census.stuck
    )?;
    renderer.render(world.grid(), out)?;
    writeln!(out)?;
    Ok(())
}
