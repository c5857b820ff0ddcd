//! Frame renderers for the headless runner.

use std::io::Write;

use anyhow::Result;
use gridlife_core::{Agent, AgentKind, Behavior, Grid};

pub trait Renderer {
    /// Stable identifier describing the renderer implementation (e.g., "ascii").
    fn name(&self) -> &'static str;

    /// Draw one frame of `grid` into `out`.
    fn render(&self, grid: &Grid, out: &mut dyn Write) -> Result<()>;
}

/// One character per slot, one line per row.
///
/// Cell-family agents print upper case while active and lower case otherwise;
/// fixtures print punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub const EMPTY: char = '.';

    #[must_use]
    pub fn glyph(agent: &Agent) -> char {
        let glyph = match agent.kind() {
            AgentKind::Oscillator => 'O',
            AgentKind::ParityCell => 'P',
            AgentKind::Seeker => 'S',
            AgentKind::Bouncer => 'B',
            AgentKind::Hazard => return '!',
            AgentKind::Barrier => return '=',
            AgentKind::Sink => return '~',
        };
        if agent.is_active() {
            glyph
        } else {
            glyph.to_ascii_lowercase()
        }
    }
}

impl Renderer for AsciiRenderer {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn render(&self, grid: &Grid, out: &mut dyn Write) -> Result<()> {
        let width = i32::try_from(grid.size())?;
        let mut line = String::with_capacity(grid.size() + 1);
        for row in 0..width {
            line.clear();
            line.extend(
                (0..width).map(|col| grid.get(row, col).map_or(Self::EMPTY, Self::glyph)),
            );
            line.push('\n');
            out.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlife_core::{Barrier, Bouncer, Hazard, Heading, Oscillator, Seeker, Sink};

    #[test]
    fn renders_one_glyph_per_slot() {
        let mut grid = Grid::new(4);
        grid.set(0, 0, Oscillator::new(true).into());
        grid.set(0, 3, Hazard::new(2).into());
        grid.set(1, 1, Seeker::new(false).into());
        let heading = Heading::new(1, 1).expect("heading");
        grid.set(1, 2, Bouncer::new(true, heading).into());
        grid.span_row(2, Barrier::new(2).into());
        grid.span_row(3, Sink::new(3).into());

        let mut out = Vec::new();
        AsciiRenderer.render(&grid, &mut out).expect("render");
        let frame = String::from_utf8(out).expect("utf8");
        assert_eq!(frame, "O..!\n.sB.\n====\n~~~~\n");
        assert_eq!(AsciiRenderer.name(), "ascii");
    }

    #[test]
    fn empty_grid_is_all_dots() {
        let grid = Grid::new(3);
        let mut out = Vec::new();
        AsciiRenderer.render(&grid, &mut out).expect("render");
        assert_eq!(out, b"...\n...\n...\n");
    }
}
