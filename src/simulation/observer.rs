//! Read-only hooks into a running simulation
//!
//! The stepper hands a [`Snapshot`] to its observer after every single move.
//! Observers cannot change the run; they only look.

use tracing::trace;

use crate::core::types::Position;
use crate::world::grid::GridMap;

use super::agent::Agent;
use super::metrics::RunMetrics;

/// The world as it stands right after a move
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a GridMap,
    pub agent: &'a Agent,
    pub metrics: &'a RunMetrics,
    /// Cells of the current route still ahead of the agent
    pub route: &'a [Position],
    pub packages: &'a [Position],
    pub goals: &'a [Position],
    pub recharger: Position,
}

pub trait StepObserver {
    fn on_move(&mut self, snapshot: &Snapshot<'_>);
}

/// Ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl StepObserver for NullObserver {
    fn on_move(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// Logs every move, plus a rendered frame when `frames` is set
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    pub frames: bool,
}

impl TracingObserver {
    pub fn new(frames: bool) -> Self {
        Self { frames }
    }
}

impl StepObserver for TracingObserver {
    fn on_move(&mut self, snapshot: &Snapshot<'_>) {
        trace!(
            step = snapshot.metrics.steps,
            position = %snapshot.agent.position,
            battery = snapshot.agent.battery,
            cargo = snapshot.agent.cargo,
            score = snapshot.metrics.score,
            "Move"
        );
        if self.frames {
            trace!("\n{}", render_frame(snapshot));
        }
    }
}

/// Text picture of a snapshot, one line per row plus a status line
///
/// `#` wall, `.` free, `P` package, `G` goal, `R` recharger, `*` route,
/// `@` agent. Later symbols in that list win when cells coincide.
pub fn render_frame(snapshot: &Snapshot<'_>) -> String {
    let size = snapshot.grid.size();
    let mut rows: Vec<Vec<char>> = (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    if snapshot.grid.is_blocked(Position::new(x as i32, y as i32)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();

    let mut paint = |pos: Position, symbol: char| {
        if snapshot.grid.contains(pos) {
            rows[pos.y as usize][pos.x as usize] = symbol;
        }
    };

    for &pos in snapshot.packages {
        paint(pos, 'P');
    }
    for &pos in snapshot.goals {
        paint(pos, 'G');
    }
    paint(snapshot.recharger, 'R');
    for &pos in snapshot.route {
        paint(pos, '*');
    }
    paint(snapshot.agent.position, '@');

    let mut frame = String::with_capacity((size + 1) * size + 64);
    for row in rows {
        frame.extend(row);
        frame.push('\n');
    }
    frame.push_str(&format!(
        "steps {} | score {} | battery {} | cargo {} | deliveries {}",
        snapshot.metrics.steps,
        snapshot.metrics.score,
        snapshot.agent.battery,
        snapshot.agent.cargo,
        snapshot.metrics.deliveries
    ));
    frame
}
