//! A* single-target search

use std::collections::BinaryHeap;

use ahash::AHashMap;

use super::{FrontierEntry, PathEngine, Route};
use crate::core::types::Position;

impl PathEngine<'_> {
    /// Find the shortest route using A*
    ///
    /// Returns `None` if the goal is blocked, out of bounds or unreachable.
    pub fn shortest_path(&self, start: Position, goal: Position) -> Option<Route> {
        let (cost, came_from) = self.astar(start, goal)?;
        let path = reconstruct_path(&came_from, start, goal);
        debug_assert_eq!(path.len() as u32, cost);
        Some(Route { path, cost })
    }

    /// Shortest route length without building the path
    pub fn distance(&self, start: Position, goal: Position) -> Option<u32> {
        self.astar(start, goal).map(|(cost, _)| cost)
    }

    fn astar(&self, start: Position, goal: Position) -> Option<(u32, AHashMap<Position, Position>)> {
        let mut came_from = AHashMap::new();

        if start == goal {
            return Some((0, came_from));
        }
        if !self.grid.contains(start) || !self.grid.is_free(goal) {
            return None;
        }

        let mut open_set = BinaryHeap::new();
        let mut g_scores: AHashMap<Position, u32> = AHashMap::new();
        let mut order = 0u64;

        g_scores.insert(start, 0);
        open_set.push(FrontierEntry {
            pos: start,
            priority: start.manhattan(&goal),
            cost: 0,
            order,
        });

        while let Some(current) = open_set.pop() {
            if current.pos == goal {
                return Some((current.cost, came_from));
            }

            // Skip entries superseded by a cheaper push
            if current.cost > g_scores.get(&current.pos).copied().unwrap_or(u32::MAX) {
                continue;
            }

            for neighbor in self.grid.passable_neighbors(current.pos) {
                let tentative_g = current.cost + 1;
                let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, current.pos);
                    g_scores.insert(neighbor, tentative_g);

                    order += 1;
                    open_set.push(FrontierEntry {
                        pos: neighbor,
                        priority: tentative_g + neighbor.manhattan(&goal),
                        cost: tentative_g,
                        order,
                    });
                }
            }
        }

        None // No path found
    }
}

/// Walk parents back from the goal; the start cell is left out
fn reconstruct_path(
    came_from: &AHashMap<Position, Position>,
    start: Position,
    mut current: Position,
) -> Vec<Position> {
    let mut path = Vec::new();
    while current != start {
        path.push(current);
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => break,
        }
    }
    path.reverse();
    path
}
