//! Dijkstra expansion against many targets at once
//!
//! One search from the origin answers the distance to every candidate, which
//! is far cheaper than one A* per candidate when there are many of them.

use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use super::{FrontierEntry, PathEngine};
use crate::core::types::Position;

/// What to do with a cell once its distance is final
enum Flow {
    /// Push its neighbours
    Expand,
    /// Keep the cell but do not grow the frontier past it
    Settle,
    /// End the search
    Stop,
}

impl PathEngine<'_> {
    /// Distances from `start` to every reachable target
    ///
    /// Stops as soon as all targets are settled. Unreachable targets are
    /// simply absent from the map.
    pub fn multi_target_distances(
        &self,
        start: Position,
        targets: &[Position],
    ) -> AHashMap<Position, u32> {
        let mut remaining: AHashSet<Position> = targets.iter().copied().collect();
        let mut found = AHashMap::with_capacity(remaining.len());

        if remaining.is_empty() {
            return found;
        }

        self.expand(start, |pos, cost| {
            if remaining.remove(&pos) {
                found.insert(pos, cost);
                if remaining.is_empty() {
                    return Flow::Stop;
                }
            }
            Flow::Expand
        });

        found
    }

    /// The closest reachable target and its distance
    ///
    /// Stops after the first distance layer that contains a target. When
    /// several targets share that distance, the one listed first wins.
    pub fn nearest_target(&self, start: Position, targets: &[Position]) -> Option<(Position, u32)> {
        let wanted: AHashSet<Position> = targets.iter().copied().collect();
        if wanted.is_empty() {
            return None;
        }

        let mut layer: Option<u32> = None;
        let mut hits = AHashSet::new();

        self.expand(start, |pos, cost| {
            let settled_layer = layer;
            match settled_layer {
                Some(best) if cost > best => Flow::Stop,
                Some(_) => {
                    if wanted.contains(&pos) {
                        hits.insert(pos);
                    }
                    Flow::Settle
                }
                None if wanted.contains(&pos) => {
                    layer = Some(cost);
                    hits.insert(pos);
                    Flow::Settle
                }
                None => Flow::Expand,
            }
        });

        let best = layer?;
        targets
            .iter()
            .find(|t| hits.contains(*t))
            .map(|&t| (t, best))
    }

    /// Shared Dijkstra loop; `visit` sees each cell once, in distance order
    fn expand(&self, start: Position, mut visit: impl FnMut(Position, u32) -> Flow) {
        if !self.grid.contains(start) {
            return;
        }

        let mut frontier = BinaryHeap::new();
        let mut best: AHashMap<Position, u32> = AHashMap::new();
        let mut settled: AHashSet<Position> = AHashSet::new();
        let mut order = 0u64;

        best.insert(start, 0);
        frontier.push(FrontierEntry {
            pos: start,
            priority: 0,
            cost: 0,
            order,
        });

        while let Some(current) = frontier.pop() {
            if !settled.insert(current.pos) {
                continue;
            }

            match visit(current.pos, current.cost) {
                Flow::Stop => return,
                Flow::Settle => continue,
                Flow::Expand => {}
            }

            for neighbor in self.grid.passable_neighbors(current.pos) {
                let new_cost = current.cost + 1;
                if new_cost < best.get(&neighbor).copied().unwrap_or(u32::MAX) {
                    best.insert(neighbor, new_cost);
                    order += 1;
                    frontier.push(FrontierEntry {
                        pos: neighbor,
                        priority: new_cost,
                        cost: new_cost,
                        order,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::types::Position;
    use crate::navigation::PathEngine;
    use crate::world::grid::GridMap;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn walled() -> GridMap {
        GridMap::from_ascii(
            "
            ........
            .######.
            ........
            ......#.
            .....#.#
            ......#.
            ........
            ........
            ",
        )
        .unwrap()
    }

    #[test]
    fn test_multi_target_distances() {
        let grid = walled();
        let engine = PathEngine::new(&grid);

        let dists = engine.multi_target_distances(p(0, 0), &[p(7, 0), p(0, 2), p(3, 2)]);

        assert_eq!(dists.get(&p(7, 0)), Some(&7));
        assert_eq!(dists.get(&p(0, 2)), Some(&2));
        assert_eq!(dists.get(&p(3, 2)), Some(&5));
    }

    #[test]
    fn test_unreachable_targets_are_omitted() {
        let grid = walled();
        let engine = PathEngine::new(&grid);

        let dists = engine.multi_target_distances(p(0, 0), &[p(6, 4), p(1, 1), p(7, 7)]);

        // (6, 4) is walled in, (1, 1) is a wall
        assert_eq!(dists.len(), 1);
        assert_eq!(dists.get(&p(7, 7)), Some(&14));
    }

    #[test]
    fn test_start_is_its_own_target() {
        let grid = GridMap::new(4);
        let engine = PathEngine::new(&grid);

        let dists = engine.multi_target_distances(p(2, 2), &[p(2, 2)]);
        assert_eq!(dists.get(&p(2, 2)), Some(&0));
        assert_eq!(engine.nearest_target(p(2, 2), &[p(3, 3), p(2, 2)]), Some((p(2, 2), 0)));
    }

    #[test]
    fn test_empty_targets() {
        let grid = GridMap::new(4);
        let engine = PathEngine::new(&grid);

        assert!(engine.multi_target_distances(p(0, 0), &[]).is_empty());
        assert_eq!(engine.nearest_target(p(0, 0), &[]), None);
    }

    #[test]
    fn test_nearest_target_uses_true_distance() {
        let grid = walled();
        let engine = PathEngine::new(&grid);

        // (3, 2) is two cells away as the crow flies but eight around the
        // wall; (0, 0) is three away.
        let nearest = engine.nearest_target(p(3, 0), &[p(3, 2), p(0, 0)]);
        assert_eq!(nearest, Some((p(0, 0), 3)));
        assert_eq!(engine.distance(p(3, 0), p(3, 2)), Some(8));
    }

    #[test]
    fn test_nearest_target_tie_goes_to_first_listed() {
        let grid = GridMap::new(7);
        let engine = PathEngine::new(&grid);

        let a = engine.nearest_target(p(3, 3), &[p(3, 0), p(0, 3), p(6, 3)]);
        let b = engine.nearest_target(p(3, 3), &[p(6, 3), p(3, 0), p(0, 3)]);
        assert_eq!(a, Some((p(3, 0), 3)));
        assert_eq!(b, Some((p(6, 3), 3)));
    }

    #[test]
    fn test_nearest_target_none_reachable() {
        let grid = walled();
        let engine = PathEngine::new(&grid);

        assert_eq!(engine.nearest_target(p(0, 0), &[p(6, 4)]), None);
    }

    #[test]
    fn test_dijkstra_agrees_with_astar() {
        let grid = walled();
        let engine = PathEngine::new(&grid);
        let start = p(2, 6);
        let targets: Vec<Position> = (0..8)
            .flat_map(|y| (0..8).map(move |x| p(x, y)))
            .collect();

        let dists = engine.multi_target_distances(start, &targets);
        for target in &targets {
            assert_eq!(dists.get(target).copied(), engine.distance(start, *target), "{}", target);
        }
    }
}
