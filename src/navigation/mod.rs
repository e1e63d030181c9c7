//! Shortest paths over the 4-connected grid
//!
//! Every edge costs 1. [`PathEngine::shortest_path`] and
//! [`PathEngine::distance`] run A* with the Manhattan heuristic;
//! [`PathEngine::multi_target_distances`] and [`PathEngine::nearest_target`]
//! run a single Dijkstra expansion against many targets at once.
//!
//! Nothing in here is random: the same grid and endpoints always give the
//! same answer, including which of several equally short paths is returned.

mod astar;
mod dijkstra;

use std::cmp::Ordering;

use crate::core::types::Position;
use crate::world::grid::GridMap;

/// A walkable path and its length
///
/// `path` excludes the starting cell and ends on the destination, so an
/// empty path means the agent is already there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub path: Vec<Position>,
    pub cost: u32,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn destination(&self) -> Option<Position> {
        self.path.last().copied()
    }
}

/// Read-only search engine bound to one grid
#[derive(Debug, Clone, Copy)]
pub struct PathEngine<'a> {
    grid: &'a GridMap,
}

impl<'a> PathEngine<'a> {
    pub fn new(grid: &'a GridMap) -> Self {
        Self { grid }
    }
}

/// Entry in a search frontier
///
/// Ordered as a min-heap on `priority`, ties going to whichever entry was
/// pushed first.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    pos: Position,
    priority: u32,
    cost: u32,
    order: u64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.order == other.order
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn entry(priority: u32, order: u64) -> FrontierEntry {
        FrontierEntry {
            pos: Position::new(0, 0),
            priority,
            cost: 0,
            order,
        }
    }

    #[test]
    fn test_frontier_pops_lowest_priority_first() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(5, 0));
        heap.push(entry(2, 1));
        heap.push(entry(9, 2));
        assert_eq!(heap.pop().map(|e| e.priority), Some(2));
        assert_eq!(heap.pop().map(|e| e.priority), Some(5));
    }

    #[test]
    fn test_frontier_ties_pop_in_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(3, 7));
        heap.push(entry(3, 1));
        heap.push(entry(3, 4));
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|e| e.order)).collect();
        assert_eq!(order, vec![1, 4, 7]);
    }

    #[test]
    fn test_route_helpers() {
        let route = Route {
            path: vec![Position::new(1, 0), Position::new(2, 0)],
            cost: 2,
        };
        assert!(!route.is_empty());
        assert_eq!(route.destination(), Some(Position::new(2, 0)));
        assert!(Route::default().is_empty());
    }
}
