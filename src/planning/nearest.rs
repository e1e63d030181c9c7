//! True-distance nearest selection
//!
//! Both selectors here pick the candidate with the shortest real path. They
//! differ only in how many searches that takes.

use super::{cheapest_or_first, first_unreachable, DecisionContext, Pick, TargetSelector};
use crate::core::types::Position;

/// One A* search per candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarNearestSelector;

impl TargetSelector for AStarNearestSelector {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn description(&self) -> &'static str {
        "Nearest by true path length, one A* search per candidate"
    }

    fn travel_cost(&self, ctx: &DecisionContext<'_>, from: Position, to: Position) -> Option<u32> {
        ctx.paths().distance(from, to)
    }

    fn pick(&self, ctx: &DecisionContext<'_>, candidates: &[Position]) -> Option<Pick> {
        let paths = ctx.paths();
        let here = ctx.agent.position;
        cheapest_or_first(candidates, |c| paths.distance(here, c))
    }
}

/// A single Dijkstra expansion over the whole candidate set
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraNearestSelector;

impl TargetSelector for DijkstraNearestSelector {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn description(&self) -> &'static str {
        "Nearest by true path length, one Dijkstra expansion for all candidates"
    }

    fn travel_cost(&self, ctx: &DecisionContext<'_>, from: Position, to: Position) -> Option<u32> {
        ctx.paths().nearest_target(from, &[to]).map(|(_, cost)| cost)
    }

    fn pick(&self, ctx: &DecisionContext<'_>, candidates: &[Position]) -> Option<Pick> {
        ctx.paths()
            .nearest_target(ctx.agent.position, candidates)
            .map(|(target, cost)| Pick::reachable(target, cost))
            .or_else(|| first_unreachable(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::BatteryProfile;
    use crate::planning::{Branch, ProxySelector, TargetReason};
    use crate::simulation::agent::Agent;
    use crate::world::grid::GridMap;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn barrier() -> GridMap {
        GridMap::from_ascii(
            "
            .......
            ######.
            .......
            .......
            .......
            .......
            .......
            ",
        )
        .unwrap()
    }

    #[test]
    fn test_graph_selectors_see_the_wall() {
        let grid = barrier();
        let agent = Agent::new(p(0, 0), 90, BatteryProfile::Adventurous);
        // (0, 2): Manhattan 2, true distance 14. (4, 0): both 4.
        let packages = [p(0, 2), p(4, 0)];
        let ctx = DecisionContext {
            agent: &agent,
            packages: &packages,
            goals: &[p(6, 6)],
            recharger: p(3, 3),
            grid: &grid,
        };

        let astar = AStarNearestSelector.choose_target(&ctx).unwrap();
        let dijkstra = DijkstraNearestSelector.choose_target(&ctx).unwrap();
        let proxy = ProxySelector.choose_target(&ctx).unwrap();

        assert_eq!(astar.position, p(4, 0));
        assert_eq!(dijkstra.position, p(4, 0));
        assert_eq!(proxy.position, p(0, 2));
    }

    #[test]
    fn test_astar_and_dijkstra_agree_on_costs() {
        let grid = barrier();
        let agent = Agent::new(p(0, 0), 90, BatteryProfile::Adventurous);
        let ctx = DecisionContext {
            agent: &agent,
            packages: &[],
            goals: &[],
            recharger: p(3, 3),
            grid: &grid,
        };

        for to in [p(0, 2), p(6, 6), p(3, 3), p(0, 0)] {
            assert_eq!(
                AStarNearestSelector.travel_cost(&ctx, p(0, 0), to),
                DijkstraNearestSelector.travel_cost(&ctx, p(0, 0), to)
            );
        }
    }

    #[test]
    fn test_unreachable_candidates_fall_back_to_first() {
        let grid = GridMap::from_ascii(
            "
            .....
            .....
            ...#.
            ..#.#
            ...#.
            ",
        )
        .unwrap();
        let agent = Agent::new(p(0, 0), 90, BatteryProfile::Adventurous);
        let goals = [p(3, 3)];
        let ctx = DecisionContext {
            agent: &agent,
            packages: &[],
            goals: &goals,
            recharger: p(1, 1),
            grid: &grid,
        };

        assert_eq!(
            AStarNearestSelector.pick(&ctx, &goals),
            Some(Pick::unreachable(p(3, 3)))
        );
        assert_eq!(
            DijkstraNearestSelector.pick(&ctx, &goals),
            Some(Pick::unreachable(p(3, 3)))
        );
    }

    #[test]
    fn test_unreachable_candidate_diverts_careful_agent() {
        let grid = GridMap::from_ascii(
            "
            .....
            .....
            ...#.
            ..#.#
            ...#.
            ",
        )
        .unwrap();
        let mut agent = Agent::new(p(0, 0), 90, BatteryProfile::Conservative);
        agent.cargo = 1;
        let goals = [p(3, 3)];
        let ctx = DecisionContext {
            agent: &agent,
            packages: &[],
            goals: &goals,
            recharger: p(1, 1),
            grid: &grid,
        };

        let target = DijkstraNearestSelector.choose_target(&ctx).unwrap();
        assert_eq!(target.position, p(1, 1));
        assert_eq!(target.reason, TargetReason::Diverted(Branch::Deliver));
    }
}
