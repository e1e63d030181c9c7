//! Hybrid selection: Dijkstra to choose, A* to budget

use super::{first_unreachable, DecisionContext, Pick, TargetSelector};
use crate::core::types::Position;

/// Picks the nearest candidate with one Dijkstra expansion and measures the
/// recharge legs with point-to-point A*
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridSelector;

impl TargetSelector for HybridSelector {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn description(&self) -> &'static str {
        "Dijkstra nearest for the candidate, A* for the recharge budget"
    }

    fn travel_cost(&self, ctx: &DecisionContext<'_>, from: Position, to: Position) -> Option<u32> {
        ctx.paths().distance(from, to)
    }

    fn pick(&self, ctx: &DecisionContext<'_>, candidates: &[Position]) -> Option<Pick> {
        ctx.paths()
            .nearest_target(ctx.agent.position, candidates)
            .map(|(target, cost)| Pick::reachable(target, cost))
            .or_else(|| first_unreachable(candidates))
    }
}
