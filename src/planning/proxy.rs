//! Manhattan-proxy selection
//!
//! Treats the grid as if it had no walls: every cost is the Manhattan
//! distance. Cheap, and often wrong next to long barriers.

use super::{cheapest_or_first, DecisionContext, Pick, TargetSelector};
use crate::core::types::Position;

/// Nearest candidate by Manhattan distance, ignoring obstacles
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxySelector;

impl TargetSelector for ProxySelector {
    fn name(&self) -> &'static str {
        "proxy"
    }

    fn description(&self) -> &'static str {
        "Nearest by Manhattan distance, walls ignored"
    }

    fn travel_cost(&self, _ctx: &DecisionContext<'_>, from: Position, to: Position) -> Option<u32> {
        Some(from.manhattan(&to))
    }

    fn pick(&self, ctx: &DecisionContext<'_>, candidates: &[Position]) -> Option<Pick> {
        let here = ctx.agent.position;
        cheapest_or_first(candidates, |c| Some(here.manhattan(&c)))
    }
}
