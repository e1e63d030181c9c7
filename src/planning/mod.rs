//! Target selection for the delivery agent
//!
//! Architecture: one trait, several strategies
//! - `TargetSelector` holds the shared decision procedure (forced recharge,
//!   cargo branches, battery feasibility) as a provided method
//! - each strategy only decides how to measure travel cost and how to pick
//!   one candidate out of a set
//! - `SelectorRegistry` builds strategies by name

pub mod cluster;
pub mod feasibility;
pub mod hybrid;
pub mod nearest;
pub mod proxy;
pub mod registry;

pub use cluster::ClusterWeightedSelector;
pub use feasibility::can_safely_visit;
pub use hybrid::HybridSelector;
pub use nearest::{AStarNearestSelector, DijkstraNearestSelector};
pub use proxy::ProxySelector;
pub use registry::SelectorRegistry;

use std::fmt;

use crate::core::types::Position;
use crate::navigation::PathEngine;
use crate::simulation::agent::Agent;
use crate::world::grid::GridMap;

/// Read-only view of the world handed to a selector
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub agent: &'a Agent,
    pub packages: &'a [Position],
    pub goals: &'a [Position],
    pub recharger: Position,
    pub grid: &'a GridMap,
}

impl<'a> DecisionContext<'a> {
    pub fn paths(&self) -> PathEngine<'a> {
        PathEngine::new(self.grid)
    }
}

/// Which cargo rule produced the candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Empty-handed: go get a package
    Pickup,
    /// Carrying as many units as there are goals left
    Deliver,
    /// Carrying something, packages remain: anything goes
    Mixed,
}

/// Why a position was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetReason {
    /// Battery at or below the cost of getting back to the recharger
    ForcedRecharge,
    /// The candidate passed the feasibility check
    Selected(Branch),
    /// The candidate failed the feasibility check; recharge instead
    Diverted(Branch),
}

/// The selector's answer for one decision cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub position: Position,
    pub reason: TargetReason,
}

impl Target {
    pub fn new(position: Position, reason: TargetReason) -> Self {
        Self { position, reason }
    }
}

impl fmt::Display for TargetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetReason::ForcedRecharge => f.write_str("forced recharge"),
            TargetReason::Selected(branch) => write!(f, "{:?}", branch),
            TargetReason::Diverted(branch) => write!(f, "{:?} diverted to recharger", branch),
        }
    }
}

/// A chosen candidate with the selector's own cost estimate
///
/// `cost` is `None` when the selector could not reach the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub position: Position,
    pub cost: Option<u32>,
}

impl Pick {
    pub fn reachable(position: Position, cost: u32) -> Self {
        Self {
            position,
            cost: Some(cost),
        }
    }

    pub fn unreachable(position: Position) -> Self {
        Self {
            position,
            cost: None,
        }
    }
}

/// Trait for target selection strategies
pub trait TargetSelector {
    /// Registry name
    fn name(&self) -> &'static str;

    /// One-line description for listings
    fn description(&self) -> &'static str;

    /// Travel cost as this strategy measures it (`None` = unreachable)
    fn travel_cost(&self, ctx: &DecisionContext<'_>, from: Position, to: Position) -> Option<u32>;

    /// Choose one candidate from a non-empty set
    fn pick(&self, ctx: &DecisionContext<'_>, candidates: &[Position]) -> Option<Pick>;

    /// Next destination, or `None` if there is nothing left to do
    fn choose_target(&self, ctx: &DecisionContext<'_>) -> Option<Target> {
        let agent = ctx.agent;

        let return_cost = self.travel_cost(ctx, agent.position, ctx.recharger);
        if must_recharge(agent.battery, return_cost) {
            return Some(Target::new(ctx.recharger, TargetReason::ForcedRecharge));
        }

        let (branch, candidates) = candidate_set(ctx)?;
        let pick = self.pick(ctx, &candidates)?;
        let back = self.travel_cost(ctx, pick.position, ctx.recharger);

        if can_safely_visit(agent.battery, pick.cost, back, agent.profile) {
            Some(Target::new(pick.position, TargetReason::Selected(branch)))
        } else {
            Some(Target::new(ctx.recharger, TargetReason::Diverted(branch)))
        }
    }
}

/// Battery at or below the way home (or no way home at all)
fn must_recharge(battery: i32, return_cost: Option<u32>) -> bool {
    match return_cost {
        Some(cost) => i64::from(battery) <= i64::from(cost),
        None => true,
    }
}

/// Apply the cargo rules in order; the first with candidates wins
fn candidate_set(ctx: &DecisionContext<'_>) -> Option<(Branch, Vec<Position>)> {
    let cargo = ctx.agent.cargo as usize;

    if cargo == 0 && !ctx.packages.is_empty() {
        return Some((Branch::Pickup, ctx.packages.to_vec()));
    }

    if cargo == ctx.goals.len() && !ctx.goals.is_empty() {
        return Some((Branch::Deliver, ctx.goals.to_vec()));
    }

    if cargo > 0 && !ctx.packages.is_empty() {
        let mut all = Vec::with_capacity(ctx.packages.len() + ctx.goals.len());
        all.extend_from_slice(ctx.packages);
        all.extend_from_slice(ctx.goals);
        return Some((Branch::Mixed, all));
    }

    None
}

/// Cheapest reachable candidate, first listed on ties
///
/// If nothing is reachable the first candidate comes back with an unknown
/// cost, the same answer an argmin over all-infinite costs gives.
pub(crate) fn cheapest_or_first(
    candidates: &[Position],
    mut cost: impl FnMut(Position) -> Option<u32>,
) -> Option<Pick> {
    candidates
        .iter()
        .filter_map(|&c| cost(c).map(|d| (c, d)))
        .min_by_key(|&(_, d)| d)
        .map(|(c, d)| Pick::reachable(c, d))
        .or_else(|| first_unreachable(candidates))
}

pub(crate) fn first_unreachable(candidates: &[Position]) -> Option<Pick> {
    candidates.first().map(|&c| Pick::unreachable(c))
}
