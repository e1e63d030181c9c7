//! Cluster-weighted selection
//!
//! Prefers candidates that sit among other candidates, trading a little extra
//! travel now for short hops afterwards.

use super::{first_unreachable, DecisionContext, Pick, TargetSelector};
use crate::core::constants::{CLUSTER_RADIUS, CLUSTER_WEIGHT};
use crate::core::types::Position;

/// Scores each reachable candidate as `weight * neighbours - distance`
#[derive(Debug, Clone, Copy)]
pub struct ClusterWeightedSelector {
    /// Manhattan radius that counts as "nearby"
    pub radius: u32,
    /// Score per nearby candidate
    pub weight: i64,
}

impl ClusterWeightedSelector {
    pub fn new(radius: u32, weight: i64) -> Self {
        Self { radius, weight }
    }

    fn score(&self, cluster: usize, distance: u32) -> i64 {
        self.weight * cluster as i64 - i64::from(distance)
    }
}

impl Default for ClusterWeightedSelector {
    fn default() -> Self {
        Self::new(CLUSTER_RADIUS, CLUSTER_WEIGHT)
    }
}

/// Number of other candidates within `radius` (Manhattan) of `candidate`
pub fn cluster_score(candidate: Position, all: &[Position], radius: u32) -> usize {
    all.iter()
        .filter(|&&other| other != candidate && candidate.manhattan(&other) <= radius)
        .count()
}

impl TargetSelector for ClusterWeightedSelector {
    fn name(&self) -> &'static str {
        "cluster"
    }

    fn description(&self) -> &'static str {
        "Rewards candidates surrounded by other candidates, penalised by path length"
    }

    fn travel_cost(&self, ctx: &DecisionContext<'_>, from: Position, to: Position) -> Option<u32> {
        ctx.paths().distance(from, to)
    }

    fn pick(&self, ctx: &DecisionContext<'_>, candidates: &[Position]) -> Option<Pick> {
        let distances = ctx
            .paths()
            .multi_target_distances(ctx.agent.position, candidates);

        let mut best: Option<(i64, Pick)> = None;
        for &candidate in candidates {
            let Some(&distance) = distances.get(&candidate) else {
                continue;
            };
            let score = self.score(cluster_score(candidate, candidates, self.radius), distance);
            // Strictly greater: the first maximiser stays
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, Pick::reachable(candidate, distance)));
            }
        }

        best.map(|(_, pick)| pick)
            .or_else(|| first_unreachable(candidates))
    }
}
