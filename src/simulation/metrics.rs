//! Run counters and the per-run result record

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::constants::{DELIVERY_REWARD, DEPLETED_STEP_PENALTY, STEP_PENALTY};
use crate::core::types::Position;

/// Counters the stepper updates as the agent moves and delivers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub score: i32,
    pub steps: u32,
    pub deliveries: u32,
}

impl RunMetrics {
    /// Book one step; `depleted` reflects the battery after the step's drain
    pub fn record_step(&mut self, depleted: bool) {
        self.steps += 1;
        self.score -= if depleted {
            DEPLETED_STEP_PENALTY
        } else {
            STEP_PENALTY
        };
    }

    pub fn record_delivery(&mut self) {
        self.deliveries += 1;
        self.score += DELIVERY_REWARD;
    }
}

/// How a run ended
///
/// These are results, not errors: every run ends in exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Every goal received a delivery
    Completed,
    /// The selector had no candidate left to offer
    NoActionableTarget,
    /// No route leads from the agent's cell to the chosen target,
    /// including a target that is the agent's own cell
    PathNotFound { target: Position },
}

impl Outcome {
    /// Short machine-friendly label, used in CSV output
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Completed => "completed",
            Outcome::NoActionableTarget => "no_actionable_target",
            Outcome::PathNotFound { .. } => "path_not_found",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed => f.write_str("completed"),
            Outcome::NoActionableTarget => f.write_str("no actionable target"),
            Outcome::PathNotFound { target } => write!(f, "no path to {}", target),
        }
    }
}

/// One finished run, as written to result sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub selector: String,
    pub seed: u64,
    pub score: i32,
    pub steps: u32,
    pub deliveries: u32,
    /// Battery left when the run ended
    pub battery: i32,
    /// Wall-clock time of the run loop
    pub duration_secs: f64,
    pub outcome: Outcome,
}

impl RunResult {
    pub fn new(
        selector: &str,
        seed: u64,
        metrics: RunMetrics,
        battery: i32,
        duration: Duration,
        outcome: Outcome,
    ) -> Self {
        Self {
            selector: selector.to_string(),
            seed,
            score: metrics.score,
            steps: metrics.steps,
            deliveries: metrics.deliveries,
            battery,
            duration_secs: duration.as_secs_f64(),
            outcome,
        }
    }

    pub fn metrics(&self) -> RunMetrics {
        RunMetrics {
            score: self.score,
            steps: self.steps,
            deliveries: self.deliveries,
        }
    }
}

/// Aggregate over many runs of one selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub selector: String,
    pub runs: usize,
    pub mean_score: f64,
    pub mean_steps: f64,
    pub mean_deliveries: f64,
    /// Fraction of runs that ended `Completed`
    pub completion_rate: f64,
}

impl RunSummary {
    /// Summarise `results`; an empty slice gives all zeros
    pub fn from_results(selector: &str, results: &[RunResult]) -> Self {
        let runs = results.len();
        let mean = |value: fn(&RunResult) -> f64| {
            if runs == 0 {
                0.0
            } else {
                results.iter().map(value).sum::<f64>() / runs as f64
            }
        };

        Self {
            selector: selector.to_string(),
            runs,
            mean_score: mean(|r| f64::from(r.score)),
            mean_steps: mean(|r| f64::from(r.steps)),
            mean_deliveries: mean(|r| f64::from(r.deliveries)),
            completion_rate: mean(|r| if r.outcome.is_completed() { 1.0 } else { 0.0 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_penalty_depends_on_battery() {
        let mut metrics = RunMetrics::default();
        metrics.record_step(false);
        metrics.record_step(false);
        assert_eq!(metrics.score, -2);

        metrics.record_step(true);
        assert_eq!(metrics.score, -7);
        assert_eq!(metrics.steps, 3);
    }

    #[test]
    fn test_delivery_reward() {
        let mut metrics = RunMetrics::default();
        metrics.record_step(false);
        metrics.record_delivery();
        assert_eq!(metrics.score, 84);
        assert_eq!(metrics.deliveries, 1);
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let json = serde_json::to_string(&Outcome::PathNotFound {
            target: Position::new(3, 3),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"path_not_found","target":{"x":3,"y":3}}"#);

        let back: Outcome = serde_json::from_str(r#"{"kind":"completed"}"#).unwrap();
        assert_eq!(back, Outcome::Completed);
    }

    #[test]
    fn test_result_carries_metrics() {
        let metrics = RunMetrics {
            score: 81,
            steps: 4,
            deliveries: 1,
        };
        let result = RunResult::new(
            "astar",
            7,
            metrics,
            86,
            Duration::from_millis(1500),
            Outcome::Completed,
        );
        assert_eq!(result.metrics(), metrics);
        assert_eq!(result.selector, "astar");
        assert!((result.duration_secs - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_summary_means() {
        let run = |score, steps, deliveries, outcome| RunResult {
            selector: "proxy".into(),
            seed: 0,
            score,
            steps,
            deliveries,
            battery: 0,
            duration_secs: 0.0,
            outcome,
        };
        let results = [
            run(100, 40, 2, Outcome::Completed),
            run(-20, 20, 0, Outcome::NoActionableTarget),
        ];

        let summary = RunSummary::from_results("proxy", &results);
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.mean_score, 40.0);
        assert_eq!(summary.mean_steps, 30.0);
        assert_eq!(summary.mean_deliveries, 1.0);
        assert_eq!(summary.completion_rate, 0.5);

        let empty = RunSummary::from_results("proxy", &[]);
        assert_eq!(empty.runs, 0);
        assert_eq!(empty.completion_rate, 0.0);
    }
}
