//! The decide / plan / move loop
//!
//! A run is a small state machine:
//! `Deciding -> Planning -> Moving -> Arrived -> Deciding ...`, ending in
//! `Terminated`. [`Simulation::advance`] performs exactly one transition so a
//! caller can single-step; [`Simulation::run`] loops until the end.

use std::mem;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::core::config::{AgentConfig, SimulationConfig};
use crate::core::constants::{BATTERY_PER_STEP, RECHARGE_LEVEL};
use crate::core::error::Result;
use crate::core::types::Position;
use crate::navigation::PathEngine;
use crate::planning::{DecisionContext, Target, TargetSelector};
use crate::world::generation::generate_world;
use crate::world::grid::GridMap;
use crate::world::layout::WorldLayout;

use super::agent::Agent;
use super::events::{EventKind, EventLog};
use super::metrics::{Outcome, RunMetrics, RunResult};
use super::observer::{NullObserver, Snapshot, StepObserver};

/// Where the state machine currently is
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// About to ask the selector for a target
    Deciding,
    /// Target chosen, no route yet
    Planning(Target),
    /// Walking `route`; `next` indexes the cell entered on the next step
    Moving {
        target: Target,
        route: Vec<Position>,
        next: usize,
    },
    /// Standing on the target, about to pick up or deliver
    Arrived(Target),
    Terminated(Outcome),
}

/// One delivery run: a world, an agent and the strategy steering it
pub struct Simulation {
    grid: GridMap,
    agent: Agent,
    packages: Vec<Position>,
    goals: Vec<Position>,
    recharger: Position,
    selector: Box<dyn TargetSelector>,
    metrics: RunMetrics,
    events: EventLog,
    /// Goal count at the start; the run completes after this many deliveries
    total_items: usize,
    seed: u64,
    phase: Phase,
}

impl Simulation {
    pub fn new(layout: WorldLayout, agent: &AgentConfig, selector: Box<dyn TargetSelector>) -> Self {
        let total_items = layout.total_items();
        Self {
            agent: Agent::new(layout.start, agent.initial_battery, agent.profile),
            grid: layout.grid,
            packages: layout.packages,
            goals: layout.goals,
            recharger: layout.recharger,
            selector,
            metrics: RunMetrics::default(),
            events: EventLog::new(),
            total_items,
            seed: 0,
            phase: Phase::Deciding,
        }
    }

    /// Generate a world from `seed` and set up a run on it
    pub fn generate(
        config: &SimulationConfig,
        seed: u64,
        selector: Box<dyn TargetSelector>,
    ) -> Result<Self> {
        config.validate()?;
        let layout = generate_world(&config.world, seed)?;
        Ok(Self::new(layout, &config.agent, selector).with_seed(seed))
    }

    /// Seed recorded in the result; does not affect the run itself
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn packages(&self) -> &[Position] {
        &self.packages
    }

    pub fn goals(&self) -> &[Position] {
        &self.goals
    }

    pub fn recharger(&self) -> Position {
        self.recharger
    }

    pub fn selector_name(&self) -> &'static str {
        self.selector.name()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Perform a single transition and return the new phase
    ///
    /// Once terminated, further calls do nothing.
    pub fn advance(&mut self, observer: &mut dyn StepObserver) -> &Phase {
        let phase = mem::replace(&mut self.phase, Phase::Deciding);
        self.phase = match phase {
            Phase::Deciding => self.decide(),
            Phase::Planning(target) => self.plan(target),
            Phase::Moving {
                target,
                route,
                next,
            } => self.step(target, route, next, observer),
            Phase::Arrived(target) => self.arrive(target),
            Phase::Terminated(outcome) => Phase::Terminated(outcome),
        };
        &self.phase
    }

    /// Run to the end without observing individual moves
    pub fn run(&mut self) -> RunResult {
        self.run_with(&mut NullObserver)
    }

    /// Run to the end, showing every move to `observer`
    pub fn run_with(&mut self, observer: &mut dyn StepObserver) -> RunResult {
        let started = Instant::now();
        while !self.is_finished() {
            self.advance(observer);
        }
        let result = self.result(started.elapsed());

        info!(
            selector = %result.selector,
            seed = result.seed,
            score = result.score,
            steps = result.steps,
            deliveries = result.deliveries,
            battery = result.battery,
            outcome = %result.outcome,
            "Run finished"
        );
        result
    }

    /// Result record for the run so far
    ///
    /// A run that has not terminated is reported as having no target.
    pub fn result(&self, duration: Duration) -> RunResult {
        RunResult::new(
            self.selector.name(),
            self.seed,
            self.metrics,
            self.agent.battery,
            duration,
            self.outcome().unwrap_or(Outcome::NoActionableTarget),
        )
    }

    fn decide(&mut self) -> Phase {
        if self.metrics.deliveries as usize >= self.total_items {
            return self.terminate(Outcome::Completed);
        }

        let ctx = DecisionContext {
            agent: &self.agent,
            packages: &self.packages,
            goals: &self.goals,
            recharger: self.recharger,
            grid: &self.grid,
        };

        match self.selector.choose_target(&ctx) {
            Some(target) => {
                debug!(
                    selector = self.selector.name(),
                    target = %target.position,
                    reason = %target.reason,
                    battery = self.agent.battery,
                    cargo = self.agent.cargo,
                    "Target chosen"
                );
                self.events.push(
                    self.metrics.steps,
                    EventKind::TargetChosen {
                        target: target.position,
                        reason: target.reason,
                    },
                );
                Phase::Planning(target)
            }
            None => self.terminate(Outcome::NoActionableTarget),
        }
    }

    fn plan(&mut self, target: Target) -> Phase {
        let paths = PathEngine::new(&self.grid);
        // A target on the agent's own cell yields an empty route, which cannot
        // be walked either
        match paths.shortest_path(self.agent.position, target.position) {
            Some(route) if !route.is_empty() => Phase::Moving {
                target,
                route: route.path,
                next: 0,
            },
            _ => {
                warn!(
                    from = %self.agent.position,
                    target = %target.position,
                    "No path to target"
                );
                self.terminate(Outcome::PathNotFound {
                    target: target.position,
                })
            }
        }
    }

    fn step(
        &mut self,
        target: Target,
        route: Vec<Position>,
        next: usize,
        observer: &mut dyn StepObserver,
    ) -> Phase {
        let Some(&pos) = route.get(next) else {
            return Phase::Arrived(target);
        };

        self.agent.position = pos;
        self.agent.battery -= BATTERY_PER_STEP;
        self.metrics.record_step(self.agent.is_depleted());

        if pos == self.recharger {
            self.agent.battery = RECHARGE_LEVEL;
            debug!(at = %pos, battery = self.agent.battery, "Recharged");
            self.events.push(
                self.metrics.steps,
                EventKind::Recharged {
                    at: pos,
                    battery: self.agent.battery,
                },
            );
        }

        observer.on_move(&Snapshot {
            grid: &self.grid,
            agent: &self.agent,
            metrics: &self.metrics,
            route: &route[next + 1..],
            packages: &self.packages,
            goals: &self.goals,
            recharger: self.recharger,
        });

        if next + 1 < route.len() {
            Phase::Moving {
                target,
                route,
                next: next + 1,
            }
        } else {
            Phase::Arrived(target)
        }
    }

    fn arrive(&mut self, target: Target) -> Phase {
        let here = target.position;

        if let Some(index) = self.packages.iter().position(|&p| p == here) {
            self.packages.remove(index);
            self.agent.cargo += 1;
            info!(at = %here, cargo = self.agent.cargo, "Package picked up");
            self.events.push(
                self.metrics.steps,
                EventKind::PackagePicked {
                    at: here,
                    cargo: self.agent.cargo,
                },
            );
        } else if self.agent.is_carrying() {
            if let Some(index) = self.goals.iter().position(|&g| g == here) {
                self.goals.remove(index);
                self.agent.cargo -= 1;
                self.metrics.record_delivery();
                info!(
                    at = %here,
                    cargo = self.agent.cargo,
                    deliveries = self.metrics.deliveries,
                    "Package delivered"
                );
                self.events.push(
                    self.metrics.steps,
                    EventKind::Delivered {
                        at: here,
                        cargo: self.agent.cargo,
                    },
                );
            }
        }

        Phase::Deciding
    }

    fn terminate(&mut self, outcome: Outcome) -> Phase {
        debug!(outcome = %outcome, steps = self.metrics.steps, "Run terminated");
        self.events
            .push(self.metrics.steps, EventKind::Terminated { outcome });
        Phase::Terminated(outcome)
    }
}
