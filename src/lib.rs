//! Delivery Bot - grid delivery planning engine
//!
//! A single battery-powered agent collects packages and drops them at goals
//! on an obstacle grid, recharging when it must. Target selection is
//! pluggable (`planning`); all strategies share one path engine
//! (`navigation`) and one stepper (`simulation`).

pub mod core;
pub mod navigation;
pub mod planning;
pub mod simulation;
pub mod world;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{DeliveryError, Result};
pub use crate::core::types::{BatteryProfile, Position};
pub use crate::navigation::{PathEngine, Route};
pub use crate::planning::{SelectorRegistry, Target, TargetReason, TargetSelector};
pub use crate::simulation::{Outcome, RunResult, Simulation};
pub use crate::world::{generate_world, GridMap, WorldLayout};
