//! The delivery agent's mutable state

use serde::{Deserialize, Serialize};

use crate::core::types::{BatteryProfile, Position};

/// Position, cargo and battery of the single agent
///
/// Only the stepper mutates an agent during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Position,
    /// Units picked up and not yet delivered
    pub cargo: u32,
    /// May go negative; every step below zero costs extra score
    pub battery: i32,
    pub profile: BatteryProfile,
}

impl Agent {
    pub fn new(position: Position, battery: i32, profile: BatteryProfile) -> Self {
        Self {
            position,
            cargo: 0,
            battery,
            profile,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.battery < 0
    }

    pub fn is_carrying(&self) -> bool {
        self.cargo > 0
    }
}
