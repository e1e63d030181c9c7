//! Run configuration with documented defaults
//!
//! Only world generation and the agent's starting state are configurable.
//! Scoring and battery rules are fixed in [`crate::core::constants`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_GRID_SIZE, DEFAULT_TOTAL_ITEMS, MAX_BATTERY};
use crate::core::error::{DeliveryError, Result};
use crate::core::types::BatteryProfile;

/// Smallest grid the barrier generator can place segments on
pub const MIN_GRID_SIZE: usize = 16;

/// Parameters for the procedural world generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square grid (cells)
    ///
    /// Barrier rows are drawn from `[5, size - 6]` and segment starts from
    /// `[0, size - 10]`, so anything below [`MIN_GRID_SIZE`] is rejected.
    pub grid_size: usize,

    /// Number of goals; twice as many packages are placed
    ///
    /// A run completes once this many deliveries have been made.
    pub total_items: usize,

    /// Number of short horizontal wall segments
    pub horizontal_barriers: usize,

    /// Number of short vertical wall segments
    pub vertical_barriers: usize,

    /// Probability that each cell of a barrier segment is actually blocked
    ///
    /// Values below 1.0 leave gaps the agent can slip through.
    pub barrier_density: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            total_items: DEFAULT_TOTAL_ITEMS,
            horizontal_barriers: 7,
            vertical_barriers: 7,
            barrier_density: 0.7,
        }
    }
}

impl WorldConfig {
    /// Check the generator can actually work with these values
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(DeliveryError::InvalidConfig(format!(
                "grid_size ({}) must be at least {}",
                self.grid_size, MIN_GRID_SIZE
            )));
        }

        if self.total_items == 0 {
            return Err(DeliveryError::InvalidConfig(
                "total_items must be at least 1".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.barrier_density) {
            return Err(DeliveryError::InvalidConfig(format!(
                "barrier_density ({}) must be within 0.0..=1.0",
                self.barrier_density
            )));
        }

        // Packages, goals, the agent and the recharger all need their own cell
        let cells = self.grid_size * self.grid_size;
        let needed = self.total_items * 3 + 2;
        if needed > cells / 2 {
            return Err(DeliveryError::InvalidConfig(format!(
                "{} items need {} cells, too many for a {}x{} grid",
                self.total_items, needed, self.grid_size, self.grid_size
            )));
        }

        Ok(())
    }
}

/// Starting state of the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Battery at the start of a run
    pub initial_battery: i32,

    /// Safety margin policy used by every selector
    ///
    /// Unknown names fall back to `conservative` with a warning.
    pub profile: BatteryProfile,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_battery: MAX_BATTERY,
            profile: BatteryProfile::Adventurous,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub agent: AgentConfig,
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a TOML config file
    ///
    /// Missing sections and keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;

        if self.agent.initial_battery <= 0 {
            return Err(DeliveryError::InvalidConfig(format!(
                "initial_battery ({}) must be positive",
                self.agent.initial_battery
            )));
        }

        Ok(())
    }
}
