//! Game rule constants - all scoring and battery values in one place

// Battery
pub const MAX_BATTERY: i32 = 90;
pub const RECHARGE_LEVEL: i32 = 70; // Flat value, deliberately below MAX_BATTERY
pub const BATTERY_PER_STEP: i32 = 1;

// Score
pub const STEP_PENALTY: i32 = 1;
pub const DEPLETED_STEP_PENALTY: i32 = 5; // Applied while battery is negative
pub const DELIVERY_REWARD: i32 = 85;

// Feasibility
pub const BALANCED_MARGIN: f64 = 0.8;

// Cluster scoring
pub const CLUSTER_RADIUS: u32 = 10;
pub const CLUSTER_WEIGHT: i64 = 3;

// World defaults
pub const DEFAULT_GRID_SIZE: usize = 50;
pub const DEFAULT_TOTAL_ITEMS: usize = 6;
pub const PACKAGES_PER_ITEM: usize = 2;
