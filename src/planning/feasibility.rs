//! Battery feasibility policy
//!
//! Decides whether the agent can afford to visit a target and still make it
//! back to the recharger. Pure function of its inputs.

use crate::core::constants::BALANCED_MARGIN;
use crate::core::types::BatteryProfile;

/// Can the agent go to a target and then on to the recharger?
///
/// A leg of `None` is unreachable and counts as infinitely expensive.
pub fn can_safely_visit(
    battery: i32,
    cost_to_target: Option<u32>,
    cost_target_to_recharger: Option<u32>,
    profile: BatteryProfile,
) -> bool {
    if profile == BatteryProfile::Adventurous {
        return true;
    }

    let Some(total) = cost_to_target
        .zip(cost_target_to_recharger)
        .map(|(a, b)| u64::from(a) + u64::from(b))
    else {
        return false;
    };

    match profile {
        BatteryProfile::Conservative => i64::from(battery) >= total as i64,
        BatteryProfile::Balanced => f64::from(battery) >= BALANCED_MARGIN * total as f64,
        BatteryProfile::Adventurous => true,
    }
}
