//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::DeliveryError;

/// Grid coordinate of a single cell
///
/// Ordering is lexicographic on `(x, y)`; nothing in the planner relies on it
/// beyond making positions usable as sorted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// 4-connected step offsets, in expansion order
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, ignoring obstacles
    pub fn manhattan(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours, unchecked against any bounds
    pub fn neighbors(&self) -> [Position; 4] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| self.offset(dx, dy))
    }

    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// How much safety margin the agent keeps before committing to a detour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BatteryProfile {
    /// Only go if the battery covers the whole round trip
    Conservative,
    /// Accept a round trip up to 25% more expensive than the battery
    Balanced,
    /// Never look ahead
    #[default]
    Adventurous,
}

impl BatteryProfile {
    pub const ALL: [BatteryProfile; 3] = [
        BatteryProfile::Conservative,
        BatteryProfile::Balanced,
        BatteryProfile::Adventurous,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BatteryProfile::Conservative => "conservative",
            BatteryProfile::Balanced => "balanced",
            BatteryProfile::Adventurous => "adventurous",
        }
    }

    /// Parse a profile name, falling back to the conservative rule
    ///
    /// An unknown name is not worth failing a run over; it is logged and the
    /// most cautious profile is used instead.
    pub fn from_name_or_conservative(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            tracing::warn!("{}; falling back to conservative", err);
            BatteryProfile::Conservative
        })
    }
}

impl FromStr for BatteryProfile {
    type Err = DeliveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(BatteryProfile::Conservative),
            "balanced" => Ok(BatteryProfile::Balanced),
            "adventurous" => Ok(BatteryProfile::Adventurous),
            other => Err(DeliveryError::InvalidProfile(other.to_string())),
        }
    }
}

impl From<String> for BatteryProfile {
    fn from(name: String) -> Self {
        Self::from_name_or_conservative(&name)
    }
}

impl fmt::Display for BatteryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(1, 2);
        let b = Position::new(4, -2);
        assert_eq!(a.manhattan(&b), 7);
        assert_eq!(b.manhattan(&a), 7);
        assert_eq!(a.manhattan(&a), 0);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let center = Position::new(3, 3);
        let neighbors = center.neighbors();
        assert_eq!(neighbors[0], Position::new(4, 3));
        assert_eq!(neighbors[3], Position::new(3, 2));
        assert!(neighbors.iter().all(|n| n.is_adjacent(&center)));
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!("balanced".parse::<BatteryProfile>().unwrap(), BatteryProfile::Balanced);
        assert_eq!(
            " Conservative ".parse::<BatteryProfile>().unwrap(),
            BatteryProfile::Conservative
        );
        assert!(matches!(
            "reckless".parse::<BatteryProfile>(),
            Err(DeliveryError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_unknown_profile_falls_back_to_conservative() {
        assert_eq!(
            BatteryProfile::from_name_or_conservative("yolo"),
            BatteryProfile::Conservative
        );
        assert_eq!(
            BatteryProfile::from_name_or_conservative("adventurous"),
            BatteryProfile::Adventurous
        );
    }

    #[test]
    fn test_profile_deserializes_leniently() {
        #[derive(Deserialize)]
        struct Wrapper {
            profile: BatteryProfile,
        }

        let ok: Wrapper = toml::from_str("profile = \"balanced\"").unwrap();
        assert_eq!(ok.profile, BatteryProfile::Balanced);

        let fallback: Wrapper = toml::from_str("profile = \"mystery\"").unwrap();
        assert_eq!(fallback.profile, BatteryProfile::Conservative);
    }
}
