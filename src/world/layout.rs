//! Initial placement of every entity on the grid

use ahash::AHashSet;

use crate::core::error::{DeliveryError, Result};
use crate::core::types::Position;
use crate::world::grid::GridMap;

/// Everything a run starts from: the grid plus where each entity sits
#[derive(Debug, Clone, PartialEq)]
pub struct WorldLayout {
    pub grid: GridMap,
    pub start: Position,
    pub packages: Vec<Position>,
    pub goals: Vec<Position>,
    pub recharger: Position,
}

impl WorldLayout {
    /// Build a layout, checking the placement rules
    pub fn new(
        grid: GridMap,
        start: Position,
        packages: Vec<Position>,
        goals: Vec<Position>,
        recharger: Position,
    ) -> Result<Self> {
        let layout = Self {
            grid,
            start,
            packages,
            goals,
            recharger,
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn total_items(&self) -> usize {
        self.goals.len()
    }

    fn validate(&self) -> Result<()> {
        let require_free = |what: &str, pos: Position| {
            if self.grid.is_free(pos) {
                Ok(())
            } else {
                Err(invalid(format!("{} at {} is not a free cell", what, pos)))
            }
        };

        require_free("agent start", self.start)?;
        require_free("recharger", self.recharger)?;

        let mut packages = AHashSet::new();
        for &pkg in &self.packages {
            require_free("package", pkg)?;
            if !packages.insert(pkg) {
                return Err(invalid(format!("duplicate package at {}", pkg)));
            }
        }

        let mut goals = AHashSet::new();
        for &goal in &self.goals {
            require_free("goal", goal)?;
            if !goals.insert(goal) {
                return Err(invalid(format!("duplicate goal at {}", goal)));
            }
            if packages.contains(&goal) {
                return Err(invalid(format!("goal at {} overlaps a package", goal)));
            }
        }

        if packages.contains(&self.recharger) || goals.contains(&self.recharger) {
            return Err(invalid(format!(
                "recharger at {} overlaps a package or goal",
                self.recharger
            )));
        }

        if packages.contains(&self.start) || goals.contains(&self.start) {
            return Err(invalid(format!(
                "agent start {} overlaps a package or goal",
                self.start
            )));
        }

        Ok(())
    }
}

fn invalid(msg: String) -> DeliveryError {
    DeliveryError::InvalidLayout(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_valid_layout() {
        let layout =
            WorldLayout::new(GridMap::new(5), p(0, 0), vec![p(2, 0)], vec![p(4, 0)], p(2, 2))
                .unwrap();
        assert_eq!(layout.total_items(), 1);
    }

    #[test]
    fn test_rejects_blocked_package() {
        let grid = GridMap::from_ascii(".....\n..#..\n.....\n.....\n.....").unwrap();
        let result = WorldLayout::new(grid, p(0, 0), vec![p(2, 1)], vec![p(4, 0)], p(3, 3));
        assert!(matches!(result, Err(DeliveryError::InvalidLayout(_))));
    }

    #[test]
    fn test_rejects_recharger_on_goal() {
        let result =
            WorldLayout::new(GridMap::new(5), p(0, 0), vec![p(2, 0)], vec![p(2, 2)], p(2, 2));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_duplicates_and_overlaps() {
        let dup = WorldLayout::new(
            GridMap::new(5),
            p(0, 0),
            vec![p(1, 1), p(1, 1)],
            vec![p(4, 4)],
            p(2, 2),
        );
        assert!(dup.is_err());

        let overlap =
            WorldLayout::new(GridMap::new(5), p(0, 0), vec![p(1, 1)], vec![p(1, 1)], p(2, 2));
        assert!(overlap.is_err());

        let start_on_package =
            WorldLayout::new(GridMap::new(5), p(1, 1), vec![p(1, 1)], vec![p(4, 4)], p(2, 2));
        assert!(start_on_package.is_err());
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let result =
            WorldLayout::new(GridMap::new(5), p(0, 0), vec![p(5, 0)], vec![p(4, 4)], p(2, 2));
        assert!(result.is_err());
    }
}
