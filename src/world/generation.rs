//! Seeded world generation
//!
//! Produces an assembly-line style floor: short broken wall segments in both
//! directions plus one solid support block, with packages, goals, the agent
//! and the recharger scattered over the remaining free cells. The same seed
//! always yields the same layout.

use ahash::AHashSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::WorldConfig;
use crate::core::constants::PACKAGES_PER_ITEM;
use crate::core::error::{DeliveryError, Result};
use crate::core::types::Position;
use crate::world::grid::GridMap;
use crate::world::layout::WorldLayout;

/// Builds [`WorldLayout`]s from a seed
pub struct WorldGenerator {
    config: WorldConfig,
    rng: ChaCha8Rng,
}

impl WorldGenerator {
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate the grid and place every entity
    pub fn generate(mut self) -> Result<WorldLayout> {
        self.config.validate()?;
        let grid = self.generate_obstacles();

        let packages_needed = self.config.total_items * PACKAGES_PER_ITEM;
        let goals_needed = self.config.total_items;
        // Packages, goals, the agent and at least one recharger cell
        let needed = packages_needed + goals_needed + 2;
        if grid.free_cell_count() < needed {
            return Err(DeliveryError::Generation(format!(
                "only {} free cells for {} entities",
                grid.free_cell_count(),
                needed
            )));
        }

        let mut occupied = AHashSet::new();
        let packages = self.scatter(&grid, packages_needed, &mut occupied);
        let goals = self.scatter(&grid, goals_needed, &mut occupied);
        let start = self.scatter(&grid, 1, &mut occupied)[0];
        let recharger = self.place_recharger(&grid, &occupied)?;

        tracing::debug!(
            packages = packages.len(),
            goals = goals.len(),
            walls = grid.blocked_cells().count(),
            "generated world"
        );

        WorldLayout::new(grid, start, packages, goals, recharger)
    }

    fn generate_obstacles(&mut self) -> GridMap {
        let size = self.config.grid_size as i32;
        let mut grid = GridMap::new(self.config.grid_size);

        // Short horizontal barriers with gaps
        for _ in 0..self.config.horizontal_barriers {
            let row = self.rng.gen_range(5..=size - 6);
            let start = self.rng.gen_range(0..=size - 10);
            let length = self.rng.gen_range(5..=10);
            for col in start..start + length {
                if self.rng.gen_bool(self.config.barrier_density) {
                    grid.block(Position::new(col, row));
                }
            }
        }

        // Short vertical barriers with gaps
        for _ in 0..self.config.vertical_barriers {
            let col = self.rng.gen_range(5..=size - 6);
            let start = self.rng.gen_range(0..=size - 10);
            let length = self.rng.gen_range(5..=10);
            for row in start..start + length {
                if self.rng.gen_bool(self.config.barrier_density) {
                    grid.block(Position::new(col, row));
                }
            }
        }

        // One solid support block
        let block = if self.rng.gen_bool(0.5) { 4 } else { 6 };
        let top = self.rng.gen_range(0..=size - block);
        let left = self.rng.gen_range(0..=size - block);
        for y in top..top + block {
            for x in left..left + block {
                grid.block(Position::new(x, y));
            }
        }

        grid
    }

    /// Rejection-sample `count` distinct free, unoccupied cells
    ///
    /// Callers guarantee enough free cells remain, so this terminates.
    fn scatter(
        &mut self,
        grid: &GridMap,
        count: usize,
        occupied: &mut AHashSet<Position>,
    ) -> Vec<Position> {
        let size = grid.size() as i32;
        let mut placed = Vec::with_capacity(count);
        while placed.len() < count {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if grid.is_free(pos) && occupied.insert(pos) {
                placed.push(pos);
            }
        }
        placed
    }

    /// Pick a free cell near the centre, widening the search ring if needed
    fn place_recharger(&mut self, grid: &GridMap, occupied: &AHashSet<Position>) -> Result<Position> {
        let center = (grid.size() / 2) as i32;
        let max_radius = grid.size() as i32;

        for radius in 1..=max_radius {
            let candidates: Vec<Position> = (center - radius..=center + radius)
                .flat_map(|y| (center - radius..=center + radius).map(move |x| Position::new(x, y)))
                .filter(|pos| grid.is_free(*pos) && !occupied.contains(pos))
                .collect();

            if !candidates.is_empty() {
                let pick = self.rng.gen_range(0..candidates.len());
                return Ok(candidates[pick]);
            }
        }

        Err(DeliveryError::Generation(
            "no free cell left for the recharger".into(),
        ))
    }
}

/// Convenience wrapper: generate a layout for `seed`
pub fn generate_world(config: &WorldConfig, seed: u64) -> Result<WorldLayout> {
    WorldGenerator::new(config.clone(), seed).generate()
}
