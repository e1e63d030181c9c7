//! The static world: obstacle grid, entity placement and seeded generation

pub mod generation;
pub mod grid;
pub mod layout;

pub use generation::{generate_world, WorldGenerator};
pub use grid::{Cell, GridMap};
pub use layout::WorldLayout;
