//! Square obstacle grid for pathfinding
//!
//! Cells are either free or blocked. The grid is built once (by the generator
//! or a test fixture) and only read afterwards.

use crate::core::error::{DeliveryError, Result};
use crate::core::types::Position;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Free,
    Blocked,
}

impl Cell {
    /// Returns true if movement can pass through
    pub fn can_pass(&self) -> bool {
        matches!(self, Cell::Free)
    }
}

/// `size × size` grid of free/blocked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    size: usize,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Create an open grid with no obstacles
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Free; size * size],
        }
    }

    /// Parse a grid from rows of `.` (free) and `#` (blocked)
    ///
    /// Blank lines and surrounding whitespace are ignored. Every row must be
    /// as long as there are rows.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let size = rows.len();
        let mut grid = Self::new(size);

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != size {
                return Err(DeliveryError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    size
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '.' => {}
                    '#' => grid.block(Position::new(x as i32, y as i32)),
                    other => {
                        return Err(DeliveryError::InvalidLayout(format!(
                            "unexpected cell '{}' at ({}, {})",
                            other, x, y
                        )))
                    }
                }
            }
        }

        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.size + pos.x as usize)
        } else {
            None
        }
    }

    /// Is the position inside the bounds?
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// In bounds and not blocked
    #[inline]
    pub fn is_free(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| cell.can_pass())
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Blocked)
    }

    /// Block a cell (out-of-bounds positions are ignored)
    pub fn block(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = Cell::Blocked;
        }
    }

    /// Free neighbours of `pos` in expansion order
    pub fn passable_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors().into_iter().filter(|n| self.is_free(*n))
    }

    pub fn free_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.can_pass()).count()
    }

    /// All blocked positions, row by row
    pub fn blocked_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            (*cell == Cell::Blocked)
                .then(|| Position::new((i % self.size) as i32, (i / self.size) as i32))
        })
    }
}
