use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::Position;

/// Represents errors that can occur within the grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Cell ({row}, {col}) is out of bounds for grid size {height}x{width}")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}

/// A generic 2D grid structure.
///
/// Stores elements of type `T` in a flat vector using row-major order and is
/// addressed by [`Position`] (row, col).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    cells: Vec<T>,
}

/// The static wall layout of a map. `true` marks a wall.
pub type WallMask = Grid<bool>;

impl<T> Grid<T> {
    /// Creates a new grid with the specified dimensions, filled with default values.
    ///
    /// # Panics
    ///
    /// Panics if `height * width` overflows `usize`.
    pub fn new(height: usize, width: usize) -> Self
    where
        T: Default + Clone,
    {
        let size = height.checked_mul(width).expect("Grid size overflow");
        Grid {
            height,
            width,
            cells: vec![T::default(); size],
        }
    }

    /// Creates a new grid filled by a generator function called with each cell's position.
    ///
    /// # Panics
    ///
    /// Panics if `height * width` overflows `usize`.
    pub fn from_generator<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        let size = height.checked_mul(width).expect("Grid size overflow");
        let mut cells = Vec::with_capacity(size);
        for row in 0..height {
            for col in 0..width {
                cells.push(f(Position::new(row, col)));
            }
        }
        Grid {
            height,
            width,
            cells,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Converts a position to a flat vector index, or `None` if out of bounds.
    #[inline]
    fn index_of(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.row * self.width + pos.col)
    }

    /// Checks if the given position is within the grid boundaries.
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Gets a reference to the cell at the given position.
    ///
    /// Returns `None` if the position is out of bounds.
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index_of(pos).and_then(|index| self.cells.get(index))
    }

    /// Sets the value of the cell at the given position.
    pub fn set(&mut self, pos: Position, value: T) -> Result<(), GridError> {
        let index = self.index_of(pos).ok_or(GridError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            height: self.height,
            width: self.width,
        })?;
        self.cells[index] = value;
        Ok(())
    }

    /// Returns an iterator that yields `(Position, &T)` for each cell in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (Position, &T)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Position::new(index / width, index % width), cell))
    }
}

impl Grid<bool> {
    /// True if the cell holds a wall. Out-of-bounds cells are not walls.
    #[inline]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.get(pos).copied().unwrap_or(false)
    }

    /// True if an entity may stand on `pos`: inside the grid and not a wall.
    #[inline]
    pub fn is_open(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(false))
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: Position) -> &Self::Output {
        match self.index_of(pos) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size {}x{}",
                pos.row, pos.col, self.height, self.width
            ),
        }
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        let (height, width) = (self.height, self.width);
        match self.index_of(pos) {
            Some(idx) => &mut self.cells[idx],
            None => panic!(
                "Grid index ({}, {}) out of bounds for grid size {}x{}",
                pos.row, pos.col, height, width
            ),
        }
    }
}
