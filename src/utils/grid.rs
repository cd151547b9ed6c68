//! # Grid
//!
//! Fixed-size two dimensional storage addressed by [`Position`].

use crate::game::Position;
use serde::{Deserialize, Serialize};

/// A rectangular array of cells stored row-major.
///
/// # Examples
///
/// ```
/// use burrow::{Grid, Position};
///
/// let mut grid = Grid::new(4, 3, false);
/// grid.set(Position::new(1, 2), true);
/// assert_eq!(grid.get(Position::new(1, 2)), Some(&true));
/// assert_eq!(grid.get(Position::new(4, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            width: width.max(0),
            height: height.max(0),
            cells: vec![fill; len],
        }
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|cell| *cell = value.clone());
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// Sets the cell at `pos`. Returns false when `pos` is out of bounds.
    pub fn set(&mut self, pos: Position, value: T) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Positions paired with their cells, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions().zip(self.cells.iter())
    }
}

impl<T: Copy + Default> Grid<T> {
    /// Value at `pos`, or the default for out-of-bounds positions.
    pub fn at(&self, pos: Position) -> T {
        self.get(pos).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(3, 2, 0u8);
        assert!(grid.in_bounds(Position::new(2, 1)));
        assert!(!grid.in_bounds(Position::new(3, 1)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert_eq!(grid.positions().count(), 6);
    }

    #[test]
    fn test_grid_set_and_fill() {
        let mut grid = Grid::new(3, 3, false);
        assert!(grid.set(Position::new(1, 1), true));
        assert!(!grid.set(Position::new(5, 5), true));
        assert!(grid.at(Position::new(1, 1)));
        assert!(!grid.at(Position::new(5, 5)));

        grid.fill(false);
        assert!(grid.iter().all(|(_, cell)| !cell));
    }

    #[test]
    fn test_grid_row_major_order() {
        let mut grid = Grid::new(2, 2, 0);
        grid.set(Position::new(1, 0), 1);
        grid.set(Position::new(0, 1), 2);
        let cells: Vec<i32> = grid.iter().map(|(_, c)| *c).collect();
        assert_eq!(cells, vec![0, 1, 2, 0]);
    }
}
