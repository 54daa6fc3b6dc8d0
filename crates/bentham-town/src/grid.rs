//! 2D grid for the town.

use bentham_core::{Cell, Direction, NeighbourCounts, Position};
use serde::{Deserialize, Serialize};

/// A 2D toroidal grid of houses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Empty; size],
        }
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Cell {
        let wrapped = pos.wrap(self.width, self.height);
        self.cells[self.pos_to_index(wrapped)]
    }

    /// Set cell at position
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let wrapped = pos.wrap(self.width, self.height);
        let index = self.pos_to_index(wrapped);
        self.cells[index] = cell;
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// The wrapped neighbours of a position.
    ///
    /// On grids narrower than three cells the same site can show up more than
    /// once. Offsets that wrap back onto the centre are skipped.
    pub fn neighbours(&self, pos: Position) -> impl Iterator<Item = Cell> + '_ {
        let centre = pos.wrap(self.width, self.height);
        Direction::all()
            .into_iter()
            .map(move |direction| {
                let (dx, dy) = direction.to_delta();
                centre.add(dx, dy).wrap(self.width, self.height)
            })
            .filter(move |neighbour| *neighbour != centre)
            .map(move |neighbour| self.get(neighbour))
    }

    /// Count red and blue houses around a position
    pub fn neighbour_counts(&self, pos: Position) -> NeighbourCounts {
        let mut counts = NeighbourCounts::default();
        counts.extend(self.neighbours(pos));
        counts
    }

    /// Number of cells in the given state
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.width;
        let y = (index as i32) / self.width;
        Position::new(x, y)
    }

    /// Iterator over all positions
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 7);
        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 7);
        assert_eq!(grid.len(), 70);
        assert_eq!(grid.count(Cell::Empty), 70);
    }

    #[test]
    fn test_toroidal_wrapping() {
        let mut grid = Grid::new(10, 10);
        grid.set(Position::new(9, 9), Cell::Red);
        grid.set(Position::new(0, 0), Cell::Blue);

        // Should wrap to (9, 9)
        assert_eq!(grid.get(Position::new(-1, -1)), Cell::Red);
        // Should wrap to (0, 0)
        assert_eq!(grid.get(Position::new(10, 10)), Cell::Blue);
    }

    #[test]
    fn test_neighbours() {
        let grid = Grid::new(10, 10);
        let neighbours: Vec<_> = grid.neighbours(Position::new(5, 5)).collect();

        // Should have 8 neighbours
        assert_eq!(neighbours.len(), 8);
    }

    #[test]
    fn test_neighbour_counts_ignore_centre() {
        let mut grid = Grid::new(5, 5);
        grid.set(Position::new(2, 2), Cell::Red);
        grid.set(Position::new(1, 1), Cell::Red);
        grid.set(Position::new(3, 2), Cell::Blue);
        grid.set(Position::new(4, 4), Cell::Blue);

        let counts = grid.neighbour_counts(Position::new(2, 2));
        assert_eq!(counts, NeighbourCounts::new(1, 1));
    }

    #[test]
    fn test_single_column_wrapping() {
        let mut grid = Grid::new(1, 3);
        grid.set(Position::new(0, 1), Cell::Blue);
        grid.set(Position::new(0, 0), Cell::Red);

        // East and west wrap onto the centre and are skipped, while the three
        // northern offsets all land on (0, 0)
        let counts = grid.neighbour_counts(Position::new(0, 1));
        assert_eq!(counts, NeighbourCounts::new(3, 0));
        assert_eq!(grid.neighbours(Position::new(0, 1)).count(), 6);
    }

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::new(4, 3);
        for (i, pos) in grid.positions().enumerate() {
            assert_eq!(grid.pos_to_index(pos), i);
        }
        assert_eq!(grid.index_to_pos(5), Position::new(1, 1));
    }

    #[test]
    fn test_rows() {
        let mut grid = Grid::new(3, 2);
        grid.set(Position::new(2, 1), Cell::Blue);

        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[Cell::Empty, Cell::Empty, Cell::Blue]);
    }
}
