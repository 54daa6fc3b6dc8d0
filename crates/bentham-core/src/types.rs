//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position in the town
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given town dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: ((self.x % width) + width) % width,
            y: ((self.y % height) + height) % height,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass offsets making up a Moore neighbourhood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// House colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Blue,
}

impl Colour {
    pub fn all() -> [Colour; 2] {
        [Colour::Red, Colour::Blue]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::Red => write!(f, "red"),
            Colour::Blue => write!(f, "blue"),
        }
    }
}

/// State of a single grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Blue,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn colour(&self) -> Option<Colour> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Colour::Red),
            Cell::Blue => Some(Colour::Blue),
        }
    }
}

impl From<Colour> for Cell {
    fn from(colour: Colour) -> Self {
        match colour {
            Colour::Red => Cell::Red,
            Colour::Blue => Cell::Blue,
        }
    }
}

/// Coloured houses found around a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighbourCounts {
    pub red: u32,
    pub blue: u32,
}

impl NeighbourCounts {
    pub fn new(red: u32, blue: u32) -> Self {
        Self { red, blue }
    }

    pub fn total(&self) -> u32 {
        self.red + self.blue
    }

    pub fn of(&self, colour: Colour) -> u32 {
        match colour {
            Colour::Red => self.red,
            Colour::Blue => self.blue,
        }
    }

    /// Fraction of coloured neighbours sharing `colour`.
    ///
    /// A cell with no coloured neighbours scores 0, so isolated houses are
    /// always the least satisfied.
    pub fn similar_fraction(&self, colour: Colour) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.of(colour) as f64 / total as f64,
        }
    }

    pub(crate) fn record(&mut self, cell: Cell) {
        match cell {
            Cell::Empty => {}
            Cell::Red => self.red += 1,
            Cell::Blue => self.blue += 1,
        }
    }
}

impl Extend<Cell> for NeighbourCounts {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.record(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(5, 5));

        let pos = Position::new(-1, -1);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(9, 9));

        let pos = Position::new(10, 10);
        let wrapped = pos.wrap(10, 10);
        assert_eq!(wrapped, Position::new(0, 0));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.to_delta(), (0, -1));
        assert_eq!(Direction::South.to_delta(), (0, 1));
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));
    }

    #[test]
    fn test_directions_cover_moore_neighbourhood() {
        let mut deltas: Vec<_> = Direction::all().iter().map(|d| d.to_delta()).collect();
        deltas.sort();
        deltas.dedup();
        assert_eq!(deltas.len(), 8);
        assert!(!deltas.contains(&(0, 0)));
    }

    #[test]
    fn test_cell_colour_conversion() {
        assert_eq!(Cell::from(Colour::Red).colour(), Some(Colour::Red));
        assert_eq!(Cell::from(Colour::Blue).colour(), Some(Colour::Blue));
        assert_eq!(Cell::Empty.colour(), None);
        assert!(Cell::default().is_empty());
    }

    #[test]
    fn test_similar_fraction() {
        let counts = NeighbourCounts::new(3, 1);
        assert_eq!(counts.similar_fraction(Colour::Red), 0.75);
        assert_eq!(counts.similar_fraction(Colour::Blue), 0.25);
    }

    #[test]
    fn test_isolated_fraction_is_zero() {
        let counts = NeighbourCounts::default();
        assert_eq!(counts.similar_fraction(Colour::Red), 0.0);
        assert_eq!(counts.similar_fraction(Colour::Blue), 0.0);
    }

    #[test]
    fn test_counts_extend_skips_empty() {
        let mut counts = NeighbourCounts::default();
        counts.extend([Cell::Red, Cell::Empty, Cell::Blue, Cell::Red]);
        assert_eq!(counts, NeighbourCounts::new(2, 1));
    }
}
