//! Terminal rendering of the final town.

use bentham_core::Cell;
use bentham_town::Grid;
use colored::Colorize;

/// How cells are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Coloured blocks: grey for empty, red and blue for houses
    Ansi,
    /// Plain characters, for logs and pipes
    Plain,
}

impl Palette {
    fn glyph(&self, cell: Cell) -> String {
        match self {
            Palette::Plain => match cell {
                Cell::Empty => ".",
                Cell::Red => "R",
                Cell::Blue => "B",
            }
            .to_string(),
            Palette::Ansi => match cell {
                Cell::Empty => "██".truecolor(211, 211, 211).to_string(),
                Cell::Red => "██".red().to_string(),
                Cell::Blue => "██".blue().to_string(),
            },
        }
    }
}

/// Draw the grid one row per line
pub fn render(grid: &Grid, palette: Palette) -> String {
    let mut out = String::with_capacity(grid.len() * 2 + grid.height as usize);
    for row in grid.rows() {
        for cell in row {
            out.push_str(&palette.glyph(*cell));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bentham_core::Position;

    #[test]
    fn test_plain_render() {
        let mut grid = Grid::new(3, 2);
        grid.set(Position::new(0, 0), Cell::Red);
        grid.set(Position::new(2, 1), Cell::Blue);

        assert_eq!(render(&grid, Palette::Plain), "R..\n..B\n");
    }

    #[test]
    fn test_render_has_one_line_per_row() {
        let grid = Grid::new(5, 4);
        let rendered = render(&grid, Palette::Ansi);
        assert_eq!(rendered.lines().count(), 4);
    }
}
