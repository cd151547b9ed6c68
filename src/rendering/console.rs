//! # Console
//!
//! An off-screen grid of character cells. Everything is drawn here first and
//! the display backend copies it to the window.

use crate::game::{Color, Position};
use crate::utils::Grid;

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }
}

/// Character grid the screens draw into.
#[derive(Debug, Clone)]
pub struct Console {
    cells: Grid<Cell>,
}

impl Console {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            cells: Grid::new(width, height, Cell::default()),
        }
    }

    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    /// Blanks every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells.iter()
    }

    /// Sets glyph and foreground, keeping the background.
    pub fn put(&mut self, pos: Position, glyph: char, fg: Color) {
        if let Some(cell) = self.cells.get_mut(pos) {
            cell.glyph = glyph;
            cell.fg = fg;
        }
    }

    pub fn set_bg(&mut self, pos: Position, bg: Color) {
        if let Some(cell) = self.cells.get_mut(pos) {
            cell.bg = bg;
        }
    }

    /// Draws the cell in reverse video.
    pub fn invert(&mut self, pos: Position) {
        if let Some(cell) = self.cells.get_mut(pos) {
            cell.fg = Color::BLACK;
            cell.bg = Color::WHITE;
        }
    }

    /// Prints `text` starting at `pos`, clipped at the right edge.
    pub fn print(&mut self, pos: Position, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(Position::new(pos.x + i as i32, pos.y), ch, fg);
        }
    }

    /// Fills a rectangle's background and blanks its glyphs.
    pub fn fill_rect(&mut self, top_left: Position, width: i32, height: i32, bg: Color) {
        for y in top_left.y..top_left.y + height {
            for x in top_left.x..top_left.x + width {
                if let Some(cell) = self.cells.get_mut(Position::new(x, y)) {
                    *cell = Cell {
                        glyph: ' ',
                        fg: Color::WHITE,
                        bg,
                    };
                }
            }
        }
    }

    /// The glyphs of row `y` as a string, trailing blanks trimmed.
    pub fn row_text(&self, y: i32) -> String {
        let row: String = (0..self.width())
            .map(|x| self.cells.get(Position::new(x, y)).map_or(' ', |cell| cell.glyph))
            .collect();
        row.trim_end().to_string()
    }

    /// Whether any row contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height()).any(|y| self.row_text(y).contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_clips() {
        let mut console = Console::new(5, 2);
        console.print(Position::new(2, 1), "hello", Color::WHITE);
        assert_eq!(console.row_text(1), "  hel");
        assert_eq!(console.row_text(0), "");
    }

    #[test]
    fn test_clear_and_invert() {
        let mut console = Console::new(3, 3);
        console.put(Position::new(1, 1), '@', Color::WHITE);
        console.invert(Position::new(1, 1));
        assert_eq!(console.cell(Position::new(1, 1)).unwrap().bg, Color::WHITE);
        console.clear();
        assert_eq!(*console.cell(Position::new(1, 1)).unwrap(), Cell::default());
    }
}
