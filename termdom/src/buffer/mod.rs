//! The cell grid the renderer paints into and the terminal diffs.

use crate::layout::Rect;
use crate::style::ComputedStyle;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Covered by the right half of a wide character to its left.
    pub continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            style: TextStyle::PLAIN,
            continuation: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Blank every cell of `rect` (clipped to the buffer) with background `bg`.
    pub fn fill(&mut self, rect: Rect, bg: Rgb) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell {
                        symbol: ' ',
                        bg,
                        continuation: false,
                        ..*cell
                    };
                }
            }
        }
    }

    /// Write one line of text starting at `(x, y)`, never past `right`.
    ///
    /// Foreground and attributes come from `style`; the background is only
    /// replaced when the style has one. A wide character that would cross
    /// `right` is dropped.
    pub fn put_line(&mut self, x: u16, y: u16, right: u16, text: &str, style: &ComputedStyle) {
        let mut x = x;
        for ch in text.chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            if x.saturating_add(width) > right {
                break;
            }
            if let Some(cell) = self.get_mut(x, y) {
                cell.symbol = ch;
                cell.fg = style.foreground;
                cell.bg = style.background.unwrap_or(cell.bg);
                cell.style = style.text_style;
                cell.continuation = false;
            }
            for offset in 1..width {
                if let Some(cell) = self.get_mut(x + offset, y) {
                    cell.continuation = true;
                }
            }
            x += width;
        }
    }

    /// Read back one row of characters, mostly useful in tests.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.continuation)
            .map(|cell| cell.symbol)
            .collect()
    }

    /// Cells of `self` that differ from `previous`, with their coordinates.
    pub fn diff<'a>(&'a self, previous: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        let width = usize::from(self.width.max(1));
        self.cells
            .iter()
            .zip(previous.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| ((i % width) as u16, (i / width) as u16, cell))
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}
