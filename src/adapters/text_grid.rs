//! Character display adapter.
//!
//! Each surface is a [`TextGrid`]: a 16×2 character frame buffer with a
//! cursor, the same model as an HD44780-class LCD.  The panel wire
//! protocol (I²C backpack, backlight) sits outside this crate; this
//! adapter keeps the frame the panel should show and mirrors every
//! changed row to the log under the `lcd` target.
//!
//! Text past the last column is dropped, as on the panel.  Characters the
//! panel's ROM cannot show (anything outside printable ASCII) become `?`.

use log::debug;

use crate::app::ports::DisplayPort;
use crate::error::SinkError;
use crate::pins::{LCD_COLUMNS, LCD_ROWS};
use crate::report::Surface;

const BLANK: u8 = b' ';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    cells: [[u8; LCD_COLUMNS]; LCD_ROWS],
    col: usize,
    row: usize,
}

impl Default for TextGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TextGrid {
    pub fn new() -> Self {
        Self {
            cells: [[BLANK; LCD_COLUMNS]; LCD_ROWS],
            col: 0,
            row: 0,
        }
    }

    /// Blank every cell and home the cursor.
    pub fn clear(&mut self) {
        self.cells = [[BLANK; LCD_COLUMNS]; LCD_ROWS];
        self.col = 0;
        self.row = 0;
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), SinkError> {
        let (col, row) = (usize::from(col), usize::from(row));
        if col >= LCD_COLUMNS || row >= LCD_ROWS {
            return Err(SinkError::OutOfBounds);
        }
        self.col = col;
        self.row = row;
        Ok(())
    }

    /// Write at the cursor and advance it.  Returns the number of
    /// characters that landed on the grid.
    pub fn print(&mut self, text: &str) -> usize {
        let mut written = 0;
        for ch in text.chars() {
            if self.col >= LCD_COLUMNS {
                break;
            }
            self.cells[self.row][self.col] = if ch.is_ascii_graphic() || ch == ' ' {
                ch as u8
            } else {
                b'?'
            };
            self.col += 1;
            written += 1;
        }
        written
    }

    /// One row's text, trailing blanks included.
    pub fn row(&self, row: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| core::str::from_utf8(r).ok())
            .unwrap_or("")
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.col, self.row)
    }
}

/// The two character displays, addressed by [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct TextGridDisplays {
    primary: TextGrid,
    secondary: TextGrid,
}

impl TextGridDisplays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self, surface: Surface) -> &TextGrid {
        match surface {
            Surface::Primary => &self.primary,
            Surface::Secondary => &self.secondary,
        }
    }

    fn grid_mut(&mut self, surface: Surface) -> &mut TextGrid {
        match surface {
            Surface::Primary => &mut self.primary,
            Surface::Secondary => &mut self.secondary,
        }
    }
}

impl DisplayPort for TextGridDisplays {
    fn clear(&mut self, surface: Surface) -> Result<(), SinkError> {
        self.grid_mut(surface).clear();
        Ok(())
    }

    fn set_cursor(&mut self, surface: Surface, col: u8, row: u8) -> Result<(), SinkError> {
        self.grid_mut(surface).set_cursor(col, row)
    }

    fn print(&mut self, surface: Surface, text: &str) -> Result<(), SinkError> {
        let grid = self.grid_mut(surface);
        let written = grid.print(text);
        let (_, row) = grid.cursor();
        if written < text.chars().count() {
            debug!(target: "lcd", "{} row {}: clipped {:?}", surface, row, text);
        }
        debug!(target: "lcd", "{} row {}: |{}|", surface, row, grid.row(row));
        Ok(())
    }
}
