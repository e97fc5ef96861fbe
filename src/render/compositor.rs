//! Frame buffer and frame diffing.
//!
//! The `Compositor` holds the full screen as a 2D grid of `StyledCell`s.
//! Widgets render into strips, which are placed into the buffer; `diff`
//! against the previous frame yields only the cells the driver must rewrite.

use crate::geometry::Region;
use super::strip::{CellStyle, Strip, StyledCell};

/// A single cell that changed between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

/// A full-screen cell buffer.
#[derive(Debug, Clone)]
pub struct Compositor {
    /// `screen[y][x]`.
    screen: Vec<Vec<StyledCell>>,
    pub width: u16,
    pub height: u16,
}

impl Compositor {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: Self::blank_screen(width, height),
            width,
            height,
        }
    }

    /// The whole screen as a region.
    pub fn area(&self) -> Region {
        Region::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Resize and reset every cell to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.screen = Self::blank_screen(width, height);
    }

    /// Fill every cell with a blank of the given style.
    pub fn fill(&mut self, style: CellStyle) {
        for row in &mut self.screen {
            for cell in row.iter_mut() {
                *cell = StyledCell::blank_styled(style.clone());
            }
        }
    }

    /// Write strips into the buffer, clipped to `clip` and the screen bounds.
    pub fn place_strips(&mut self, strips: &[Strip], clip: Region) {
        let clip = clip.intersection(self.area());
        if clip.is_empty() {
            return;
        }

        for strip in strips {
            if strip.y < clip.y || strip.y >= clip.bottom() {
                continue;
            }
            let row = &mut self.screen[strip.y as usize];
            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x >= clip.x && x < clip.right() {
                    row[x as usize] = cell.clone();
                }
            }
        }
    }

    /// Cells that differ from `previous`. Cells outside the previous frame's
    /// bounds always count as changed.
    pub fn diff(&self, previous: &Compositor) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.screen.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let unchanged = previous
                    .screen
                    .get(y)
                    .and_then(|prev_row| prev_row.get(x))
                    .is_some_and(|prev| prev == cell);
                if !unchanged {
                    updates.push(CellUpdate {
                        x: x as u16,
                        y: y as u16,
                        cell: cell.clone(),
                    });
                }
            }
        }
        updates
    }

    /// The cell at (x, y), or `None` when out of bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.screen
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    fn blank_screen(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
        vec![vec![StyledCell::blank(); width as usize]; height as usize]
    }
}
