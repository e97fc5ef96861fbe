//! Strip: a horizontal run of styled terminal cells.
//!
//! Strips are the drawing surface of the table view. Each visual cell renders
//! into one strip per line of its row height; the compositor and the snapshot
//! helpers place strips into a 2D buffer.

use unicode_width::UnicodeWidthChar;

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are optional strings parsed by the driver as named colors or
/// `#rrggbb` hex values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same style with bold set.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// One character with its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    pub fn blank() -> Self {
        Self::blank_styled(CellStyle::default())
    }

    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal line of styled cells starting at `(x_offset, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub y: i32,
    pub x_offset: i32,
    pub cells: Vec<StyledCell>,
}

impl Strip {
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self {
            y,
            x_offset,
            cells: Vec::new(),
        }
    }

    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    /// Push `text` one terminal column at a time, stopping at `max_width`.
    ///
    /// Zero-width characters are skipped; wide characters take two columns
    /// (the second one is a blank). Returns the number of columns pushed.
    pub fn push_text(&mut self, text: &str, max_width: usize, style: &CellStyle) -> usize {
        let mut used = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            if used + w > max_width {
                break;
            }
            self.push(ch, style.clone());
            for _ in 1..w {
                self.push(' ', style.clone());
            }
            used += w;
        }
        used
    }

    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// Keep only the cells whose absolute x lies in `[x_start, x_end)`.
    pub fn crop(&self, x_start: i32, x_end: i32) -> Strip {
        let mut result = Strip::new(self.y, x_start);
        for (i, cell) in self.cells.iter().enumerate() {
            let cell_x = self.x_offset + i as i32;
            if cell_x >= x_start && cell_x < x_end {
                if result.cells.is_empty() {
                    result.x_offset = cell_x;
                }
                result.cells.push(cell.clone());
            }
        }
        result
    }

    /// Pad with styled blanks (or truncate) to exactly `width` cells.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let w = width.max(0) as usize;
        if self.cells.len() < w {
            self.cells.resize(w, StyledCell::blank_styled(style));
        } else {
            self.cells.truncate(w);
        }
    }

    /// The characters of this strip as a `String`.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bg(color: &str) -> CellStyle {
        CellStyle {
            bg: Some(color.into()),
            ..CellStyle::default()
        }
    }

    #[test]
    fn push_text_stops_at_width() {
        let mut strip = Strip::new(0, 0);
        let used = strip.push_text("Hello World", 5, &CellStyle::new());
        assert_eq!(used, 5);
        assert_eq!(strip.text(), "Hello");
    }

    #[test]
    fn push_text_wide_chars_take_two_columns() {
        let mut strip = Strip::new(0, 0);
        let used = strip.push_text("日本", 3, &CellStyle::new());
        // The second glyph would overflow.
        assert_eq!(used, 2);
        assert_eq!(strip.width(), 2);
        assert_eq!(strip.cells[0].ch, '日');
    }

    #[test]
    fn crop_keeps_window() {
        let mut strip = Strip::new(0, 2);
        strip.push_text("abcdef", 6, &CellStyle::new());
        let cropped = strip.crop(4, 6);
        assert_eq!(cropped.x_offset, 4);
        assert_eq!(cropped.text(), "cd");
        assert!(strip.crop(20, 30).cells.is_empty());
    }

    #[test]
    fn fill_pads_and_truncates() {
        let mut strip = Strip::new(0, 0);
        strip.push('x', CellStyle::new());
        strip.fill(3, bg("blue"));
        assert_eq!(strip.text(), "x  ");
        assert_eq!(strip.cells[2].style.bg.as_deref(), Some("blue"));

        strip.fill(1, CellStyle::new());
        assert_eq!(strip.text(), "x");
        assert_eq!(strip.right(), 1);
    }

    #[test]
    fn bold_builder() {
        assert!(CellStyle::new().bold().bold);
    }
}
