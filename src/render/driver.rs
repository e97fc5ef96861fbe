//! Crossterm terminal backend.
//!
//! The `Driver` owns a buffered stdout writer. It switches the terminal into
//! the alternate screen with raw mode and mouse capture (the table needs
//! hover and click events), and writes compositor updates.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, event, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::compositor::CellUpdate;
use super::strip::CellStyle;

/// Terminal output backend.
pub struct Driver {
    writer: BufWriter<Stdout>,
}

impl Driver {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(io::stdout()),
        })
    }

    /// Enter the alternate screen, enable raw mode and mouse capture.
    pub fn enter(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, event::EnableMouseCapture, cursor::Hide)?;
        terminal::enable_raw_mode()
    }

    /// Undo everything `enter` did.
    pub fn leave(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show, event::DisableMouseCapture, LeaveAlternateScreen)
    }

    /// Queue a batch of cell updates. Call [`flush`](Self::flush) afterwards.
    pub fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.apply_cell_style(&update.cell.style)?;
            queue!(self.writer, Print(update.cell.ch), SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Terminal size as (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn apply_cell_style(&mut self, style: &CellStyle) -> io::Result<()> {
        if let Some(color) = style.fg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetForegroundColor(color))?;
        }
        if let Some(color) = style.bg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetBackgroundColor(color))?;
        }
        if style.bold {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Color parsing
// ---------------------------------------------------------------------------

/// Parse `#rrggbb`, `#rgb`, or a basic named color.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "grey" | "gray" => Some(Color::Grey),
        "dark_grey" | "dark_gray" | "darkgrey" | "darkgray" => Some(Color::DarkGrey),
        _ => None,
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        }),
        3 => {
            let (r, g, b) = (channel(0..1)?, channel(1..2)?, channel(2..3)?);
            Some(Color::Rgb {
                r: r * 17,
                g: g * 17,
                b: b * 17,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_theme_hex_colors() {
        assert_eq!(
            parse_color("#2b2b2b"),
            Some(Color::Rgb { r: 0x2b, g: 0x2b, b: 0x2b })
        );
        assert_eq!(
            parse_color("#4DA6FF"),
            Some(Color::Rgb { r: 0x4d, g: 0xa6, b: 0xff })
        );
    }

    #[test]
    fn parse_short_hex() {
        assert_eq!(parse_color("#abc"), Some(Color::Rgb { r: 0xaa, g: 0xbb, b: 0xcc }));
    }

    #[test]
    fn parse_named_and_invalid() {
        assert_eq!(parse_color(" White "), Some(Color::White));
        assert_eq!(parse_color("gray"), Some(Color::Grey));
        assert_eq!(parse_color("#ff00"), None);
        assert_eq!(parse_color("#gghhii"), None);
        assert_eq!(parse_color("rainbow"), None);
    }
}
