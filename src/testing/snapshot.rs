//! Snapshot rendering helpers.
//!
//! Functions for converting rendered widget output (strips, compositor screens)
//! into plain-text strings suitable for snapshot testing and assertions.

use crate::geometry::Region;
use crate::render::compositor::Compositor;
use crate::render::strip::Strip;
use crate::theme::Theme;
use crate::widget::Widget;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a widget to plain text with the default theme.
///
/// The widget is rendered into a `width` x `height` region at the origin.
/// Each row becomes one line with trailing spaces trimmed; lines are joined
/// with `'\n'` and the last line has no trailing newline.
///
/// # Examples
///
/// ```ignore
/// use canvas_table::testing::render_to_string;
/// use canvas_table::widgets::ProgressBar;
///
/// let output = render_to_string(&ProgressBar::new(0.5), 20, 1);
/// assert!(output.contains("50%"));
/// ```
pub fn render_to_string(widget: &dyn Widget, width: i32, height: i32) -> String {
    render_with_theme(widget, width, height, &Theme::default())
}

/// Same as [`render_to_string`] with an explicit theme.
pub fn render_with_theme(widget: &dyn Widget, width: i32, height: i32, theme: &Theme) -> String {
    let region = Region::new(0, 0, width, height);
    let strips = widget.render(region, theme);
    strips_to_string(&strips, width, height)
}

/// Convert raw strips to a plain text string.
///
/// Builds a `width` x `height` grid of spaces, then overlays each strip's cells
/// in order, so later strips paint over earlier ones.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }

    let w = width as usize;
    let h = height as usize;
    let mut grid: Vec<Vec<char>> = vec![vec![' '; w]; h];

    for strip in strips {
        let y = strip.y;
        if y < 0 || y >= height {
            continue;
        }
        let row = y as usize;
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if x < 0 || x >= width {
                continue;
            }
            grid[row][x as usize] = cell.ch;
        }
    }

    grid.into_iter()
        .map(|row| {
            let s: String = row.into_iter().collect();
            s.trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert a full compositor screen to a plain text string.
pub fn compositor_to_string(compositor: &Compositor) -> String {
    let (w, h) = (compositor.width, compositor.height);
    if w == 0 || h == 0 {
        return String::new();
    }

    (0..h)
        .map(|y| {
            let row: String = (0..w)
                .map(|x| compositor.get_cell(x, y).map_or(' ', |cell| cell.ch))
                .collect();
            row.trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
