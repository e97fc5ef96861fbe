//! Viewport scrolling and scrollbars.
//!
//! `ScrollState` clips the table's content extent to the visible viewport.
//! The content extent grows while a build pass streams rows in, so the offset
//! is re-clamped every time either size changes. `ScrollbarState` turns the
//! state into a thumb position/size and draws a one-cell-wide track.

use crate::geometry::{Offset, Region, Size};
use crate::render::strip::Strip;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// Scroll position of a viewport over a larger content area.
///
/// `offset` is always within `[0, content_size - viewport_size]` per axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub offset: Offset,
    pub content_size: Size,
    pub viewport_size: Size,
}

impl ScrollState {
    pub fn new(content_size: Size, viewport_size: Size) -> Self {
        Self {
            offset: Offset::new(0, 0),
            content_size,
            viewport_size,
        }
    }

    /// Largest valid offset per axis.
    pub fn max_scroll(&self) -> Offset {
        Offset::new(
            (self.content_size.width - self.viewport_size.width).max(0),
            (self.content_size.height - self.viewport_size.height).max(0),
        )
    }

    /// Scroll to an absolute position, clamped.
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        let max = self.max_scroll();
        self.offset = Offset::new(x.clamp(0, max.x), y.clamp(0, max.y));
    }

    /// Scroll by a relative delta, clamped.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_to(self.offset.x + dx, self.offset.y + dy);
    }

    pub fn is_scrollable_x(&self) -> bool {
        self.content_size.width > self.viewport_size.width
    }

    pub fn is_scrollable_y(&self) -> bool {
        self.content_size.height > self.viewport_size.height
    }

    /// The visible window in content coordinates.
    pub fn visible_region(&self) -> Region {
        Region::new(
            self.offset.x,
            self.offset.y,
            self.viewport_size.width,
            self.viewport_size.height,
        )
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
        self.scroll_to(self.offset.x, self.offset.y);
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
        self.scroll_to(self.offset.x, self.offset.y);
    }
}

// ---------------------------------------------------------------------------
// ScrollbarState
// ---------------------------------------------------------------------------

/// Thumb geometry as fractions of the track, both in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollbarState {
    pub thumb_position: f32,
    pub thumb_size: f32,
}

impl ScrollbarState {
    /// Thumb geometry for the vertical (`true`) or horizontal axis.
    pub fn from_scroll_state(state: &ScrollState, vertical: bool) -> Self {
        let (content, viewport, offset) = if vertical {
            (state.content_size.height, state.viewport_size.height, state.offset.y)
        } else {
            (state.content_size.width, state.viewport_size.width, state.offset.x)
        };

        if content <= 0 || viewport <= 0 {
            return ScrollbarState {
                thumb_position: 0.0,
                thumb_size: 1.0,
            };
        }

        let max_scroll = (content - viewport).max(0);
        let thumb_position = if max_scroll > 0 {
            offset as f32 / max_scroll as f32
        } else {
            0.0
        };

        ScrollbarState {
            thumb_position: thumb_position.clamp(0.0, 1.0),
            thumb_size: (viewport as f32 / content as f32).clamp(0.0, 1.0),
        }
    }

    /// Thumb span in track cells: `(start, len)`, `len >= 1` for a non-empty track.
    pub fn thumb_span(&self, track_len: i32) -> (i32, i32) {
        if track_len <= 0 {
            return (0, 0);
        }
        let len = ((self.thumb_size * track_len as f32).round() as i32).clamp(1, track_len);
        let start = (self.thumb_position * (track_len - len) as f32).round() as i32;
        (start.clamp(0, track_len - len), len)
    }

    /// Draw the track into `track` (one cell thick along the other axis).
    pub fn render(&self, track: Region, vertical: bool, theme: &Theme) -> Vec<Strip> {
        if track.is_empty() {
            return Vec::new();
        }
        let track_style = theme.style_on(&theme.widget_bg);
        let thumb_style = theme.style_on(&theme.border);

        if vertical {
            let (start, len) = self.thumb_span(track.height);
            (0..track.height)
                .map(|i| {
                    let mut strip = Strip::new(track.y + i, track.x);
                    let on_thumb = i >= start && i < start + len;
                    strip.fill(track.width, if on_thumb { thumb_style.clone() } else { track_style.clone() });
                    strip
                })
                .collect()
        } else {
            let (start, len) = self.thumb_span(track.width);
            let mut strip = Strip::new(track.y, track.x);
            for i in 0..track.width {
                let on_thumb = i >= start && i < start + len;
                strip.push(' ', if on_thumb { thumb_style.clone() } else { track_style.clone() });
            }
            vec![strip]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ScrollState {
        ScrollState::new(Size::new(100, 200), Size::new(40, 30))
    }

    #[test]
    fn scroll_clamps_both_ends() {
        let mut s = state();
        s.scroll_to(999, 999);
        assert_eq!(s.offset, Offset::new(60, 170));
        s.scroll_by(-500, -500);
        assert_eq!(s.offset, Offset::new(0, 0));
    }

    #[test]
    fn growing_content_keeps_offset() {
        let mut s = ScrollState::new(Size::new(10, 10), Size::new(10, 10));
        s.scroll_by(0, 5);
        assert_eq!(s.offset.y, 0);
        s.set_content_size(Size::new(10, 50));
        s.scroll_by(0, 5);
        assert_eq!(s.offset.y, 5);
        s.set_content_size(Size::new(10, 12));
        assert_eq!(s.offset.y, 2);
    }

    #[test]
    fn visible_region_follows_offset() {
        let mut s = state();
        s.scroll_to(10, 25);
        assert_eq!(s.visible_region(), Region::new(10, 25, 40, 30));
        assert!(s.is_scrollable_x());
        assert!(s.is_scrollable_y());
    }

    #[test]
    fn scrollbar_thumb_geometry() {
        let mut s = state();
        s.scroll_to(0, 85);
        let bar = ScrollbarState::from_scroll_state(&s, true);
        assert!((bar.thumb_position - 0.5).abs() < f32::EPSILON);
        assert!((bar.thumb_size - 30.0 / 200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn scrollbar_without_content_fills_track() {
        let s = ScrollState::new(Size::ZERO, Size::new(40, 30));
        let bar = ScrollbarState::from_scroll_state(&s, false);
        assert_eq!(bar.thumb_span(10), (0, 10));
    }

    #[test]
    fn thumb_span_at_end_of_track() {
        let bar = ScrollbarState {
            thumb_position: 1.0,
            thumb_size: 0.25,
        };
        assert_eq!(bar.thumb_span(20), (15, 5));
        assert_eq!(bar.thumb_span(0), (0, 0));
    }

    #[test]
    fn render_vertical_track_paints_thumb() {
        let theme = Theme::dark();
        let bar = ScrollbarState {
            thumb_position: 0.0,
            thumb_size: 0.5,
        };
        let strips = bar.render(Region::new(9, 0, 1, 4), true, &theme);
        assert_eq!(strips.len(), 4);
        assert_eq!(strips[0].cells[0].style.bg.as_deref(), Some(theme.border.as_str()));
        assert_eq!(strips[3].cells[0].style.bg.as_deref(), Some(theme.widget_bg.as_str()));
    }
}
