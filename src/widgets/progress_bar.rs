//! Progress bar: a horizontal gauge with a centered percentage.
//!
//! The table view overlays one while a build pass is running. The bar is
//! drawn on the middle line of its region; the other lines are padding.

use std::any::Any;

use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::table::progress::Progress;
use crate::theme::Theme;
use crate::widget::traits::Widget;

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    fraction: f64,
}

impl ProgressBar {
    pub fn new(fraction: f64) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// `"NN%"`, rounded down so a running pass never shows 100%.
    pub fn label(&self) -> String {
        format!("{}%", (self.fraction * 100.0).floor() as u32)
    }

    /// Filled cells out of `width`.
    pub fn filled(&self, width: i32) -> i32 {
        ((self.fraction * f64::from(width.max(0))).round() as i32).clamp(0, width.max(0))
    }
}

impl From<Progress> for ProgressBar {
    fn from(progress: Progress) -> Self {
        Self::new(progress.fraction)
    }
}

impl Widget for ProgressBar {
    fn widget_type(&self) -> &str {
        "ProgressBar"
    }

    fn render(&self, region: Region, theme: &Theme) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let pad = theme.style_on(&theme.background);
        let fill = theme.style_on(&theme.accent);
        let track = theme.style_on(&theme.widget_bg);
        let bar_line = region.height / 2;

        let label: Vec<char> = self.label().chars().collect();
        let label_len = label.len() as i32;
        let label_start = (region.width - label_len) / 2;
        let filled = self.filled(region.width);

        (0..region.height)
            .map(|line| {
                let mut strip = Strip::new(region.y + line, region.x);
                if line != bar_line {
                    strip.fill(region.width, pad.clone());
                    return strip;
                }
                for i in 0..region.width {
                    let style = if i < filled { fill.clone() } else { track.clone() };
                    let ch = if label_start >= 0 && i >= label_start && i < label_start + label_len {
                        label[(i - label_start) as usize]
                    } else {
                        ' '
                    };
                    strip.push(ch, style);
                }
                strip
            })
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
