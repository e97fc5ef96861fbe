//! TablePilot: programmatic interaction with a headless table view.
//!
//! The pilot owns a [`TableView`] laid out over a virtual screen of a fixed
//! size. It simulates pointer and keyboard input at screen coordinates, runs
//! build passes, and renders the screen to text for assertions.

use crate::event::input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::Region;
use crate::render::compositor::Compositor;
use crate::table::{StepOutcome, TableView};
use crate::widget::Widget;

use super::snapshot::compositor_to_string;

// ---------------------------------------------------------------------------
// TablePilot
// ---------------------------------------------------------------------------

/// A headless driver for a [`TableView`].
///
/// # Examples
///
/// ```ignore
/// use canvas_table::testing::TablePilot;
/// use canvas_table::table::{TableOptions, TableView};
///
/// let view = TableView::new(vec!["A".into()], vec![], TableOptions::default())?;
/// let mut pilot = TablePilot::new(view, 40, 10);
/// pilot.settle();
/// pilot.click(1, 0);
/// ```
pub struct TablePilot {
    view: TableView,
    compositor: Compositor,
}

impl TablePilot {
    /// Place `view` over a `width` x `height` screen.
    pub fn new(mut view: TableView, width: u16, height: u16) -> Self {
        let compositor = Compositor::new(width, height);
        view.set_area(compositor.area());
        Self { view, compositor }
    }

    // ── Pipeline ─────────────────────────────────────────────────────

    /// Run one renderer step.
    pub fn step(&mut self) -> StepOutcome {
        self.view.step()
    }

    /// Run up to `n` steps that draw something; stops early when the pass ends.
    pub fn steps(&mut self, n: usize) -> usize {
        let mut drawn = 0;
        while drawn < n {
            match self.view.step() {
                StepOutcome::Drew => drawn += 1,
                StepOutcome::Pending => std::thread::yield_now(),
                StepOutcome::Complete | StepOutcome::Idle => break,
            }
        }
        drawn
    }

    /// Run the current pass to completion.
    pub fn settle(&mut self) -> usize {
        self.view.run_to_completion()
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn send(&mut self, event: InputEvent) -> bool {
        if let InputEvent::Resize { width, height } = event {
            self.resize(width, height);
            return true;
        }
        self.view.handle_input(&event)
    }

    /// Left click at screen position (x, y).
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        self.mouse(MouseAction::Down(MouseBtn::Left), x, y, Modifiers::NONE)
    }

    /// Move the pointer to (x, y).
    pub fn hover(&mut self, x: u16, y: u16) -> bool {
        self.mouse(MouseAction::Moved, x, y, Modifiers::NONE)
    }

    /// One wheel notch down (`down = true`) or up at (x, y).
    pub fn wheel(&mut self, x: u16, y: u16, down: bool, modifiers: Modifiers) -> bool {
        let kind = if down {
            MouseAction::ScrollDown
        } else {
            MouseAction::ScrollUp
        };
        self.mouse(kind, x, y, modifiers)
    }

    pub fn press_key(&mut self, key: Key) -> bool {
        self.send(InputEvent::Key(KeyEvent::new(key, Modifiers::NONE)))
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.compositor.resize(width, height);
        self.view.set_area(self.compositor.area());
    }

    fn mouse(&mut self, kind: MouseAction, x: u16, y: u16, modifiers: Modifiers) -> bool {
        self.send(InputEvent::Mouse(
            MouseEvent::new(kind, x, y).with_modifiers(modifiers),
        ))
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TableView {
        &mut self.view
    }

    pub fn into_view(self) -> TableView {
        self.view
    }

    // ── Render helpers ───────────────────────────────────────────────

    /// Render the view into the virtual screen and return it as text.
    pub fn render_to_text(&mut self) -> String {
        let area: Region = self.compositor.area();
        let theme = self.view.theme().clone();
        self.compositor.fill(theme.style_on(&theme.background));
        let strips = self.view.render(area, &theme);
        self.compositor.place_strips(&strips, area);
        compositor_to_string(&self.compositor)
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{row, CellTarget, Paint, TableOptions};

    fn pilot() -> TablePilot {
        let view = TableView::new(
            vec!["A".into(), "B".into()],
            vec![row(["x", "y"]), row(["p", "q"])],
            TableOptions::default(),
        )
        .unwrap();
        TablePilot::new(view, 40, 8)
    }

    #[test]
    fn settle_runs_whole_pass() {
        let mut p = pilot();
        assert_eq!(p.settle(), 5);
        assert!(!p.view().is_building());
    }

    #[test]
    fn steps_are_bounded() {
        let mut p = pilot();
        assert_eq!(p.steps(2), 2);
        assert!(p.view().is_building());
        assert_eq!(p.steps(10), 3);
    }

    #[test]
    fn click_header_selects_column() {
        let mut p = pilot();
        p.settle();
        // Column "B" starts at x = 3 + 1 + 10 + 1 = 15.
        assert!(p.click(16, 0));
        let selected: Vec<_> = p.view().selected_indices().into_iter().collect();
        assert_eq!(selected, vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn hover_recolors_cell() {
        let mut p = pilot();
        p.settle();
        p.hover(5, 2);
        assert_eq!(
            p.view().cell(CellTarget::Data(1, 1)).map(|c| c.paint),
            Some(Paint::Hover)
        );
    }

    #[test]
    fn resize_moves_the_viewport() {
        let mut p = pilot();
        p.resize(10, 4);
        assert_eq!(p.view().area(), Region::new(0, 0, 10, 4));
        assert_eq!(p.compositor().width, 10);
    }

    #[test]
    fn rendered_text_shows_labels() {
        let mut p = pilot();
        p.settle();
        let text = p.render_to_text();
        let first = text.lines().next().unwrap_or("");
        assert!(first.contains('A'));
        assert!(first.contains('B'));
        assert!(text.contains('x'));
        assert!(text.contains('q'));
    }
}
