//! The table view: matrix, selection, renderer, and viewport in one widget.
//!
//! [`TableView`] is owned by the UI context and serializes every access
//! through `&mut self`. Each data mutator validates its input, swaps the
//! matrix, prunes the selection to the new extent, and starts a fresh build
//! pass. Rendering is cooperative: call [`TableView::step`] from an event
//! loop, or await [`TableView::drive`].

use std::any::Any;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::cells::{CellAction, CellArena, CellTarget, EventKind, VisualCell};
use super::error::TableError;
use super::layout::{GridLayout, HEADER_HEIGHT};
use super::matrix::{CellMatrix, CellValue};
use super::progress::Progress;
use super::renderer::{IncrementalRenderer, StepOutcome};
use super::selection::{SelectionChange, SelectionModel};
use super::sizing::{SizingPolicy, CELL_PADDING};
use super::source::{CsvSource, TabularSource};
use crate::event::input::{InputEvent, Key, KeyEvent, MouseAction, MouseBtn, MouseEvent};
use crate::geometry::{Offset, Region};
use crate::render::strip::{CellStyle, Strip};
use crate::theme::Theme;
use crate::widget::scroll::{ScrollState, ScrollbarState};
use crate::widget::traits::Widget;
use crate::widgets::ProgressBar;

/// Cells scrolled per wheel notch or arrow key.
pub const SCROLL_STEP: i32 = 3;

const PROGRESS_WIDTH: i32 = 40;
const PROGRESS_HEIGHT: i32 = 3;

// ---------------------------------------------------------------------------
// TableOptions
// ---------------------------------------------------------------------------

/// Configuration for a [`TableView`].
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Column width, row height, and truncation rules.
    pub sizing: SizingPolicy,
    /// How long [`TableView::drive`] sleeps while the builder has nothing queued.
    pub poll_interval: Duration,
    /// Palette used when the view renders itself.
    pub theme: Theme,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            sizing: SizingPolicy::default(),
            poll_interval: Duration::from_millis(1),
            theme: Theme::default(),
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sizing policy (builder).
    pub fn with_sizing(mut self, sizing: SizingPolicy) -> Self {
        self.sizing = sizing;
        self
    }

    /// Set the idle poll interval (builder).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the theme (builder).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

// ---------------------------------------------------------------------------
// TableView
// ---------------------------------------------------------------------------

pub struct TableView {
    matrix: Arc<CellMatrix>,
    selection: SelectionModel,
    renderer: IncrementalRenderer,
    scroll: ScrollState,
    area: Region,
    pointer: Option<CellTarget>,
    options: TableOptions,
}

impl TableView {
    /// Build a table from data columns and rows and start the first pass.
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
        options: TableOptions,
    ) -> Result<Self, TableError> {
        let matrix = CellMatrix::from_parts(columns, rows)?;
        Ok(Self::with_matrix(matrix, options))
    }

    /// A table with no data columns and no rows.
    pub fn empty(options: TableOptions) -> Self {
        Self::with_matrix(CellMatrix::new(), options)
    }

    /// Build a table from an external source.
    pub fn from_source(
        source: &dyn TabularSource,
        options: TableOptions,
    ) -> Result<Self, TableError> {
        let matrix = load(source)?;
        Ok(Self::with_matrix(matrix, options))
    }

    fn with_matrix(matrix: CellMatrix, options: TableOptions) -> Self {
        let mut view = Self {
            matrix: Arc::new(matrix),
            selection: SelectionModel::new(),
            renderer: IncrementalRenderer::new(options.sizing.clone()),
            scroll: ScrollState::default(),
            area: Region::EMPTY,
            pointer: None,
            options,
        };
        view.rebuild();
        view
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Replace every row. Fails without changes if any row has the wrong width.
    pub fn set_data(&mut self, rows: Vec<Vec<CellValue>>) -> Result<(), TableError> {
        self.matrix = Arc::new(self.matrix.with_rows(rows)?);
        self.rebuild();
        Ok(())
    }

    /// Replace the data column titles; rows are padded or cut to match.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        Arc::make_mut(&mut self.matrix).set_columns(columns);
        self.rebuild();
    }

    /// Replace columns and rows from `source`. On failure the table is unchanged.
    pub fn set_from_source(&mut self, source: &dyn TabularSource) -> Result<(), TableError> {
        let matrix = load(source)?;
        self.matrix = Arc::new(matrix);
        self.rebuild();
        Ok(())
    }

    /// Load a CSV file with a header row.
    pub fn set_from_csv(&mut self, path: impl AsRef<Path>) -> Result<(), TableError> {
        self.set_from_source(&CsvSource::from_path(path))
    }

    pub fn add_row(&mut self, row: Vec<CellValue>) -> Result<(), TableError> {
        Arc::make_mut(&mut self.matrix).add_row(row)?;
        self.rebuild();
        Ok(())
    }

    /// Drop every row; columns stay.
    pub fn clear_data(&mut self) {
        self.matrix = Arc::new(self.matrix.headers_only());
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let pruned = self.selection.retain_within(self.matrix.extent());
        if !pruned.is_empty() {
            debug!(dropped = pruned.len(), "pruned stale selection");
        }
        self.pointer = None;
        self.renderer.begin(Arc::clone(&self.matrix));
        self.sync_scroll();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Data column titles, index column excluded.
    pub fn column_headers(&self) -> &[String] {
        self.matrix.column_headers()
    }

    /// Data rows as supplied, index cells excluded.
    pub fn data(&self) -> Vec<Vec<CellValue>> {
        self.matrix.data()
    }

    /// The synthesized 1-based index of every row.
    pub fn row_headers(&self) -> Vec<CellValue> {
        self.matrix.row_headers()
    }

    /// Selected cells as `(row, data column)`, both 0-based.
    pub fn selected_indices(&self) -> BTreeSet<(usize, usize)> {
        self.selection.selected_data_indices()
    }

    pub fn matrix(&self) -> &CellMatrix {
        &self.matrix
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn cells(&self) -> &CellArena {
        self.renderer.cells()
    }

    pub fn cell(&self, target: CellTarget) -> Option<&VisualCell> {
        self.renderer.cells().by_target(target)
    }

    pub fn layout(&self) -> &GridLayout {
        self.renderer.layout()
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn theme(&self) -> &Theme {
        &self.options.theme
    }

    /// Generation of the running or last finished build pass.
    pub fn generation(&self) -> u64 {
        self.renderer.generation()
    }

    /// Screen region the view occupies for input and scrolling.
    pub fn area(&self) -> Region {
        self.area
    }

    pub fn set_area(&mut self, area: Region) {
        self.area = area;
        self.scroll.set_viewport_size(viewport_of(area).size());
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn toggle_cell(&mut self, row: usize, column: usize) -> SelectionChange {
        let change = self.selection.toggle_cell(row, column, self.matrix.extent());
        self.renderer.repaint(&change, &self.selection);
        change
    }

    pub fn toggle_row(&mut self, row: usize) -> SelectionChange {
        let change = self.selection.toggle_row(row, self.matrix.extent());
        self.renderer.repaint(&change, &self.selection);
        change
    }

    /// Toggle a column; column 0 toggles the whole table.
    pub fn toggle_column(&mut self, column: usize) -> SelectionChange {
        let change = self.selection.toggle_column(column, self.matrix.extent());
        self.renderer.repaint(&change, &self.selection);
        change
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> SelectionChange {
        let change = self.selection.clear();
        self.renderer.repaint(&change, &self.selection);
        change
    }

    // -----------------------------------------------------------------------
    // Build pipeline
    // -----------------------------------------------------------------------

    pub fn progress(&self) -> Progress {
        self.renderer.progress().snapshot()
    }

    pub fn is_building(&self) -> bool {
        self.renderer.is_building()
    }

    /// Materialize at most one queued instruction. Never blocks.
    pub fn step(&mut self) -> StepOutcome {
        let outcome = self.renderer.step(&self.selection);
        if outcome == StepOutcome::Drew {
            self.sync_scroll();
        }
        outcome
    }

    /// Run the current pass to completion, yielding to the runtime between
    /// steps. Returns the number of instructions drawn.
    ///
    /// Dropping the future between steps is safe; the next call resumes where
    /// this one stopped.
    pub async fn drive(&mut self) -> usize {
        let mut drawn = 0;
        loop {
            match self.step() {
                StepOutcome::Drew => {
                    drawn += 1;
                    tokio::task::yield_now().await;
                }
                StepOutcome::Pending => tokio::time::sleep(self.options.poll_interval).await,
                StepOutcome::Complete | StepOutcome::Idle => return drawn,
            }
        }
    }

    /// Blocking counterpart of [`drive`](Self::drive) for callers without a
    /// runtime.
    pub fn run_to_completion(&mut self) -> usize {
        let mut drawn = 0;
        loop {
            match self.step() {
                StepOutcome::Drew => drawn += 1,
                StepOutcome::Pending => std::thread::yield_now(),
                StepOutcome::Complete | StepOutcome::Idle => return drawn,
            }
        }
    }

    fn sync_scroll(&mut self) {
        self.scroll.set_content_size(self.renderer.layout().content_size());
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Resolve an event on a cell through the handler table.
    pub fn dispatch(&mut self, kind: EventKind, target: CellTarget) -> SelectionChange {
        let Some(action) = self.renderer.cells().handler(kind, target) else {
            return SelectionChange::default();
        };
        match action {
            CellAction::ToggleColumn(column) => self.toggle_column(column),
            CellAction::ToggleRow(row) => self.toggle_row(row),
            CellAction::ToggleCell(row, column) => self.toggle_cell(row, column),
            CellAction::Highlight => {
                self.renderer.highlight(target, &self.selection);
                SelectionChange::default()
            }
            CellAction::Restore => {
                self.renderer.restore(target, &self.selection);
                SelectionChange::default()
            }
        }
    }

    /// The cell under a screen position.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<CellTarget> {
        let viewport = viewport_of(self.area);
        if !viewport.contains(x, y) {
            return None;
        }
        let offset = self.scroll.offset;
        self.renderer
            .layout()
            .hit_test(x - viewport.x + offset.x, y - viewport.y + offset.y)
    }

    /// Handle pointer and keyboard input. Returns whether anything changed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Resize { .. } => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let (x, y) = (i32::from(mouse.x), i32::from(mouse.y));
        match mouse.kind {
            MouseAction::Moved | MouseAction::Drag(_) => self.move_pointer(self.hit_test(x, y)),
            MouseAction::Down(MouseBtn::Left) => {
                self.move_pointer(self.hit_test(x, y));
                match self.hit_test(x, y) {
                    Some(target) => {
                        self.dispatch(EventKind::Click, target);
                        true
                    }
                    None => false,
                }
            }
            MouseAction::ScrollUp | MouseAction::ScrollDown => {
                let delta = if mouse.kind == MouseAction::ScrollUp {
                    -SCROLL_STEP
                } else {
                    SCROLL_STEP
                };
                if mouse.wheel_is_horizontal() {
                    self.scroll_by(delta, 0)
                } else {
                    self.scroll_by(0, delta)
                }
            }
            MouseAction::ScrollLeft => self.scroll_by(-SCROLL_STEP, 0),
            MouseAction::ScrollRight => self.scroll_by(SCROLL_STEP, 0),
            MouseAction::Down(_) | MouseAction::Up(_) => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page = self.scroll.viewport_size.height.max(1);
        match key.code {
            Key::Up => self.scroll_by(0, -SCROLL_STEP),
            Key::Down => self.scroll_by(0, SCROLL_STEP),
            Key::Left => self.scroll_by(-SCROLL_STEP, 0),
            Key::Right => self.scroll_by(SCROLL_STEP, 0),
            Key::PageUp => self.scroll_by(0, -page),
            Key::PageDown => self.scroll_by(0, page),
            Key::Home => self.scroll_to(0, 0),
            Key::End => {
                let max = self.scroll.max_scroll();
                self.scroll_to(self.scroll.offset.x, max.y)
            }
            _ => false,
        }
    }

    fn move_pointer(&mut self, target: Option<CellTarget>) -> bool {
        if target == self.pointer {
            return false;
        }
        if let Some(previous) = self.pointer.take() {
            self.dispatch(EventKind::HoverLeave, previous);
        }
        if let Some(next) = target {
            self.dispatch(EventKind::HoverEnter, next);
        }
        self.pointer = target;
        true
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) -> bool {
        let before = self.scroll.offset;
        self.scroll.scroll_by(dx, dy);
        self.scroll.offset != before
    }

    fn scroll_to(&mut self, x: i32, y: i32) -> bool {
        let before = self.scroll.offset;
        self.scroll.scroll_to(x, y);
        self.scroll.offset != before
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn render_cells(&self, viewport: Region, scroll: &ScrollState, theme: &Theme) -> Vec<Strip> {
        let layout = self.renderer.layout();
        let window = scroll.visible_region();
        let columns = layout.columns_in(window.x, window.right());
        let rows = layout.rows_in(window.y, window.bottom());

        let mut targets: Vec<CellTarget> = Vec::new();
        if window.y < HEADER_HEIGHT {
            targets.extend(columns.clone().map(CellTarget::Header));
        }
        for row in rows {
            for column in columns.clone() {
                targets.push(if column == 0 {
                    CellTarget::RowHeader(row)
                } else {
                    CellTarget::Data(row, column)
                });
            }
        }

        let mut strips = Vec::new();
        for target in targets {
            let (Some(cell), Some(bounds)) = (self.cell(target), layout.cell_region(target)) else {
                continue;
            };
            let screen = bounds.translate(Offset::new(viewport.x - window.x, viewport.y - window.y));
            let mut style = theme.style_on(cell.paint.color(theme));
            if !matches!(target, CellTarget::Data(..)) {
                style = style.bold();
            }
            strips.extend(
                cell_strips(&cell.label, screen, &style)
                    .into_iter()
                    .filter(|s| s.y >= viewport.y && s.y < viewport.bottom())
                    .map(|s| s.crop(viewport.x, viewport.right()))
                    .filter(|s| !s.cells.is_empty()),
            );
        }
        strips
    }
}

impl Widget for TableView {
    fn widget_type(&self) -> &str {
        "TableView"
    }

    fn render(&self, region: Region, theme: &Theme) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }
        let viewport = viewport_of(region);
        let mut scroll = self.scroll.clone();
        scroll.set_viewport_size(viewport.size());
        scroll.set_content_size(self.renderer.layout().content_size());

        let background = theme.style_on(&theme.background);
        let mut strips: Vec<Strip> = (0..region.height)
            .map(|line| {
                let mut strip = Strip::new(region.y + line, region.x);
                strip.fill(region.width, background.clone());
                strip
            })
            .collect();

        strips.extend(self.render_cells(viewport, &scroll, theme));

        let (_, vbar) = region.split_right(1);
        let vbar = Region::new(vbar.x, vbar.y, vbar.width, viewport.height);
        strips.extend(ScrollbarState::from_scroll_state(&scroll, true).render(vbar, true, theme));
        let (_, hbar) = region.split_bottom(1);
        let hbar = Region::new(hbar.x, hbar.y, viewport.width, hbar.height);
        strips.extend(ScrollbarState::from_scroll_state(&scroll, false).render(hbar, false, theme));

        let progress = self.progress();
        if progress.visible {
            let width = PROGRESS_WIDTH.min(viewport.width - 4).max(1);
            let overlay = viewport.centered(width, PROGRESS_HEIGHT);
            strips.extend(ProgressBar::from(progress).render(overlay, theme));
        }
        strips
    }

    fn can_focus(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The part of `area` left for cells once both scrollbars are reserved.
fn viewport_of(area: Region) -> Region {
    let (rest, _) = area.split_right(1);
    let (viewport, _) = rest.split_bottom(1);
    viewport
}

/// One strip per line of a cell: padded label, filled to the cell width.
fn cell_strips(label: &str, bounds: Region, style: &CellStyle) -> Vec<Strip> {
    let pad = CELL_PADDING as i32;
    let text_width = (bounds.width - 2 * pad).max(0) as usize;
    let mut lines = label.lines();
    (0..bounds.height)
        .map(|line| {
            let mut strip = Strip::new(bounds.y + line, bounds.x);
            strip.fill(pad.min(bounds.width), style.clone());
            if let Some(text) = lines.next() {
                strip.push_text(text, text_width, style);
            }
            strip.fill(bounds.width, style.clone());
            strip
        })
        .collect()
}

fn load(source: &dyn TabularSource) -> Result<CellMatrix, TableError> {
    let (columns, rows) = source.table().inspect_err(|err| {
        warn!(%err, "failed to read tabular source");
    })?;
    CellMatrix::from_parts(columns, rows)
}

impl Default for TableView {
    fn default() -> Self {
        Self::empty(TableOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::Modifiers;
    use crate::table::cells::Paint;
    use crate::table::matrix::row;
    use crate::table::source::{MemorySource, SourceError};
    use pretty_assertions::assert_eq;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    fn sample() -> TableView {
        let mut view = TableView::new(
            cols(&["A", "B"]),
            vec![row(["x", "y"]), row(["p", "q"])],
            TableOptions::default(),
        )
        .unwrap();
        view.run_to_completion();
        view
    }

    fn indices(view: &TableView) -> Vec<(usize, usize)> {
        view.selected_indices().into_iter().collect()
    }

    // -----------------------------------------------------------------------
    // Data
    // -----------------------------------------------------------------------

    #[test]
    fn accessors_reflect_matrix() {
        let view = sample();
        assert_eq!(view.column_headers(), &cols(&["A", "B"])[..]);
        assert_eq!(view.data(), vec![row(["x", "y"]), row(["p", "q"])]);
        assert_eq!(view.row_headers(), vec![CellValue::Int(1), CellValue::Int(2)]);
    }

    #[test]
    fn rejected_set_data_keeps_table_and_pass() {
        let mut view = sample();
        let generation = view.generation();
        let err = view.set_data(vec![row(["a"])]).unwrap_err();
        assert!(matches!(err, TableError::ShapeMismatch { row: 0, expected: 2, found: 1 }));
        assert_eq!(view.data(), vec![row(["x", "y"]), row(["p", "q"])]);
        assert_eq!(view.generation(), generation);
    }

    #[test]
    fn every_mutator_starts_a_pass() {
        let mut view = sample();
        let g = view.generation();
        view.add_row(row(["s", "t"])).unwrap();
        assert_eq!(view.generation(), g + 1);
        view.set_columns(cols(&["A"]));
        assert_eq!(view.generation(), g + 2);
        view.clear_data();
        assert_eq!(view.generation(), g + 3);
        view.set_from_source(&MemorySource::new(cols(&["Z"]), vec![row(["1"])])).unwrap();
        assert_eq!(view.generation(), g + 4);
        assert_eq!(view.column_headers(), &cols(&["Z"])[..]);
    }

    /// Answers separate reads from an older version than its single read.
    struct ChangingSource;

    impl TabularSource for ChangingSource {
        fn columns(&self) -> Result<Vec<String>, SourceError> {
            Ok(cols(&["old"]))
        }

        fn rows(&self) -> Result<Vec<Vec<CellValue>>, SourceError> {
            Ok(vec![row(["a", "b"])])
        }

        fn table(&self) -> Result<(Vec<String>, Vec<Vec<CellValue>>), SourceError> {
            Ok((cols(&["new", "cols"]), vec![row(["a", "b"])]))
        }
    }

    #[test]
    fn source_is_loaded_from_one_read() {
        let mut view = sample();
        view.set_from_source(&ChangingSource).unwrap();
        assert_eq!(view.column_headers(), &cols(&["new", "cols"])[..]);
        assert_eq!(view.data(), vec![row(["a", "b"])]);
    }

    #[test]
    fn set_data_does_not_measure_on_the_caller() {
        let options = TableOptions::new().with_sizing(SizingPolicy::new().with_autofit(true));
        let mut view = TableView::new(cols(&["A"]), vec![row(["x"])], options).unwrap();
        view.set_data(vec![row(["a much longer value"])]).unwrap();
        assert_eq!(view.layout().column_count(), 0);
        view.run_to_completion();
        assert_eq!(view.layout().column_widths(), &[3, 21]);
    }

    #[test]
    fn failed_csv_load_leaves_table_unchanged() {
        let mut view = sample();
        let err = view.set_from_csv("/no/such/file.csv").unwrap_err();
        assert!(matches!(err, TableError::Source(_)));
        assert_eq!(view.data().len(), 2);
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    #[test]
    fn concrete_selection_scenario() {
        let mut view = sample();
        view.toggle_cell(1, 2);
        assert_eq!(indices(&view), vec![(1, 1)]);
        view.toggle_row(1);
        assert_eq!(indices(&view), vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn shrinking_columns_prunes_selection() {
        let mut view = sample();
        view.toggle_column(0);
        assert_eq!(view.selection().len(), 4);
        view.set_columns(cols(&["A"]));
        assert!(view.selection().iter().all(|(_, c)| c < view.matrix().column_count()));
        assert_eq!(indices(&view), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn click_dispatch_goes_through_handler_table() {
        let mut view = sample();
        view.dispatch(EventKind::Click, CellTarget::Header(2));
        assert_eq!(indices(&view), vec![(0, 1), (1, 1)]);
        view.dispatch(EventKind::Click, CellTarget::RowHeader(0));
        assert_eq!(indices(&view), vec![(0, 0), (0, 1), (1, 1)]);
        view.dispatch(EventKind::Click, CellTarget::Header(0));
        assert_eq!(view.selection().len(), 4);
        view.dispatch(EventKind::Click, CellTarget::Header(0));
        assert!(view.selection().is_empty());
    }

    #[test]
    fn selection_made_mid_pass_colors_later_rows() {
        let mut view = TableView::new(
            cols(&["A"]),
            vec![row(["x"]), row(["y"])],
            TableOptions::default(),
        )
        .unwrap();
        view.toggle_cell(1, 1);
        view.run_to_completion();
        assert_eq!(
            view.cell(CellTarget::Data(1, 1)).map(|c| c.paint),
            Some(Paint::Selected)
        );
    }

    // -----------------------------------------------------------------------
    // Pipeline
    // -----------------------------------------------------------------------

    #[test]
    fn progress_hides_after_completion() {
        let mut view = TableView::new(cols(&["A"]), vec![row(["x"])], TableOptions::default())
            .unwrap();
        assert!(view.is_building());
        assert!(view.progress().visible);
        view.run_to_completion();
        assert_eq!(view.progress(), Progress { fraction: 1.0, visible: false });
        assert_eq!(view.step(), StepOutcome::Idle);
    }

    #[test]
    fn drive_completes_pass() {
        let mut view = TableView::new(
            cols(&["A", "B"]),
            (0..50).map(|i| row([i.to_string(), (i * 2).to_string()])).collect(),
            TableOptions::default(),
        )
        .unwrap();
        let drawn = tokio_test::block_on(view.drive());
        assert_eq!(drawn, 53);
        assert!(!view.is_building());
        assert_eq!(view.cells().len(), 3 + 50 * 3);
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    fn mouse(kind: MouseAction, x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent::new(kind, x, y))
    }

    #[test]
    fn click_and_hover_by_screen_position() {
        let mut view = sample();
        view.set_area(Region::new(0, 0, 30, 10));
        // Index column is 3 wide + 1 gap, so column 1 starts at x = 4; row 0 at y = 1.
        assert_eq!(view.hit_test(5, 1), Some(CellTarget::Data(0, 1)));

        assert!(view.handle_input(&mouse(MouseAction::Moved, 5, 1)));
        assert_eq!(
            view.cell(CellTarget::Data(0, 1)).map(|c| c.paint),
            Some(Paint::Hover)
        );
        view.handle_input(&mouse(MouseAction::Down(MouseBtn::Left), 5, 1));
        assert_eq!(indices(&view), vec![(0, 0)]);
        assert_eq!(
            view.cell(CellTarget::Data(0, 1)).map(|c| c.paint),
            Some(Paint::Selected)
        );

        view.handle_input(&mouse(MouseAction::Moved, 29, 9));
        assert_eq!(
            view.cell(CellTarget::Data(0, 1)).map(|c| c.paint),
            Some(Paint::Selected)
        );
    }

    #[test]
    fn wheel_and_keys_scroll() {
        let rows: Vec<_> = (0..100).map(|i| row([i.to_string()])).collect();
        let mut view = TableView::new(cols(&["N"]), rows, TableOptions::default()).unwrap();
        view.run_to_completion();
        view.set_area(Region::new(0, 0, 20, 11));

        view.handle_input(&mouse(MouseAction::ScrollDown, 1, 1));
        assert_eq!(view.scroll().offset.y, SCROLL_STEP);

        let shifted = MouseEvent::new(MouseAction::ScrollDown, 1, 1).with_modifiers(Modifiers::SHIFT);
        // Content is narrower than the viewport; horizontal scroll is clamped.
        assert!(!view.handle_input(&InputEvent::Mouse(shifted)));

        view.handle_input(&InputEvent::Key(KeyEvent::new(Key::End, Modifiers::NONE)));
        assert_eq!(view.scroll().offset.y, 101 - 10);
        view.handle_input(&InputEvent::Key(KeyEvent::new(Key::Home, Modifiers::NONE)));
        assert_eq!(view.scroll().offset.y, 0);
    }
}
