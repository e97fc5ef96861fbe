//! Integration tests for canvas-table.
//!
//! These tests exercise the public API from outside the crate: data mutators,
//! the selection state machine, the build pipeline, and the headless pilot.

use std::io::Write;

use canvas_table::table::{
    row, CellMatrix, CellTarget, CellValue, MemorySource, Paint, SizingPolicy, StepOutcome,
    TableError, TableOptions, TableView,
};
use canvas_table::testing::TablePilot;
use canvas_table::theme::{Theme, ThemeError};
use pretty_assertions::assert_eq;

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_owned()).collect()
}

fn sample() -> TableView {
    TableView::new(
        cols(&["A", "B"]),
        vec![row(["x", "y"]), row(["p", "q"])],
        TableOptions::default(),
    )
    .unwrap()
}

fn grid(rows: usize, columns: usize) -> Vec<Vec<CellValue>> {
    (0..rows)
        .map(|r| (0..columns).map(|c| CellValue::from(format!("{r}:{c}"))).collect())
        .collect()
}

fn indices(view: &TableView) -> Vec<(usize, usize)> {
    view.selected_indices().into_iter().collect()
}

// ---------------------------------------------------------------------------
// Cell matrix
// ---------------------------------------------------------------------------

#[test]
fn test_set_data_round_trips() {
    let mut view = TableView::new(cols(&["a", "b", "c"]), vec![], TableOptions::default()).unwrap();
    for rows in [0, 1, 7, 250] {
        let data = grid(rows, 3);
        view.set_data(data.clone()).unwrap();
        assert_eq!(view.data(), data);
    }
    let mixed = vec![vec![
        CellValue::Int(3),
        CellValue::Float(0.5),
        CellValue::Empty,
    ]];
    view.set_data(mixed.clone()).unwrap();
    assert_eq!(view.data(), mixed);
}

#[test]
fn test_add_row_indexes_new_row() {
    let mut view = sample();
    for expected in 3..6 {
        view.add_row(row(["n", "m"])).unwrap();
        assert_eq!(view.data().len(), expected);
        assert_eq!(
            view.row_headers().last(),
            Some(&CellValue::from(expected))
        );
    }
}

#[test]
fn test_shape_mismatch_leaves_matrix_alone() {
    let mut view = sample();
    let err = view.add_row(row(["only one"])).unwrap_err();
    assert!(matches!(err, TableError::ShapeMismatch { row: 2, expected: 2, found: 1 }));
    assert_eq!(view.data(), vec![row(["x", "y"]), row(["p", "q"])]);
}

#[test]
fn test_concrete_scenario() {
    let mut view = sample();
    assert_eq!(
        view.matrix().rows(),
        &[
            vec![CellValue::Int(1), "x".into(), "y".into()],
            vec![CellValue::Int(2), "p".into(), "q".into()],
        ]
    );
    view.toggle_cell(1, 2);
    assert_eq!(indices(&view), vec![(1, 1)]);
    view.toggle_row(1);
    assert_eq!(indices(&view), vec![(1, 0), (1, 1)]);
}

#[test]
fn test_load_csv_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name,qty").unwrap();
    writeln!(file, "bolt,4").unwrap();
    writeln!(file, "nut,12").unwrap();

    let mut view = sample();
    view.toggle_column(0);
    view.set_from_csv(file.path()).unwrap();
    assert_eq!(view.column_headers(), &cols(&["name", "qty"])[..]);
    assert_eq!(
        view.data(),
        vec![
            vec![CellValue::from("bolt"), CellValue::Int(4)],
            vec![CellValue::from("nut"), CellValue::Int(12)],
        ]
    );
    // Same extent as before, so the select-all survives.
    assert_eq!(view.selection().len(), 4);
}

#[test]
fn test_source_constructor() {
    let source = MemorySource::new(cols(&["k"]), vec![row(["v"])]);
    let mut view = TableView::from_source(&source, TableOptions::default()).unwrap();
    view.run_to_completion();
    assert_eq!(
        view.cell(CellTarget::Data(0, 1)).map(|c| c.label.as_str()),
        Some("v")
    );
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_row_twice_restores_selection() {
    let mut view = TableView::new(cols(&["a", "b", "c"]), grid(4, 3), TableOptions::default())
        .unwrap();
    view.toggle_cell(0, 1);
    view.toggle_row(3);
    // One empty row and one fully selected row.
    for r in [1, 3] {
        let before = view.selected_indices();
        view.toggle_row(r);
        view.toggle_row(r);
        assert_eq!(view.selected_indices(), before);
    }
}

#[test]
fn test_select_all_round_trip() {
    let mut view = TableView::new(cols(&["a", "b", "c"]), grid(5, 3), TableOptions::default())
        .unwrap();
    view.toggle_column(0);
    assert_eq!(view.selected_indices().len(), 15);
    view.toggle_column(0);
    assert!(view.selected_indices().is_empty());
}

#[test]
fn test_shrinking_prunes_stale_selection() {
    let mut view = TableView::new(cols(&["a", "b", "c"]), grid(5, 3), TableOptions::default())
        .unwrap();
    view.toggle_column(0);
    view.set_columns(cols(&["a"]));
    let columns = view.matrix().column_count();
    assert!(view.selection().iter().all(|(_, c)| c < columns));
    assert_eq!(view.selected_indices().len(), 5);

    view.set_data(grid(2, 1)).unwrap();
    assert!(view.selection().iter().all(|(r, _)| r < 2));
    view.clear_data();
    assert!(view.selection().is_empty());
}

#[test]
fn test_toggles_use_live_extent() {
    let mut view = sample();
    view.add_row(row(["s", "t"])).unwrap();
    view.toggle_column(1);
    assert_eq!(indices(&view), vec![(0, 0), (1, 0), (2, 0)]);
    // Out of range is a silent no-op.
    assert!(view.toggle_cell(9, 1).is_empty());
    assert!(view.toggle_row(9).is_empty());
}

// ---------------------------------------------------------------------------
// Build pipeline
// ---------------------------------------------------------------------------

#[test]
fn test_progress_is_monotonic_and_completes() {
    for rows in [0, 1, 40] {
        let mut view = TableView::new(cols(&["a", "b"]), grid(rows, 2), TableOptions::default())
            .unwrap();
        let mut last = view.progress().fraction;
        loop {
            let outcome = view.step();
            let fraction = view.progress().fraction;
            assert!(fraction >= last, "{fraction} < {last}");
            last = fraction;
            match outcome {
                StepOutcome::Complete | StepOutcome::Idle => break,
                StepOutcome::Pending => std::thread::yield_now(),
                StepOutcome::Drew => {}
            }
        }
        assert_eq!(view.progress().fraction, 1.0);
        assert!(!view.progress().visible);
    }
}

#[test]
fn test_rebuild_mid_pass_discards_old_output() {
    let mut view = TableView::new(cols(&["a", "b"]), grid(5_000, 2), TableOptions::default())
        .unwrap();
    let mut drawn = 0;
    while drawn < 10 {
        match view.step() {
            StepOutcome::Drew => drawn += 1,
            StepOutcome::Pending => std::thread::yield_now(),
            other => panic!("pass ended early: {other:?}"),
        }
    }
    view.set_data(grid(2, 2)).unwrap();
    view.run_to_completion();

    assert_eq!(view.cells().len(), 3 + 2 * 3);
    assert!(view.cell(CellTarget::RowHeader(2)).is_none());
    assert_eq!(
        view.cell(CellTarget::Data(1, 2)).map(|c| c.label.as_str()),
        Some("1:1")
    );
}

#[test]
fn test_empty_table_is_header_only() {
    let mut view = TableView::empty(TableOptions::default());
    assert_eq!(view.run_to_completion(), 1);
    assert_eq!(view.cells().len(), 1);
    assert_eq!(view.progress().fraction, 1.0);
}

#[test]
fn test_truncation_only_changes_labels() {
    let options = TableOptions::new().with_sizing(SizingPolicy::new().with_truncate(4));
    let data = vec![row(["a long value", "ok"])];
    let mut view = TableView::new(cols(&["first column", "b"]), data.clone(), options).unwrap();
    view.run_to_completion();

    assert_eq!(view.data(), data);
    for (_, cell) in view.cells().iter() {
        assert!(cell.label.chars().count() <= 4, "{:?}", cell.label);
    }
    assert_eq!(
        view.cell(CellTarget::Data(0, 1)).map(|c| c.label.as_str()),
        Some("a l…")
    );
}

#[tokio::test]
async fn test_drive_runs_pass_on_runtime() {
    let mut view = TableView::new(cols(&["a"]), grid(300, 1), TableOptions::default()).unwrap();
    let drawn = view.drive().await;
    assert_eq!(drawn, 2 + 300);
    assert!(!view.is_building());
    assert_eq!(view.layout().row_count(), 300);
}

#[test]
fn test_drive_with_block_on() {
    let mut view = sample();
    assert_eq!(tokio_test::block_on(view.drive()), 5);
    // A second drive has nothing left to do.
    assert_eq!(tokio_test::block_on(view.drive()), 0);
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

#[test]
fn test_pilot_click_and_hover() {
    let mut pilot = TablePilot::new(sample(), 30, 6);
    pilot.settle();

    // Corner cell selects everything.
    pilot.click(1, 0);
    assert_eq!(pilot.view().selected_indices().len(), 4);

    // Index cell of row 0 deselects that row.
    pilot.click(1, 1);
    assert_eq!(indices(pilot.view()), vec![(1, 0), (1, 1)]);

    pilot.hover(5, 1);
    assert_eq!(
        pilot.view().cell(CellTarget::Data(0, 1)).map(|c| c.paint),
        Some(Paint::Hover)
    );
    pilot.hover(5, 2);
    assert_eq!(
        pilot.view().cell(CellTarget::Data(0, 1)).map(|c| c.paint),
        Some(Paint::Base)
    );
    assert_eq!(
        pilot.view().cell(CellTarget::Data(1, 1)).map(|c| c.paint),
        Some(Paint::Selected)
    );
}

#[test]
fn test_pilot_renders_grid() {
    let mut pilot = TablePilot::new(sample(), 30, 6);
    pilot.settle();
    let text = pilot.render_to_text();
    let grid = text.trim_end().replace(' ', ".");
    insta::assert_snapshot!(grid, @r"
    .....A..........B
    .1...x..........y
    .2...p..........q
    ");
}

#[test]
fn test_progress_overlay_while_building() {
    let view = TableView::new(cols(&["a"]), grid(50_000, 1), TableOptions::default()).unwrap();
    let mut pilot = TablePilot::new(view, 60, 20);
    pilot.steps(5);
    let text = pilot.render_to_text();
    assert!(text.contains('%'));
    pilot.settle();
    assert!(!pilot.render_to_text().contains('%'));
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[test]
fn test_theme_names() {
    assert_eq!(Theme::from_name("Light").unwrap(), Theme::light());
    assert!(matches!(
        Theme::from_name("sepia"),
        Err(ThemeError::UnsupportedMode(_))
    ));
}

#[test]
fn test_new_matrix_has_only_index_column() {
    let matrix = CellMatrix::new();
    assert_eq!(matrix.column_count(), 1);
    assert_eq!(matrix.row_count(), 0);
}
