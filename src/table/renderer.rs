//! Incremental renderer: turns queued instructions into visual cells, one
//! instruction per step.
//!
//! The renderer owns the current [`BuildPass`], the cell arena, the grid
//! layout, and progress. It never blocks: a step either draws one cell group,
//! reports that the worker is still producing, or finishes the pass.

use std::sync::Arc;
use std::task::Poll;

use tracing::debug;

use super::builder::BuildPass;
use super::cells::{bindings_for, CellArena, CellTarget, Paint, VisualCell};
use super::layout::GridLayout;
use super::matrix::{CellMatrix, CellValue};
use super::progress::ProgressState;
use super::queue::{QueuePoll, RenderInstruction};
use super::selection::{SelectionChange, SelectionModel};
use super::sizing::SizingPolicy;

/// Result of one [`IncrementalRenderer::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction was materialized.
    Drew,
    /// Nothing queued yet; the worker is still running.
    Pending,
    /// The queue drained; the pass is over.
    Complete,
    /// No pass is running.
    Idle,
}

#[derive(Debug, Default)]
pub struct IncrementalRenderer {
    sizing: SizingPolicy,
    generation: u64,
    pass: Option<BuildPass>,
    progress: ProgressState,
    cells: CellArena,
    layout: GridLayout,
    hover: Option<CellTarget>,
}

impl IncrementalRenderer {
    pub fn new(sizing: SizingPolicy) -> Self {
        Self {
            sizing,
            ..Self::default()
        }
    }

    pub fn sizing(&self) -> &SizingPolicy {
        &self.sizing
    }

    /// Generation of the most recently started pass.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn cells(&self) -> &CellArena {
        &self.cells
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn hover(&self) -> Option<CellTarget> {
        self.hover
    }

    pub fn is_building(&self) -> bool {
        self.pass.is_some()
    }

    /// Start a full rebuild from `matrix`, superseding any running pass.
    pub fn begin(&mut self, matrix: Arc<CellMatrix>) {
        self.generation += 1;
        if let Some(old) = self.pass.take() {
            debug!(
                generation = old.generation(),
                superseded_by = self.generation,
                "cancelling build pass"
            );
            drop(old);
        }

        // Columns appear once the worker has measured them.
        self.layout.reset(&[]);
        self.cells.clear();
        self.hover = None;

        let pass = BuildPass::spawn(matrix, self.sizing.clone(), self.generation);
        self.progress.start(pass.total());
        debug!(
            generation = self.generation,
            total = pass.total(),
            "build pass started"
        );
        self.pass = Some(pass);
    }

    /// Dequeue and materialize at most one instruction.
    pub fn step(&mut self, selection: &SelectionModel) -> StepOutcome {
        let Some(pass) = self.pass.as_mut() else {
            return StepOutcome::Idle;
        };
        match pass.poll_widths() {
            Poll::Pending => return StepOutcome::Pending,
            Poll::Ready(Some(widths)) => self.layout.reset(&widths),
            Poll::Ready(None) => {}
        }
        match pass.poll() {
            QueuePoll::Ready(instruction) => {
                self.apply(instruction, selection);
                self.progress.advance();
                StepOutcome::Drew
            }
            QueuePoll::Pending => StepOutcome::Pending,
            QueuePoll::Drained => {
                self.progress.finish();
                self.pass = None;
                debug!(
                    generation = self.generation,
                    cells = self.cells.len(),
                    "build pass complete"
                );
                StepOutcome::Complete
            }
        }
    }

    fn apply(&mut self, instruction: RenderInstruction, selection: &SelectionModel) {
        match instruction {
            RenderInstruction::Header { column, text } => {
                let label = if column == 0 {
                    text
                } else {
                    self.sizing.display_label(&text)
                };
                let target = CellTarget::Header(column);
                self.cells
                    .insert(VisualCell::new(target, label, Paint::Header), &bindings_for(target));
            }
            RenderInstruction::Row { row, values } => {
                self.layout.push_row(self.sizing.row_height(&values));
                let mut values = values.into_iter();
                let index = values.next().unwrap_or(CellValue::Empty);
                let target = CellTarget::RowHeader(row);
                self.cells.insert(
                    VisualCell::new(target, index.to_string(), Paint::Header),
                    &bindings_for(target),
                );
                for (offset, value) in values.enumerate() {
                    let target = CellTarget::Data(row, offset + 1);
                    let label = self.sizing.display_label(&value.to_string());
                    let paint = self.paint_for(target, selection);
                    self.cells
                        .insert(VisualCell::new(target, label, paint), &bindings_for(target));
                }
            }
        }
    }

    /// Fill a data cell should have right now.
    pub fn paint_for(&self, target: CellTarget, selection: &SelectionModel) -> Paint {
        match target.coord() {
            None => Paint::Header,
            Some(coord) if selection.contains(coord) => Paint::Selected,
            Some(_) if self.hover == Some(target) => Paint::Hover,
            Some(_) => Paint::Base,
        }
    }

    /// Recolor exactly the cells a selection change flipped.
    pub fn repaint(&mut self, change: &SelectionChange, selection: &SelectionModel) {
        for &(row, column) in change.iter() {
            self.repaint_target(CellTarget::Data(row, column), selection);
        }
    }

    fn repaint_target(&mut self, target: CellTarget, selection: &SelectionModel) {
        let paint = self.paint_for(target, selection);
        self.cells.set_paint(target, paint);
    }

    /// Pointer entered `target`.
    pub fn highlight(&mut self, target: CellTarget, selection: &SelectionModel) {
        if let Some(previous) = self.hover.replace(target) {
            if previous != target {
                self.repaint_target(previous, selection);
            }
        }
        self.repaint_target(target, selection);
    }

    /// Pointer left `target`.
    pub fn restore(&mut self, target: CellTarget, selection: &SelectionModel) {
        if self.hover == Some(target) {
            self.hover = None;
        }
        self.repaint_target(target, selection);
    }
}
