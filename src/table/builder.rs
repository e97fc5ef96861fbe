//! Table builder: walks a matrix snapshot on a worker thread and streams
//! render instructions into a fresh queue.
//!
//! The worker first measures the column widths, which can mean reading every
//! cell, and hands them over on a one-shot channel. Then it queues the
//! instructions. It only reads the snapshot it was given and stops early when
//! the pass is cancelled or the queue is closed, so a superseded pass costs
//! at most one wasted instruction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::Poll;

use tokio::sync::oneshot;
use tracing::{trace, warn};

use super::matrix::CellMatrix;
use super::queue::{render_queue, QueuePoll, QueueSender, RenderInstruction, RenderQueue};
use super::sizing::SizingPolicy;

/// Instructions one pass produces for `matrix`: one per column, one per row.
pub fn instruction_count(matrix: &CellMatrix) -> usize {
    matrix.column_count() + matrix.row_count()
}

/// Every instruction for `matrix`: headers in column order, then rows in
/// row order.
pub fn instructions(matrix: &CellMatrix) -> impl Iterator<Item = RenderInstruction> + '_ {
    let headers = matrix
        .columns()
        .iter()
        .enumerate()
        .map(|(column, text)| RenderInstruction::Header {
            column,
            text: text.clone(),
        });
    let rows = matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(row, values)| RenderInstruction::Row {
            row,
            values: values.clone(),
        });
    headers.chain(rows)
}

/// One running build pass, owned by the renderer.
///
/// Dropping the pass cancels the worker and closes its queue.
#[derive(Debug)]
pub struct BuildPass {
    generation: u64,
    total: usize,
    widths: Option<oneshot::Receiver<Vec<usize>>>,
    queue: RenderQueue,
    cancel: Arc<AtomicBool>,
}

impl BuildPass {
    /// Start a pass over `matrix` on a worker thread, measuring columns with
    /// `sizing`.
    ///
    /// If the worker cannot be spawned the pass is built inline; it still
    /// drains step by step.
    pub fn spawn(matrix: Arc<CellMatrix>, sizing: SizingPolicy, generation: u64) -> Self {
        let total = instruction_count(&matrix);
        let (tx, queue) = render_queue();
        let (widths_tx, mut widths) = oneshot::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            matrix: Arc::clone(&matrix),
            sizing: sizing.clone(),
            cancel: Arc::clone(&cancel),
            generation,
        };
        let inline_tx = tx.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("table-build-{generation}"))
            .spawn(move || worker.run(widths_tx, &tx));
        match spawned {
            Ok(_) => drop(inline_tx),
            Err(err) => {
                warn!(generation, %err, "failed to spawn table builder, building inline");
                let (inline_widths_tx, inline_widths) = oneshot::channel();
                widths = inline_widths;
                let worker = Worker {
                    matrix,
                    sizing,
                    cancel: Arc::clone(&cancel),
                    generation,
                };
                worker.run(inline_widths_tx, &inline_tx);
            }
        }

        Self {
            generation,
            total,
            widths: Some(widths),
            queue,
            cancel,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Instructions this pass will produce.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Take the measured column widths without blocking.
    ///
    /// Yields `Ready(Some(widths))` once. Afterwards, or when the worker
    /// stopped before measuring, it yields `Ready(None)`.
    pub fn poll_widths(&mut self) -> Poll<Option<Vec<usize>>> {
        let Some(rx) = self.widths.as_mut() else {
            return Poll::Ready(None);
        };
        match rx.try_recv() {
            Ok(widths) => {
                self.widths = None;
                Poll::Ready(Some(widths))
            }
            Err(oneshot::error::TryRecvError::Empty) => Poll::Pending,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.widths = None;
                Poll::Ready(None)
            }
        }
    }

    /// Take the next instruction without blocking.
    pub fn poll(&mut self) -> QueuePoll {
        self.queue.poll()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Stop the worker and refuse further instructions.
    pub fn cancel(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.queue.close();
    }
}

impl Drop for BuildPass {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct Worker {
    matrix: Arc<CellMatrix>,
    sizing: SizingPolicy,
    cancel: Arc<AtomicBool>,
    generation: u64,
}

impl Worker {
    fn run(self, widths: oneshot::Sender<Vec<usize>>, tx: &QueueSender) {
        let generation = self.generation;
        let measured = self.sizing.column_widths(&self.matrix);
        if self.cancelled() || widths.send(measured).is_err() {
            trace!(generation, "build pass dropped before measuring finished");
            return;
        }
        for (sent, instruction) in instructions(&self.matrix).enumerate() {
            if self.cancelled() {
                trace!(generation, sent, "build pass cancelled");
                return;
            }
            if tx.send(instruction).is_err() {
                trace!(generation, sent, "render queue closed, stopping builder");
                return;
            }
        }
        trace!(generation, "build pass fully queued");
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}
