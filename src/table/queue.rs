//! Render queue: the FIFO between the builder thread and the UI thread.
//!
//! Backed by an unbounded tokio mpsc channel. The builder sends from a plain
//! OS thread; the UI side polls with `try_recv` and never blocks. The queue
//! neither drops, reorders, nor deduplicates instructions.

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use super::matrix::CellValue;

/// One drawing instruction produced by a build pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    /// Column title, in column order.
    Header { column: usize, text: String },
    /// A full row (index cell included), in row order.
    Row { row: usize, values: Vec<CellValue> },
}

/// The receiving side has gone away; the pass was superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("render queue closed")]
pub struct QueueClosed;

/// Result of one non-blocking poll.
#[derive(Debug, Clone, PartialEq)]
pub enum QueuePoll {
    Ready(RenderInstruction),
    /// Momentarily empty; the producer is still running.
    Pending,
    /// Producer finished and everything it sent has been consumed.
    Drained,
}

/// Create a connected sender/queue pair for one build pass.
pub fn render_queue() -> (QueueSender, RenderQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueueSender { tx }, RenderQueue { rx, received: 0 })
}

/// Producer half, moved into the builder thread.
#[derive(Debug, Clone)]
pub struct QueueSender {
    tx: UnboundedSender<RenderInstruction>,
}

impl QueueSender {
    pub fn send(&self, instruction: RenderInstruction) -> Result<(), QueueClosed> {
        self.tx.send(instruction).map_err(|_| QueueClosed)
    }

    /// Whether the consumer has closed or dropped its half.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half, owned by the UI thread.
#[derive(Debug)]
pub struct RenderQueue {
    rx: UnboundedReceiver<RenderInstruction>,
    received: usize,
}

impl RenderQueue {
    /// Take the next instruction without blocking.
    pub fn poll(&mut self) -> QueuePoll {
        match self.rx.try_recv() {
            Ok(instruction) => {
                self.received += 1;
                QueuePoll::Ready(instruction)
            }
            Err(TryRecvError::Empty) => QueuePoll::Pending,
            Err(TryRecvError::Disconnected) => QueuePoll::Drained,
        }
    }

    /// Instructions consumed so far.
    pub fn received(&self) -> usize {
        self.received
    }

    /// Refuse further sends. Already-queued items can still be polled.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(column: usize) -> RenderInstruction {
        RenderInstruction::Header {
            column,
            text: format!("c{column}"),
        }
    }

    #[test]
    fn fifo_order_then_drained() {
        let (tx, mut queue) = render_queue();
        for i in 0..3 {
            tx.send(header(i)).unwrap();
        }
        drop(tx);

        assert_eq!(queue.poll(), QueuePoll::Ready(header(0)));
        assert_eq!(queue.poll(), QueuePoll::Ready(header(1)));
        assert_eq!(queue.poll(), QueuePoll::Ready(header(2)));
        assert_eq!(queue.poll(), QueuePoll::Drained);
        // Polling past the end stays drained.
        assert_eq!(queue.poll(), QueuePoll::Drained);
        assert_eq!(queue.received(), 3);
    }

    #[test]
    fn empty_with_live_producer_is_pending() {
        let (tx, mut queue) = render_queue();
        assert_eq!(queue.poll(), QueuePoll::Pending);
        tx.send(header(0)).unwrap();
        assert_eq!(queue.poll(), QueuePoll::Ready(header(0)));
        assert_eq!(queue.poll(), QueuePoll::Pending);
    }

    #[test]
    fn duplicates_are_kept() {
        let (tx, mut queue) = render_queue();
        tx.send(header(4)).unwrap();
        tx.send(header(4)).unwrap();
        drop(tx);
        assert_eq!(queue.poll(), QueuePoll::Ready(header(4)));
        assert_eq!(queue.poll(), QueuePoll::Ready(header(4)));
    }

    #[test]
    fn closed_queue_rejects_sends() {
        let (tx, mut queue) = render_queue();
        queue.close();
        assert!(tx.is_closed());
        assert_eq!(tx.send(header(0)), Err(QueueClosed));

        let (tx, queue) = render_queue();
        drop(queue);
        assert_eq!(tx.send(header(0)), Err(QueueClosed));
    }

    #[test]
    fn send_from_another_thread() {
        let (tx, mut queue) = render_queue();
        std::thread::spawn(move || {
            for i in 0..100 {
                tx.send(header(i)).unwrap();
            }
        })
        .join()
        .unwrap();

        let mut seen = Vec::new();
        while let QueuePoll::Ready(RenderInstruction::Header { column, .. }) = queue.poll() {
            seen.push(column);
        }
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }
}
