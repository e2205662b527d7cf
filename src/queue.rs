//! The work queue a render's workers drain.

use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::Mutex;

use buffer::PixelBuffer;
use error::RenderError;

/// Every row of the image, each handed out exactly once.
///
/// One mutex guards an iterator over the buffer's rows.  A pop holds
/// the lock just long enough to take the next `(row index, row slice)`
/// pair; the expensive per-row computation happens strictly after the
/// lock is released.  A row leaves the queue together with the only
/// mutable slice of its pixels, so two workers can never hold the same
/// cell, however the pops interleave.
///
/// The queue is drained, never refilled.  The first `None` a worker
/// sees is its signal to exit.
pub struct RowQueue<'a> {
    rows: Mutex<Enumerate<ChunksMut<'a, u8>>>,
}

impl<'a> RowQueue<'a> {
    /// Queues up every row of `buffer`, in index order.
    pub fn new(buffer: &'a mut PixelBuffer) -> RowQueue<'a> {
        RowQueue {
            rows: Mutex::new(buffer.rows_mut().enumerate()),
        }
    }

    /// Takes the next unclaimed row, or `None` once the queue is empty.
    ///
    /// A poisoned lock means another worker died mid-render.  There is
    /// no retry; the error goes straight up and the render aborts.
    pub fn pop(&self) -> Result<Option<(usize, &'a mut [u8])>, RenderError> {
        let mut rows = self.rows.lock().map_err(|_| RenderError::QueuePoisoned)?;
        Ok(rows.next())
    }
}
