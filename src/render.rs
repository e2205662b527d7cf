// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render orchestration: the configuration, the worker pool, and the
//! loop each worker runs.
//!
//! All of the image's rows go into a single queue; a pool of scoped
//! threads drains it.  Rows near the set's boundary cost far more than
//! rows far from it, and pulling one row at a time balances that skew
//! without any accounting: a worker that drew a cheap row just comes
//! back for another one sooner.

extern crate crossbeam;

use std::time::Instant;

use crossbeam::thread::ScopedJoinHandle;
use log::debug;
use num::Complex;

use buffer::PixelBuffer;
use color::Colorizer;
use error::RenderError;
use escape::escape_time;
use planes::PlaneMapper;
use queue::RowQueue;

/// Everything a render needs to know, assembled before `render` is
/// called.
///
/// The defaults describe the classic postcard: the full (-2, -2) to
/// (2, 2) window on a 256 x 256 grid, a 1024-iteration cap, scaled
/// coloring, one worker.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Start of the window on the real axis (column 0).
    pub start_x: f64,
    /// End of the window on the real axis.
    pub end_x: f64,
    /// Start of the window on the imaginary axis (row 0).
    pub start_y: f64,
    /// End of the window on the imaginary axis.
    pub end_y: f64,
    /// Image rows.
    pub rows: usize,
    /// Image columns.
    pub cols: usize,
    /// Iteration cap for the evaluator.  Must be positive.
    pub max_iters: u32,
    /// Worker threads.  0 and 1 both mean the calling thread does the
    /// drawing itself.
    pub workers: usize,
    /// Escape-count-to-color-index policy.
    pub colorizer: Colorizer,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            start_x: -2.0,
            end_x: 2.0,
            start_y: -2.0,
            end_y: 2.0,
            rows: 256,
            cols: 256,
            max_iters: 1024,
            workers: 1,
            colorizer: Colorizer::Scaled,
        }
    }
}

impl RenderConfig {
    /// Checks the bounds the engine depends on, before any buffer or
    /// thread exists.  These are usage errors, not runtime faults.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(RenderError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.max_iters == 0 {
            return Err(RenderError::ZeroIterations);
        }
        Ok(())
    }
}

/// Renders the configured grid into a fresh pixel buffer.
///
/// Every row goes into the queue up front, `workers` threads drain it,
/// and the call returns only after the last worker has been joined, so
/// a returned buffer is always completely written.  Asking for more
/// workers than rows is fine; the surplus finds the queue empty and
/// exits.  Any worker failure aborts the render rather than producing a
/// partial image.
pub fn render(config: &RenderConfig) -> Result<PixelBuffer, RenderError> {
    config.validate()?;
    let plane = PlaneMapper::new(
        config.rows,
        config.cols,
        Complex::new(config.start_x, config.start_y),
        Complex::new(config.end_x, config.end_y),
    )?;
    let workers = config.workers.max(1);
    debug!(
        "rendering a {} x {} grid, cap {}, {} worker(s)",
        config.rows, config.cols, config.max_iters, workers
    );
    let started = Instant::now();

    let mut buffer = PixelBuffer::new(config.rows, config.cols);
    {
        let queue = RowQueue::new(&mut buffer);
        if workers == 1 {
            drain_rows(&queue, &plane, config.colorizer, config.max_iters)?;
        } else {
            let queue = &queue;
            let plane = &plane;
            let colorizer = config.colorizer;
            let max_iters = config.max_iters;
            let outcome = crossbeam::scope(|spawner| {
                let handles: Vec<ScopedJoinHandle<Result<(), RenderError>>> = (0..workers)
                    .map(|_| spawner.spawn(move |_| drain_rows(queue, plane, colorizer, max_iters)))
                    .collect();
                // Join every worker, keeping the first failure.
                handles.into_iter().fold(Ok(()), |outcome, handle| {
                    let joined = match handle.join() {
                        Ok(worker_outcome) => worker_outcome,
                        Err(_) => Err(RenderError::WorkerPanicked),
                    };
                    outcome.and(joined)
                })
            });
            match outcome {
                Ok(joined) => joined?,
                Err(_) => return Err(RenderError::WorkerPanicked),
            }
        }
    }

    debug!("render complete in {:?}", started.elapsed());
    Ok(buffer)
}

/// One worker's life: pop a row, color every pixel in it, come back for
/// the next, and exit when the queue reports empty.  The lock is held
/// only inside `pop`; the whole column sweep runs on a row slice no
/// other worker can reach.
fn drain_rows(
    queue: &RowQueue,
    plane: &PlaneMapper,
    colorizer: Colorizer,
    max_iters: u32,
) -> Result<(), RenderError> {
    loop {
        let (row, cells) = match queue.pop()? {
            Some(work) => work,
            None => return Ok(()),
        };
        for (col, cell) in cells.iter_mut().enumerate() {
            let value = escape_time(plane.sample(row, col), max_iters);
            *cell = colorizer.colorize(value, max_iters);
        }
    }
}
