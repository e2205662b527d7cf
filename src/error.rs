//! Failure conditions for a render.
//!
//! A render either completes with a full buffer or fails as a unit. A
//! worker that cannot trust its synchronization state stops immediately,
//! and the whole render reports the failure rather than handing a
//! partially written buffer to the encoder.

use failure::Fail;

/// Everything that can go wrong while configuring or running a render.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The grid has zero rows or zero columns, so there is nothing to
    /// queue.
    #[fail(display = "image grid is empty: {} rows x {} cols", rows, cols)]
    EmptyGrid {
        /// Configured row count.
        rows: usize,
        /// Configured column count.
        cols: usize,
    },
    /// The iteration cap must be at least 1.
    #[fail(display = "iteration cap must be positive")]
    ZeroIterations,
    /// A worker found the row queue's lock poisoned and stopped.
    #[fail(display = "row queue lock poisoned; render aborted")]
    QueuePoisoned,
    /// A worker thread panicked before finishing its rows.
    #[fail(display = "worker thread panicked; render aborted")]
    WorkerPanicked,
    /// The colorizer selector named no known policy.
    #[fail(display = "unknown colorizer policy: {}", _0)]
    UnknownColorizer(String),
    /// A palette entry was not a parsable `#RRGGBB` color.
    #[fail(display = "bad hex color: {}", _0)]
    BadHexColor(String),
    /// A palette file did not hold exactly one entry per color index.
    #[fail(display = "palette must have 256 entries, found {}", _0)]
    BadPaletteSize(usize),
}
