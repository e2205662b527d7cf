#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set lives on the complex plane.  A point `c` belongs
//! to it when the sequence `z <- z*z + c`, started from zero, never
//! runs off to infinity; the classic picture colors every other point
//! by how quickly its sequence escapes.  Rendering the set means
//! asking that question once per pixel and turning each answer into a
//! color index.
//!
//! The interesting part of this crate is how the work is spread out.
//! Every row of the image goes into a single mutex-guarded queue, and
//! each worker in a pool pulls one row at a time, computes the whole
//! row without touching the lock, and writes it into a slice of the
//! image no other worker can reach.  Row costs are wildly uneven,
//! since points near the set's boundary iterate longest, and the
//! shared queue absorbs that imbalance for free: whichever worker
//! finishes early simply pulls the next row.
//!
//! `render` is the entry point; everything it needs arrives in a
//! `RenderConfig`.

extern crate crossbeam;
extern crate failure;
extern crate itertools;
extern crate log;
extern crate num;

pub mod buffer;
pub mod color;
pub mod error;
pub mod escape;
pub mod planes;
pub mod queue;
pub mod render;

pub use buffer::PixelBuffer;
pub use color::{Colorizer, Palette, Rgb};
pub use error::RenderError;
pub use escape::escape_time;
pub use planes::PlaneMapper;
pub use queue::RowQueue;
pub use render::{render, RenderConfig};
