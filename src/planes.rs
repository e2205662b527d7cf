//! Maps the integral pixel grid onto a window of the complex plane.
//!
//! A render names its window with four bounds (a start and end on each
//! axis) and its grid with a row and column count.  The mapper fixes the
//! per-pixel step on each axis once, at construction, so every sample is
//! derived the same way no matter which worker asks for it.

use num::Complex;

use error::RenderError;

/// Precomputed mapping from (row, col) pixel coordinates to complex
/// samples.
///
/// Columns advance along the real axis, rows along the imaginary axis.
/// Each sample is `origin + index * step`, with the step fixed at
/// `(end - start) / extent` per axis.  Bounds are taken as given:
/// swapped bounds produce a negative step and a mirrored image, not an
/// error.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    origin: Complex<f64>,
    step: Complex<f64>,
}

impl PlaneMapper {
    /// Fixes the mapping for a rows-by-cols grid over the given window.
    /// The grid must have at least one row and one column, or the steps
    /// would be undefined.
    pub fn new(
        rows: usize,
        cols: usize,
        start: Complex<f64>,
        end: Complex<f64>,
    ) -> Result<PlaneMapper, RenderError> {
        if rows == 0 || cols == 0 {
            return Err(RenderError::EmptyGrid { rows, cols });
        }

        Ok(PlaneMapper {
            origin: start,
            step: Complex::new(
                (end.re - start.re) / (cols as f64),
                (end.im - start.im) / (rows as f64),
            ),
        })
    }

    /// The complex sample under the pixel at (row, col).
    pub fn sample(&self, row: usize, col: usize) -> Complex<f64> {
        Complex::new(
            self.origin.re + self.step.re * (col as f64),
            self.origin.im + self.step.im * (row as f64),
        )
    }
}
