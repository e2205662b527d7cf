//! The pixel buffer a render fills in.

use std::slice::ChunksMut;

use itertools::iproduct;

/// A row-major grid of 8-bit color indices, one per pixel.
///
/// The engine allocates the buffer zeroed, carves it into per-row
/// slices for the workers, and hands it back once every row has been
/// written.  Each cell is written exactly once per render, and nothing
/// reads the buffer until the worker pool has been joined.
#[derive(Debug)]
pub struct PixelBuffer {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a zeroed rows-by-cols buffer.
    pub fn new(rows: usize, cols: usize) -> PixelBuffer {
        PixelBuffer {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The color index at (row, col).  Panics outside the grid.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    /// The whole grid as raw bytes, row-major, top row first.  This is
    /// the layout the encoder consumes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable row slices, in row order.  The slices are disjoint, which
    /// is what lets the queue hand rows to workers with no further
    /// synchronization.
    pub fn rows_mut(&mut self) -> ChunksMut<u8> {
        // The chunk size must be nonzero even when the grid is empty.
        let cols = self.cols.max(1);
        self.data.chunks_mut(cols)
    }

    /// Every cell with its coordinates, row-major.
    pub fn cells<'a>(&'a self) -> impl Iterator<Item = (usize, usize, u8)> + 'a {
        iproduct!(0..self.rows, 0..self.cols).map(move |(row, col)| (row, col, self.get(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_start_zeroed() {
        let buffer = PixelBuffer::new(3, 5);
        assert_eq!(buffer.rows(), 3);
        assert_eq!(buffer.cols(), 5);
        assert_eq!(buffer.len(), 15);
        assert!(!buffer.is_empty());
        assert!(buffer.cells().all(|(_, _, value)| value == 0));
    }

    #[test]
    fn rows_come_out_whole_and_in_order() {
        let mut buffer = PixelBuffer::new(4, 3);
        for (index, row) in buffer.rows_mut().enumerate() {
            assert_eq!(row.len(), 3);
            for cell in row.iter_mut() {
                *cell = index as u8;
            }
        }
        assert_eq!(buffer.get(0, 0), 0);
        assert_eq!(buffer.get(2, 1), 2);
        assert_eq!(buffer.get(3, 2), 3);
        assert_eq!(buffer.as_bytes(), &[0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3][..]);
    }

    #[test]
    fn cells_visit_every_coordinate_once() {
        let buffer = PixelBuffer::new(2, 3);
        let seen: Vec<(usize, usize)> = buffer.cells().map(|(row, col, _)| (row, col)).collect();
        assert_eq!(seen, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    // Assertions elsewhere print whole buffers when they fail, so the
    // debug format has to stay available.
    #[test]
    fn buffers_report_their_shape_in_debug_output() {
        let report = format!("{:?}", PixelBuffer::new(2, 2));
        assert!(report.contains("rows: 2"));
        assert!(report.contains("cols: 2"));
    }
}
