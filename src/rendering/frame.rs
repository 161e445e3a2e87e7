//! Stride-addressed RGBA frames.
//!
//! A [`Frame`] is a bounds-checked view over a flat byte buffer. Pixels are
//! addressed with the caller-supplied strides:
//!
//! ```text
//! index = row * stride.row + col * stride.col + channel + offset
//! ```
//!
//! The `offset` selects one frame inside a larger multi-frame allocation.
//! Construction checks that the last addressable byte lies inside the
//! buffer, so every in-grid access afterwards is infallible. Accesses
//! outside the `rows x cols` grid are reported (`None` / `false`) rather
//! than wrapping into a neighbouring row.

use crate::error::EffectError;
use serde::{Deserialize, Serialize};

/// Alpha at or above this value counts as filled; below it is transparent.
pub const ALPHA_THRESHOLD: u8 = 100;

/// Channels of an RGBA pixel.
pub const RGBA: usize = 4;

const ALPHA: usize = 3;

/// Image dimensions `[rows, cols, channels]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
    pub channels: usize,
}

impl Shape {
    /// RGBA shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            channels: RGBA,
        }
    }

    pub fn with_channels(rows: usize, cols: usize, channels: usize) -> Self {
        Self {
            rows,
            cols,
            channels,
        }
    }

    /// Bytes in one tightly packed frame.
    pub fn frame_len(&self) -> usize {
        self.rows * self.cols * self.channels
    }

    /// Row-major stride with no padding between pixels or rows.
    pub fn packed_stride(&self) -> Stride {
        Stride {
            row: self.cols * self.channels,
            col: self.channels,
        }
    }

    /// Whether a signed grid position lies inside the image.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as u64) < self.rows as u64 && (col as u64) < self.cols as u64
    }

    fn validate(&self) -> Result<(), EffectError> {
        if self.channels < RGBA {
            return Err(EffectError::UnsupportedChannels(self.channels));
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(EffectError::EmptyImage {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Byte distance between vertically (`row`) and horizontally (`col`)
/// adjacent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride {
    pub row: usize,
    pub col: usize,
}

/// Transparent margins added around an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

/// A bounds-checked RGBA view over `B`.
#[derive(Debug, Clone)]
pub struct Frame<B> {
    buf: B,
    shape: Shape,
    stride: Stride,
    offset: usize,
}

/// An owned, tightly packed frame used as a scratch surface.
pub type Canvas = Frame<Vec<u8>>;

impl<B: AsRef<[u8]>> Frame<B> {
    /// Wrap `buf` with explicit strides and frame offset.
    ///
    /// # Errors
    ///
    /// - [`EffectError::UnsupportedChannels`] for fewer than 4 channels
    /// - [`EffectError::EmptyImage`] for zero rows or columns
    /// - [`EffectError::BufferTooSmall`] when the last pixel would be
    ///   addressed past the end of `buf`
    pub fn new(buf: B, shape: Shape, stride: Stride, offset: usize) -> Result<Self, EffectError> {
        shape.validate()?;
        let needed = (shape.rows - 1) * stride.row
            + (shape.cols - 1) * stride.col
            + shape.channels
            + offset;
        let len = buf.as_ref().len();
        if len < needed {
            return Err(EffectError::BufferTooSmall { len, needed });
        }
        Ok(Self::from_parts(buf, shape, stride, offset))
    }

    /// Wrap a tightly packed single frame.
    pub fn packed(buf: B, shape: Shape) -> Result<Self, EffectError> {
        Self::new(buf, shape, shape.packed_stride(), 0)
    }

    /// Caller guarantees the layout was validated.
    pub(crate) fn from_parts(buf: B, shape: Shape, stride: Stride, offset: usize) -> Self {
        Self {
            buf,
            shape,
            stride,
            offset,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn stride(&self) -> Stride {
        self.stride
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Flat byte index of `channel` at `(row, col)`. Not bounds-checked.
    #[inline]
    pub fn index(&self, row: usize, col: usize, channel: usize) -> usize {
        row * self.stride.row + col * self.stride.col + channel + self.offset
    }

    #[inline]
    fn in_grid(&self, row: usize, col: usize) -> bool {
        row < self.shape.rows && col < self.shape.cols
    }

    /// RGBA bytes at `(row, col)`, or `None` outside the grid.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 4]> {
        if !self.in_grid(row, col) {
            return None;
        }
        let i = self.index(row, col, 0);
        let buf = self.buf.as_ref();
        Some([buf[i], buf[i + 1], buf[i + 2], buf[i + ALPHA]])
    }

    /// Alpha at `(row, col)`, or `None` outside the grid.
    pub fn alpha(&self, row: usize, col: usize) -> Option<u8> {
        if !self.in_grid(row, col) {
            return None;
        }
        Some(self.buf.as_ref()[self.index(row, col, ALPHA)])
    }

    /// Alpha at `(row, col)`; cells outside the grid read as fully opaque.
    #[inline]
    pub fn fill_level(&self, row: usize, col: usize) -> u8 {
        self.alpha(row, col).unwrap_or(u8::MAX)
    }

    /// `true` when `(row, col)` is inside the grid and transparent.
    #[inline]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.fill_level(row, col) < ALPHA_THRESHOLD
    }

    /// Copy into a tightly packed owned canvas.
    pub fn to_canvas(&self) -> Canvas {
        self.padded(Padding::default())
    }

    /// Copy into a packed canvas with transparent margins.
    pub fn padded(&self, padding: Padding) -> Canvas {
        let shape = Shape::with_channels(
            self.shape.rows + padding.top + padding.bottom,
            self.shape.cols + padding.left + padding.right,
            self.shape.channels,
        );
        let mut canvas = Canvas::blank(shape);
        canvas.copy_from(self, padding.top, padding.left);
        canvas
    }

    /// Iterate over every in-grid pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, [u8; 4])> + '_ {
        let cols = self.shape.cols;
        (0..self.shape.rows * cols).filter_map(move |i| {
            let (row, col) = (i / cols, i % cols);
            self.pixel(row, col).map(|px| (row, col, px))
        })
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Frame<B> {
    /// Write RGBA bytes at `(row, col)`. Writes outside the grid are
    /// skipped and return `false`.
    pub fn put(&mut self, row: usize, col: usize, rgba: [u8; 4]) -> bool {
        if !self.in_grid(row, col) {
            return false;
        }
        let i = self.index(row, col, 0);
        self.buf.as_mut()[i..i + RGBA].copy_from_slice(&rgba);
        true
    }

    /// [`put`](Self::put) for signed positions.
    pub fn put_signed(&mut self, row: i64, col: i64, rgba: [u8; 4]) -> bool {
        if !self.shape.contains(row, col) {
            return false;
        }
        self.put(row as usize, col as usize, rgba)
    }

    /// Copy every channel of `source` into this frame with its top-left
    /// corner at `(top, left)`. Pixels landing outside the grid are dropped.
    pub fn copy_from<S: AsRef<[u8]>>(&mut self, source: &Frame<S>, top: usize, left: usize) {
        let channels = self.shape.channels.min(source.shape.channels);
        for row in 0..source.shape.rows {
            for col in 0..source.shape.cols {
                let (to_row, to_col) = (row + top, col + left);
                if !self.in_grid(to_row, to_col) {
                    continue;
                }
                let from = source.index(row, col, 0);
                let to = self.index(to_row, to_col, 0);
                self.buf.as_mut()[to..to + channels]
                    .copy_from_slice(&source.buf.as_ref()[from..from + channels]);
            }
        }
    }
}

impl Canvas {
    /// A fully transparent packed canvas.
    pub fn blank(shape: Shape) -> Self {
        Self::from_parts(
            vec![0; shape.frame_len()],
            shape,
            shape.packed_stride(),
            0,
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(rows: usize, cols: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(rows * cols * 4);
        for row in 0..rows {
            for col in 0..cols {
                let alpha = if (row + col) % 2 == 0 { 255 } else { 0 };
                data.extend_from_slice(&[row as u8, col as u8, 7, alpha]);
            }
        }
        data
    }

    #[test]
    fn test_index_formula() {
        let shape = Shape::new(3, 4);
        let data = vec![0u8; 200];
        let frame = Frame::new(&data[..], shape, Stride { row: 20, col: 5 }, 8).unwrap();
        assert_eq!(frame.index(2, 3, 1), 2 * 20 + 3 * 5 + 1 + 8);
    }

    #[test]
    fn test_rejects_short_buffer() {
        let shape = Shape::new(2, 2);
        let data = vec![0u8; 15];
        match Frame::packed(&data[..], shape) {
            Err(EffectError::BufferTooSmall { len: 15, needed: 16 }) => {}
            other => panic!("Expected BufferTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_rgb_and_empty() {
        let data = vec![0u8; 64];
        assert!(matches!(
            Frame::packed(&data[..], Shape::with_channels(2, 2, 3)),
            Err(EffectError::UnsupportedChannels(3))
        ));
        assert!(matches!(
            Frame::packed(&data[..], Shape::new(0, 2)),
            Err(EffectError::EmptyImage { rows: 0, cols: 2 })
        ));
    }

    #[test]
    fn test_out_of_grid_reads_as_filled() {
        let data = checker(2, 2);
        let frame = Frame::packed(&data[..], Shape::new(2, 2)).unwrap();
        assert_eq!(frame.alpha(0, 0), Some(255));
        assert_eq!(frame.alpha(0, 1), Some(0));
        assert_eq!(frame.alpha(2, 0), None);
        assert_eq!(frame.fill_level(0, 2), 255);
        assert!(frame.is_open(0, 1));
        assert!(!frame.is_open(5, 5));
    }

    #[test]
    fn test_put_skips_outside_grid() {
        let mut canvas = Canvas::blank(Shape::new(2, 2));
        assert!(canvas.put(1, 1, [1, 2, 3, 4]));
        assert!(!canvas.put(2, 0, [9, 9, 9, 9]));
        assert!(!canvas.put_signed(-1, 0, [9, 9, 9, 9]));
        assert!(!canvas.put_signed(0, 2, [9, 9, 9, 9]));
        assert_eq!(canvas.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(canvas.as_bytes().iter().filter(|&&b| b == 9).count(), 0);
    }

    #[test]
    fn test_strided_source_copies_to_packed_canvas() {
        // Two rows of two pixels, each row followed by 4 bytes of padding.
        let mut data = vec![0u8; 2 * 12];
        data[0..4].copy_from_slice(&[1, 1, 1, 255]);
        data[4..8].copy_from_slice(&[2, 2, 2, 255]);
        data[12..16].copy_from_slice(&[3, 3, 3, 255]);
        data[16..20].copy_from_slice(&[4, 4, 4, 255]);
        let frame = Frame::new(&data[..], Shape::new(2, 2), Stride { row: 12, col: 4 }, 0).unwrap();

        let canvas = frame.to_canvas();
        assert_eq!(canvas.stride(), Stride { row: 8, col: 4 });
        assert_eq!(canvas.pixel(1, 0), Some([3, 3, 3, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([4, 4, 4, 255]));
    }

    #[test]
    fn test_padding() {
        let data = checker(2, 3);
        let frame = Frame::packed(&data[..], Shape::new(2, 3)).unwrap();
        let canvas = frame.padded(Padding {
            top: 1,
            bottom: 2,
            left: 3,
            right: 1,
        });
        assert_eq!(canvas.shape(), Shape::new(5, 7));
        assert_eq!(canvas.pixel(1, 3), frame.pixel(0, 0));
        assert_eq!(canvas.pixel(2, 5), frame.pixel(1, 2));
        assert_eq!(canvas.alpha(0, 0), Some(0));
        assert_eq!(canvas.alpha(4, 6), Some(0));
    }

    #[test]
    fn test_pixels_iterates_row_major() {
        let data = checker(2, 2);
        let frame = Frame::packed(&data[..], Shape::new(2, 2)).unwrap();
        let positions: Vec<(usize, usize)> = frame.pixels().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
