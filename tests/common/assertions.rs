//! Frame-level assertion helpers.

use grainfall::rendering::{Animation, Frame, ALPHA_THRESHOLD};
use pretty_assertions::assert_eq;

/// Number of pixels at or above the fill threshold
pub fn filled_count<B: AsRef<[u8]>>(frame: &Frame<B>) -> usize {
    frame
        .pixels()
        .filter(|(_, _, px)| px[3] >= ALPHA_THRESHOLD)
        .count()
}

/// Number of pixels with any alpha
pub fn visible_count<B: AsRef<[u8]>>(frame: &Frame<B>) -> usize {
    frame.pixels().filter(|(_, _, px)| px[3] != 0).count()
}

/// Assert every byte of frame `index` is zero
pub fn assert_frame_clear(animation: &Animation, index: usize) {
    let bytes = animation
        .frame_bytes(index)
        .unwrap_or_else(|| panic!("frame {index} out of range"));
    let lit = bytes.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert_eq!(lit, 0, "Expected frame {index} to be transparent");
}

/// Assert `(row, col)` holds `expected` in frame `index`
pub fn assert_pixel(animation: &Animation, index: usize, row: usize, col: usize, expected: [u8; 4]) {
    let frame = animation
        .frame(index)
        .unwrap_or_else(|| panic!("frame {index} out of range"));
    assert_eq!(
        frame.pixel(row, col),
        Some(expected),
        "Unexpected pixel at ({row}, {col}) in frame {index}"
    );
}

/// Assert frame `index` is identical to `source`
pub fn assert_frame_matches<B: AsRef<[u8]>>(animation: &Animation, index: usize, source: &Frame<B>) {
    let frame = animation
        .frame(index)
        .unwrap_or_else(|| panic!("frame {index} out of range"));
    let expected: Vec<_> = source.pixels().collect();
    let actual: Vec<_> = frame.pixels().collect();
    assert_eq!(actual, expected, "Frame {index} differs from source");
}

/// Sum of filled pixels per column, left to right
pub fn column_heights<B: AsRef<[u8]>>(frame: &Frame<B>) -> Vec<usize> {
    let shape = frame.shape();
    (0..shape.cols)
        .map(|col| {
            (0..shape.rows)
                .filter(|&row| frame.alpha(row, col).unwrap_or(0) >= ALPHA_THRESHOLD)
                .count()
        })
        .collect()
}
