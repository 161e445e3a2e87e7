//! Synthetic RGBA images.

use grainfall::models::JobConfig;
use grainfall::rendering::{Canvas, Shape};

/// Colors used across fixtures
pub mod colors {
    pub const RED: [u8; 4] = [220, 20, 20, 255];
    pub const GREEN: [u8; 4] = [20, 200, 40, 255];
    pub const BLUE: [u8; 4] = [30, 40, 210, 255];
    /// Visible to the eye but below the fill threshold
    pub const GHOST: [u8; 4] = [200, 200, 200, 60];
    pub const CLEAR: [u8; 4] = [0, 0, 0, 0];
}

/// A fully transparent image
pub fn blank(rows: usize, cols: usize) -> Canvas {
    Canvas::blank(Shape::new(rows, cols))
}

/// An image filled with one color
pub fn solid(rows: usize, cols: usize, rgba: [u8; 4]) -> Canvas {
    let mut canvas = blank(rows, cols);
    fill_rect(&mut canvas, 0, 0, rows, cols, rgba);
    canvas
}

/// Paint a `height x width` rectangle with its top-left corner at `(top, left)`
pub fn fill_rect(
    canvas: &mut Canvas,
    top: usize,
    left: usize,
    height: usize,
    width: usize,
    rgba: [u8; 4],
) {
    for row in top..top + height {
        for col in left..left + width {
            canvas.put(row, col, rgba);
        }
    }
}

/// A transparent image with a solid floor of `height` rows
pub fn with_floor(rows: usize, cols: usize, height: usize, rgba: [u8; 4]) -> Canvas {
    let mut canvas = blank(rows, cols);
    fill_rect(&mut canvas, rows - height, 0, height, cols, rgba);
    canvas
}

/// Three vertical stripes: red, green and blue
pub fn stripes(rows: usize, cols: usize) -> Canvas {
    let mut canvas = blank(rows, cols);
    let third = cols / 3;
    fill_rect(&mut canvas, 0, 0, rows, third, colors::RED);
    fill_rect(&mut canvas, 0, third, rows, third, colors::GREEN);
    fill_rect(&mut canvas, 0, 2 * third, rows, cols - 2 * third, colors::BLUE);
    canvas
}

/// Default job with a fixed seed
pub fn seeded_job(seed: u64) -> JobConfig {
    JobConfig {
        seed: Some(seed),
        ..JobConfig::default()
    }
}
