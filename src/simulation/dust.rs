//! Dust motes blown off the image from right to left.

use rand::Rng;

use crate::rendering::Frame;

/// Per-step rightward acceleration of drifting dust.
const DRIFT_ACCELERATION: f64 = 0.08;
/// Drift velocity stops growing at this value.
const DRIFT_LIMIT: f64 = 13.0;
/// Columns the activation window moves left per frame.
const WINDOW_SPEED: i64 = 2;

/// Column band that activates dust.
///
/// Dust right of `max_col` always starts drifting; dust between `min_col`
/// and `max_col` starts with a probability that grows towards `max_col`.
/// The band starts right of the image and sweeps left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftWindow {
    pub max_col: i64,
    pub min_col: i64,
}

impl DriftWindow {
    /// Starting band for an image `cols` wide.
    pub fn new(cols: usize) -> Self {
        let max_col = (cols as f64 * 1.2) as i64;
        Self {
            max_col,
            min_col: max_col - (cols / 3) as i64,
        }
    }

    /// Move the band left by one frame's worth.
    pub fn slide(&mut self) {
        self.max_col -= WINDOW_SPEED;
        self.min_col -= WINDOW_SPEED;
    }
}

/// A single mote carrying its source pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dust {
    pub row: f64,
    pub col: f64,
    pub x_velocity: f64,
    pub color: [u8; 4],
    /// Set once the mote starts drifting; never cleared.
    pub active: bool,
}

impl Dust {
    pub fn new(row: usize, col: usize, color: [u8; 4]) -> Self {
        Self {
            row: row as f64,
            col: col as f64,
            x_velocity: 0.0,
            color,
            active: false,
        }
    }

    /// Advance one frame. `rows` is the canvas height and scales the
    /// vertical jitter.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, window: &DriftWindow, rows: usize) {
        let col = self.col as i64;

        if self.active {
            let jitter = (rows / 40) as i64;
            self.row += (rng.gen_range(0..=2 * jitter) - jitter) as f64;
            self.col += self.x_velocity;
            if self.x_velocity < DRIFT_LIMIT {
                self.x_velocity += DRIFT_ACCELERATION;
            }
        } else if col > window.max_col {
            self.activate(rng);
        } else if col > window.min_col {
            let span = (window.max_col - window.min_col).max(1);
            if rng.gen_range(0..span) < col - window.min_col {
                self.activate(rng);
            }
        }
    }

    fn activate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.active = true;
        self.x_velocity = rng.gen_range(0..200) as f64 / 400.0 + 1.0;
    }

    /// Paint the mote; positions outside `frame` are skipped.
    pub fn draw<B>(&self, frame: &mut Frame<B>)
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        frame.put_signed(self.row as i64, self.col as i64, self.color);
    }
}
