//! Falling, bouncing and settling debris.
//!
//! Debris is either airborne (integrating its velocity) or settled (moving
//! one cell at a time like a sand grain). Airborne debris moving downward
//! is integrated in `max(|row_velocity|, |col_velocity|)` sub-steps so that
//! fast pieces cannot skip over a settled cell.

use rand::Rng;

use super::granular::granular_target;
use super::occupancy::Occupancy;
use crate::rendering::Frame;

/// Restitution applied to the column velocity on a wall bounce while
/// falling.
const FALL_BOUNCE: f64 = -0.96;
/// Damping applied to both velocities on a wall bounce while rising, and
/// to the column velocity every step otherwise.
const RISE_DAMPING: f64 = 0.9;
/// Row velocity stops growing at this value.
const TERMINAL_VELOCITY: f64 = 20.0;
const GRAVITY: f64 = 1.0;

/// One piece of debris.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debris {
    pub color: [u8; 4],
    pub row: f64,
    pub col: f64,
    pub row_velocity: f64,
    pub col_velocity: f64,
    /// `true` while airborne.
    pub active: bool,
}

impl Debris {
    /// Airborne debris launched upward with a random sideways kick.
    ///
    /// Row velocity is a whole number in `-24..=-10`; column velocity is in
    /// `-20.0..20.0` with millesimal resolution.
    pub fn launched<R: Rng + ?Sized>(rng: &mut R, row: usize, col: usize, color: [u8; 4]) -> Self {
        let row_velocity = -((rng.gen_range(0..15) + 10) as f64);
        let col_velocity = rng.gen_range(0..40_000) as f64 / 1000.0 - 20.0;
        Self {
            color,
            row: row as f64,
            col: col as f64,
            row_velocity,
            col_velocity,
            active: true,
        }
    }

    /// Settled debris at rest.
    pub fn settled(row: usize, col: usize, color: [u8; 4]) -> Self {
        Self {
            color,
            row: row as f64,
            col: col as f64,
            row_velocity: 0.0,
            col_velocity: 0.0,
            active: false,
        }
    }

    /// Advance one step.
    ///
    /// Settled debris slides on `canvas`, which must only hold settled
    /// debris. Landing and sliding keep `occupancy` in step with the cells
    /// settled debris rests on.
    pub fn update<B>(&mut self, canvas: &mut Frame<B>, occupancy: &mut Occupancy)
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        if !self.active {
            self.slide(canvas, occupancy);
        } else if self.row_velocity > 0.0 {
            let shape = canvas.shape();
            self.fall(shape.rows, shape.cols, occupancy);
        } else {
            self.rise(canvas.shape().cols);
        }
    }

    fn rise(&mut self, cols: usize) {
        let cols = cols as f64;
        self.row += self.row_velocity;
        self.col += self.col_velocity;
        self.row_velocity += GRAVITY;

        if self.col < 0.0 {
            self.col = -self.col;
            self.bounce_rising();
        } else if self.col >= cols {
            self.col = cols * 2.0 - self.col - 2.0;
            self.bounce_rising();
        } else {
            self.col_velocity *= RISE_DAMPING;
        }
    }

    fn bounce_rising(&mut self) {
        self.col_velocity = -self.col_velocity * RISE_DAMPING;
        self.row_velocity *= RISE_DAMPING;
    }

    fn fall(&mut self, rows: usize, cols: usize, occupancy: &mut Occupancy) {
        let (rows, cols) = (rows as f64, cols as f64);
        let steps = (self.row_velocity.abs().max(self.col_velocity.abs()) as usize).max(1);
        let row_step = self.row_velocity / steps as f64;
        let mut col_step = self.col_velocity / steps as f64;

        let (mut current_row, mut current_col) = (self.row, self.col);
        let (mut row_stepped, mut col_stepped) = (current_row, current_col);

        for _ in 0..steps {
            row_stepped = current_row + row_step;
            col_stepped = current_col + col_step;

            // Above the image nothing can be hit; take the whole step at once.
            if row_stepped < 0.0 || current_row < 0.0 {
                row_stepped = self.row + self.row_velocity;
                col_stepped = self.col + self.col_velocity;
                break;
            }

            if row_stepped >= rows {
                self.active = false;
                self.row = rows - 1.0;
                self.col = current_col;
                occupancy.occupy(self.row as i64, self.col as i64);
                return;
            }

            if col_stepped < 0.0 {
                col_step = -col_step;
                col_stepped = -col_stepped;
                self.col_velocity *= FALL_BOUNCE;
            } else if col_stepped >= cols - 1.0 {
                col_stepped = cols * 2.0 - col_stepped - 2.0;
                col_step = -col_step;
                self.col_velocity *= FALL_BOUNCE;
            }

            if occupancy.is_blocked(row_stepped as i64, col_stepped as i64) {
                // Rest on top of whatever was hit.
                self.active = false;
                self.row = row_stepped - row_step;
                self.col = col_stepped;
                occupancy.occupy(self.row as i64, self.col as i64);
                return;
            }

            current_row = row_stepped;
            current_col = col_stepped;
        }

        self.row = row_stepped;
        self.col = col_stepped;
        if self.row_velocity < TERMINAL_VELOCITY {
            self.row_velocity += GRAVITY;
        }
    }

    fn slide<B>(&mut self, canvas: &mut Frame<B>, occupancy: &mut Occupancy)
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let Some((row, col)) = self.cell() else {
            return;
        };
        let Some((to_row, to_col)) = granular_target(canvas, row, col) else {
            return;
        };

        self.draw(canvas, 0);
        occupancy.vacate(row as i64, col as i64);
        self.row = to_row as f64;
        self.col = to_col as f64;
        occupancy.occupy(to_row as i64, to_col as i64);
        self.draw(canvas, u8::MAX);
    }

    /// Grid cell under the debris, if it is inside the image.
    fn cell(&self) -> Option<(usize, usize)> {
        if self.row < 0.0 || self.col < 0.0 {
            return None;
        }
        Some((self.row as usize, self.col as usize))
    }

    /// Paint with the original alpha when `fill` is non-zero, else erase.
    ///
    /// Positions are truncated toward zero to pick the cell, the same rule
    /// dust uses. Anything truncating to a negative row, or landing beside
    /// the image, is not drawn.
    pub fn draw<B>(&self, frame: &mut Frame<B>, fill: u8)
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let row = self.row as i64;
        if row < 0 {
            return;
        }
        let [r, g, b, a] = self.color;
        let alpha = if fill != 0 { a } else { 0 };
        frame.put_signed(row, self.col as i64, [r, g, b, alpha]);
    }
}
