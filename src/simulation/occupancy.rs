//! Per-cell counters of settled debris.

/// A `rows x cols` grid of settle counters.
///
/// A cell with a positive counter blocks falling debris. Several settled
/// pieces may share a cell, hence a counter rather than a flag.
///
/// Queries outside the grid follow an asymmetric policy: rows at or below
/// the floor are blocked so nothing falls through it, while rows above the
/// top edge and columns outside the image are free so airborne debris can
/// travel there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    rows: usize,
    cols: usize,
    counts: Vec<i32>,
}

impl Occupancy {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            counts: vec![0; rows * cols],
        }
    }

    #[inline]
    fn cell(&self, row: i64, col: i64) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Counter at `(row, col)`; zero outside the grid.
    pub fn count(&self, row: i64, col: i64) -> i32 {
        self.cell(row, col).map_or(0, |i| self.counts[i])
    }

    /// Whether falling debris entering `(row, col)` must stop.
    pub fn is_blocked(&self, row: i64, col: i64) -> bool {
        if row >= self.rows as i64 {
            return true;
        }
        self.count(row, col) > 0
    }

    /// Record one more settled piece at `(row, col)`.
    pub fn occupy(&mut self, row: i64, col: i64) {
        if let Some(i) = self.cell(row, col) {
            self.counts[i] += 1;
        }
    }

    /// Record a settled piece leaving `(row, col)`. Never drops below zero.
    pub fn vacate(&mut self, row: i64, col: i64) {
        if let Some(i) = self.cell(row, col) {
            self.counts[i] = (self.counts[i] - 1).max(0);
        }
    }

    /// Sum of all counters.
    pub fn total(&self) -> i64 {
        self.counts.iter().map(|&c| c as i64).sum()
    }
}
