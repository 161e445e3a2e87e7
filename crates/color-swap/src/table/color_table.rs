//! Append-only color table with fixed-increment growth.
//!
//! Entries are matched in insertion order. Because the nearest-match scan
//! uses a strict `<`, the first inserted entry wins ties, so the order of
//! the table decides which substitute a borderline color receives.

use crate::api::RecolorError;
use crate::color::{ciede2000, Rgb};

/// Number of slots added each time the table fills up.
pub const GROWTH_INCREMENT: usize = 20;

/// Distance below which two colors are treated as the same color and the
/// scan stops early.
pub const IDENTICAL_DISTANCE: f64 = 0.1;

/// Upper bound for the running minimum; larger than any CIEDE2000 value
/// between two sRGB colors.
const INITIAL_MIN_DISTANCE: f64 = 512.0;

/// A source color and the substitute assigned when it was first seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMapping {
    /// The color as it appeared in the input.
    pub original: Rgb,
    /// Substitute bytes `[R, G, B]`.
    pub substitute: [u8; 3],
}

/// Insertion-ordered list of [`ColorMapping`]s.
///
/// The table never shrinks. Its slot count starts at one and grows by
/// [`GROWTH_INCREMENT`] whenever the entry count reaches it; storage is
/// reserved with [`Vec::try_reserve_exact`] so an allocation failure comes
/// back as [`RecolorError::OutOfMemory`] instead of aborting.
///
/// # Example
///
/// ```
/// use color_swap::{ColorTable, Rgb};
///
/// let mut table = ColorTable::new();
/// table.insert(Rgb::from_u8(200, 30, 30), [0, 0, 255]).unwrap();
///
/// let hit = table.find(Rgb::from_u8(201, 30, 30), 5.0).unwrap();
/// assert_eq!(table.entries()[hit].substitute, [0, 0, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct ColorTable {
    entries: Vec<ColorMapping>,
    size: usize,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorTable {
    /// Create an empty table with a single slot.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(1),
            size: 1,
        }
    }

    /// Number of registered colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no color has been registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current slot count. Always greater than [`len`](Self::len) unless
    /// the table was released after an allocation failure.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All mappings in insertion order.
    #[inline]
    pub fn entries(&self) -> &[ColorMapping] {
        &self.entries
    }

    /// Find the entry matching `color` by CIEDE2000 distance.
    ///
    /// Returns the first entry closer than [`IDENTICAL_DISTANCE`], otherwise
    /// the closest entry whose distance is below `max_distance`.
    pub fn find(&self, color: Rgb, max_distance: f64) -> Option<usize> {
        self.find_by(max_distance, |mapping| ciede2000(color, mapping.original))
    }

    /// Nearest-match scan with a caller-supplied distance.
    pub(crate) fn find_by<F>(&self, max_distance: f64, mut distance: F) -> Option<usize>
    where
        F: FnMut(&ColorMapping) -> f64,
    {
        let mut min_distance = INITIAL_MIN_DISTANCE;
        let mut found = None;
        for (index, mapping) in self.entries.iter().enumerate() {
            let dist = distance(mapping);
            if dist < IDENTICAL_DISTANCE {
                return Some(index);
            }
            if dist < min_distance && dist < max_distance {
                min_distance = dist;
                found = Some(index);
            }
        }
        found
    }

    /// Append a mapping and return its index.
    ///
    /// When the append fills the last slot the table grows by
    /// [`GROWTH_INCREMENT`]. If that reservation fails the whole table is
    /// released (including the entry just added) and
    /// [`RecolorError::OutOfMemory`] is returned.
    pub fn insert(&mut self, original: Rgb, substitute: [u8; 3]) -> Result<usize, RecolorError> {
        if self.entries.len() >= self.size {
            self.grow()?;
        }
        let index = self.entries.len();
        self.entries.push(ColorMapping {
            original,
            substitute,
        });
        if self.entries.len() >= self.size {
            self.grow()?;
        }
        Ok(index)
    }

    /// Drop every entry and free the storage.
    pub fn release(&mut self) {
        self.entries = Vec::new();
        self.size = 0;
    }

    fn grow(&mut self) -> Result<(), RecolorError> {
        let requested = self.size + GROWTH_INCREMENT;
        let additional = requested - self.entries.len();
        if self.entries.try_reserve_exact(additional).is_err() {
            self.release();
            return Err(RecolorError::OutOfMemory { requested });
        }
        self.size = requested;
        Ok(())
    }
}
