//! Cyclic substitute palette with a persistent cursor.
//!
//! In palette mode every newly discovered source color is assigned the next
//! palette entry. The cursor lives on the palette itself, so a caller that
//! keeps the same `Palette` across several recoloring calls (for example
//! one per animation frame) continues where the previous call stopped.

use super::error::PaletteError;
use crate::color::Rgb;

/// An ordered list of substitute colors plus a wrapping cursor.
///
/// The cursor never runs out: after the last entry it wraps to the first.
///
/// # Example
///
/// ```
/// use color_swap::Palette;
///
/// let mut palette = Palette::from_hex(&["#FF0000", "#00FF00"]).unwrap();
/// assert_eq!(palette.next_color(), [255, 0, 0]);
/// assert_eq!(palette.next_color(), [0, 255, 0]);
/// assert_eq!(palette.next_color(), [255, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
    cursor: usize,
}

impl Palette {
    /// Create a palette from byte triples.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: &[[u8; 3]]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self {
            colors: colors.to_vec(),
            cursor: 0,
        })
    }

    /// Create a palette from a flat `[R, G, B, R, G, B, ...]` byte sequence.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::InvalidLength`] if the length is not a multiple of 3
    /// - [`PaletteError::EmptyPalette`] if `bytes` is empty
    pub fn from_flat(bytes: &[u8]) -> Result<Self, PaletteError> {
        if bytes.len() % 3 != 0 {
            return Err(PaletteError::InvalidLength { len: bytes.len() });
        }
        let colors: Vec<[u8; 3]> = bytes
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(&colors)
    }

    /// Create a palette from hex color strings (`#RRGGBB` or `#RGB`).
    pub fn from_hex(hex: &[&str]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| s.parse::<Rgb>().map(Rgb::to_bytes))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// Number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the color [`next_color`](Self::next_color) will return.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, wrapping positions past the end.
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position % self.colors.len();
    }

    /// The palette entries in order.
    #[inline]
    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// Return the color under the cursor and advance it, wrapping to the
    /// start after the last entry.
    pub fn next_color(&mut self) -> [u8; 3] {
        if self.cursor >= self.colors.len() {
            self.cursor = 0;
        }
        let color = self.colors[self.cursor];
        self.cursor += 1;
        color
    }
}
