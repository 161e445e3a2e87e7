//! sRGB color type
//!
//! Channels are stored as `f64` on the 0.0..=255.0 scale so that pixel bytes
//! can be fed in without normalisation and fractional intermediate results
//! (from HSV round trips) survive until the final byte conversion.

use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color in gamma-encoded sRGB space, channels in 0.0..=255.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel (0.0..=255.0)
    pub r: f64,
    /// Green channel (0.0..=255.0)
    pub g: f64,
    /// Blue channel (0.0..=255.0)
    pub b: f64,
}

impl Rgb {
    /// Create a new color from channel values on the 0.0..=255.0 scale.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use color_swap::Rgb;
    /// let red = Rgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 255.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64,
            g: g as f64,
            b: b as f64,
        }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Create a color from the first three values of a slice.
    ///
    /// Returns `None` when the slice holds fewer than three values.
    #[inline]
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [r, g, b, ..] => Some(Self::new(*r, *g, *b)),
            _ => None,
        }
    }

    /// Convert to a byte array `[R, G, B]`.
    ///
    /// Channels are clamped to 0..=255 and truncated toward zero, the same
    /// result an integer cast of an in-range value gives.
    ///
    /// # Example
    /// ```
    /// use color_swap::Rgb;
    /// assert_eq!(Rgb::new(254.9, 0.4, 300.0).to_bytes(), [254, 0, 255]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            self.r.clamp(0.0, 255.0) as u8,
            self.g.clamp(0.0, 255.0) as u8,
            self.b.clamp(0.0, 255.0) as u8,
        ]
    }

    /// Sum of the three channels.
    ///
    /// Used as a cheap "is this background" test: near-black pixels have a
    /// channel sum close to zero.
    #[inline]
    pub fn channel_sum(self) -> f64 {
        self.r + self.g + self.b
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive, with
    /// surrounding whitespace trimmed.
    ///
    /// ```
    /// use color_swap::Rgb;
    ///
    /// let orange: Rgb = "#FF8000".parse().unwrap();
    /// assert_eq!(orange.to_bytes(), [255, 128, 0]);
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red.to_bytes(), [255, 0, 0]);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // Byte slicing below must not split a code point.
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: each digit expands to a doubled digit (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
