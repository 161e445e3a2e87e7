//! Unified error type for the color-swap public API.
//!
//! [`RecolorError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Unified error type for the color-swap public API.
///
/// # Example
///
/// ```
/// use color_swap::{Palette, RecolorError};
///
/// fn create_palette() -> Result<Palette, RecolorError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// ```
#[derive(Debug)]
pub enum RecolorError {
    /// Input length is not a multiple of 3
    InvalidLength {
        /// Number of values supplied
        len: usize,
    },
    /// Output buffer is shorter than the input
    OutputTooSmall {
        /// Bytes required
        needed: usize,
        /// Bytes available
        len: usize,
    },
    /// Color table growth failed; the table has been released
    OutOfMemory {
        /// Slot count that could not be reserved
        requested: usize,
    },
    /// Palette validation error
    Palette(PaletteError),
}

impl fmt::Display for RecolorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecolorError::InvalidLength { len } => {
                write!(f, "input length {} is not a multiple of 3", len)
            }
            RecolorError::OutputTooSmall { needed, len } => {
                write!(f, "output buffer holds {} bytes, {} needed", len, needed)
            }
            RecolorError::OutOfMemory { requested } => {
                write!(f, "failed to grow color table to {} entries", requested)
            }
            RecolorError::Palette(err) => write!(f, "palette error: {}", err),
        }
    }
}

impl std::error::Error for RecolorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecolorError::Palette(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for RecolorError {
    fn from(err: PaletteError) -> Self {
        RecolorError::Palette(err)
    }
}

impl From<ParseColorError> for RecolorError {
    fn from(err: ParseColorError) -> Self {
        RecolorError::Palette(PaletteError::ParseColor(err))
    }
}
