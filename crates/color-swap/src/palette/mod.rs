//! Substitute palettes
//!
//! This module provides the cyclic [`Palette`] that feeds substitute colors
//! to the palette recoloring mode, along with its error types.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::Palette;
