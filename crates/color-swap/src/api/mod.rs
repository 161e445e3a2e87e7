//! Public API for the color-swap crate.
//!
//! This module provides the high-level API: the [`Recolorer`] session and
//! the [`RecolorError`] unified error type.

mod error;
mod recolor;

pub use error::RecolorError;
pub use recolor::{Recolorer, PALETTE_BACKGROUND_SUM, RANDOM_BACKGROUND_SUM};
