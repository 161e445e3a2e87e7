#![allow(clippy::module_inception, clippy::excessive_precision)]

//! color-swap: perceptual color substitution for raw RGB buffers
//!
//! This library detects the distinct colors of an image, assigns each one a
//! substitute color, and writes the recolored pixels. Colors that look the
//! same (by CIEDE2000 distance) share a substitute, and a session can be
//! reused across the frames of an animation so the mapping stays stable.
//!
//! # Quick Start
//!
//! The [`Recolorer`] session is the primary entry point:
//!
//! ```
//! use color_swap::Recolorer;
//!
//! let mut recolorer = Recolorer::new();
//! let input = [200.0, 20.0, 20.0, 201.0, 20.0, 20.0];
//! let mut output = [0u8; 6];
//!
//! recolorer
//!     .random_colors(&input, 5.0, &mut output, || [10, 200, 30])
//!     .unwrap();
//!
//! // Two nearly identical reds received the same substitute.
//! assert_eq!(output, [10, 200, 30, 10, 200, 30]);
//! assert_eq!(recolorer.table().len(), 1);
//! ```
//!
//! # Substitute Sources
//!
//! - [`Recolorer::random_colors`]: each new color gets bytes from a caller
//!   closure (usually a seeded random generator). Near-black pixels (channel
//!   sum at most 5) are treated as background.
//! - [`Recolorer::replace_colors`]: each new color takes the next entry of a
//!   cyclic [`Palette`]. Later occurrences of a registered color get the
//!   stored substitute shifted in HSV by the same amount the occurrence
//!   differs from the registered original, see [`shift_color`].
//!
//! # Color Science
//!
//! ## Color Spaces
//!
//! | Color Space | Used For |
//! |-------------|----------|
//! | **sRGB** ([`Rgb`]) | Input/output, channels on the 0..=255 scale |
//! | **CIE L\*a\*b\*** ([`Lab`]) | Perceptual distance, D65 reference white |
//! | **HSV** ([`Hsv`]) | Transferring a color shift onto another color |
//!
//! ## Distance Metric: CIEDE2000
//!
//! Euclidean distance in L\*a\*b\* ([`color_distance`]) over-weights
//! differences in saturated blues and under-weights near-gray hue shifts.
//! [`ciede2000`] corrects both with lightness, chroma and hue weighting
//! functions plus a rotation term for the blue region, which makes a
//! single threshold meaningful across the whole gamut.
//!
//! ```text
//! dE00 = sqrt( (dL'/SL)^2 + (dC'/SC)^2 + (dH'/SH)^2 + RT * (dC'/SC) * (dH'/SH) )
//! ```
//!
//! A distance below 0.1 is treated as the same color and ends the table
//! scan early; otherwise the closest entry under the caller's threshold
//! wins, ties going to the entry registered first.

pub mod api;
pub mod color;
pub mod palette;
pub mod table;


pub use api::{RecolorError, Recolorer};
pub use color::{ciede2000, color_distance, shift_color, Hsv, Lab, Rgb};
pub use palette::{Palette, PaletteError, ParseColorError};
pub use table::{ColorMapping, ColorTable};
