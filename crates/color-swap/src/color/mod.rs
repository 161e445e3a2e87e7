//! Color types, conversions and distance metrics
//!
//! All color math in this crate works on `f64` channels in the 0.0..=255.0
//! range, the scale callers already hold pixel bytes in.
//!
//! # Color Spaces
//!
//! - [`Rgb`]: gamma-encoded sRGB, the input/output representation.
//! - [`Lab`]: CIE L*a*b* (D65), used for perceptual distance.
//! - [`Hsv`]: hue/saturation/value, used to transfer a color shift from
//!   one color onto another.
//!
//! # Example
//!
//! ```
//! use color_swap::{ciede2000, Rgb};
//!
//! let red = Rgb::from_u8(255, 0, 0);
//! let darker_red = Rgb::from_u8(240, 0, 0);
//!
//! assert_eq!(ciede2000(red, red), 0.0);
//! assert!(ciede2000(red, darker_red) > 0.0);
//! ```

mod hsv;
mod lab;
mod rgb;
mod transfer;

pub use hsv::Hsv;
pub use lab::Lab;
pub use rgb::Rgb;
pub use transfer::shift_color;

/// Euclidean distance between two colors in CIE L*a*b* space (CIE76).
///
/// Cheaper than [`ciede2000`] but less perceptually uniform.
#[inline]
pub fn color_distance(c1: Rgb, c2: Rgb) -> f64 {
    Lab::from(c1).euclidean_distance(Lab::from(c2))
}

/// CIEDE2000 color difference between two sRGB colors.
///
/// Both colors are converted to CIE L*a*b* first; see
/// [`Lab::ciede2000`] for the formula.
#[inline]
pub fn ciede2000(c1: Rgb, c2: Rgb) -> f64 {
    Lab::from(c1).ciede2000(Lab::from(c2))
}
