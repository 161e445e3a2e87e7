//! HSV color shift transfer
//!
//! Given how a `reference` color turned into an `offset` color, apply the
//! same shift to a `subject` color. Working in HSV keeps hue, saturation
//! and value adjustments independent, so a slightly darker occurrence of a
//! source color produces a slightly darker substitute.

use super::hsv::Hsv;
use super::rgb::Rgb;

/// Below this saturation/value the reference is too close to gray/black
/// for a ratio to be meaningful and only the additive difference is used.
const RATIO_FLOOR: f64 = 0.02;

/// Pick the smaller-magnitude correction of an additive difference and a
/// multiplicative ratio for one HSV channel.
#[inline]
fn channel_adjustment(reference: f64, offset: f64, subject: f64) -> f64 {
    let diff = offset - reference;
    if reference > RATIO_FLOOR {
        let ratio = subject * offset / reference - subject;
        if ratio.abs() > diff.abs() {
            diff
        } else {
            ratio
        }
    } else {
        diff
    }
}

/// Apply the `reference -> offset` color shift to `subject`.
///
/// 1. Hue rotates by the wrapped hue difference, damped by
///    `min(mean saturation, mean value)` of reference and offset, so shifts
///    between near-gray or near-black colors barely rotate hue.
/// 2. Saturation and value each move by the smaller of the additive
///    difference and the multiplicative ratio.
/// 3. Hue is wrapped back into 0..360, saturation and value clamped.
///
/// # Example
///
/// ```
/// use color_swap::{shift_color, Rgb};
///
/// // No shift between reference and offset leaves the subject unchanged.
/// let subject = Rgb::from_u8(40, 120, 200);
/// let same = Rgb::from_u8(200, 10, 10);
/// let out = shift_color(same, same, subject);
/// assert!((out.r - 40.0).abs() < 1e-9);
/// assert!((out.g - 120.0).abs() < 1e-9);
/// assert!((out.b - 200.0).abs() < 1e-9);
/// ```
pub fn shift_color(reference: Rgb, offset: Rgb, subject: Rgb) -> Rgb {
    let reference = Hsv::from(reference);
    let offset = Hsv::from(offset);
    let mut out = Hsv::from(subject);

    let sat_mean = (reference.s + offset.s) / 2.0;
    let val_mean = (reference.v + offset.v) / 2.0;
    let hue_ratio = sat_mean.min(val_mean);

    let mut hue_offset = offset.h - reference.h;
    if hue_offset < -180.0 {
        hue_offset += 360.0;
    } else if hue_offset > 180.0 {
        hue_offset -= 360.0;
    }
    out.h += hue_offset * hue_ratio;

    out.s += channel_adjustment(reference.s, offset.s, out.s);
    out.v += channel_adjustment(reference.v, offset.v, out.v);

    Rgb::from(out.normalized())
}
