//! HSV color type
//!
//! Hue in degrees (0.0..360.0), saturation and value in 0.0..=1.0.
//! Conversions follow the standard six-sector hexcone model.

use super::rgb::Rgb;

/// Channel spread below which a color is treated as achromatic.
const ACHROMATIC_EPSILON: f64 = 0.00001;

/// Saturation below which [`Rgb::from`] takes the gray fast path.
const GRAY_SATURATION: f64 = 0.001;

/// A color in HSV space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue in degrees, 0.0..360.0
    pub h: f64,
    /// Saturation, 0.0..=1.0
    pub s: f64,
    /// Value, 0.0..=1.0
    pub v: f64,
}

impl Hsv {
    /// Create a new HSV color.
    #[inline]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Wrap hue into 0.0..360.0 (single fold) and clamp `s`/`v` to 0.0..=1.0.
    pub(crate) fn normalized(self) -> Self {
        let h = if self.h < 0.0 {
            self.h + 360.0
        } else if self.h >= 360.0 {
            self.h - 360.0
        } else {
            self.h
        };
        Self {
            h,
            s: self.s.clamp(0.0, 1.0),
            v: self.v.clamp(0.0, 1.0),
        }
    }
}

impl From<Rgb> for Hsv {
    /// Convert an sRGB color (0.0..=255.0 channels) to HSV.
    ///
    /// Achromatic colors (channel spread below 1e-5) get hue 0 and
    /// saturation 0, so no NaN can leak out of the division by the spread.
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r / 255.0;
        let g = rgb.g / 255.0;
        let b = rgb.b / 255.0;

        let min = r.min(g).min(b);
        let max = r.max(g).max(b);
        let delta = max - min;

        if delta < ACHROMATIC_EPSILON || max <= 0.0 {
            return Hsv::new(0.0, 0.0, max);
        }

        let s = delta / max;
        let sector = if r >= max {
            (g - b) / delta
        } else if g >= max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };

        let mut h = sector * 60.0;
        if h < 0.0 {
            h += 360.0;
        }

        Hsv::new(h, s, max)
    }
}

impl From<Hsv> for Rgb {
    /// Convert an HSV color to sRGB on the 0.0..=255.0 scale.
    fn from(hsv: Hsv) -> Self {
        let v = hsv.v;
        if hsv.s < GRAY_SATURATION {
            return Rgb::new(255.0 * v, 255.0 * v, 255.0 * v);
        }

        let hh = if hsv.h >= 360.0 { 0.0 } else { hsv.h } / 60.0;
        let sector = hh as i64;
        let ff = hh - sector as f64;
        let p = v * (1.0 - hsv.s);
        let q = v * (1.0 - hsv.s * ff);
        let t = v * (1.0 - hsv.s * (1.0 - ff));

        let (r, g, b) = match sector {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Rgb::new(r * 255.0, g * 255.0, b * 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb_close(a: Rgb, b: Rgb, tol: f64) {
        assert!(
            (a.r - b.r).abs() < tol && (a.g - b.g).abs() < tol && (a.b - b.b).abs() < tol,
            "{a:?} != {b:?} (tolerance {tol})"
        );
    }

    #[test]
    fn test_primaries() {
        let red = Hsv::from(Rgb::from_u8(255, 0, 0));
        assert_eq!(red, Hsv::new(0.0, 1.0, 1.0));

        let green = Hsv::from(Rgb::from_u8(0, 255, 0));
        assert_eq!(green, Hsv::new(120.0, 1.0, 1.0));

        let blue = Hsv::from(Rgb::from_u8(0, 0, 255));
        assert_eq!(blue, Hsv::new(240.0, 1.0, 1.0));

        let magenta = Hsv::from(Rgb::from_u8(255, 0, 255));
        assert_eq!(magenta.h, 300.0);
    }

    #[test]
    fn test_achromatic_has_zero_hue() {
        let black = Hsv::from(Rgb::from_u8(0, 0, 0));
        assert_eq!(black, Hsv::new(0.0, 0.0, 0.0));

        let gray = Hsv::from(Rgb::from_u8(128, 128, 128));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!((gray.v - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_gray_fast_path() {
        let rgb = Rgb::from(Hsv::new(200.0, 0.0005, 0.5));
        assert_eq!(rgb, Rgb::new(127.5, 127.5, 127.5));
    }

    #[test]
    fn test_round_trip_non_degenerate() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(51) {
                for b in (5..=255u16).step_by(25) {
                    let original = Rgb::new(r as f64, g as f64, b as f64);
                    let hsv = Hsv::from(original);
                    if hsv.s == 0.0 {
                        continue;
                    }
                    assert_rgb_close(Rgb::from(hsv), original, 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_hue_360_wraps_to_red() {
        let rgb = Rgb::from(Hsv::new(360.0, 1.0, 1.0));
        assert_rgb_close(rgb, Rgb::new(255.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn test_normalized() {
        let n = Hsv::new(-30.0, 1.5, -0.2).normalized();
        assert_eq!(n, Hsv::new(330.0, 1.0, 0.0));

        let n = Hsv::new(390.0, 0.5, 0.5).normalized();
        assert_eq!(n, Hsv::new(30.0, 0.5, 0.5));
    }
}
