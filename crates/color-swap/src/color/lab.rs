//! CIE L*a*b* color space and color difference metrics
//!
//! Conversion goes sRGB -> linear RGB -> XYZ (D65) -> L*a*b*. Distances are
//! either plain Euclidean (CIE76) or CIEDE2000.
//!
//! # References
//!
//! Sharma, Wu, Dalal, "The CIEDE2000 Color-Difference Formula:
//! Implementation Notes, Supplementary Test Data, and Mathematical
//! Observations" (2005).

use std::f64::consts::PI;

use super::rgb::Rgb;

/// D65 reference white, X component (Y normalised to 100).
const REF_X: f64 = 95.0489;
/// D65 reference white, Y component.
const REF_Y: f64 = 100.0;
/// D65 reference white, Z component.
const REF_Z: f64 = 108.8840;

/// 25^7, used by the chroma compensation terms of CIEDE2000.
const POW25_TO_7: f64 = 6_103_515_625.0;

/// A color in CIE L*a*b* space.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis, unbounded (commonly -128..=127)
/// - `b`: Blue-yellow axis, unbounded (commonly -128..=127)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

#[inline]
fn deg_to_rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// Piecewise inverse sRGB gamma on the 0.0..=1.0 scale.
#[inline]
fn srgb_to_linear(v: f64) -> f64 {
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

/// XYZ -> L*a*b* companding: cube root above the 0.008856 knee, linear below.
#[inline]
fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Hue angle of `(a', b)` in radians, normalised to 0..2π.
///
/// The achromatic case (both components zero) is defined as hue 0.
#[inline]
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a_prime);
    if h < 0.0 {
        h + 2.0 * PI
    } else {
        h
    }
}

impl Lab {
    /// Create a new L*a*b* color.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Euclidean (CIE76) distance to another color.
    ///
    /// # Example
    ///
    /// ```
    /// use color_swap::Lab;
    ///
    /// let d = Lab::new(50.0, 0.0, 0.0).euclidean_distance(Lab::new(53.0, 4.0, 0.0));
    /// assert!((d - 5.0).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn euclidean_distance(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }

    /// CIEDE2000 color difference (ΔE00) with unit weighting factors.
    ///
    /// Follows the published formula step for step, including the
    /// conventions from Sharma et al. for the achromatic edge cases:
    ///
    /// - a zero `(a', b)` pair has hue 0
    /// - when either chroma is zero the hue difference is 0 and the mean
    ///   hue is the plain sum of both hues
    ///
    /// The result is 0 for identical colors and symmetric in its arguments.
    pub fn ciede2000(self, other: Lab) -> f64 {
        let (k_l, k_c, k_h) = (1.0, 1.0, 1.0);
        let deg360 = 2.0 * PI;
        let deg180 = PI;

        // Step 1: chroma, G factor and the rotated a' axis.
        let c1 = (self.a * self.a + self.b * self.b).sqrt();
        let c2 = (other.a * other.a + other.b * other.b).sqrt();
        let bar_c = (c1 + c2) / 2.0;
        let bar_c7 = bar_c.powi(7);
        let g = 0.5 * (1.0 - (bar_c7 / (bar_c7 + POW25_TO_7)).sqrt());

        let a1_prime = (1.0 + g) * self.a;
        let a2_prime = (1.0 + g) * other.a;
        let c1_prime = (a1_prime * a1_prime + self.b * self.b).sqrt();
        let c2_prime = (a2_prime * a2_prime + other.b * other.b).sqrt();
        let h1_prime = hue_angle(self.b, a1_prime);
        let h2_prime = hue_angle(other.b, a2_prime);

        // Step 2: lightness, chroma and hue differences.
        let delta_l_prime = other.l - self.l;
        let delta_c_prime = c2_prime - c1_prime;
        let c_prime_product = c1_prime * c2_prime;
        let delta_h_prime = if c_prime_product == 0.0 {
            0.0
        } else {
            let dh = h2_prime - h1_prime;
            if dh < -deg180 {
                dh + deg360
            } else if dh > deg180 {
                dh - deg360
            } else {
                dh
            }
        };
        let delta_big_h_prime = 2.0 * c_prime_product.sqrt() * (delta_h_prime / 2.0).sin();

        // Step 3: weighting functions.
        let bar_l_prime = (self.l + other.l) / 2.0;
        let bar_c_prime = (c1_prime + c2_prime) / 2.0;
        let h_prime_sum = h1_prime + h2_prime;
        let bar_h_prime = if c_prime_product == 0.0 {
            h_prime_sum
        } else if (h1_prime - h2_prime).abs() <= deg180 {
            h_prime_sum / 2.0
        } else if h_prime_sum < deg360 {
            (h_prime_sum + deg360) / 2.0
        } else {
            (h_prime_sum - deg360) / 2.0
        };

        let t = 1.0 - 0.17 * (bar_h_prime - deg_to_rad(30.0)).cos()
            + 0.24 * (2.0 * bar_h_prime).cos()
            + 0.32 * (3.0 * bar_h_prime + deg_to_rad(6.0)).cos()
            - 0.20 * (4.0 * bar_h_prime - deg_to_rad(63.0)).cos();
        let delta_theta = deg_to_rad(30.0)
            * (-((bar_h_prime - deg_to_rad(275.0)) / deg_to_rad(25.0)).powi(2)).exp();
        let bar_c_prime7 = bar_c_prime.powi(7);
        let r_c = 2.0 * (bar_c_prime7 / (bar_c_prime7 + POW25_TO_7)).sqrt();
        let bar_l_minus_50_sq = (bar_l_prime - 50.0).powi(2);
        let s_l = 1.0 + (0.015 * bar_l_minus_50_sq) / (20.0 + bar_l_minus_50_sq).sqrt();
        let s_c = 1.0 + 0.045 * bar_c_prime;
        let s_h = 1.0 + 0.015 * bar_c_prime * t;
        let r_t = -(2.0 * delta_theta).sin() * r_c;

        let l_term = delta_l_prime / (k_l * s_l);
        let c_term = delta_c_prime / (k_c * s_c);
        let h_term = delta_big_h_prime / (k_h * s_h);

        (l_term * l_term + c_term * c_term + h_term * h_term + r_t * c_term * h_term).sqrt()
    }
}

impl From<Rgb> for Lab {
    /// Convert an sRGB color (0.0..=255.0 channels) to CIE L*a*b*.
    ///
    /// Uses the sRGB primaries with a D65 white of
    /// `(95.0489, 100.0, 108.8840)`.
    ///
    /// # Example
    ///
    /// ```
    /// use color_swap::{Lab, Rgb};
    ///
    /// let white = Lab::from(Rgb::from_u8(255, 255, 255));
    /// assert!((white.l - 100.0).abs() < 0.01);
    /// ```
    fn from(rgb: Rgb) -> Self {
        let r = srgb_to_linear(rgb.r / 255.0) * 100.0;
        let g = srgb_to_linear(rgb.g / 255.0) * 100.0;
        let b = srgb_to_linear(rgb.b / 255.0) * 100.0;

        let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
        let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
        let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

        let fx = lab_f(x / REF_X);
        let fy = lab_f(y / REF_Y);
        let fz = lab_f(z / REF_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}
