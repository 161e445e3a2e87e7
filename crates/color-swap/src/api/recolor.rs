//! Recolorer session -- the primary entry point for the crate.
//!
//! A [`Recolorer`] owns the [`ColorTable`] of colors seen so far. Feeding
//! several buffers (for example the frames of an animation) through one
//! session keeps every source color mapped to the same substitute.

use crate::color::{ciede2000, shift_color, Rgb};
use crate::palette::Palette;
use crate::table::ColorTable;

use super::error::RecolorError;

/// Pixels whose channel sum is at or below this value are treated as
/// background by [`Recolorer::random_colors`] and copied through.
pub const RANDOM_BACKGROUND_SUM: f64 = 5.0;

/// Background threshold for [`Recolorer::replace_colors`]: only pure black
/// is copied through.
pub const PALETTE_BACKGROUND_SUM: f64 = 0.0;

/// Recoloring session over a persistent color table.
///
/// Input is a flat sequence of RGB triples with channels on the 0.0..=255.0
/// scale; output is the matching byte sequence. Each non-background pixel
/// is matched against the table by CIEDE2000 distance. A pixel closer than
/// `max_distance` to a registered color reuses that color's substitute; any
/// other pixel registers a new color with a fresh substitute.
///
/// # Example
///
/// ```
/// use color_swap::{Palette, Recolorer};
///
/// let mut recolorer = Recolorer::new();
/// let mut palette = Palette::from_hex(&["#0000FF", "#00FF00"]).unwrap();
///
/// let input = [255.0, 0.0, 0.0, 0.0, 0.0, 0.0, 255.0, 0.0, 0.0];
/// let mut output = [0u8; 9];
/// recolorer
///     .replace_colors(&input, 10.0, &mut output, &mut palette)
///     .unwrap();
///
/// // Both red pixels share one substitute, black passes through.
/// assert_eq!(output, [0, 0, 255, 0, 0, 0, 0, 0, 255]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recolorer {
    table: ColorTable,
}

impl Recolorer {
    /// Create a session with an empty color table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from an existing table.
    pub fn with_table(table: ColorTable) -> Self {
        Self { table }
    }

    /// The colors registered so far.
    #[inline]
    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    /// Consume the session and hand back its table.
    pub fn into_table(self) -> ColorTable {
        self.table
    }

    /// Recolor `input` into `output`, minting random substitutes.
    ///
    /// `random` is called once per newly registered color and must return
    /// the substitute bytes. Pixels with a channel sum of at most
    /// [`RANDOM_BACKGROUND_SUM`] are copied through unchanged.
    ///
    /// # Errors
    ///
    /// - [`RecolorError::InvalidLength`] if `input.len()` is not a multiple
    ///   of 3; `output` is left untouched
    /// - [`RecolorError::OutputTooSmall`] if `output` is shorter than `input`
    /// - [`RecolorError::OutOfMemory`] if the table could not grow; the
    ///   table is empty afterwards
    pub fn random_colors<F>(
        &mut self,
        input: &[f64],
        max_distance: f64,
        output: &mut [u8],
        mut random: F,
    ) -> Result<(), RecolorError>
    where
        F: FnMut() -> [u8; 3],
    {
        check_buffers(input, output)?;

        for (pixel, out) in input.chunks_exact(3).zip(output.chunks_exact_mut(3)) {
            let color = Rgb::new(pixel[0], pixel[1], pixel[2]);
            if color.channel_sum() <= RANDOM_BACKGROUND_SUM {
                out.copy_from_slice(&color.to_bytes());
                continue;
            }

            let matched = self
                .table
                .find_by(max_distance, |mapping| ciede2000(color, mapping.original));
            let substitute = match matched {
                Some(index) => self.table.entries()[index].substitute,
                None => {
                    let substitute = random();
                    self.table.insert(color, substitute)?;
                    substitute
                }
            };
            out.copy_from_slice(&substitute);
        }
        Ok(())
    }

    /// Recolor `input` into `output`, drawing substitutes from `palette`.
    ///
    /// A newly registered color takes the next palette entry (the cursor
    /// wraps and persists in `palette` between calls). A matched pixel gets
    /// the stored substitute shifted by how the pixel differs from the
    /// registered original (see [`shift_color`]), so shading in the source
    /// carries over to the substitute. Pure black is copied through.
    ///
    /// # Errors
    ///
    /// Same as [`random_colors`](Self::random_colors).
    pub fn replace_colors(
        &mut self,
        input: &[f64],
        max_distance: f64,
        output: &mut [u8],
        palette: &mut Palette,
    ) -> Result<(), RecolorError> {
        check_buffers(input, output)?;

        for (pixel, out) in input.chunks_exact(3).zip(output.chunks_exact_mut(3)) {
            let color = Rgb::new(pixel[0], pixel[1], pixel[2]);
            if color.channel_sum() <= PALETTE_BACKGROUND_SUM {
                out.copy_from_slice(&color.to_bytes());
                continue;
            }

            let matched = self
                .table
                .find_by(max_distance, |mapping| ciede2000(mapping.original, color));
            let bytes = match matched {
                Some(index) => {
                    let mapping = self.table.entries()[index];
                    shift_color(mapping.original, color, Rgb::from(mapping.substitute)).to_bytes()
                }
                None => {
                    let substitute = palette.next_color();
                    self.table.insert(color, substitute)?;
                    substitute
                }
            };
            out.copy_from_slice(&bytes);
        }
        Ok(())
    }
}

fn check_buffers(input: &[f64], output: &[u8]) -> Result<(), RecolorError> {
    if input.len() % 3 != 0 {
        return Err(RecolorError::InvalidLength { len: input.len() });
    }
    if output.len() < input.len() {
        return Err(RecolorError::OutputTooSmall {
            needed: input.len(),
            len: output.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::GROWTH_INCREMENT;

    /// Deterministic substitute source: 1,1,1 then 2,2,2 and so on.
    fn counter() -> impl FnMut() -> [u8; 3] {
        let mut next = 0u8;
        move || {
            next = next.wrapping_add(1);
            [next, next, next]
        }
    }

    #[test]
    fn test_invalid_length_leaves_output_untouched() {
        let mut recolorer = Recolorer::new();
        let mut output = [7u8; 4];
        let err = recolorer
            .random_colors(&[1.0, 2.0, 3.0, 4.0], 10.0, &mut output, counter())
            .unwrap_err();
        assert!(matches!(err, RecolorError::InvalidLength { len: 4 }));
        assert_eq!(output, [7u8; 4]);
        assert!(recolorer.table().is_empty());
    }

    #[test]
    fn test_output_too_small() {
        let mut recolorer = Recolorer::new();
        let mut palette = Palette::new(&[[1, 2, 3]]).unwrap();
        let mut output = [0u8; 3];
        let err = recolorer
            .replace_colors(&[9.0; 6], 10.0, &mut output, &mut palette)
            .unwrap_err();
        assert!(matches!(err, RecolorError::OutputTooSmall { needed: 6, len: 3 }));
    }

    #[test]
    fn test_random_background_pass_through() {
        let mut recolorer = Recolorer::new();
        let input = [0.0, 0.0, 0.0, 1.0, 2.0, 2.0];
        let mut output = [99u8; 6];
        recolorer
            .random_colors(&input, 10.0, &mut output, counter())
            .unwrap();
        assert_eq!(output, [0, 0, 0, 1, 2, 2]);
        assert!(recolorer.table().is_empty());
    }

    #[test]
    fn test_random_substitute_is_stable() {
        let mut recolorer = Recolorer::new();
        let mut random = counter();
        let input = [200.0, 10.0, 10.0, 10.0, 200.0, 10.0, 200.0, 10.0, 10.0];
        let mut output = [0u8; 9];
        recolorer
            .random_colors(&input, 5.0, &mut output, &mut random)
            .unwrap();
        assert_eq!(output, [1, 1, 1, 2, 2, 2, 1, 1, 1]);

        // A second call sees the same table and mints nothing new.
        let mut again = [0u8; 9];
        recolorer
            .random_colors(&input, 5.0, &mut again, &mut random)
            .unwrap();
        assert_eq!(again, output);
        assert_eq!(recolorer.table().len(), 2);
    }

    #[test]
    fn test_table_growth_keeps_early_mappings() {
        let mut recolorer = Recolorer::new();
        let mut random = counter();
        let count = GROWTH_INCREMENT + 5;
        let input: Vec<f64> = (0..count)
            .flat_map(|i| {
                let level = 20.0 + 9.0 * i as f64;
                [level, level, level]
            })
            .collect();
        let mut output = vec![0u8; input.len()];
        recolorer
            .random_colors(&input, 1.0, &mut output, &mut random)
            .unwrap();
        assert_eq!(recolorer.table().len(), count);

        let mut first = [0u8; 3];
        recolorer
            .random_colors(&input[..3], 1.0, &mut first, &mut random)
            .unwrap();
        assert_eq!(first, [1, 1, 1]);
    }

    #[test]
    fn test_palette_cursor_wraps_and_persists() {
        let mut palette = Palette::new(&[[255, 0, 0], [0, 255, 0]]).unwrap();
        let mut recolorer = Recolorer::new();

        let mut output = [0u8; 9];
        recolorer
            .replace_colors(
                &[250.0, 250.0, 10.0, 10.0, 250.0, 250.0, 250.0, 10.0, 250.0],
                1.0,
                &mut output,
                &mut palette,
            )
            .unwrap();
        assert_eq!(output, [255, 0, 0, 0, 255, 0, 255, 0, 0]);
        assert_eq!(palette.cursor(), 1);

        // A fresh session continues from the palette's cursor.
        let mut other = Recolorer::new();
        let mut out = [0u8; 3];
        other
            .replace_colors(&[10.0, 10.0, 250.0], 1.0, &mut out, &mut palette)
            .unwrap();
        assert_eq!(out, [0, 255, 0]);
    }

    #[test]
    fn test_replace_exact_match_reuses_substitute() {
        let mut palette = Palette::new(&[[0, 0, 255]]).unwrap();
        let mut recolorer = Recolorer::new();
        let input = [180.0, 60.0, 20.0, 180.0, 60.0, 20.0];
        let mut output = [0u8; 6];
        recolorer
            .replace_colors(&input, 10.0, &mut output, &mut palette)
            .unwrap();
        assert_eq!(output, [0, 0, 255, 0, 0, 255]);
        assert_eq!(recolorer.table().len(), 1);
    }

    #[test]
    fn test_replace_carries_shading() {
        let mut palette = Palette::new(&[[0, 0, 255]]).unwrap();
        let mut recolorer = Recolorer::new();
        let input = [200.0, 40.0, 40.0, 150.0, 30.0, 30.0];
        let mut output = [0u8; 6];
        recolorer
            .replace_colors(&input, 50.0, &mut output, &mut palette)
            .unwrap();

        assert_eq!(&output[..3], &[0, 0, 255]);
        // The darker occurrence maps to a darker blue.
        assert_eq!(output[3], 0);
        assert_eq!(output[4], 0);
        assert!(output[5] > 150 && output[5] < 255, "blue = {}", output[5]);
        assert_eq!(recolorer.table().len(), 1);
    }

    #[test]
    fn test_replace_black_passes_through_but_near_black_does_not() {
        let mut palette = Palette::new(&[[0, 255, 0]]).unwrap();
        let mut recolorer = Recolorer::new();
        let mut output = [9u8; 6];
        recolorer
            .replace_colors(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0], 1.0, &mut output, &mut palette)
            .unwrap();
        assert_eq!(output, [0, 0, 0, 0, 255, 0]);
    }
}
