use std::fmt;
use std::str::FromStr;

use color_swap::{Palette, Recolorer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EffectError;
use crate::models::{JobConfig, RecolorConfig, RecolorMode};
use crate::rendering::{Animation, Frame, Padding, Shape, ALPHA_THRESHOLD};
use crate::simulation;

/// The animated effects a job can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Particles,
    Debris,
    Dust,
    Crumble,
}

impl Effect {
    pub const ALL: [Effect; 4] = [
        Effect::Particles,
        Effect::Debris,
        Effect::Dust,
        Effect::Crumble,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Effect::Particles => "particles",
            Effect::Debris => "debris",
            Effect::Dust => "dust",
            Effect::Crumble => "crumble",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Effect::ALL
            .into_iter()
            .find(|effect| effect.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown effect: {s}"))
    }
}

/// Transparent margins around a dust source: a little on the left, more on
/// the right where the dust blows to, and a fifth of the height above and
/// below.
pub fn dust_padding(shape: Shape) -> Padding {
    Padding {
        top: shape.rows / 5,
        bottom: shape.rows / 5,
        left: shape.cols / 10,
        right: shape.cols / 4,
    }
}

/// Frames needed for the dust to clear a padded canvas.
pub fn dust_frames(padded: Shape) -> usize {
    (padded.cols as f64 * 0.7 + 25.0) as usize
}

/// Transparent margins around a crumble source, all derived from its height.
pub fn crumble_padding(shape: Shape) -> Padding {
    Padding {
        top: 0,
        bottom: shape.rows / 4,
        left: shape.rows / 3,
        right: shape.rows / 3,
    }
}

/// Frames needed for a padded crumble canvas to settle.
pub fn crumble_frames(padded: Shape) -> usize {
    (padded.rows as f64 / 2.0 + padded.cols as f64 / 4.0) as usize
}

/// Runs effects for one job with a fixed seed
///
/// Every run draws from a fresh generator seeded with the job seed, so the
/// same job over the same source always renders the same bytes.
pub struct EffectPipeline {
    config: JobConfig,
    seed: u64,
}

impl EffectPipeline {
    /// Take the seed from `config`, or draw one and log it so the run can
    /// be repeated.
    pub fn new(config: JobConfig) -> Self {
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::thread_rng().gen();
                tracing::info!(seed, "No seed configured, drew a fresh one");
                seed
            }
        };
        Self { config, seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Render `effect` over `source`
    pub fn run<B: AsRef<[u8]>>(
        &self,
        effect: Effect,
        source: &Frame<B>,
    ) -> Result<Animation, EffectError> {
        let shape = source.shape();
        tracing::info!(
            effect = %effect,
            rows = shape.rows,
            cols = shape.cols,
            seed = self.seed,
            "Running effect"
        );

        let animation = match effect {
            Effect::Particles => self.particles(source),
            Effect::Debris => self.debris(source),
            Effect::Dust => self.dust(source),
            Effect::Crumble => self.crumble(source),
        }?;

        let out = animation.shape();
        tracing::info!(
            effect = %effect,
            frames = animation.frame_count(),
            rows = out.rows,
            cols = out.cols,
            "Effect rendered"
        );
        Ok(animation)
    }

    /// Pour the configured material over `source`
    pub fn particles<B: AsRef<[u8]>>(&self, source: &Frame<B>) -> Result<Animation, EffectError> {
        simulation::run_particles(source, &self.config.particles, &mut self.rng())
    }

    /// Explode `source` into debris
    pub fn debris<B: AsRef<[u8]>>(&self, source: &Frame<B>) -> Result<Animation, EffectError> {
        let debris = &self.config.debris;
        simulation::run_debris(source, debris.frames, debris.percent, &mut self.rng())
    }

    /// Pad `source` and blow it away as dust
    pub fn dust<B: AsRef<[u8]>>(&self, source: &Frame<B>) -> Result<Animation, EffectError> {
        let shape = source.shape();
        let padded = source.padded(dust_padding(shape));
        let frames = self
            .config
            .dust
            .frames
            .unwrap_or_else(|| dust_frames(padded.shape()));
        let max_dust = self.config.dust.max_dust.unwrap_or(shape.rows * shape.cols);
        simulation::run_dust(&padded, frames, max_dust, &mut self.rng())
    }

    /// Pad `source` and let it crumble
    pub fn crumble<B: AsRef<[u8]>>(&self, source: &Frame<B>) -> Result<Animation, EffectError> {
        let padded = source.padded(crumble_padding(source.shape()));
        let frames = self
            .config
            .crumble
            .frames
            .unwrap_or_else(|| crumble_frames(padded.shape()));
        simulation::run_crumble(&padded, frames)
    }

    /// Recolor every frame of `animation` in place
    pub fn recolor(&self, animation: &mut Animation) -> Result<usize, EffectError> {
        recolor_animation(animation, &self.config.recolor, &mut self.rng())
    }
}

/// Recolor the visible pixels of every frame through one shared session.
///
/// Pixels with alpha below the threshold keep their bytes. Sharing the
/// session keeps a source color on the same substitute in every frame.
/// Returns the number of distinct colors registered.
pub fn recolor_animation<R: Rng + ?Sized>(
    animation: &mut Animation,
    config: &RecolorConfig,
    rng: &mut R,
) -> Result<usize, EffectError> {
    let mut palette = match config.mode {
        RecolorMode::Random => None,
        RecolorMode::Palette => {
            let hex: Vec<&str> = config.palette.iter().map(String::as_str).collect();
            Some(Palette::from_hex(&hex)?)
        }
    };
    let mut recolorer = Recolorer::new();

    for index in 0..animation.frame_count() {
        let Some(mut frame) = animation.frame_mut(index) else {
            continue;
        };
        let visible: Vec<(usize, usize, [u8; 4])> = frame
            .pixels()
            .filter(|(_, _, px)| px[3] >= ALPHA_THRESHOLD)
            .collect();
        if visible.is_empty() {
            continue;
        }

        let input: Vec<f64> = visible
            .iter()
            .flat_map(|(_, _, px)| px[..3].iter().map(|&c| f64::from(c)))
            .collect();
        let mut output = vec![0u8; input.len()];

        match palette.as_mut() {
            Some(palette) => {
                recolorer.replace_colors(&input, config.max_distance, &mut output, palette)?
            }
            None => recolorer.random_colors(&input, config.max_distance, &mut output, || {
                rng.gen::<[u8; 3]>()
            })?,
        }

        for ((row, col, px), rgb) in visible.iter().zip(output.chunks_exact(3)) {
            frame.put(*row, *col, [rgb[0], rgb[1], rgb[2], px[3]]);
        }
    }

    let colors = recolorer.table().len();
    tracing::debug!(colors, mode = ?config.mode, "Recolored animation");
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Material;
    use crate::rendering::Canvas;
    use pretty_assertions::assert_eq;

    fn seeded(seed: u64) -> JobConfig {
        JobConfig {
            seed: Some(seed),
            ..JobConfig::default()
        }
    }

    fn square(rows: usize, cols: usize, rgba: [u8; 4]) -> Canvas {
        let mut canvas = Canvas::blank(Shape::new(rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                canvas.put(row, col, rgba);
            }
        }
        canvas
    }

    #[test]
    fn test_effect_names_round_trip() {
        for effect in Effect::ALL {
            assert_eq!(effect.to_string().parse::<Effect>(), Ok(effect));
        }
        assert_eq!(" Dust ".parse::<Effect>(), Ok(Effect::Dust));
        assert!("melt".parse::<Effect>().is_err());
    }

    #[test]
    fn test_padding_and_frames() {
        let shape = Shape::new(50, 100);
        let dust = dust_padding(shape);
        assert_eq!(
            (dust.top, dust.bottom, dust.left, dust.right),
            (10, 10, 10, 25)
        );
        // 135 padded columns
        assert_eq!(dust_frames(Shape::new(70, 135)), 119);

        let crumble = crumble_padding(shape);
        assert_eq!(
            (crumble.top, crumble.bottom, crumble.left, crumble.right),
            (0, 12, 16, 16)
        );
        assert_eq!(crumble_frames(Shape::new(62, 132)), 64);
    }

    #[test]
    fn test_configured_seed_is_used() {
        let pipeline = EffectPipeline::new(seeded(1234));
        assert_eq!(pipeline.seed(), 1234);
    }

    #[test]
    fn test_same_job_same_bytes() {
        let source = square(8, 8, [10, 200, 30, 255]);
        let a = EffectPipeline::new(seeded(9))
            .run(Effect::Debris, &source)
            .unwrap();
        let b = EffectPipeline::new(seeded(9))
            .run(Effect::Debris, &source)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dust_output_is_padded() {
        let source = square(10, 20, [90, 90, 90, 255]);
        let pipeline = EffectPipeline::new(seeded(3));
        let animation = pipeline.run(Effect::Dust, &source).unwrap();

        // 2 + 10 + 2 rows, 2 + 20 + 5 columns
        assert_eq!(animation.shape(), Shape::new(14, 27));
        assert_eq!(animation.frame_count(), 43);
        let first = animation.frame(0).unwrap();
        assert_eq!(first.pixel(2, 2), Some([90, 90, 90, 255]));
        assert_eq!(first.alpha(0, 0), Some(0));
    }

    #[test]
    fn test_crumble_frames_from_config() {
        let source = square(6, 6, [90, 90, 90, 255]);
        let mut config = seeded(3);
        config.crumble.frames = Some(5);
        let animation = EffectPipeline::new(config)
            .run(Effect::Crumble, &source)
            .unwrap();
        assert_eq!(animation.frame_count(), 5);
        // 6 + 1 rows, 2 + 6 + 2 columns
        assert_eq!(animation.shape(), Shape::new(7, 10));
    }

    #[test]
    fn test_particles_use_configured_material() {
        let source = Canvas::blank(Shape::new(10, 10));
        let mut config = seeded(3);
        config.particles.frames = 6;
        config.particles.material = Material::Piss;
        config.particles.spawn.start = 0;
        let animation = EffectPipeline::new(config)
            .run(Effect::Particles, &source)
            .unwrap();

        let last = animation.frame(5).unwrap();
        let drawn: Vec<_> = last.pixels().filter(|(_, _, px)| px[3] != 0).collect();
        assert!(!drawn.is_empty());
        assert!(drawn.iter().all(|(_, _, px)| *px == [222, 234, 20, 255]));
    }

    #[test]
    fn test_recolor_keeps_colors_consistent_across_frames() {
        let mut source = square(2, 2, [200, 0, 0, 255]);
        source.put(1, 1, [0, 0, 200, 10]);
        let mut animation = Animation::repeat(&source, 3).unwrap();

        let mut config = seeded(5);
        config.recolor.mode = RecolorMode::Palette;
        config.recolor.palette = vec!["#00FF00".into(), "#0000FF".into()];
        let colors = EffectPipeline::new(config).recolor(&mut animation).unwrap();

        assert_eq!(colors, 1);
        for index in 0..3 {
            let frame = animation.frame(index).unwrap();
            assert_eq!(frame.pixel(0, 0), Some([0, 255, 0, 255]));
            assert_eq!(frame.pixel(1, 0), Some([0, 255, 0, 255]));
            // transparent pixels are left alone
            assert_eq!(frame.pixel(1, 1), Some([0, 0, 200, 10]));
        }
    }

    #[test]
    fn test_recolor_random_mode() {
        let source = square(3, 3, [120, 120, 40, 255]);
        let mut animation = Animation::repeat(&source, 2).unwrap();
        let colors = EffectPipeline::new(seeded(8))
            .recolor(&mut animation)
            .unwrap();
        assert_eq!(colors, 1);

        let first = animation.frame(0).unwrap().pixel(0, 0);
        for (_, _, px) in animation.frame(1).unwrap().pixels() {
            assert_eq!(Some(px), first);
        }
    }

    #[test]
    fn test_recolor_palette_mode_needs_colors() {
        let mut animation = Animation::repeat(&square(1, 1, [9, 9, 9, 255]), 1).unwrap();
        let mut config = seeded(1);
        config.recolor.mode = RecolorMode::Palette;
        let result = EffectPipeline::new(config).recolor(&mut animation);
        assert!(matches!(result, Err(EffectError::Recolor(_))));
    }
}
