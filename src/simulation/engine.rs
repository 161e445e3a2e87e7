//! Frame loops driving each effect.
//!
//! Every run renders into one [`Animation`]: frame 0 is the starting state
//! and each later frame is drawn after that frame's update steps. Updates
//! are strictly sequential; later particles see where earlier ones moved.

use rand::Rng;

use super::debris::Debris;
use super::dust::{DriftWindow, Dust};
use super::granular::{self, Particle};
use super::occupancy::Occupancy;
use crate::error::EffectError;
use crate::models::ParticlesConfig;
use crate::rendering::{Animation, Canvas, Frame, ALPHA_THRESHOLD};

/// Pour particles in from the top edge on top of `source`.
///
/// Output frames start as copies of `source`. Particles settle against the
/// image's opaque pixels and against each other.
pub fn run_particles<B, R>(
    source: &Frame<B>,
    config: &ParticlesConfig,
    rng: &mut R,
) -> Result<Animation, EffectError>
where
    B: AsRef<[u8]>,
    R: Rng + ?Sized,
{
    let mut animation = Animation::repeat(source, config.frames)?;
    let mut canvas = source.to_canvas();
    let window = config.spawn.clip(source.shape().cols);
    let material = config.material;

    tracing::debug!(
        frames = config.frames,
        material = %material,
        window_start = window.start,
        window_end = window.end,
        "Starting particle run"
    );

    let mut particles: Vec<Particle> = Vec::new();
    let mut sampled = Vec::with_capacity(config.new_particles);

    for index in 1..config.frames {
        for _ in 0..config.skip * 2 {
            granular::sample_columns(rng, window.len(), config.new_particles, &mut sampled);
            for &offset in &sampled {
                let col = window.start + offset;
                if canvas.alpha(0, col) == Some(0) {
                    particles.push(Particle {
                        row: 0,
                        col,
                        tone: material.tone(rng),
                    });
                }
            }
            for particle in particles.iter_mut() {
                granular::update(material, particle, &mut canvas);
            }
        }

        if let Some(mut frame) = animation.frame_mut(index) {
            for particle in &particles {
                granular::draw(material, particle, &mut frame, u8::MAX);
            }
        }
        tracing::trace!(frame = index, particles = particles.len(), "Frame drawn");
    }

    tracing::debug!(particles = particles.len(), "Particle run finished");
    Ok(animation)
}

/// Blow every opaque pixel of `source` upward and let it rain down.
///
/// Each pixel with alpha above the threshold becomes debris with
/// probability `percent / 100`. Output frames start transparent.
pub fn run_debris<B, R>(
    source: &Frame<B>,
    frames: usize,
    percent: u32,
    rng: &mut R,
) -> Result<Animation, EffectError>
where
    B: AsRef<[u8]>,
    R: Rng + ?Sized,
{
    let shape = source.shape();
    let mut animation = Animation::blank(shape, frames)?;

    let mut debris = Vec::new();
    for (row, col, px) in source.pixels() {
        if px[3] > ALPHA_THRESHOLD && rng.gen_range(0..100) < percent {
            debris.push(Debris::launched(rng, row, col, px));
        }
    }
    tracing::debug!(frames, percent, debris = debris.len(), "Starting debris run");

    let mut canvas = Canvas::blank(shape);
    let mut occupancy = Occupancy::new(shape.rows, shape.cols);
    draw_debris(&mut animation, 0, &debris);

    for index in 1..frames {
        for piece in debris.iter_mut() {
            if !piece.active {
                piece.update(&mut canvas, &mut occupancy);
                piece.update(&mut canvas, &mut occupancy);
            }
        }
        for piece in debris.iter_mut() {
            if piece.active {
                piece.update(&mut canvas, &mut occupancy);
            }
        }
        draw_debris(&mut animation, index, &debris);
    }

    let settled = debris.iter().filter(|d| !d.active).count();
    tracing::debug!(settled, settle_count = occupancy.total(), "Debris run finished");
    Ok(animation)
}

/// Let `source` collapse into a heap.
///
/// Every opaque pixel starts as settled debris. Seeds are taken from the
/// bottom row upward, pairing the outermost columns first so the edges
/// give way before the middle.
pub fn run_crumble<B>(source: &Frame<B>, frames: usize) -> Result<Animation, EffectError>
where
    B: AsRef<[u8]>,
{
    let shape = source.shape();
    let mut animation = Animation::blank(shape, frames)?;

    let mut debris = Vec::new();
    let mut seed = |row: usize, col: usize| {
        if let Some(px) = source.pixel(row, col) {
            if px[3] > ALPHA_THRESHOLD {
                debris.push(Debris::settled(row, col, px));
            }
        }
    };
    for row in (0..shape.rows).rev() {
        for col in 0..shape.cols / 2 {
            seed(row, col);
            seed(row, shape.cols - col - 1);
        }
        if shape.cols % 2 == 1 {
            seed(row, shape.cols / 2);
        }
    }
    tracing::debug!(frames, debris = debris.len(), "Starting crumble run");

    let mut canvas = Canvas::blank(shape);
    let mut occupancy = Occupancy::new(shape.rows, shape.cols);
    draw_debris(&mut animation, 0, &debris);

    for index in 1..frames {
        for piece in debris.iter_mut() {
            piece.update(&mut canvas, &mut occupancy);
            piece.update(&mut canvas, &mut occupancy);
        }
        draw_debris(&mut animation, index, &debris);
    }

    Ok(animation)
}

fn draw_debris(animation: &mut Animation, index: usize, debris: &[Debris]) {
    if let Some(mut frame) = animation.frame_mut(index) {
        for piece in debris {
            piece.draw(&mut frame, u8::MAX);
        }
    }
}

/// Disintegrate `source` into dust drifting off to the right.
///
/// At most `max_dust` motes are seeded, in row-major order. Output frames
/// start transparent.
pub fn run_dust<B, R>(
    source: &Frame<B>,
    frames: usize,
    max_dust: usize,
    rng: &mut R,
) -> Result<Animation, EffectError>
where
    B: AsRef<[u8]>,
    R: Rng + ?Sized,
{
    let shape = source.shape();
    let mut animation = Animation::blank(shape, frames)?;

    let mut dust: Vec<Dust> = source
        .pixels()
        .filter(|(_, _, px)| px[3] > ALPHA_THRESHOLD)
        .take(max_dust)
        .map(|(row, col, px)| Dust::new(row, col, px))
        .collect();
    let mut window = DriftWindow::new(shape.cols);
    tracing::debug!(frames, motes = dust.len(), "Starting dust run");

    draw_dust(&mut animation, 0, &dust);
    for index in 1..frames {
        for mote in dust.iter_mut() {
            mote.update(rng, &window, shape.rows);
        }
        draw_dust(&mut animation, index, &dust);
        window.slide();
    }

    let drifting = dust.iter().filter(|d| d.active).count();
    tracing::debug!(drifting, "Dust run finished");
    Ok(animation)
}

fn draw_dust(animation: &mut Animation, index: usize, dust: &[Dust]) {
    if let Some(mut frame) = animation.frame_mut(index) {
        for mote in dust {
            mote.draw(&mut frame);
        }
    }
}
