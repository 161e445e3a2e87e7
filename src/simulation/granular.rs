//! Grid-snapped sand and liquid particles.
//!
//! Particles live on a scratch canvas: they read neighbouring alpha to
//! decide where to move and write themselves back so later particles see
//! them. A cell counts as open when its alpha is below
//! [`ALPHA_THRESHOLD`](crate::rendering::ALPHA_THRESHOLD); cells beside the
//! image count as filled.

use rand::Rng;

use crate::models::Material;
use crate::rendering::Frame;

/// Sideways probe distances on the row below a blocked liquid particle.
const LIQUID_REACH_BELOW: usize = 4;
/// Sideways probe distances on the particle's own row.
const LIQUID_REACH_LEVEL: usize = 3;

/// A particle at a grid cell carrying its tone byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub row: usize,
    pub col: usize,
    pub tone: u8,
}

/// Pick `k` distinct values from `0..len` by reservoir sampling.
///
/// When `k >= len` every value is returned in order.
pub fn sample_columns<R: Rng + ?Sized>(rng: &mut R, len: usize, k: usize, out: &mut Vec<usize>) {
    out.clear();
    out.extend(0..k.min(len));
    for i in k..len {
        let j = rng.gen_range(0..=i);
        if j < k {
            out[j] = i;
        }
    }
}

/// Where a grain at `(row, col)` moves next, or `None` if it stays.
///
/// Straight down if open, else down-right, else down-left. A grain on the
/// bottom row or with all three cells below filled stays.
pub fn granular_target<B: AsRef<[u8]>>(
    canvas: &Frame<B>,
    row: usize,
    col: usize,
) -> Option<(usize, usize)> {
    let below = row + 1;
    if below >= canvas.shape().rows {
        return None;
    }
    if canvas.is_open(below, col) {
        return Some((below, col));
    }
    if canvas.is_open(below, col + 1) {
        return Some((below, col + 1));
    }
    match col.checked_sub(1) {
        Some(left) if canvas.is_open(below, left) => Some((below, left)),
        _ => None,
    }
}

/// Nearest open cell within `reach` of `col` on `row`, right before left
/// at each distance.
fn sideways<B: AsRef<[u8]>>(
    canvas: &Frame<B>,
    row: usize,
    col: usize,
    reach: usize,
) -> Option<(usize, usize)> {
    (1..=reach).find_map(|k| {
        if canvas.is_open(row, col + k) {
            Some((row, col + k))
        } else {
            col.checked_sub(k)
                .filter(|&left| canvas.is_open(row, left))
                .map(|left| (row, left))
        }
    })
}

/// Where a liquid drop at `(row, col)` moves next.
///
/// Returns `None` on the bottom row. Otherwise the drop falls if it can,
/// then spreads up to four cells sideways on the row below, then up to
/// three cells on its own row; a drop with nowhere to go targets its own
/// cell.
pub fn liquid_target<B: AsRef<[u8]>>(
    canvas: &Frame<B>,
    row: usize,
    col: usize,
) -> Option<(usize, usize)> {
    let below = row + 1;
    if below >= canvas.shape().rows {
        return None;
    }
    if canvas.is_open(below, col) {
        return Some((below, col));
    }
    sideways(canvas, below, col, LIQUID_REACH_BELOW)
        .or_else(|| sideways(canvas, row, col, LIQUID_REACH_LEVEL))
        .or(Some((row, col)))
}

/// Advance one particle on the scratch canvas.
pub fn update<B>(material: Material, particle: &mut Particle, canvas: &mut Frame<B>)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let target = if material.flows() {
        liquid_target(canvas, particle.row, particle.col)
    } else {
        granular_target(canvas, particle.row, particle.col)
    };
    let Some((row, col)) = target else {
        return;
    };
    draw(material, particle, canvas, 0);
    particle.row = row;
    particle.col = col;
    draw(material, particle, canvas, u8::MAX);
}

/// Paint a particle; `fill` is the alpha written, `0` erases.
pub fn draw<B>(material: Material, particle: &Particle, frame: &mut Frame<B>, fill: u8)
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    frame.put(particle.row, particle.col, material.paint(particle.tone, fill));
}
