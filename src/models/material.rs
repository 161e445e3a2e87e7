use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EffectError;

/// Granular or liquid material poured by the particle effect.
///
/// The numeric selectors `0..=3` map to salt, pepper, liquid and piss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Salt,
    Pepper,
    Liquid,
    Piss,
}

/// (tone, weight) pairs
const SALT_TONES: [(u8, u32); 4] = [(255, 5), (220, 3), (180, 1), (140, 1)];
const PEPPER_TONES: [(u8, u32); 4] = [(20, 2), (40, 3), (80, 3), (100, 2)];

const LIQUID_TONE: u8 = 255;
const FALLBACK_TONE: u8 = 127;
const PISS_RGB: [u8; 3] = [222, 234, 20];

fn weighted_tone<R: Rng + ?Sized>(rng: &mut R, tones: &[(u8, u32)]) -> u8 {
    let total: u32 = tones.iter().map(|&(_, weight)| weight).sum();
    let mut pick = rng.gen_range(0..total);
    for &(tone, weight) in tones {
        if pick < weight {
            return tone;
        }
        pick -= weight;
    }
    FALLBACK_TONE
}

impl Material {
    /// Draw the tone byte a newly spawned particle carries.
    pub fn tone<R: Rng + ?Sized>(self, rng: &mut R) -> u8 {
        match self {
            Material::Salt => weighted_tone(rng, &SALT_TONES),
            Material::Pepper => weighted_tone(rng, &PEPPER_TONES),
            Material::Liquid => LIQUID_TONE,
            Material::Piss => FALLBACK_TONE,
        }
    }

    /// RGBA written for a particle of this material. `fill` becomes the
    /// alpha; `0` erases.
    pub fn paint(self, tone: u8, fill: u8) -> [u8; 4] {
        match self {
            Material::Salt | Material::Pepper => {
                let c = if fill > 0 { tone } else { 0 };
                [c, c, c, fill]
            }
            Material::Liquid => [0, tone / 3, tone, fill],
            Material::Piss => [PISS_RGB[0], PISS_RGB[1], PISS_RGB[2], fill],
        }
    }

    /// Whether the material spreads sideways like a liquid.
    pub fn flows(self) -> bool {
        matches!(self, Material::Liquid | Material::Piss)
    }
}

impl TryFrom<u32> for Material {
    type Error = EffectError;

    fn try_from(selector: u32) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Material::Salt),
            1 => Ok(Material::Pepper),
            2 => Ok(Material::Liquid),
            3 => Ok(Material::Piss),
            other => Err(EffectError::UnknownMaterial(other.to_string())),
        }
    }
}

impl FromStr for Material {
    type Err = EffectError;

    /// Accepts a lowercase name or a numeric selector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salt" | "sand" => Ok(Material::Salt),
            "pepper" => Ok(Material::Pepper),
            "liquid" | "water" => Ok(Material::Liquid),
            "piss" => Ok(Material::Piss),
            other => other
                .parse::<u32>()
                .map_err(|_| EffectError::UnknownMaterial(s.to_string()))
                .and_then(Material::try_from),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Material::Salt => "salt",
            Material::Pepper => "pepper",
            Material::Liquid => "liquid",
            Material::Piss => "piss",
        };
        f.write_str(name)
    }
}
