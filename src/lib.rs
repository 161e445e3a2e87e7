//! Grainfall - particle effects and perceptual recoloring for RGBA frames
//!
//! Pours sand and liquid over images, explodes, crumbles and disintegrates
//! them into animations, and recolors frames through a shared color table.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
pub mod simulation;
