pub mod debris;
pub mod dust;
pub mod engine;
pub mod granular;
pub mod occupancy;

pub use debris::Debris;
pub use dust::{DriftWindow, Dust};
pub use engine::{run_crumble, run_debris, run_dust, run_particles};
pub use granular::Particle;
pub use occupancy::Occupancy;
