pub mod config;
pub mod material;

pub use config::{
    CrumbleConfig, DebrisConfig, DustConfig, JobConfig, ParticlesConfig, RecolorConfig,
    RecolorMode, SpawnWindow,
};
pub use material::Material;
