pub mod effects;

pub use effects::{
    crumble_frames, crumble_padding, dust_frames, dust_padding, recolor_animation, Effect,
    EffectPipeline,
};
