pub mod animation;
pub mod frame;
pub mod raw;

pub use animation::{Animation, AnimationInfo};
pub use frame::{Canvas, Frame, Padding, Shape, Stride, ALPHA_THRESHOLD, RGBA};
