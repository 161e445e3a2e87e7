//! Raw RGBA files on disk.
//!
//! An input image is `rows * cols * 4` bytes, row-major. An animation is
//! written as its frames back to back, with a JSON sidecar next to it
//! (`<output>.json`) recording the frame count and shape.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::animation::{Animation, AnimationInfo};
use super::frame::{Canvas, Frame, Shape, RGBA};
use crate::error::RawError;

/// Read a packed RGBA image of the given size.
pub fn read_frame(path: &Path, rows: usize, cols: usize) -> Result<Canvas, RawError> {
    let bytes = std::fs::read(path)?;
    let needed = rows * cols * RGBA;
    if bytes.len() != needed {
        return Err(RawError::SizeMismatch {
            len: bytes.len(),
            rows,
            cols,
            needed,
        });
    }
    let frame = Frame::packed(bytes, Shape::new(rows, cols))?;
    tracing::debug!(path = %path.display(), rows, cols, "Read raw image");
    Ok(frame)
}

/// `<path>.json`
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".json");
    PathBuf::from(name)
}

/// Write all frames to `path` and the sidecar next to it.
///
/// Returns the sidecar path.
pub fn write_animation(path: &Path, animation: &Animation) -> Result<PathBuf, RawError> {
    std::fs::write(path, animation.as_bytes())?;
    let sidecar = sidecar_path(path);
    let info = serde_json::to_string_pretty(&animation.info())?;
    std::fs::write(&sidecar, info)?;
    tracing::debug!(
        path = %path.display(),
        bytes = animation.as_bytes().len(),
        "Wrote animation"
    );
    Ok(sidecar)
}

/// Read the sidecar written by [`write_animation`].
pub fn read_info(path: &Path) -> Result<AnimationInfo, RawError> {
    let text = std::fs::read_to_string(sidecar_path(path))?;
    Ok(serde_json::from_str(&text)?)
}
