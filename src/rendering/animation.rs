//! Multi-frame output buffer.

use serde::{Deserialize, Serialize};

use super::frame::{Frame, Shape};
use crate::error::EffectError;

/// Metadata written next to raw frame bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationInfo {
    pub frames: usize,
    pub rows: usize,
    pub cols: usize,
    pub channels: usize,
}

/// `frames x rows x cols x channels` bytes in one allocation.
///
/// Frame `i` starts at byte `i * rows * cols * channels` and is tightly
/// packed, so each frame is addressed through a [`Frame`] view with the
/// packed stride and that offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    shape: Shape,
    frames: usize,
    data: Vec<u8>,
}

impl Animation {
    /// `frames` fully transparent frames.
    pub fn blank(shape: Shape, frames: usize) -> Result<Self, EffectError> {
        if frames == 0 {
            return Err(EffectError::ZeroFrames);
        }
        Ok(Self {
            shape,
            frames,
            data: vec![0; shape.frame_len() * frames],
        })
    }

    /// `frames` copies of `source`.
    pub fn repeat<B: AsRef<[u8]>>(source: &Frame<B>, frames: usize) -> Result<Self, EffectError> {
        let mut animation = Self::blank(source.shape(), frames)?;
        for index in 0..frames {
            if let Some(mut frame) = animation.frame_mut(index) {
                frame.copy_from(source, 0, 0);
            }
        }
        Ok(animation)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Read view of frame `index`.
    pub fn frame(&self, index: usize) -> Option<Frame<&[u8]>> {
        (index < self.frames).then(|| {
            Frame::from_parts(
                &self.data[..],
                self.shape,
                self.shape.packed_stride(),
                index * self.shape.frame_len(),
            )
        })
    }

    /// Write view of frame `index`.
    pub fn frame_mut(&mut self, index: usize) -> Option<Frame<&mut [u8]>> {
        if index >= self.frames {
            return None;
        }
        let offset = index * self.shape.frame_len();
        Some(Frame::from_parts(
            &mut self.data[..],
            self.shape,
            self.shape.packed_stride(),
            offset,
        ))
    }

    /// Raw bytes of frame `index`.
    pub fn frame_bytes(&self, index: usize) -> Option<&[u8]> {
        let len = self.shape.frame_len();
        self.data.get(index * len..(index + 1) * len)
    }

    pub fn frame_bytes_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        let len = self.shape.frame_len();
        self.data.get_mut(index * len..(index + 1) * len)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn info(&self) -> AnimationInfo {
        AnimationInfo {
            frames: self.frames,
            rows: self.shape.rows,
            cols: self.shape.cols,
            channels: self.shape.channels,
        }
    }
}
