use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("Buffer too small: {len} bytes, stride addressing needs {needed}")]
    BufferTooSmall { len: usize, needed: usize },

    #[error("Unsupported channel count: {0} (RGBA needs at least 4)")]
    UnsupportedChannels(usize),

    #[error("Empty image: {rows}x{cols}")]
    EmptyImage { rows: usize, cols: usize },

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Frame count must be at least 1")]
    ZeroFrames,

    #[error("Recolor error: {0}")]
    Recolor(#[from] color_swap::RecolorError),
}

impl From<color_swap::PaletteError> for EffectError {
    fn from(e: color_swap::PaletteError) -> Self {
        EffectError::Recolor(e.into())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum RawError {
    #[error("Failed to access raw file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode sidecar: {0}")]
    Sidecar(#[from] serde_json::Error),

    #[error("Raw image holds {len} bytes, {rows}x{cols} RGBA needs {needed}")]
    SizeMismatch {
        len: usize,
        rows: usize,
        cols: usize,
        needed: usize,
    },

    #[error(transparent)]
    Effect(#[from] EffectError),
}
