use serde::Deserialize;
use std::ops::Range;
use std::path::Path;

use super::material::Material;
use crate::error::ConfigError;

/// Effect job configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct JobConfig {
    /// Seed for every random draw; a fresh one is chosen when absent
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub particles: ParticlesConfig,

    #[serde(default)]
    pub debris: DebrisConfig,

    #[serde(default)]
    pub dust: DustConfig,

    #[serde(default)]
    pub crumble: CrumbleConfig,

    #[serde(default)]
    pub recolor: RecolorConfig,
}

/// Pouring salt, pepper or liquid in from the top edge
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ParticlesConfig {
    #[serde(default = "default_particle_frames")]
    pub frames: usize,

    /// Columns sampled for new particles per sub-step
    #[serde(default = "default_new_particles")]
    pub new_particles: usize,

    /// Sub-step pairs per output frame
    #[serde(default = "default_skip")]
    pub skip: usize,

    #[serde(default)]
    pub material: Material,

    #[serde(default)]
    pub spawn: SpawnWindow,
}

fn default_particle_frames() -> usize {
    400
}

fn default_new_particles() -> usize {
    12
}

fn default_skip() -> usize {
    2
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            frames: default_particle_frames(),
            new_particles: default_new_particles(),
            skip: default_skip(),
            material: Material::default(),
            spawn: SpawnWindow::default(),
        }
    }
}

/// Top-row columns new particles may appear in
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpawnWindow {
    #[serde(default = "default_spawn_start")]
    pub start: usize,

    #[serde(default = "default_spawn_width")]
    pub width: usize,
}

fn default_spawn_start() -> usize {
    35
}

fn default_spawn_width() -> usize {
    60
}

impl Default for SpawnWindow {
    fn default() -> Self {
        Self {
            start: default_spawn_start(),
            width: default_spawn_width(),
        }
    }
}

impl SpawnWindow {
    /// Column range of the window clipped to an image `cols` wide.
    pub fn clip(&self, cols: usize) -> Range<usize> {
        let start = self.start.min(cols);
        let end = self.start.saturating_add(self.width).min(cols);
        start..end
    }
}

/// Exploding the image into debris that flies up and rains down
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebrisConfig {
    #[serde(default = "default_debris_frames")]
    pub frames: usize,

    /// Share of opaque pixels (0-100) that become debris
    #[serde(default = "default_percent")]
    pub percent: u32,
}

fn default_debris_frames() -> usize {
    75
}

fn default_percent() -> u32 {
    100
}

impl Default for DebrisConfig {
    fn default() -> Self {
        Self {
            frames: default_debris_frames(),
            percent: default_percent(),
        }
    }
}

/// Disintegrating the image into drifting dust
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DustConfig {
    /// Derived from the padded width when absent
    #[serde(default)]
    pub frames: Option<usize>,

    /// Defaults to the unpadded pixel count
    #[serde(default)]
    pub max_dust: Option<usize>,
}

/// Collapsing the image into a heap
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CrumbleConfig {
    /// Derived from the padded size when absent
    #[serde(default)]
    pub frames: Option<usize>,
}

/// Where substitute colors come from
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecolorMode {
    #[default]
    Random,
    Palette,
}

/// Perceptual recoloring
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RecolorConfig {
    #[serde(default)]
    pub mode: RecolorMode,

    /// CIEDE2000 distance below which two colors share a substitute
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,

    /// Substitute colors as hex strings, used in palette mode
    #[serde(default)]
    pub palette: Vec<String>,
}

fn default_max_distance() -> f64 {
    16.0
}

impl Default for RecolorConfig {
    fn default() -> Self {
        Self {
            mode: RecolorMode::default(),
            max_distance: default_max_distance(),
            palette: Vec::new(),
        }
    }
}

impl JobConfig {
    /// Load a job from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            seed = ?config.seed,
            material = %config.particles.material,
            "Loaded job configuration"
        );
        Ok(config)
    }

    /// Parse a job from YAML text; an empty document yields the defaults
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = JobConfig::default();

        assert_eq!(config.seed, None);
        assert_eq!(config.particles.frames, 400);
        assert_eq!(config.particles.new_particles, 12);
        assert_eq!(config.particles.skip, 2);
        assert_eq!(config.particles.material, Material::Salt);
        assert_eq!(config.particles.spawn, SpawnWindow { start: 35, width: 60 });
        assert_eq!(config.debris.frames, 75);
        assert_eq!(config.debris.percent, 100);
        assert_eq!(config.dust.frames, None);
        assert_eq!(config.crumble.frames, None);
        assert_eq!(config.recolor.mode, RecolorMode::Random);
        assert_eq!(config.recolor.max_distance, 16.0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r##"
seed: 99
particles:
  material: pepper
  skip: 1
debris:
  percent: 40
recolor:
  mode: palette
  palette: ["#FF0000", "#00FF00"]
"##;
        let config = JobConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.particles.material, Material::Pepper);
        assert_eq!(config.particles.skip, 1);
        assert_eq!(config.particles.frames, 400);
        assert_eq!(config.debris.percent, 40);
        assert_eq!(config.debris.frames, 75);
        assert_eq!(config.recolor.mode, RecolorMode::Palette);
        assert_eq!(config.recolor.palette, vec!["#FF0000", "#00FF00"]);
        assert_eq!(config.recolor.max_distance, 16.0);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(JobConfig::from_yaml("  \n").unwrap(), JobConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = JobConfig::from_yaml("particles: [1, 2");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = JobConfig::from_yaml("particles:\n  material: gravel\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dust:\n  frames: 12\ncrumble:\n  frames: 7").unwrap();

        let config = JobConfig::load(file.path()).unwrap();
        assert_eq!(config.dust.frames, Some(12));
        assert_eq!(config.crumble.frames, Some(7));
    }

    #[test]
    fn test_load_missing_file() {
        let result = JobConfig::load(Path::new("/nonexistent/job.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_spawn_window_clip() {
        let window = SpawnWindow::default();
        assert_eq!(window.clip(200), 35..95);
        assert_eq!(window.clip(50), 35..50);
        assert_eq!(window.clip(20), 20..20);
        assert!(window.clip(20).is_empty());
    }
}
