use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grainfall::models::{JobConfig, Material, RecolorMode};
use grainfall::rendering::{raw, Animation};
use grainfall::services::{Effect, EffectPipeline};

#[derive(Parser)]
#[command(name = "grainfall")]
#[command(about = "Particle effects and perceptual recoloring for raw RGBA images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pour salt, pepper or liquid over the image
    Particles {
        #[command(flatten)]
        io: IoArgs,

        /// Material: salt, pepper, liquid, piss or 0-3
        #[arg(short, long)]
        material: Option<Material>,

        /// Number of output frames
        #[arg(short, long)]
        frames: Option<usize>,
    },
    /// Explode the image into falling debris
    Debris {
        #[command(flatten)]
        io: IoArgs,

        /// Number of output frames
        #[arg(short, long)]
        frames: Option<usize>,

        /// Share of opaque pixels (0-100) that become debris
        #[arg(short, long)]
        percent: Option<u32>,
    },
    /// Blow the image away as dust
    Dust {
        #[command(flatten)]
        io: IoArgs,

        /// Number of output frames (derived from the width when omitted)
        #[arg(short, long)]
        frames: Option<usize>,
    },
    /// Collapse the image into a heap
    Crumble {
        #[command(flatten)]
        io: IoArgs,

        /// Number of output frames (derived from the size when omitted)
        #[arg(short, long)]
        frames: Option<usize>,
    },
    /// Recolor the image without animating it
    Recolor {
        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Raw RGBA input file (rows x cols x 4 bytes)
    #[arg(short, long)]
    input: PathBuf,

    /// Image height in pixels
    #[arg(long)]
    rows: usize,

    /// Image width in pixels
    #[arg(long)]
    cols: usize,

    /// Raw output file; a JSON sidecar is written next to it
    #[arg(short, long)]
    output: PathBuf,

    /// Job configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Recolor the rendered frames
    #[arg(long)]
    recolor: bool,

    /// Substitute colors as comma-separated hex (e.g. "#FF0000,#00FF00");
    /// switches recoloring to palette mode
    #[arg(long)]
    palette: Option<String>,

    /// CIEDE2000 distance below which colors share a substitute
    #[arg(long)]
    max_distance: Option<f64>,
}

impl IoArgs {
    /// Load the job file (or defaults) and apply the shared overrides.
    fn job(&self) -> anyhow::Result<JobConfig> {
        let mut config = match &self.config {
            Some(path) => JobConfig::load(path)
                .with_context(|| format!("Failed to load job {}", path.display()))?,
            None => JobConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(palette) = &self.palette {
            config.recolor.mode = RecolorMode::Palette;
            config.recolor.palette = palette
                .split(',')
                .map(|hex| hex.trim().to_string())
                .filter(|hex| !hex.is_empty())
                .collect();
        }
        if let Some(max_distance) = self.max_distance {
            config.recolor.max_distance = max_distance;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grainfall=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Particles {
            io,
            material,
            frames,
        } => {
            let mut config = io.job()?;
            if let Some(material) = material {
                config.particles.material = material;
            }
            if let Some(frames) = frames {
                config.particles.frames = frames;
            }
            run_effect(Effect::Particles, &io, config)
        }
        Commands::Debris {
            io,
            frames,
            percent,
        } => {
            let mut config = io.job()?;
            if let Some(frames) = frames {
                config.debris.frames = frames;
            }
            if let Some(percent) = percent {
                config.debris.percent = percent.min(100);
            }
            run_effect(Effect::Debris, &io, config)
        }
        Commands::Dust { io, frames } => {
            let mut config = io.job()?;
            if frames.is_some() {
                config.dust.frames = frames;
            }
            run_effect(Effect::Dust, &io, config)
        }
        Commands::Crumble { io, frames } => {
            let mut config = io.job()?;
            if frames.is_some() {
                config.crumble.frames = frames;
            }
            run_effect(Effect::Crumble, &io, config)
        }
        Commands::Recolor { io } => run_recolor(&io),
    }
}

fn run_effect(effect: Effect, io: &IoArgs, config: JobConfig) -> anyhow::Result<()> {
    let source = raw::read_frame(&io.input, io.rows, io.cols)
        .with_context(|| format!("Failed to read {}", io.input.display()))?;

    let pipeline = EffectPipeline::new(config);
    let mut animation = pipeline
        .run(effect, &source)
        .with_context(|| format!("Failed to render {effect}"))?;

    if io.recolor {
        pipeline
            .recolor(&mut animation)
            .context("Failed to recolor frames")?;
    }

    save(&io.output, &animation)
}

fn run_recolor(io: &IoArgs) -> anyhow::Result<()> {
    let source = raw::read_frame(&io.input, io.rows, io.cols)
        .with_context(|| format!("Failed to read {}", io.input.display()))?;

    let pipeline = EffectPipeline::new(io.job()?);
    let mut animation = Animation::repeat(&source, 1)?;
    let colors = pipeline
        .recolor(&mut animation)
        .context("Failed to recolor image")?;
    tracing::info!(colors, "Recolored image");

    save(&io.output, &animation)
}

fn save(output: &Path, animation: &Animation) -> anyhow::Result<()> {
    let sidecar = raw::write_animation(output, animation)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let info = animation.info();
    println!(
        "Wrote {} frames of {}x{} to {} ({})",
        info.frames,
        info.rows,
        info.cols,
        output.display(),
        sidecar.display()
    );
    Ok(())
}
