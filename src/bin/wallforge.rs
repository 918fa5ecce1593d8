use std::{fs::File, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use wallforge::{
    CanvasSize, PipelineConfig, WallpaperPipeline,
    sink::{self, OutputFormat},
};

#[derive(Parser, Debug)]
#[command(name = "wallforge", version, about = "Generate procedural gradient wallpapers")]
struct Cli {
    /// Number of wallpapers to generate.
    #[arg(long, short = 'n', default_value_t = 5)]
    count: u32,

    /// Output directory (created if absent).
    #[arg(long, default_value = "wallpapers")]
    out: PathBuf,

    /// Pin every image to this palette instead of sampling one per image.
    #[arg(long)]
    palette: Option<String>,

    /// Base seed for deterministic batches. Each image derives its own RNG
    /// from seed + index. Omit for unseeded generation.
    #[arg(long)]
    seed: Option<u64>,

    /// JPEG quality (1-100). Ignored for PNG.
    #[arg(long, default_value_t = sink::DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1440)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 3200)]
    height: u32,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = FormatChoice::Jpeg)]
    format: FormatChoice,

    /// Write a JSON sidecar with each image's sampled style parameters.
    #[arg(long)]
    dump_params: bool,

    /// Generate images in parallel on the rayon pool.
    #[arg(long)]
    parallel: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Jpeg,
    Png,
}

impl From<FormatChoice> for OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Jpeg => OutputFormat::Jpeg,
            FormatChoice::Png => OutputFormat::Png,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if !(1..=100).contains(&cli.quality) {
        anyhow::bail!("--quality must be within 1-100, got {}", cli.quality);
    }

    let config = PipelineConfig {
        canvas: CanvasSize::new(cli.width, cli.height)?,
        ..PipelineConfig::default()
    };
    let pipeline = WallpaperPipeline::new(config)?;

    tracing::info!(
        count = cli.count,
        out = %cli.out.display(),
        seeded = cli.seed.is_some(),
        "generating wallpapers"
    );

    let indices: Vec<u32> = (1..=cli.count).collect();
    let failed = if cli.parallel {
        indices
            .par_iter()
            .filter(|&&i| !run_one(&pipeline, &cli, i))
            .count()
    } else {
        indices.iter().filter(|&&i| !run_one(&pipeline, &cli, i)).count()
    };

    if failed > 0 {
        anyhow::bail!("{failed} of {} wallpapers failed", cli.count);
    }
    tracing::info!(count = cli.count, "all wallpapers generated");
    Ok(())
}

/// Generates and writes one wallpaper; a failure is logged and absorbed so
/// the rest of the batch proceeds.
fn run_one(pipeline: &WallpaperPipeline, cli: &Cli, index: u32) -> bool {
    match generate_one(pipeline, cli, index) {
        Ok(path) => {
            tracing::info!(file = %path.display(), "generated");
            true
        }
        Err(err) => {
            tracing::error!(index, error = %err, "wallpaper generation failed");
            false
        }
    }
}

fn generate_one(pipeline: &WallpaperPipeline, cli: &Cli, index: u32) -> anyhow::Result<PathBuf> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(index))),
        None => StdRng::from_entropy(),
    };

    let wp = pipeline.generate_with_palette(&mut rng, index, cli.palette.as_deref())?;

    let format = OutputFormat::from(cli.format);
    let mut path = cli.out.join(&wp.filename);
    path.set_extension(format.extension());
    sink::write_image(&wp.frame, &path, format, cli.quality)?;

    if cli.dump_params {
        let sidecar = path.with_extension("json");
        let file = File::create(&sidecar)
            .with_context(|| format!("failed to create sidecar '{}'", sidecar.display()))?;
        serde_json::to_writer_pretty(file, &wp.params)
            .with_context(|| format!("failed to write sidecar '{}'", sidecar.display()))?;
    }

    Ok(path)
}
