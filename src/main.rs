mod compose;
mod config;
mod error;
mod output;
mod pipeline;
mod segmentation;
mod source;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config::PipelineConfig;
use output::{OutputLayout, PngDirectory};
use pipeline::RunOptions;
use source::FileSource;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// Loose thresholds for any flat-background image
    Generic,
    /// Thresholds tuned for the product icon
    Operational,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source image with a flat, grayish background
    input: PathBuf,

    /// Directory for the numeric icon series
    #[arg(short, long, default_value = "icons")]
    output_dir: PathBuf,

    /// Directory for the main and window icons (defaults to output dir)
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Directory for extracted/master/mask artifacts (defaults to output dir)
    #[arg(long)]
    artifact_dir: Option<PathBuf>,

    /// File name prefix for generated files
    #[arg(long, default_value = "app_icon")]
    base_name: String,

    /// Threshold preset; individual flags below override it
    #[arg(long, value_enum, default_value_t = Preset::Operational)]
    preset: Preset,

    /// Max RGB distance from a corner color to count as background
    #[arg(long)]
    tolerance: Option<f64>,

    /// Max channel spread for a background pixel
    #[arg(long)]
    grayish_tolerance: Option<u8>,

    /// Padding around the subject, percent of its larger side
    #[arg(long)]
    padding: Option<u32>,

    /// Comma separated icon sizes
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<u32>>,

    /// Size the cropped subject is resampled to before the icon series
    #[arg(long, conflicts_with = "no_master")]
    master_size: Option<u32>,

    /// Use the cropped subject as-is for the icon series
    #[arg(long)]
    no_master: bool,

    /// Also write the background mask as an image
    #[arg(long)]
    dump_mask: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        let mut config = match self.preset {
            Preset::Generic => PipelineConfig::generic(),
            Preset::Operational => PipelineConfig::operational(),
        };

        if let Some(tolerance) = self.tolerance {
            config.distance_tolerance = tolerance;
        }
        if let Some(grayish) = self.grayish_tolerance {
            config.grayish_tolerance = grayish;
        }
        if let Some(padding) = self.padding {
            config.padding_percent = padding;
        }
        if let Some(sizes) = &self.sizes {
            config.target_sizes = sizes.clone();
        }
        if self.no_master {
            config.master_size = None;
        } else if let Some(size) = self.master_size {
            config.master_size = Some(size);
        }

        config
    }

    fn layout(&self) -> OutputLayout {
        let mut layout = OutputLayout::single(&self.output_dir);
        if let Some(dir) = &self.assets_dir {
            layout.assets_dir = dir.clone();
        }
        if let Some(dir) = &self.artifact_dir {
            layout.artifact_dir = dir.clone();
        }
        layout
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = args.pipeline_config();
    config.validate().context("Invalid arguments")?;

    tracing::info!("icon-extract starting");
    tracing::info!(
        "Tolerance: distance={}, grayish={}, padding={}%",
        config.distance_tolerance,
        config.grayish_tolerance,
        config.padding_percent
    );
    tracing::info!("Sizes: {:?}", config.target_sizes);

    if !args.input.is_file() {
        anyhow::bail!("Input image not found: {}", args.input.display());
    }
    let mut source = FileSource::new(&args.input);

    let layout = args.layout();
    for dir in layout.dirs() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let segmenter = segmentation::create_default_segmenter(&config);
    let mut sink = PngDirectory::new(layout);
    let options = RunOptions {
        base_name: args.base_name.clone(),
        dump_mask: args.dump_mask,
    };

    let report = pipeline::run_pipeline(&mut source, &mut sink, segmenter.as_ref(), &config, &options)?;

    for path in &report.artifacts {
        tracing::info!("Artifact: {}", path.display());
    }
    tracing::info!(
        "Generated {} icons from {} background pixels removed",
        report.icons.len(),
        report.background_pixels
    );
    match report.content_box {
        Some(bbox) => tracing::debug!("Subject bounds: {:?}", bbox),
        None => tracing::warn!("No subject found, output is fully transparent"),
    }

    Ok(())
}
