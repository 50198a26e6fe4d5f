use crate::compose::{composite, crop_to_content, soften_edges, BoundingBox};
use crate::config::PipelineConfig;
use crate::output::{resample, ArtifactKind, ArtifactSink, GeneratedIcon, IconSizeGenerator};
use crate::segmentation::BackgroundSegmenter;
use crate::source::ImageSource;
use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Per-run options that only affect naming and diagnostics
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub base_name: String,
    /// Also write the background mask as a grayscale image
    pub dump_mask: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            base_name: "app_icon".to_string(),
            dump_mask: false,
        }
    }
}

/// Summary of a completed run
#[derive(Debug)]
pub struct PipelineReport {
    pub background_pixels: usize,
    pub content_box: Option<BoundingBox>,
    /// Diagnostic artifacts in write order
    pub artifacts: Vec<PathBuf>,
    pub icons: Vec<GeneratedIcon>,
}

#[derive(Default)]
struct StageTimes {
    load: Duration,
    segment: Duration,
    compose: Duration,
    crop: Duration,
    icons: Duration,
}

/// Run source -> segment -> composite -> soften -> crop -> icons
pub fn run_pipeline<I, O>(
    source: &mut I,
    sink: &mut O,
    segmenter: &dyn BackgroundSegmenter,
    config: &PipelineConfig,
    options: &RunOptions,
) -> Result<PipelineReport>
where
    I: ImageSource + ?Sized,
    O: ArtifactSink + ?Sized,
{
    config.validate().context("Invalid pipeline configuration")?;

    let mut times = StageTimes::default();
    let mut artifacts = Vec::new();
    let base = &options.base_name;

    // Load
    let start = Instant::now();
    let image = source
        .load()
        .with_context(|| format!("Failed to load {}", source.describe()))?;
    times.load = start.elapsed();

    // Segment
    let start = Instant::now();
    let mask = segmenter.segment(&image);
    times.segment = start.elapsed();
    let background_pixels = mask.background_count();
    tracing::info!(
        "Segmenter {} marked {} of {} pixels as background",
        segmenter.name(),
        background_pixels,
        image.width() as u64 * image.height() as u64
    );

    if options.dump_mask {
        let visual = DynamicImage::ImageLuma8(mask.to_luma()).to_rgba8();
        artifacts.push(
            sink.write_image(ArtifactKind::Diagnostic, &format!("{base}_mask.png"), &visual)
                .context("Failed to write mask")?,
        );
    }

    // Composite and soften edges
    let start = Instant::now();
    let cutout = composite(&image, &mask).context("Failed to composite")?;
    drop(image);
    let softened =
        soften_edges(cutout, &mask, &config.edge).context("Failed to soften edges")?;
    times.compose = start.elapsed();

    artifacts.push(
        sink.write_image(
            ArtifactKind::Diagnostic,
            &format!("{base}_extracted.png"),
            &softened,
        )
        .context("Failed to write extracted image")?,
    );

    // Crop and center
    let start = Instant::now();
    let content_box = BoundingBox::of_content(&softened);
    let square = crop_to_content(softened, config.padding_percent);
    let master = match config.master_size {
        Some(size) => resample(&square, size),
        None => square,
    };
    times.crop = start.elapsed();
    tracing::info!("Master icon {}x{}", master.width(), master.height());

    artifacts.push(
        sink.write_image(
            ArtifactKind::Diagnostic,
            &format!("{base}_master.png"),
            &master,
        )
        .context("Failed to write master image")?,
    );

    // Icon sizes
    let start = Instant::now();
    let icons = IconSizeGenerator::new(base.as_str(), config)
        .generate(&master, sink)
        .context("Failed to generate icon sizes")?;
    times.icons = start.elapsed();

    tracing::info!(
        "Done: load={:.1}ms, segment={:.1}ms, compose={:.1}ms, crop={:.1}ms, icons={:.1}ms, files={}",
        ms(times.load),
        ms(times.segment),
        ms(times.compose),
        ms(times.crop),
        ms(times.icons),
        artifacts.len() + icons.len()
    );

    Ok(PipelineReport {
        background_pixels,
        content_box,
        artifacts,
        icons,
    })
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
