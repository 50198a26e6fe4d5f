use super::{ArtifactKind, ArtifactSink};
use crate::config::{NamedIcon, PipelineConfig};
use anyhow::{Context, Result};
use image::{imageops, RgbaImage};
use std::path::PathBuf;

/// One emitted icon file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub path: PathBuf,
    pub size: u32,
}

/// Resamples a square master image into the icon size series
/// plus the fixed-name main and window icons
pub struct IconSizeGenerator {
    base_name: String,
    sizes: Vec<u32>,
    named: Vec<NamedIcon>,
}

impl IconSizeGenerator {
    pub fn new(base_name: impl Into<String>, config: &PipelineConfig) -> Self {
        Self {
            base_name: base_name.into(),
            sizes: config.target_sizes.clone(),
            named: vec![config.main_icon.clone(), config.window_icon.clone()],
        }
    }

    pub fn variant_name(&self, size: u32) -> String {
        format!("{}_{}.png", self.base_name, size)
    }

    /// Write every icon. Each write is independent; the first failure stops
    /// generation and leaves earlier files in place.
    pub fn generate<S>(&self, source: &RgbaImage, sink: &mut S) -> Result<Vec<GeneratedIcon>>
    where
        S: ArtifactSink + ?Sized,
    {
        let _span = tracing::debug_span!("icon_sizes").entered();

        if source.width() != source.height() {
            tracing::warn!(
                "Source is {}x{}, icons will be stretched to square",
                source.width(),
                source.height()
            );
        }

        let series = self
            .sizes
            .iter()
            .map(|&size| (ArtifactKind::SizeVariant, self.variant_name(size), size));
        let named = self
            .named
            .iter()
            .map(|n| (ArtifactKind::NamedIcon, n.file_name.clone(), n.size));

        let mut generated = Vec::with_capacity(self.sizes.len() + self.named.len());
        for (kind, file_name, size) in series.chain(named) {
            let resized = resample(source, size);
            let path = sink
                .write_image(kind, &file_name, &resized)
                .with_context(|| format!("Failed to write {}px icon {}", size, file_name))?;
            generated.push(GeneratedIcon { path, size });
        }

        Ok(generated)
    }
}

/// Lanczos resample to `size`x`size`, suitable for both up and down scaling
pub fn resample(source: &RgbaImage, size: u32) -> RgbaImage {
    if source.dimensions() == (size, size) {
        return source.clone();
    }
    imageops::resize(source, size, size, imageops::FilterType::Lanczos3)
}
