use super::{ArtifactKind, ArtifactSink};
use crate::error::PipelineError;
use anyhow::Result;
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

/// Destination directories per artifact kind
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub icon_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub artifact_dir: PathBuf,
}

impl OutputLayout {
    /// Everything in one directory
    pub fn single<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            icon_dir: dir.clone(),
            assets_dir: dir.clone(),
            artifact_dir: dir,
        }
    }

    pub fn dir_for(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Diagnostic => &self.artifact_dir,
            ArtifactKind::SizeVariant => &self.icon_dir,
            ArtifactKind::NamedIcon => &self.assets_dir,
        }
    }

    pub fn dirs(&self) -> [&Path; 3] {
        [
            self.icon_dir.as_path(),
            self.assets_dir.as_path(),
            self.artifact_dir.as_path(),
        ]
    }
}

/// Writes PNG files into the directories of an [`OutputLayout`]
///
/// Directories are expected to exist; a missing one fails the write.
pub struct PngDirectory {
    layout: OutputLayout,
}

impl PngDirectory {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }
}

impl ArtifactSink for PngDirectory {
    fn write_image(
        &mut self,
        kind: ArtifactKind,
        file_name: &str,
        image: &RgbaImage,
    ) -> Result<PathBuf> {
        let path = self.layout.dir_for(kind).join(file_name);

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| PipelineError::Write(path.clone(), e))?;

        tracing::info!("Generated: {}", path.display());
        Ok(path)
    }
}
