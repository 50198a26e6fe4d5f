mod icons;
mod png_dir;

pub use icons::{resample, GeneratedIcon, IconSizeGenerator};
pub use png_dir::{OutputLayout, PngDirectory};

use anyhow::Result;
use image::RgbaImage;
use std::path::PathBuf;

/// What an emitted image is for; sinks may route kinds to different places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Intermediate images kept for inspection
    Diagnostic,
    /// Numeric size series `{base}_{size}.png`
    SizeVariant,
    /// Fixed-name derivatives (main and window icon)
    NamedIcon,
}

/// Trait for output destinations
pub trait ArtifactSink {
    /// Persist one image under `file_name`, returning where it went
    fn write_image(
        &mut self,
        kind: ArtifactKind,
        file_name: &str,
        image: &RgbaImage,
    ) -> Result<PathBuf>;
}
