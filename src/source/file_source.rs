use super::ImageSource;
use crate::error::PipelineError;
use anyhow::Result;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Reads a raster file from disk, converting any pixel format to RGBA8
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ImageSource for FileSource {
    fn load(&mut self) -> Result<RgbaImage> {
        tracing::info!("Reading {}", self.path.display());

        let image = image::open(&self.path)
            .map_err(|e| PipelineError::Read(self.path.clone(), e))?
            .to_rgba8();

        tracing::info!("Loaded {}x{}", image.width(), image.height());
        Ok(image)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
