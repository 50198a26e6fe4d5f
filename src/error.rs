use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the extraction pipeline stages
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read image `{0}`")]
    Read(PathBuf, #[source] image::ImageError),

    #[error("failed to write image `{0}`")]
    Write(PathBuf, #[source] image::ImageError),

    #[error(
        "mask is {mask_width}x{mask_height} but image is {image_width}x{image_height}"
    )]
    DimensionMismatch {
        mask_width: u32,
        mask_height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn check_dimensions(mask: (u32, u32), image: (u32, u32)) -> Result<(), Self> {
        if mask == image {
            return Ok(());
        }
        Err(Self::DimensionMismatch {
            mask_width: mask.0,
            mask_height: mask.1,
            image_width: image.0,
            image_height: image.1,
        })
    }
}
