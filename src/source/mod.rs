mod file_source;

pub use file_source::FileSource;

use anyhow::Result;
use image::RgbaImage;

/// Trait for input image sources
pub trait ImageSource {
    /// Load the source image as RGBA
    fn load(&mut self) -> Result<RgbaImage>;

    /// Human readable origin, used in logs
    fn describe(&self) -> String;
}
