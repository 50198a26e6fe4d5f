pub mod color;
mod flood_fill;
pub mod types;

pub use flood_fill::FloodFillSegmenter;
pub use types::{BackgroundSegmenter, Mask};

use crate::config::PipelineConfig;

/// Create the default segmenter (corner flood fill) for a configuration
pub fn create_default_segmenter(config: &PipelineConfig) -> Box<dyn BackgroundSegmenter> {
    Box::new(FloodFillSegmenter::new(
        config.distance_tolerance,
        config.grayish_tolerance,
    ))
}
