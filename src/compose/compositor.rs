use crate::error::PipelineError;
use crate::segmentation::Mask;
use image::{Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Cut the background out of `image`
///
/// Background pixels become fully transparent black; foreground pixels keep
/// their RGB with alpha forced to 255. Source alpha is discarded.
pub fn composite(image: &RgbaImage, mask: &Mask) -> Result<RgbaImage, PipelineError> {
    let _span = tracing::debug_span!("composite").entered();
    PipelineError::check_dimensions(mask.dimensions(), image.dimensions())?;

    Ok(RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        if mask.is_background(x, y) {
            TRANSPARENT
        } else {
            let p = image.get_pixel(x, y);
            Rgba([p[0], p[1], p[2], 255])
        }
    }))
}
