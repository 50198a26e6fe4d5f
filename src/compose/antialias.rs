use crate::config::EdgeSoftening;
use crate::error::PipelineError;
use crate::segmentation::Mask;
use image::RgbaImage;

const NEIGHBORS_8: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Soften the foreground edge of a composited image
///
/// Every interior foreground pixel with `k > 0` background neighbors
/// (8-connected) gets alpha `max(min_alpha, 255 - k * step)`. The outer
/// one-pixel border is never touched.
pub fn soften_edges(
    image: RgbaImage,
    mask: &Mask,
    softening: &EdgeSoftening,
) -> Result<RgbaImage, PipelineError> {
    let _span = tracing::debug_span!("antialias").entered();
    PipelineError::check_dimensions(mask.dimensions(), image.dimensions())?;

    let mut image = image;
    let (width, height) = image.dimensions();
    let mut softened = 0usize;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if mask.is_background(x, y) {
                continue;
            }

            let count = background_neighbors(mask, x, y);
            if count > 0 {
                image.get_pixel_mut(x, y)[3] = softening.alpha_for(count);
                softened += 1;
            }
        }
    }

    tracing::debug!("Softened {} edge pixels", softened);
    Ok(image)
}

/// Background pixels among the 8 neighbors of an interior pixel
fn background_neighbors(mask: &Mask, x: u32, y: u32) -> u32 {
    NEIGHBORS_8
        .iter()
        .filter(|(dx, dy)| {
            let nx = (x as i64 + dx) as u32;
            let ny = (y as i64 + dy) as u32;
            mask.is_background(nx, ny)
        })
        .count() as u32
}
