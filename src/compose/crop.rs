use image::{imageops, RgbaImage};

/// Minimal rectangle holding every non-transparent pixel
/// Right and bottom edges are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    /// None when the image is fully transparent
    pub fn of_content(image: &RgbaImage) -> Option<Self> {
        let mut bbox: Option<Self> = None;

        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel[3] == 0 {
                continue;
            }
            let b = bbox.get_or_insert(Self {
                left: x,
                top: y,
                right: x + 1,
                bottom: y + 1,
            });
            b.left = b.left.min(x);
            b.top = b.top.min(y);
            b.right = b.right.max(x + 1);
            b.bottom = b.bottom.max(y + 1);
        }

        bbox
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Crop to content and pad to a centered square
///
/// Padding is `padding_percent` of the larger content dimension on each
/// side, rounded down. A fully transparent image is returned unchanged.
pub fn crop_to_content(image: RgbaImage, padding_percent: u32) -> RgbaImage {
    let _span = tracing::debug_span!("crop").entered();

    let Some(bbox) = BoundingBox::of_content(&image) else {
        tracing::warn!("Image is fully transparent, skipping crop");
        return image;
    };

    let (content_width, content_height) = (bbox.width(), bbox.height());
    tracing::info!(
        "Content bounding box: ({}, {}, {}, {}) size {}x{}",
        bbox.left,
        bbox.top,
        bbox.right,
        bbox.bottom,
        content_width,
        content_height
    );

    let cropped =
        imageops::crop_imm(&image, bbox.left, bbox.top, content_width, content_height).to_image();

    let max_dim = content_width.max(content_height);
    let padding = (max_dim as u64 * padding_percent as u64 / 100) as u32;
    let final_size = max_dim + 2 * padding;

    let mut square = RgbaImage::new(final_size, final_size);
    let offset_x = (final_size - content_width) / 2;
    let offset_y = (final_size - content_height) / 2;
    imageops::replace(&mut square, &cropped, offset_x as i64, offset_y as i64);

    tracing::debug!(
        "Square canvas {}x{} with {}px padding",
        final_size,
        final_size,
        padding
    );
    square
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn with_block(width: u32, height: u32, left: u32, top: u32, w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (left..left + w).contains(&x) && (top..top + h).contains(&y) {
                RED
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn bounding_box_is_half_open() {
        let image = with_block(10, 10, 3, 2, 4, 5);
        let bbox = BoundingBox::of_content(&image).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                left: 3,
                top: 2,
                right: 7,
                bottom: 7
            }
        );
        assert_eq!((bbox.width(), bbox.height()), (4, 5));
    }

    #[test]
    fn no_padding_crops_exactly() {
        let out = crop_to_content(with_block(10, 10, 3, 3, 4, 4), 0);
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.pixels().all(|p| *p == RED));
    }

    #[test]
    fn small_content_padding_rounds_down() {
        // 4 * 10% = 0.4 -> no padding
        let out = crop_to_content(with_block(10, 10, 3, 3, 4, 4), 10);
        assert_eq!(out.dimensions(), (4, 4));
    }

    #[test]
    fn wide_content_is_centered_vertically() {
        let out = crop_to_content(with_block(40, 40, 5, 10, 20, 5), 10);
        // max_dim 20, padding 2 -> 24
        assert_eq!(out.dimensions(), (24, 24));
        let bbox = BoundingBox::of_content(&out).unwrap();
        assert_eq!((bbox.left, bbox.top), (2, 9));
        assert_eq!((bbox.width(), bbox.height()), (20, 5));
    }

    #[test]
    fn final_size_ignores_source_dimensions() {
        let small = crop_to_content(with_block(30, 30, 1, 1, 12, 7), 8);
        let large = crop_to_content(with_block(300, 90, 200, 50, 12, 7), 8);
        assert_eq!(small.dimensions(), large.dimensions());
        assert!(small.width() >= 12);
    }

    #[test]
    fn fully_transparent_passes_through() {
        let image = RgbaImage::new(6, 3);
        assert_eq!(crop_to_content(image.clone(), 8), image);
    }
}
