use super::color::{color_distance, is_grayish};
use super::types::{BackgroundSegmenter, Corner, Mask, SeedOutcome, SeedPoint, VisitedSet};
use image::{Rgba, RgbaImage};
use std::collections::VecDeque;

/// Corner-seeded flood fill background segmentation
///
/// Each corner grows its own region over 4-connected neighbors, matching
/// against the color sampled at that corner. A pixel joins the background
/// only if it is close to the seed color and achromatic.
#[derive(Debug, Clone)]
pub struct FloodFillSegmenter {
    distance_tolerance: f64,
    grayish_tolerance: u8,
}

impl FloodFillSegmenter {
    pub fn new(distance_tolerance: f64, grayish_tolerance: u8) -> Self {
        Self {
            distance_tolerance,
            grayish_tolerance,
        }
    }

    /// Segment and report how many pixels each corner claimed
    pub fn segment_with_outcomes(&self, image: &RgbaImage) -> (Mask, Vec<SeedOutcome>) {
        let _span = tracing::debug_span!("flood_fill").entered();

        let (width, height) = image.dimensions();
        let mut mask = Mask::new(width, height);
        if width == 0 || height == 0 {
            tracing::debug!("Empty image, nothing to segment");
            return (mask, Vec::new());
        }

        let mut visited = VisitedSet::new(width, height);
        let mut outcomes = Vec::with_capacity(Corner::ALL.len());

        for corner in Corner::ALL {
            let seed = SeedPoint::sample(image, corner);

            if visited.contains(seed.x, seed.y) {
                tracing::debug!("Seed {:?} already claimed, skipping", corner);
                outcomes.push(SeedOutcome {
                    seed,
                    claimed: None,
                });
                continue;
            }

            let claimed = self.fill(image, &seed, &mut visited, &mut mask);
            tracing::debug!(
                "Seed {:?} color {:?} claimed {} pixels",
                corner,
                seed.color.0,
                claimed
            );
            outcomes.push(SeedOutcome {
                seed,
                claimed: Some(claimed),
            });
        }

        (mask, outcomes)
    }

    fn accepts(&self, pixel: Rgba<u8>, seed_color: Rgba<u8>) -> bool {
        color_distance(pixel, seed_color) <= self.distance_tolerance
            && is_grayish(pixel[0], pixel[1], pixel[2], self.grayish_tolerance)
    }

    /// Breadth-first fill from one seed. Rejected pixels stop the fill and
    /// stay unclaimed, so a later seed may still accept them.
    fn fill(
        &self,
        image: &RgbaImage,
        seed: &SeedPoint,
        visited: &mut VisitedSet,
        mask: &mut Mask,
    ) -> usize {
        let (width, height) = image.dimensions();
        let mut queue = VecDeque::from([(seed.x, seed.y)]);
        let mut claimed = 0;

        while let Some((x, y)) = queue.pop_front() {
            if visited.contains(x, y) {
                continue;
            }
            if !self.accepts(*image.get_pixel(x, y), seed.color) {
                continue;
            }

            visited.claim(x, y);
            mask.set_background(x, y);
            claimed += 1;

            for (nx, ny) in neighbors(x, y, width, height) {
                if !visited.contains(nx, ny) {
                    queue.push_back((nx, ny));
                }
            }
        }

        claimed
    }
}

impl BackgroundSegmenter for FloodFillSegmenter {
    fn segment(&self, image: &RgbaImage) -> Mask {
        self.segment_with_outcomes(image).0
    }

    fn name(&self) -> &'static str {
        "flood-fill"
    }
}

/// In-bounds 4-connected neighbors of (x, y)
fn neighbors(x: u32, y: u32, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    [
        x.checked_sub(1).map(|nx| (nx, y)),
        (x + 1 < width).then(|| (x + 1, y)),
        y.checked_sub(1).map(|ny| (x, ny)),
        (y + 1 < height).then(|| (x, y + 1)),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAY: Rgba<u8> = Rgba([200, 200, 200, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn red_square() -> RgbaImage {
        RgbaImage::from_fn(10, 10, |x, y| {
            if (3..=6).contains(&x) && (3..=6).contains(&y) {
                RED
            } else {
                GRAY
            }
        })
    }

    #[test]
    fn red_square_on_gray_background() {
        let segmenter = FloodFillSegmenter::new(60.0, 25);
        let (mask, outcomes) = segmenter.segment_with_outcomes(&red_square());

        assert_eq!(mask.dimensions(), (10, 10));
        for y in 0..10 {
            for x in 0..10 {
                let inside = (3..=6).contains(&x) && (3..=6).contains(&y);
                assert_eq!(mask.is_background(x, y), !inside, "pixel ({x}, {y})");
            }
        }

        // Top-left floods the whole ring, every other corner is skipped
        assert_eq!(outcomes[0].claimed, Some(84));
        assert!(outcomes[1..].iter().all(|o| o.claimed.is_none()));
    }

    #[test]
    fn mask_matches_image_dimensions() {
        let segmenter = FloodFillSegmenter::new(60.0, 25);
        for (w, h) in [(1, 1), (7, 3), (2, 9), (0, 0), (0, 4)] {
            let image = RgbaImage::from_pixel(w, h, GRAY);
            assert_eq!(segmenter.segment(&image).dimensions(), (w, h));
        }
    }

    #[test]
    fn background_pixels_match_their_seed() {
        let image = RgbaImage::from_fn(12, 12, |x, y| {
            let shade = 180 + ((x * 7 + y * 3) % 40) as u8;
            if x == 6 || y == 6 {
                Rgba([30, 140, 60, 255])
            } else {
                Rgba([shade, shade, shade.saturating_sub(4), 255])
            }
        });
        let segmenter = FloodFillSegmenter::new(40.0, 25);
        let (mask, outcomes) = segmenter.segment_with_outcomes(&image);

        // The green cross splits the image into quadrants, one per corner
        let seeds: Vec<_> = outcomes.iter().map(|o| o.seed).collect();
        for (x, y, pixel) in image.enumerate_pixels() {
            if !mask.is_background(x, y) {
                continue;
            }
            let seed = seeds[(usize::from(y > 6) << 1) | usize::from(x > 6)];
            assert!(color_distance(*pixel, seed.color) <= 40.0);
            assert!(is_grayish(pixel[0], pixel[1], pixel[2], 25));
        }
        assert!(!mask.is_background(6, 0));
    }

    #[test]
    fn two_tone_background_fills_per_corner() {
        let bright = Rgba([240, 240, 240, 255]);
        let dark = Rgba([100, 100, 100, 255]);
        let line = Rgba([200, 40, 40, 255]);
        // Red cross divides four quadrants; TL/BR bright, TR/BL dark
        let image = RgbaImage::from_fn(9, 9, |x, y| match (x.cmp(&4), y.cmp(&4)) {
            (std::cmp::Ordering::Equal, _) | (_, std::cmp::Ordering::Equal) => line,
            (std::cmp::Ordering::Less, std::cmp::Ordering::Less) => bright,
            (std::cmp::Ordering::Greater, std::cmp::Ordering::Greater) => bright,
            _ => dark,
        });

        let segmenter = FloodFillSegmenter::new(60.0, 25);
        let (mask, outcomes) = segmenter.segment_with_outcomes(&image);

        let claimed: Vec<_> = outcomes.iter().map(|o| o.claimed).collect();
        assert_eq!(claimed, vec![Some(16), Some(16), Some(16), Some(16)]);
        assert_eq!(mask.background_count(), 64);
        assert_eq!(outcomes[1].seed.color, dark);
    }

    #[test]
    fn earlier_seed_claims_shared_pixels() {
        // Three vertical bands: 100 | 130 | 160. The middle band matches both
        // the left seed (100) and the right seed (160) but the left fill runs
        // first and keeps it.
        let image = RgbaImage::from_fn(9, 4, |x, _| {
            let v = match x {
                0..=2 => 100,
                3..=5 => 130,
                _ => 160,
            };
            Rgba([v, v, v, 255])
        });
        let segmenter = FloodFillSegmenter::new(60.0, 25);
        let (mask, outcomes) = segmenter.segment_with_outcomes(&image);

        assert_eq!(outcomes[0].claimed, Some(24));
        assert_eq!(outcomes[1].claimed, Some(12));
        assert_eq!(outcomes[2].claimed, None);
        assert_eq!(outcomes[3].claimed, None);
        assert_eq!(mask.background_count(), 36);
    }

    #[test]
    fn rejected_pixels_block_the_fill() {
        // Gray ring enclosed by a red wall that touches no corner
        let image = RgbaImage::from_fn(7, 7, |x, y| {
            let ring = x == 1 || x == 5 || y == 1 || y == 5;
            let inside = (1..=5).contains(&x) && (1..=5).contains(&y);
            if inside && ring {
                RED
            } else {
                GRAY
            }
        });
        let mask = FloodFillSegmenter::new(60.0, 25).segment(&image);

        // Gray interior is disconnected from every seed
        assert!(!mask.is_background(3, 3));
        assert!(mask.is_background(0, 3));
        assert_eq!(mask.background_count(), 24);
    }

    #[test]
    fn colorful_corner_claims_nothing() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([250, 200, 10, 255]));
        let (mask, outcomes) = FloodFillSegmenter::new(60.0, 25).segment_with_outcomes(&image);
        assert_eq!(mask.background_count(), 0);
        assert!(outcomes.iter().all(|o| o.claimed == Some(0)));
    }
}
