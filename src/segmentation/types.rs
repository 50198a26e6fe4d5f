use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Background mask: `true` marks a background pixel
/// Dimensions always match the image it was computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// All-foreground mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; width as usize * height as usize],
        }
    }

    /// Derive a mask from an image's alpha channel (alpha == 0 is background)
    pub fn from_alpha(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.pixels().map(|p| p[3] == 0).collect(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn is_background(&self, x: u32, y: u32) -> bool {
        self.data[self.index(x, y)]
    }

    pub fn set_background(&mut self, x: u32, y: u32) {
        let idx = self.index(x, y);
        self.data[idx] = true;
    }

    pub fn background_count(&self) -> usize {
        self.data.iter().filter(|&&bg| bg).count()
    }

    /// Render as a grayscale image for diagnostics (white = background)
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_background(x, y) { 255 } else { 0 }])
        })
    }
}

/// Image corners in the order their flood fills run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Pixel coordinates of this corner. Image must be non-empty.
    pub fn position(self, width: u32, height: u32) -> (u32, u32) {
        let right = width - 1;
        let bottom = height - 1;
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (right, 0),
            Corner::BottomLeft => (0, bottom),
            Corner::BottomRight => (right, bottom),
        }
    }
}

/// A flood fill origin carrying the color sampled at its own corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedPoint {
    pub corner: Corner,
    pub x: u32,
    pub y: u32,
    pub color: Rgba<u8>,
}

impl SeedPoint {
    pub fn sample(image: &RgbaImage, corner: Corner) -> Self {
        let (x, y) = corner.position(image.width(), image.height());
        Self {
            corner,
            x,
            y,
            color: *image.get_pixel(x, y),
        }
    }
}

/// Pixels already claimed during one segmentation run
///
/// Shared by all corner fills in order: once a pixel is claimed by an
/// earlier seed no later seed reconsiders it.
#[derive(Debug)]
pub struct VisitedSet {
    width: u32,
    claimed: Vec<bool>,
}

impl VisitedSet {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            claimed: vec![false; width as usize * height as usize],
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.claimed[y as usize * self.width as usize + x as usize]
    }

    pub fn claim(&mut self, x: u32, y: u32) {
        self.claimed[y as usize * self.width as usize + x as usize] = true;
    }
}

/// Pixels claimed by one corner's fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedOutcome {
    pub seed: SeedPoint,
    /// None when the corner was already claimed by an earlier seed
    pub claimed: Option<usize>,
}

/// Trait for background segmenters
/// Allows swapping the classic flood fill for other strategies
pub trait BackgroundSegmenter {
    /// Classify every pixel of `image` as background or foreground
    ///
    /// # Returns
    /// * Mask with the same dimensions as `image`
    fn segment(&self, image: &RgbaImage) -> Mask;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
