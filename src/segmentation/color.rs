//! Color similarity helpers used by the background flood fill.

use image::Rgba;

/// Euclidean distance between two colors in RGB space. Alpha is ignored.
pub fn color_distance(a: Rgba<u8>, b: Rgba<u8>) -> f64 {
    let dr = a[0] as f64 - b[0] as f64;
    let dg = a[1] as f64 - b[1] as f64;
    let db = a[2] as f64 - b[2] as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// True when no two channels differ by more than `tolerance`
pub fn is_grayish(r: u8, g: u8, b: u8, tolerance: u8) -> bool {
    r.abs_diff(g) <= tolerance && g.abs_diff(b) <= tolerance && r.abs_diff(b) <= tolerance
}
