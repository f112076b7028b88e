//! Scalar image-quality score used to rank enhancement candidates.
//!
//! Rewards many strong edges and high contrast, penalizes high-frequency
//! noise. Scores only compare rasters derived from the same capture.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::laplacian_filter;

/// Canny hysteresis thresholds
const CANNY_LOW: f32 = 100.0;
const CANNY_HIGH: f32 = 200.0;
/// Keeps the ratio finite on perfectly flat images
const EPSILON: f64 = 1e-6;

/// Score a grayscale raster; higher is better.
pub fn score(gray: &GrayImage) -> f64 {
    let pixel_count = gray.width() as f64 * gray.height() as f64;
    if pixel_count == 0.0 {
        return 0.0;
    }

    let edges = canny(gray, CANNY_LOW, CANNY_HIGH);
    let edge_score = edges.pixels().map(|p| p.0[0] as f64).sum::<f64>() / pixel_count;

    let contrast = variance(gray.pixels().map(|p| p.0[0] as f64)).sqrt();

    let laplacian = laplacian_filter(gray);
    let noise = variance(laplacian.pixels().map(|p| p.0[0] as f64));

    (edge_score * contrast) / (noise + EPSILON)
}

/// Population variance, 0 for an empty sequence
fn variance(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let (count, sum) = values.clone().fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    values.map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64
}
