use image::{GrayImage, Luma};
use imageproc::definitions::Image;
use imageproc::integral_image::{integral_image, sum_image_pixels};

/// Adaptive mean threshold parameters
const BLOCK_SIZE: u32 = 11;
const OFFSET: f64 = 2.0;

/// Apply adaptive mean thresholding
/// Handles uneven screen lighting and gradients that defeat a global level
pub fn apply(gray: &GrayImage) -> GrayImage {
    adaptive_mean_threshold(gray, BLOCK_SIZE, OFFSET)
}

/// Adaptive mean thresholding
///
/// A pixel becomes white when it is brighter than `mean - offset`, the mean
/// taken over the `block_size` window around it (clipped at the borders).
fn adaptive_mean_threshold(img: &GrayImage, block_size: u32, offset: f64) -> GrayImage {
    let (width, height) = img.dimensions();
    let half_window = block_size / 2;
    let integral: Image<Luma<u64>> = integral_image(img);

    GrayImage::from_fn(width, height, |x, y| {
        let x1 = x.saturating_sub(half_window);
        let y1 = y.saturating_sub(half_window);
        let x2 = (x + half_window).min(width - 1);
        let y2 = (y + half_window).min(height - 1);

        let area = ((x2 - x1 + 1) * (y2 - y1 + 1)) as f64;
        let [sum] = sum_image_pixels(&integral, x1, y1, x2, y2);
        let mean = sum as f64 / area;

        let pixel = img.get_pixel(x, y).0[0] as f64;
        if pixel > mean - offset {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
