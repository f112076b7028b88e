use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

/// Blur radius of the unsharp mask
const MASK_SIGMA: f32 = 3.0;
/// Weights of original and blurred image, summing to 1
const ORIGINAL_WEIGHT: f32 = 1.5;
const BLUR_WEIGHT: f32 = -0.5;

/// Apply unsharp masking
/// Boosts the original and subtracts a wide blur, steepening module edges
pub fn apply(gray: &GrayImage) -> GrayImage {
    let blurred = gaussian_blur_f32(gray, MASK_SIGMA);

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let original = gray.get_pixel(x, y).0[0] as f32;
        let blur = blurred.get_pixel(x, y).0[0] as f32;
        let value = ORIGINAL_WEIGHT * original + BLUR_WEIGHT * blur;
        Luma([value.round().clamp(0.0, 255.0) as u8])
    })
}
