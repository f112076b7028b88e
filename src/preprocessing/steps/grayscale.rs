use image::{GrayImage, RgbImage};

/// Luma of a color capture; every later stage works on this
pub fn apply(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_green_dominates_luma() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(2, 0, Rgb([0, 0, 255]));

        let gray = apply(&img);
        let [r, g, b] = [0, 1, 2].map(|x| gray.get_pixel(x, 0).0[0]);
        assert!(g > r && r > b, "luma r={} g={} b={}", r, g, b);
    }

    #[test]
    fn test_neutral_pixels_keep_their_level() {
        let img = RgbImage::from_pixel(40, 20, Rgb([128, 128, 128]));
        let gray = apply(&img);
        assert_eq!(gray.dimensions(), (40, 20));
        assert!(gray.pixels().all(|p| p.0[0].abs_diff(128) <= 1));
    }
}
