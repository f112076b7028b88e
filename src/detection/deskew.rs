use super::locate::CandidateRegion;
use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{warp, Interpolation, Projection};

/// Rotations smaller than this are not worth resampling for
const MIN_CORRECTION_DEGREES: f32 = 0.1;

/// Normalize a rotated-rect angle in [-90, 0) to the smallest correction.
///
/// Angles below -45 are measured against the other side of the rectangle, so
/// a quarter turn is added back. Codes tilted by almost exactly 45 degrees
/// sit on this boundary and may be turned the long way round.
pub fn correction_angle(angle: f32) -> f32 {
    if angle < -45.0 {
        angle + 90.0
    } else {
        angle
    }
}

/// Rotate `gray` about the region's center so the region becomes
/// axis-aligned. The output keeps the input's dimensions; uncovered pixels
/// are white.
///
/// `region` must be expressed in `gray`'s coordinates.
pub fn deskew(region: &CandidateRegion, gray: &GrayImage) -> GrayImage {
    let angle = correction_angle(region.rect.angle);

    // Skip if angle is negligible
    if angle.abs() < MIN_CORRECTION_DEGREES {
        return gray.clone();
    }

    tracing::debug!("Deskewing by {:.2} degrees", angle);
    rotate_about(gray, region.rect.center, angle)
}

/// Rotate counter-clockwise (as displayed) by `degrees` around `center`
fn rotate_about(gray: &GrayImage, center: (f32, f32), degrees: f32) -> GrayImage {
    let (cx, cy) = center;
    // With y pointing down, a positive imageproc rotation turns clockwise on screen
    let projection = Projection::translate(cx, cy)
        * Projection::rotate(-degrees.to_radians())
        * Projection::translate(-cx, -cy);

    warp(gray, &projection, Interpolation::Bicubic, Luma([255u8]))
}
