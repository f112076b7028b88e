use super::geometry::{approximate_closed_polygon, polygon_area, BoundingBox, RotatedRect};
use crate::config::PipelineConfig;
use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::geometry::{arc_length, min_area_rect};
use imageproc::point::Point;

/// A near-square quadrilateral that probably bounds a QR code
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRegion {
    /// Axis-aligned bounds of the contour, inside the source raster
    pub bbox: BoundingBox,
    /// Outer border of the shape, in raster coordinates
    pub contour: Vec<Point<i32>>,
    /// Minimal-area rectangle around the contour
    pub rect: RotatedRect,
    /// Area enclosed by the contour
    pub area: f64,
}

impl CandidateRegion {
    /// The same region seen from inside a crop starting at `origin`'s corner
    pub fn relative_to(&self, origin: &BoundingBox) -> Self {
        let (dx, dy) = (origin.x as i32, origin.y as i32);
        Self {
            bbox: BoundingBox {
                x: self.bbox.x.saturating_sub(origin.x),
                y: self.bbox.y.saturating_sub(origin.y),
                ..self.bbox
            },
            contour: self
                .contour
                .iter()
                .map(|p| Point::new(p.x - dx, p.y - dy))
                .collect(),
            rect: self.rect.offset_by(dx as f32, dy as f32),
            area: self.area,
        }
    }
}

/// Find the most likely QR code outline with the default parameters.
pub fn locate(gray: &GrayImage) -> Option<CandidateRegion> {
    locate_with(gray, &PipelineConfig::default())
}

/// Find the largest near-square quadrilateral among the outer contours of
/// the dark foreground.
pub fn locate_with(gray: &GrayImage, config: &PipelineConfig) -> Option<CandidateRegion> {
    let bounds = gray.dimensions();
    if bounds.0 == 0 || bounds.1 == 0 {
        return None;
    }

    // Dark ink becomes foreground
    let level = otsu_level(gray);
    let binary = threshold(gray, level, ThresholdType::BinaryInverted);

    let contours = find_contours::<i32>(&binary);
    let mut best: Option<CandidateRegion> = None;
    let mut considered = 0usize;

    for contour in contours.into_iter().filter(|c| c.parent.is_none()) {
        let area = polygon_area(&contour.points);
        if area < config.min_contour_area {
            continue;
        }
        considered += 1;

        let perimeter = arc_length(&contour.points, true);
        let polygon =
            approximate_closed_polygon(&contour.points, config.approx_epsilon_ratio * perimeter);
        if polygon.len() != 4 {
            continue;
        }

        let rect = RotatedRect::from_corners(&min_area_rect(&contour.points));
        let aspect = rect.aspect_ratio();
        if !(config.min_aspect..=config.max_aspect).contains(&aspect) {
            tracing::trace!("Rejected quadrilateral with aspect {:.2}", aspect);
            continue;
        }

        if best.as_ref().is_some_and(|b| area <= b.area) {
            continue;
        }

        let Some(bbox) = BoundingBox::enclosing(&contour.points, bounds) else {
            continue;
        };
        best = Some(CandidateRegion {
            bbox,
            contour: contour.points,
            rect,
            area,
        });
    }

    match &best {
        Some(region) => tracing::debug!(
            "Located candidate at {:?} (area {:.0}, angle {:.1}) among {} contours",
            region.bbox,
            region.area,
            region.rect.angle,
            considered
        ),
        None => tracing::debug!("No candidate among {} contours", considered),
    }

    best
}
