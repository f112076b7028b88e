use serde::Serialize;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_file_size: usize,
    pub pipeline: PipelineConfig,
}

/// Tunables of the localization and decoding pipeline.
///
/// The defaults are the values the pipeline is calibrated for; changing them
/// trades recall against false candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineConfig {
    /// Padding added on each side of a candidate, as a fraction of its longer side
    pub padding_ratio: f32,
    /// Contours enclosing fewer pixels than this are ignored
    pub min_contour_area: f64,
    /// Polygon approximation tolerance, as a fraction of the contour perimeter
    pub approx_epsilon_ratio: f64,
    /// Accepted range of max(w, h) / min(w, h) for the rotated rectangle
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            padding_ratio: 0.2,
            min_contour_area: 100.0,
            approx_epsilon_ratio: 0.04,
            min_aspect: 0.8,
            max_aspect: 1.2,
        }
    }
}
