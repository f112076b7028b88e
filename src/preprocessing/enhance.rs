use super::quality;
use super::steps;
use image::GrayImage;
use serde::Serialize;

/// Which candidate won the enhancement contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Enhancement {
    Original,
    Smoothed,
    Sharpened,
    Binarized,
}

impl Enhancement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Smoothed => "smoothed",
            Self::Sharpened => "sharpened",
            Self::Binarized => "binarized",
        }
    }
}

/// Outcome of [`enhance_detailed`]
#[derive(Debug, Clone)]
pub struct Enhanced {
    pub image: GrayImage,
    pub score: f64,
    pub applied: Enhancement,
}

/// Return the best-scoring raster among the input and its enhancements.
pub fn enhance(gray: GrayImage) -> GrayImage {
    enhance_detailed(gray).image
}

/// Like [`enhance`], also reporting the winning step and its score.
///
/// Smoothing and unsharp masking both start from the original raster;
/// binarization starts from whichever raster is winning at that point.
pub fn enhance_detailed(gray: GrayImage) -> Enhanced {
    let smoothed = steps::smooth::apply(&gray);
    let sharpened = steps::sharpen::apply(&gray);

    let initial_score = quality::score(&gray);
    let best = Enhanced {
        image: gray,
        score: initial_score,
        applied: Enhancement::Original,
    };

    let best = challenge(best, smoothed, Enhancement::Smoothed);
    let best = challenge(best, sharpened, Enhancement::Sharpened);

    let binarized = steps::threshold::apply(&best.image);
    let best = challenge(best, binarized, Enhancement::Binarized);

    tracing::debug!(
        "Enhancement winner: {} (score {:.4}, original {:.4})",
        best.applied.as_str(),
        best.score,
        initial_score
    );

    best
}

/// Replace `best` only when `candidate` scores strictly higher
fn challenge(best: Enhanced, candidate: GrayImage, applied: Enhancement) -> Enhanced {
    let score = quality::score(&candidate);
    tracing::trace!("{} scored {:.4}", applied.as_str(), score);
    if score > best.score {
        Enhanced {
            image: candidate,
            score,
            applied,
        }
    } else {
        best
    }
}
