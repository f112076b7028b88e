//! Decode orchestration
//!
//! Localize a QR candidate in a color capture, enhance and deskew it, and fall
//! back to decoding the untouched capture when that fails.

use crate::config::PipelineConfig;
use crate::decoder::{QrDecoder, Symbology};
use crate::detection::{deskew, locate_with, BoundingBox};
use crate::preprocessing::{enhance_detailed, steps, Enhancement};
use image::{imageops, DynamicImage, RgbImage};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Final answer of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodeResult {
    Found { text: String, symbology: Symbology },
    NotFound,
}

impl DecodeResult {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Found { text, .. } => Some(text),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Which decode attempt produced the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeTier {
    /// The localized, enhanced and deskewed candidate
    Region,
    /// The capture exactly as received
    FullImage,
}

/// Pipeline stages, in the order they can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Localizing,
    Preprocessing,
    Deskewing,
    DecodingRegion,
    DecodingFull,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Localizing => "localize",
            Self::Preprocessing => "preprocess",
            Self::Deskewing => "deskew",
            Self::DecodingRegion => "decode_region",
            Self::DecodingFull => "decode_full",
        }
    }
}

/// Timing information for a single pipeline stage
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of a pipeline run including how it was reached
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    pub result: DecodeResult,
    /// `None` when every tier failed
    pub tier: Option<DecodeTier>,
    /// Padded crop around the localized candidate, if one was found
    pub region: Option<BoundingBox>,
    /// Enhancement applied to the candidate crop
    pub enhancement: Option<Enhancement>,
    pub total_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Stateless QR decode pipeline around a decode primitive
#[derive(Clone)]
pub struct DecodePipeline {
    decoder: Arc<dyn QrDecoder>,
    config: PipelineConfig,
}

impl DecodePipeline {
    pub fn new(decoder: Arc<dyn QrDecoder>) -> Self {
        Self::with_config(decoder, PipelineConfig::default())
    }

    pub fn with_config(decoder: Arc<dyn QrDecoder>, config: PipelineConfig) -> Self {
        Self { decoder, config }
    }

    pub fn decoder(&self) -> &dyn QrDecoder {
        self.decoder.as_ref()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Decode a color capture, returning only the payload.
    pub fn decode(&self, image: &RgbImage) -> DecodeResult {
        self.run(image).result
    }

    /// Decode a color capture and report which tier succeeded.
    pub fn run(&self, image: &RgbImage) -> DecodeReport {
        let start = Instant::now();
        let mut timings = Vec::new();
        let mut region_box = None;
        let mut enhancement = None;

        let candidate = self.run_step(Stage::Localizing, &mut timings, || {
            let gray = steps::grayscale::apply(image);
            locate_with(&gray, &self.config)
        });

        if let Some(candidate) = candidate {
            let padded = candidate
                .bbox
                .padded(self.config.padding_ratio, image.dimensions());
            region_box = Some(padded);

            let enhanced = self.run_step(Stage::Preprocessing, &mut timings, || {
                let crop = imageops::crop_imm(image, padded.x, padded.y, padded.width, padded.height)
                    .to_image();
                enhance_detailed(steps::grayscale::apply(&crop))
            });
            enhancement = Some(enhanced.applied);

            let deskewed = self.run_step(Stage::Deskewing, &mut timings, || {
                deskew(&candidate.relative_to(&padded), &enhanced.image)
            });

            let found = self.run_step(Stage::DecodingRegion, &mut timings, || {
                self.probe(&DynamicImage::ImageLuma8(deskewed), DecodeTier::Region)
            });
            if let Some(result) = found {
                return finish(result, Some(DecodeTier::Region), region_box, enhancement, start, timings);
            }
        }

        let found = self.run_step(Stage::DecodingFull, &mut timings, || {
            self.probe(&DynamicImage::ImageRgb8(image.clone()), DecodeTier::FullImage)
        });

        match found {
            Some(result) => finish(
                result,
                Some(DecodeTier::FullImage),
                region_box,
                enhancement,
                start,
                timings,
            ),
            None => {
                tracing::info!("No QR code found after all decode attempts");
                finish(DecodeResult::NotFound, None, region_box, enhancement, start, timings)
            }
        }
    }

    /// One decode attempt; any failure just means "try the next tier".
    fn probe(&self, image: &DynamicImage, tier: DecodeTier) -> Option<DecodeResult> {
        let symbols = match self.decoder.decode(image, Some(Symbology::Qr)) {
            Ok(symbols) => symbols,
            Err(e) => {
                tracing::warn!("{} decoder failed on {:?} tier: {}", self.decoder.name(), tier, e);
                return None;
            }
        };

        let Some(symbol) = symbols.into_iter().next() else {
            tracing::debug!("Nothing decoded on {:?} tier", tier);
            return None;
        };

        match String::from_utf8(symbol.payload) {
            Ok(text) => {
                tracing::info!("Decoded {} bytes on {:?} tier", text.len(), tier);
                Some(DecodeResult::Found {
                    text,
                    symbology: symbol.symbology,
                })
            }
            Err(e) => {
                tracing::debug!("Payload on {:?} tier is not UTF-8: {}", tier, e);
                None
            }
        }
    }

    fn run_step<T, F>(&self, stage: Stage, timings: &mut Vec<StepTiming>, step_fn: F) -> T
    where
        F: FnOnce() -> T,
    {
        let step_start = Instant::now();
        let result = step_fn();
        timings.push(StepTiming {
            name: stage.as_str().to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });
        result
    }
}

fn finish(
    result: DecodeResult,
    tier: Option<DecodeTier>,
    region: Option<BoundingBox>,
    enhancement: Option<Enhancement>,
    start: Instant,
    steps: Vec<StepTiming>,
) -> DecodeReport {
    DecodeReport {
        result,
        tier,
        region,
        enhancement,
        total_time_ms: start.elapsed().as_millis() as u64,
        steps,
    }
}
