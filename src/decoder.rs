use crate::error::QrError;
use image::DynamicImage;
use serde::Serialize;
use std::fmt;

/// Barcode symbologies a decoder can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    Qr,
}

impl Symbology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qr => "qr",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One symbol found by a decoder, payload still undecoded bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub payload: Vec<u8>,
    pub symbology: Symbology,
}

/// Trait that all QR decode primitives must implement
///
/// A decoder only reads symbols out of a raster; locating, enhancing and
/// deskewing is the pipeline's job.
pub trait QrDecoder: Send + Sync {
    /// Returns the decoder identifier (e.g., "rqrr")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the decoder
    fn description(&self) -> &'static str;

    /// Decode every symbol in `image`, restricted to `filter` when given.
    ///
    /// An empty vector means nothing was decodable; errors are reserved for
    /// the decoder itself failing.
    fn decode(
        &self,
        image: &DynamicImage,
        filter: Option<Symbology>,
    ) -> Result<Vec<DecodedSymbol>, QrError>;
}
