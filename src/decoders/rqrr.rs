//! rqrr decoder implementation
//!
//! Pure Rust QR decoder. Only understands QR symbols, so the symbology filter
//! never narrows anything down.

use crate::decoder::{DecodedSymbol, QrDecoder, Symbology};
use crate::error::QrError;
use image::DynamicImage;
use rqrr::PreparedImage;

/// QR decoder wrapping the rqrr library
#[derive(Debug, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl QrDecoder for RqrrDecoder {
    fn name(&self) -> &'static str {
        "rqrr"
    }

    fn description(&self) -> &'static str {
        "Pure Rust QR decoder - no system dependencies required"
    }

    fn decode(
        &self,
        image: &DynamicImage,
        filter: Option<Symbology>,
    ) -> Result<Vec<DecodedSymbol>, QrError> {
        if matches!(filter, Some(s) if s != Symbology::Qr) {
            return Ok(Vec::new());
        }

        let gray = image.to_luma8();
        let (width, height) = (gray.width() as usize, gray.height() as usize);
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let mut prepared =
            PreparedImage::prepare_from_greyscale(width, height, |x, y| {
                gray.get_pixel(x as u32, y as u32).0[0]
            });
        let grids = prepared.detect_grids();
        tracing::debug!("rqrr found {} candidate grid(s)", grids.len());

        let mut symbols = Vec::new();
        for grid in grids {
            let mut payload = Vec::new();
            match grid.decode_to(&mut payload) {
                Ok(_) => {
                    tracing::debug!("Decoded grid with {} payload bytes", payload.len());
                    symbols.push(DecodedSymbol {
                        payload,
                        symbology: Symbology::Qr,
                    });
                }
                Err(e) => tracing::debug!("Grid failed to decode: {}", e),
            }
        }

        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_qr;
    use image::GrayImage;

    #[test]
    fn test_decodes_rendered_symbol() {
        let img = DynamicImage::ImageLuma8(render_qr("HELLO", 6, 4));
        let symbols = RqrrDecoder::new().decode(&img, Some(Symbology::Qr)).unwrap();

        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].payload, b"HELLO");
        assert_eq!(symbols[0].symbology, Symbology::Qr);
    }

    #[test]
    fn test_blank_image_yields_nothing() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, image::Luma([255])));
        let symbols = RqrrDecoder::new().decode(&img, None).unwrap();
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_empty_image_yields_nothing() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(RqrrDecoder::new().decode(&img, None).unwrap().is_empty());
    }
}
