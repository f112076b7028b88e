//! Locate and decode QR codes in screenshot crops.
//!
//! The pipeline takes a color capture, looks for a near-square outline that
//! probably bounds a QR code, enhances and deskews that region and hands it to
//! a decode primitive, falling back to the untouched capture when needed.
//!
//! ```no_run
//! use screen_qr::{decoders, DecodePipeline};
//!
//! let decoder = decoders::default_decoder().unwrap();
//! let capture = image::open("capture.png").unwrap().to_rgb8();
//! let result = DecodePipeline::new(decoder).decode(&capture);
//! println!("{:?}", result.text());
//! ```

pub mod config;
pub mod decoder;
pub mod decoders;
pub mod detection;
pub mod error;
pub mod pipeline;
pub mod preprocessing;
pub mod selection;
pub mod server;

#[cfg(test)]
mod test_support;

pub use config::{PipelineConfig, ServerConfig};
pub use decoder::{DecodedSymbol, QrDecoder, Symbology};
pub use error::QrError;
pub use pipeline::{DecodePipeline, DecodeReport, DecodeResult, DecodeTier};
pub use selection::SelectionRect;
