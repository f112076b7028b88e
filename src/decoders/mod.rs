//! QR decode primitive implementations
//!
//! This module contains implementations of the QrDecoder trait. Decoders are
//! conditionally compiled based on feature flags.

#[cfg(feature = "decoder-rqrr")]
pub mod rqrr;

use crate::decoder::QrDecoder;
use crate::error::QrError;
use serde::Serialize;
use std::sync::Arc;

/// Information about an available decoder
#[derive(Debug, Clone, Serialize)]
pub struct DecoderInfo {
    pub name: &'static str,
    pub description: &'static str,
}

impl DecoderInfo {
    pub fn of(decoder: &dyn QrDecoder) -> Self {
        Self {
            name: decoder.name(),
            description: decoder.description(),
        }
    }
}

/// Create the decoder compiled into this build
pub fn default_decoder() -> Result<Arc<dyn QrDecoder>, QrError> {
    #[cfg(feature = "decoder-rqrr")]
    {
        tracing::debug!("Using rqrr decoder");
        return Ok(Arc::new(rqrr::RqrrDecoder::new()));
    }

    #[allow(unreachable_code)]
    Err(QrError::InitializationError(
        "No QR decoder available. Build with --features decoder-rqrr".to_string(),
    ))
}
