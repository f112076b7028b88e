//! Image enhancement for QR decoding
//!
//! Scores candidate enhancements of a grayscale crop and keeps the best one.

pub mod enhance;
pub mod quality;
pub mod steps;

pub use enhance::{enhance, enhance_detailed, Enhanced, Enhancement};
pub use quality::score;
