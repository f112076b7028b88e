//! Localization and orientation of QR code candidates

pub mod deskew;
pub mod geometry;
pub mod locate;

pub use deskew::{correction_angle, deskew};
pub use geometry::{BoundingBox, RotatedRect};
pub use locate::{locate, locate_with, CandidateRegion};
