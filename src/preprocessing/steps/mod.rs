//! Individual enhancement steps

pub mod grayscale;
pub mod sharpen;
pub mod smooth;
pub mod threshold;
