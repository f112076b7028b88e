//! User selections on a captured screenshot.
//!
//! A selection comes from a mouse drag that may run in any direction; it is
//! normalized and clamped before the screenshot is cropped.

use crate::error::QrError;
use image::{imageops, RgbImage};
use std::str::FromStr;

/// Rectangle in screenshot pixels with a non-negative extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl SelectionRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalize a drag from `start` to `end`; either corner may come first.
    pub fn from_drag(start: (i64, i64), end: (i64, i64)) -> Self {
        let x = start.0.min(end.0);
        let y = start.1.min(end.1);
        Self {
            x,
            y,
            width: start.0.abs_diff(end.0) as u32,
            height: start.1.abs_diff(end.1) as u32,
        }
    }

    /// Intersection with a `width` x `height` screen, as (x, y, w, h)
    fn clamp_to(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.clamp(0, width as i64);
        let y0 = self.y.clamp(0, height as i64);
        let x1 = (self.x + self.width as i64).clamp(0, width as i64);
        let y1 = (self.y + self.height as i64).clamp(0, height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

impl FromStr for SelectionRect {
    type Err = QrError;

    /// Parse `x,y,width,height`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, w, h] = parts.as_slice() else {
            return Err(QrError::InvalidRegion(format!(
                "expected x,y,width,height but got '{}'",
                s
            )));
        };

        let number_err = |field: &str| QrError::InvalidRegion(format!("invalid {}", field));
        Ok(Self {
            x: x.parse().map_err(|_| number_err("x"))?,
            y: y.parse().map_err(|_| number_err("y"))?,
            width: w.parse().map_err(|_| number_err("width"))?,
            height: h.parse().map_err(|_| number_err("height"))?,
        })
    }
}

/// Copy the selected part of a screenshot.
pub fn crop(screen: &RgbImage, selection: &SelectionRect) -> Result<RgbImage, QrError> {
    let (x, y, w, h) = selection
        .clamp_to(screen.width(), screen.height())
        .ok_or_else(|| {
            QrError::InvalidRegion(format!(
                "selection {:?} does not overlap the {}x{} capture",
                selection,
                screen.width(),
                screen.height()
            ))
        })?;

    tracing::debug!("Cropping selection {}x{} at ({}, {})", w, h, x, y);
    Ok(imageops::crop_imm(screen, x, y, w, h).to_image())
}
