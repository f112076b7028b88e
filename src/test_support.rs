//! Synthetic rasters shared by unit tests.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use qrcode::{Color, QrCode};

/// Render `text` as a black-on-white QR symbol with square modules.
pub fn render_qr(text: &str, module_size: u32, quiet_zone: u32) -> GrayImage {
    let qr = QrCode::new(text.as_bytes()).expect("payload fits in a QR symbol");
    let width = qr.width() as u32;
    let side = (width + quiet_zone * 2) * module_size;
    let mut img = GrayImage::from_pixel(side, side, Luma([255]));

    for y in 0..width {
        for x in 0..width {
            if qr[(x as usize, y as usize)] == Color::Dark {
                let rect = Rect::at(
                    ((quiet_zone + x) * module_size) as i32,
                    ((quiet_zone + y) * module_size) as i32,
                )
                .of_size(module_size, module_size);
                draw_filled_rect_mut(&mut img, rect, Luma([0]));
            }
        }
    }

    img
}

/// Light canvas with one dark filled rectangle.
pub fn canvas_with_rect(
    canvas: (u32, u32),
    origin: (u32, u32),
    size: (u32, u32),
) -> GrayImage {
    GrayImage::from_fn(canvas.0, canvas.1, |x, y| {
        let inside = x >= origin.0
            && x < origin.0 + size.0
            && y >= origin.1
            && y < origin.1 + size.1;
        if inside {
            Luma([20])
        } else {
            Luma([235])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_qr_draws_whole_modules() {
        let img = render_qr("HELLO", 5, 4);
        // Version 1 symbol: 21 modules plus the quiet zone on both sides
        assert_eq!(img.dimensions(), (145, 145));

        // Top-left finder corner module is solid, quiet zone is not
        let corner = 4 * 5;
        for (dx, dy) in [(0, 0), (4, 4), (0, 4), (4, 0)] {
            assert_eq!(img.get_pixel(corner + dx, corner + dy).0[0], 0);
        }
        assert_eq!(img.get_pixel(corner - 1, corner).0[0], 255);
    }
}
