//! Scene builders shared by the integration tests.

#![allow(dead_code)]

use image::{imageops, DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use imageproc::rect::Rect;
use qrcode::{Color, QrCode};
use std::io::Cursor;

pub const BACKGROUND: Rgb<u8> = Rgb([236, 238, 242]);

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

/// Surround a symbol with a dark border, like a printed card or a widget frame.
pub fn framed(symbol: &GrayImage, thickness: u32) -> GrayImage {
    let side = symbol.width() + thickness * 2;
    let mut card = GrayImage::from_pixel(side, side, Luma([25]));
    imageops::overlay(&mut card, symbol, thickness as i64, thickness as i64);
    card
}

/// Rotate a symbol by `degrees` on a white canvas large enough to hold it.
pub fn rotated(symbol: &GrayImage, degrees: f32) -> GrayImage {
    let side = (symbol.width() as f32 * std::f32::consts::SQRT_2).ceil() as u32;
    let mut canvas = GrayImage::from_pixel(side, side, Luma([255]));
    let offset = ((side - symbol.width()) / 2) as i64;
    imageops::overlay(&mut canvas, symbol, offset, offset);
    rotate_about_center(
        &canvas,
        degrees.to_radians(),
        Interpolation::Bilinear,
        Luma([255]),
    )
}

/// Plain screenshot-like background.
pub fn scene(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, BACKGROUND)
}

/// Paste a grey raster onto a color scene.
pub fn paste(scene: &mut RgbImage, symbol: &GrayImage, x: i64, y: i64) {
    let symbol = DynamicImage::ImageLuma8(symbol.clone()).to_rgb8();
    imageops::overlay(scene, &symbol, x, y);
}

/// Dark filled rectangle, e.g. a toolbar or a text line.
pub fn draw_block(scene: &mut RgbImage, x: i32, y: i32, width: u32, height: u32) {
    draw_filled_rect_mut(scene, Rect::at(x, y).of_size(width, height), Rgb([40, 44, 52]));
}

/// Rows of short dark dashes standing in for rendered text.
pub fn draw_text_lines(scene: &mut RgbImage, x: i32, y: i32, lines: u32) {
    for line in 0..lines {
        let mut cursor = x;
        for word in 0..6 {
            let len = 10 + (word * 7 + line * 3) % 18;
            draw_filled_rect_mut(
                scene,
                Rect::at(cursor, y + (line * 14) as i32).of_size(len, 6),
                Rgb([60, 60, 60]),
            );
            cursor += len as i32 + 6;
        }
    }
}

/// Encode a scene as PNG bytes.
pub fn png_bytes(scene: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(scene.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// 600x400 capture with a clean "HELLO" symbol near the middle.
pub fn hello_capture() -> RgbImage {
    let mut capture = scene(600, 400);
    let symbol = render_qr("HELLO", 6, 4);
    let x = (600 - symbol.width() as i64) / 2;
    let y = (400 - symbol.height() as i64) / 2;
    paste(&mut capture, &symbol, x, y);
    capture
}
