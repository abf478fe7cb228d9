//! PNG rendering of finished payloads.
//!
//! The QR matrix itself comes from the `qrcode` crate; this module only
//! rasterizes the modules, blends the optional logo and wraps the PNG as a
//! base64 data URI.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};
use tracing::trace;

use crate::{PaynowError, Result};

/// PayNow brand accent color for dark modules.
const MODULE_COLOR: Rgba<u8> = Rgba([124, 26, 120, 255]);
/// Quiet zone width in modules.
const QUIET_ZONE: u32 = 5;
/// Fraction of a cell covered by its (square) module.
const MODULE_SCALE: f32 = 0.8;
/// Opacity applied to the embedded logo.
const LOGO_OPACITY: f32 = 0.2;
/// Logo edge length relative to the rendered image.
const LOGO_RATIO: f32 = 0.2;

/// Render `payload` as a PNG QR image wrapped as a base64 data URI.
pub fn data_uri(payload: &str, logo: Option<&[u8]>, pixel_size: u32) -> Result<String> {
    let png = render_png(payload, logo, pixel_size)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

/// Render `payload` as PNG bytes at roughly `pixel_size` per edge.
///
/// The matrix is encoded at error-correction level H so the payload stays
/// readable under the blended logo.
pub fn render_png(payload: &str, logo: Option<&[u8]>, pixel_size: u32) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| PaynowError::Render(e.to_string()))?;
    let width = code.width() as u32;
    let colors = code.to_colors();

    let cells = width + 2 * QUIET_ZONE;
    let cell = (pixel_size / cells).max(1);
    let side = cell * cells;

    let mut img = RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 255]));
    let module = ((cell as f32 * MODULE_SCALE).round() as u32).max(1);
    let inset = (cell - module) / 2;
    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let col = i as u32 % width;
        let row = i as u32 / width;
        let x0 = (QUIET_ZONE + col) * cell + inset;
        let y0 = (QUIET_ZONE + row) * cell + inset;
        for y in y0..y0 + module {
            for x in x0..x0 + module {
                img.put_pixel(x, y, MODULE_COLOR);
            }
        }
    }

    if let Some(bytes) = logo {
        blend_logo(&mut img, bytes)?;
    }

    let mut png = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut png),
        image::ImageOutputFormat::Png,
    )
    .map_err(|e| PaynowError::Render(e.to_string()))?;
    trace!(bytes = png.len(), side, "rendered qr png");
    Ok(png)
}

/// Alpha-blend the logo over the center of the rendered code.
fn blend_logo(img: &mut RgbaImage, bytes: &[u8]) -> Result<()> {
    let logo = image::load_from_memory(bytes)
        .map_err(|e| PaynowError::Render(e.to_string()))?
        .to_rgba8();
    let side = img.width();
    let target = ((side as f32 * LOGO_RATIO) as u32).max(1);
    let scaled = image::imageops::resize(
        &logo,
        target,
        target,
        image::imageops::FilterType::Lanczos3,
    );
    let offset = (side - target) / 2;
    for (x, y, pixel) in scaled.enumerate_pixels() {
        let alpha = LOGO_OPACITY * (pixel[3] as f32 / 255.0);
        let base = img.get_pixel_mut(offset + x, offset + y);
        for channel in 0..3 {
            base[channel] = (base[channel] as f32 * (1.0 - alpha)
                + pixel[channel] as f32 * alpha)
                .round() as u8;
        }
    }
    Ok(())
}
