//! Terminal QR codes.
//!
//! Codes use the low error-correction level and a one-module quiet zone.
//! Each text line covers two module rows using half-block characters. Light
//! modules (and the quiet zone) are drawn filled so the code scans on a
//! dark-background terminal.

use qrcode::types::QrError as EncodeError;
use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

/// Modules of light border around the symbol.
pub const QUIET_ZONE: usize = 1;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("cannot encode QR code: {0}")]
    Encode(#[from] EncodeError),
}

/// Render `text` as a QR code made of Unicode block characters.
pub fn render(text: &str) -> Result<String, QrError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::L)?;
    Ok(render_modules(code.width(), &code.to_colors()))
}

fn render_modules(width: usize, colors: &[Color]) -> String {
    let size = width + 2 * QUIET_ZONE;
    // Coordinates are in the padded grid; anything in the border is light.
    let is_light = |x: usize, y: usize| -> bool {
        if x < QUIET_ZONE || y < QUIET_ZONE || x >= width + QUIET_ZONE || y >= width + QUIET_ZONE {
            return true;
        }
        colors[(y - QUIET_ZONE) * width + (x - QUIET_ZONE)] == Color::Light
    };

    let mut out = String::new();
    for y in (0..size).step_by(2) {
        for x in 0..size {
            let top = is_light(x, y);
            // Odd sizes leave the last half-row empty.
            let bottom = y + 1 < size && is_light(x, y + 1);
            out.push(match (top, bottom) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }
    out
}
