//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::{QrRenderer, QrStyle};
use image::RgbaImage;
use qrcode::{Color, QrCode};

/// Default [`QrRenderer`] backed by the `qrcode` crate.
///
/// The module grid is scaled to exactly `style.size` pixels with a
/// fractional module size, the way browser QR libraries fill a fixed-width
/// canvas, rather than snapping to whole-pixel modules.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrEncoder;

impl QrEncoder {
    /// Create a new QR encoder
    pub fn new() -> Self {
        Self
    }

    /// Build the module matrix for `data`.
    pub fn matrix(&self, data: &str, style: &QrStyle) -> Result<QrCode> {
        QrCode::with_error_correction_level(data.as_bytes(), style.ec_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))
    }
}

impl QrRenderer for QrEncoder {
    fn render(&self, data: &str, style: &QrStyle) -> Result<RgbaImage> {
        let code = self.matrix(data, style)?;
        let modules = code.width();
        let colors = code.to_colors();
        let span = modules as u32 + style.margin * 2;

        if style.size < span {
            return Err(Error::QrEncode(format!(
                "{modules}x{modules} symbol with margin {} does not fit in {} px",
                style.margin, style.size
            )));
        }

        let scale = f64::from(style.size) / f64::from(span);
        let scaled_margin = f64::from(style.margin) * scale;
        let inner_end = f64::from(style.size) - scaled_margin;

        let to_module = |pixel: u32| -> Option<usize> {
            let p = f64::from(pixel);
            if p < scaled_margin || p >= inner_end {
                return None;
            }
            let module = ((p - scaled_margin) / scale).floor() as usize;
            Some(module.min(modules - 1))
        };

        tracing::debug!(
            modules,
            version = ?code.version(),
            scale,
            "Rendering QR symbol"
        );

        Ok(RgbaImage::from_fn(style.size, style.size, |x, y| {
            match (to_module(x), to_module(y)) {
                (Some(col), Some(row)) if colors[row * modules + col] == Color::Dark => {
                    style.foreground
                }
                _ => style.background,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.freshersworld.com/ceat-apprentice-da-test?recruiter_id=cmVjMTIz";

    #[test]
    fn renders_requested_size() {
        let image = QrEncoder::new().render(URL, &QrStyle::default()).unwrap();
        assert_eq!(image.dimensions(), (300, 300));
    }

    #[test]
    fn quiet_zone_and_finder_pattern() {
        let style = QrStyle::default();
        let image = QrEncoder::new().render(URL, &style).unwrap();

        // Corner lies in the one-module quiet zone.
        assert_eq!(*image.get_pixel(0, 0), style.background);
        // Just inside the quiet zone sits the dark border of the finder pattern.
        let code = QrEncoder::new().matrix(URL, &style).unwrap();
        let module_px = 300.0 / (code.width() as f64 + 2.0);
        let inside = (module_px * 1.5) as u32;
        assert_eq!(*image.get_pixel(inside, inside), style.foreground);
    }

    #[test]
    fn uses_only_palette_colors() {
        let style = QrStyle::default();
        let image = QrEncoder::new().render("hello", &style).unwrap();
        assert!(
            image
                .pixels()
                .all(|p| *p == style.foreground || *p == style.background)
        );
        assert!(image.pixels().any(|p| *p == style.foreground));
    }

    #[test]
    fn deterministic_for_identical_input() {
        let style = QrStyle::default();
        let a = QrEncoder::new().render(URL, &style).unwrap();
        let b = QrEncoder::new().render(URL, &style).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn oversized_payload_fails() {
        let data = "x".repeat(5000);
        let err = QrEncoder::new().render(&data, &QrStyle::default()).unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)));
    }

    #[test]
    fn symbol_larger_than_canvas_fails() {
        let style = QrStyle {
            size: 10,
            ..QrStyle::default()
        };
        let err = QrEncoder::new().render(URL, &style).unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)));
    }
}
