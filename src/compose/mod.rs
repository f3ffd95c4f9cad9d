//! Badge image composition
//!
//! Lays out a fixed 340×420 canvas:
//!
//! ```text
//! +------------------------------+  y = 0
//! |            name              |  baseline 30, bold 16px
//! |        recruiter id          |  baseline 50, bold 12px
//! |        payload URL           |  baseline 70, 10px, max width 300
//! +------------------------------+  y = 80 (text band)
//! |   +----------------------+   |
//! |   |       QR 300x300     |   |  at (20, 100), drop shadow
//! |   +----------------------+   |
//! +------------------------------+  y = 420
//! ```

mod shadow;
mod text;

pub use shadow::DropShadow;
pub use text::{FontSet, TextLine, Weight, css_px_scale, measure_text_width};

use crate::config::FontOptions;
use crate::error::{Error, Result};
use crate::payload::{Payload, build_payload};
use crate::qr::{QrEncoder, QrRenderer, QrStyle};
use crate::request::BadgeRequest;
use image::{Rgba, RgbaImage, imageops};

/// Edge length of the QR raster
pub const QR_SIZE: u32 = 300;
/// Space around the QR raster
pub const MARGIN: u32 = 20;
/// Height of the band holding the three text lines
pub const TEXT_BAND_HEIGHT: u32 = 80;
/// Canvas width
pub const CANVAS_WIDTH: u32 = QR_SIZE + MARGIN * 2;
/// Canvas height
pub const CANVAS_HEIGHT: u32 = TEXT_BAND_HEIGHT + QR_SIZE + MARGIN * 2;

const BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
const TEXT_COLOR: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xFF]);

const NAME_LINE: TextLine = TextLine {
    baseline: 30.0,
    size_px: 16.0,
    weight: Weight::Bold,
    max_width: None,
};

const RECRUITER_LINE: TextLine = TextLine {
    baseline: 50.0,
    size_px: 12.0,
    weight: Weight::Bold,
    max_width: None,
};

const PAYLOAD_LINE: TextLine = TextLine {
    baseline: 70.0,
    size_px: 10.0,
    weight: Weight::Regular,
    max_width: Some((CANVAS_WIDTH - 40) as f32),
};

/// Shadow painted under the QR raster only
pub const QR_SHADOW: DropShadow = DropShadow {
    blur: 20.0,
    offset_x: 10,
    offset_y: 10,
    color: Rgba([0xCC, 0xCC, 0xCC, 0xFF]),
};

/// A finished badge, owned by the caller.
#[derive(Debug, Clone)]
pub struct ComposedBadge {
    request: BadgeRequest,
    payload: Payload,
    image: RgbaImage,
}

impl ComposedBadge {
    /// The validated input the badge was built from
    pub fn request(&self) -> &BadgeRequest {
        &self.request
    }

    /// The URL encoded in the QR code
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The composed raster
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

}

/// Builds badge images from validated requests.
pub struct BadgeComposer<R = QrEncoder> {
    renderer: R,
    fonts: Option<FontSet>,
    qr_style: QrStyle,
    shadow: DropShadow,
}

impl BadgeComposer<QrEncoder> {
    /// Composer with the default QR encoder and the given fonts.
    pub fn new(fonts: Option<FontSet>) -> Self {
        Self::with_renderer(QrEncoder::new(), fonts)
    }

    /// Composer with fonts resolved from configuration and system paths.
    pub fn from_font_options(options: &FontOptions) -> Result<Self> {
        Ok(Self::new(FontSet::load(options)?))
    }
}

impl<R: QrRenderer> BadgeComposer<R> {
    /// Composer using a custom QR renderer.
    pub fn with_renderer(renderer: R, fonts: Option<FontSet>) -> Self {
        if fonts.is_none() {
            tracing::warn!("No usable font found; badges will be rendered without text");
        }

        Self {
            renderer,
            fonts,
            qr_style: QrStyle {
                size: QR_SIZE,
                ..QrStyle::default()
            },
            shadow: QR_SHADOW,
        }
    }

    /// Use a different QR palette or error correction level. The raster
    /// size stays pinned to the layout.
    pub fn with_qr_style(mut self, style: QrStyle) -> Self {
        self.qr_style = QrStyle {
            size: QR_SIZE,
            ..style
        };
        self
    }

    /// Whether text lines will be drawn
    pub fn has_fonts(&self) -> bool {
        self.fonts.is_some()
    }

    /// The QR renderer in use
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// QR style used for the embedded code
    pub fn qr_style(&self) -> &QrStyle {
        &self.qr_style
    }

    /// Validate raw input, then compose.
    pub fn generate(&self, name: &str, recruiter_id: &str) -> Result<ComposedBadge> {
        let request = BadgeRequest::new(name, recruiter_id)?;
        self.compose(request)
    }

    /// Compose the badge for an already validated request.
    pub fn compose(&self, request: BadgeRequest) -> Result<ComposedBadge> {
        let payload = build_payload(request.raw_recruiter_id());
        let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);

        if let Some(fonts) = &self.fonts {
            let center = CANVAS_WIDTH as f32 / 2.0;
            NAME_LINE.draw(&mut canvas, fonts, center, request.name(), TEXT_COLOR);
            RECRUITER_LINE.draw(&mut canvas, fonts, center, &payload.recruiter_id, TEXT_COLOR);
            PAYLOAD_LINE.draw(&mut canvas, fonts, center, payload.as_str(), TEXT_COLOR);
        }

        let qr = self.renderer.render(payload.as_str(), &self.qr_style)?;
        if qr.dimensions() != (self.qr_style.size, self.qr_style.size) {
            return Err(Error::Image(format!(
                "QR renderer returned {}x{}, expected {}x{}",
                qr.width(),
                qr.height(),
                self.qr_style.size,
                self.qr_style.size
            )));
        }

        let qr_x = i64::from(MARGIN);
        let qr_y = i64::from(TEXT_BAND_HEIGHT + MARGIN);
        self.shadow
            .draw(&mut canvas, qr_x, qr_y, qr.width(), qr.height());
        imageops::overlay(&mut canvas, &qr, qr_x, qr_y);

        tracing::debug!(
            recruiter_id = %payload.recruiter_id,
            payload = %payload,
            text = self.fonts.is_some(),
            "Composed badge"
        );

        Ok(ComposedBadge {
            request,
            payload,
            image: canvas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrDecoder;
    use image::DynamicImage;

    struct BrokenRenderer;

    impl QrRenderer for BrokenRenderer {
        fn render(&self, _data: &str, _style: &QrStyle) -> Result<RgbaImage> {
            Err(Error::QrEncode("capacity exceeded".into()))
        }
    }

    struct TinyRenderer;

    impl QrRenderer for TinyRenderer {
        fn render(&self, _data: &str, _style: &QrStyle) -> Result<RgbaImage> {
            Ok(RgbaImage::new(10, 10))
        }
    }

    fn composer() -> BadgeComposer {
        BadgeComposer::new(Some(text::fixture_fonts()))
    }

    fn inked_rows(image: &RgbaImage, rows: std::ops::Range<u32>) -> Vec<u32> {
        rows.filter(|&y| (0..image.width()).any(|x| image.get_pixel(x, y).0[0] < 128))
            .collect()
    }

    #[test]
    fn canvas_dimensions() {
        assert_eq!((CANVAS_WIDTH, CANVAS_HEIGHT), (340, 420));
        let badge = composer().generate("Asha Rao", " REC123 ").unwrap();
        assert_eq!(badge.dimensions(), (340, 420));
        assert_eq!(badge.payload().recruiter_id, "rec123");
    }

    #[test]
    fn qr_is_placed_below_text_band() {
        let composer = BadgeComposer::new(None);
        assert!(!composer.has_fonts());
        let badge = composer.generate("Jane Doe", "rec1").unwrap();
        let style = composer.qr_style();
        let image = badge.image();

        // Corner of the QR quiet zone.
        assert_eq!(*image.get_pixel(20, 100), style.background);
        // Top-left finder pattern module just inside the quiet zone.
        assert_eq!(*image.get_pixel(32, 112), style.foreground);
        // Nothing drawn in the text band without fonts.
        assert!((0..80).all(|y| *image.get_pixel(5, y) == BACKGROUND));
    }

    #[test]
    fn configured_palette_reaches_the_raster() {
        let style = QrStyle::default().with_colors("#000", "#fafafa").unwrap();
        let composer = BadgeComposer::new(None).with_qr_style(QrStyle { size: 64, ..style });
        assert_eq!(composer.qr_style().size, QR_SIZE);

        let badge = composer.generate("Jane Doe", "rec1").unwrap();
        let image = badge.image();
        assert_eq!(*image.get_pixel(20, 100), Rgba([0xFA, 0xFA, 0xFA, 0xFF]));
        assert_eq!(*image.get_pixel(32, 112), Rgba([0, 0, 0, 0xFF]));
    }

    #[test]
    fn shadow_only_below_and_right_of_qr() {
        let badge = BadgeComposer::new(None).generate("Jane", "rec1").unwrap();
        let image = badge.image();

        // Bottom-right gutter picks up the shadow.
        let below = image.get_pixel(200, 405).0[0];
        let right = image.get_pixel(325, 250).0[0];
        assert!(below < 255, "below was {below}");
        assert!(right < 255, "right was {right}");
        // Top-left gutter stays near white.
        assert!(image.get_pixel(3, 85).0[0] >= 250);
    }

    #[test]
    fn text_lines_sit_on_their_baselines() {
        let badge = composer().generate("Asha Rao", "rec123").unwrap();
        let image = badge.image();

        // Ink in each line's band: cap height above the baseline, plus
        // descenders on the payload line.
        assert!(!inked_rows(image, 18..32).is_empty(), "name line missing");
        assert!(!inked_rows(image, 41..52).is_empty(), "recruiter line missing");
        assert!(!inked_rows(image, 62..73).is_empty(), "payload line missing");

        // Clear gaps above and between the lines.
        assert!(inked_rows(image, 0..14).is_empty());
        assert!(inked_rows(image, 34..39).is_empty());
        assert!(inked_rows(image, 53..59).is_empty());
        assert!(inked_rows(image, 76..80).is_empty());
    }

    #[test]
    fn payload_line_is_condensed_into_max_width() {
        let badge = composer()
            .generate("Asha Rao", "a-rather-long-recruiter-identifier")
            .unwrap();
        let image = badge.image();

        let mut min_x = u32::MAX;
        let mut max_x = 0;
        for y in 55..78 {
            for x in 0..CANVAS_WIDTH {
                if image.get_pixel(x, y).0[0] < 128 {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                }
            }
        }
        assert!(min_x >= 19, "payload starts at {min_x}");
        assert!(max_x <= 321, "payload ends at {max_x}");
        // Condensed, not truncated: the line still spans most of the width.
        assert!(max_x - min_x > 250, "payload spans {min_x}..{max_x}");
    }

    #[test]
    fn name_is_centered() {
        let badge = composer().generate("Jane Doe", "rec1").unwrap();
        let image = badge.image();

        let columns: Vec<u32> = (0..CANVAS_WIDTH)
            .filter(|&x| (15..33).any(|y| image.get_pixel(x, y).0[0] < 128))
            .collect();
        let (first, last) = (columns[0], columns[columns.len() - 1]);
        let center = (first + last) / 2;
        assert!((165..=175).contains(&center), "name centered at {center}");
    }

    #[test]
    fn composed_badge_scans_back_to_payload() {
        let badge = composer().generate("Asha Rao", " REC123 ").unwrap();
        let decoded = QrDecoder::new()
            .decode(&DynamicImage::ImageRgba8(badge.image().clone()))
            .unwrap();
        assert_eq!(decoded.as_str(), Some(badge.payload().as_str()));
    }

    #[test]
    fn validation_runs_before_rendering() {
        let composer = BadgeComposer::with_renderer(BrokenRenderer, None);
        let err = composer.generate("", "rec").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn renderer_failure_propagates() {
        let composer = BadgeComposer::with_renderer(BrokenRenderer, None);
        let err = composer.generate("Jane", "rec").unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn wrong_sized_qr_is_rejected() {
        let composer = BadgeComposer::with_renderer(TinyRenderer, None);
        assert!(matches!(
            composer.generate("Jane", "rec"),
            Err(Error::Image(_))
        ));
    }
}
