//! Drop shadow beneath an opaque rectangle

use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::filter::gaussian_blur_f32;

/// Canvas-style drop shadow: blurred, offset silhouette in a flat color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    /// Blur radius as a canvas `shadowBlur` value; the gaussian sigma is half of it
    pub blur: f32,
    /// Horizontal offset in pixels
    pub offset_x: i64,
    /// Vertical offset in pixels
    pub offset_y: i64,
    /// Shadow color
    pub color: Rgba<u8>,
}

impl DropShadow {
    /// Standard deviation of the gaussian kernel
    pub fn sigma(&self) -> f32 {
        self.blur / 2.0
    }

    /// Paint the shadow of a `width` × `height` opaque rectangle whose
    /// top-left corner is at `(x, y)`. The rectangle itself is not drawn.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, width: u32, height: u32) {
        let mask = self.mask(canvas.width(), canvas.height(), x, y, width, height);
        let pad = self.padding();

        for (px, py, pixel) in canvas.enumerate_pixels_mut() {
            let coverage = mask.get_pixel(px + pad, py + pad).0[0];
            if coverage == 0 {
                continue;
            }
            let alpha = f32::from(coverage) / 255.0 * f32::from(self.color.0[3]) / 255.0;
            *pixel = source_over(*pixel, self.color, alpha);
        }
    }

    // The mask extends past the canvas so the blur does not clamp at the edges.
    fn padding(&self) -> u32 {
        (self.sigma() * 3.0).ceil().max(0.0) as u32
    }

    fn mask(&self, canvas_w: u32, canvas_h: u32, x: i64, y: i64, width: u32, height: u32) -> GrayImage {
        let pad = self.padding();
        let mask_w = canvas_w + pad * 2;
        let mask_h = canvas_h + pad * 2;
        let mut mask = GrayImage::new(mask_w, mask_h);

        let left = (x + self.offset_x + i64::from(pad)).clamp(0, i64::from(mask_w));
        let top = (y + self.offset_y + i64::from(pad)).clamp(0, i64::from(mask_h));
        let right = (x + self.offset_x + i64::from(pad) + i64::from(width)).clamp(0, i64::from(mask_w));
        let bottom = (y + self.offset_y + i64::from(pad) + i64::from(height)).clamp(0, i64::from(mask_h));

        for my in top..bottom {
            for mx in left..right {
                mask.put_pixel(mx as u32, my as u32, Luma([255]));
            }
        }

        if self.sigma() > 0.0 {
            gaussian_blur_f32(&mask, self.sigma())
        } else {
            mask
        }
    }
}

fn source_over(dst: Rgba<u8>, src: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let dst_a = f32::from(dst.0[3]) / 255.0;
    let out_a = alpha + dst_a * (1.0 - alpha);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = f32::from(src.0[c]);
        let d = f32::from(dst.0[c]);
        out[c] = ((s * alpha + d * dst_a * (1.0 - alpha)) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}
