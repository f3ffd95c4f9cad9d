//! QR code rendering and scanning
//!
//! Rendering goes through the [`QrRenderer`] seam so the composer does not
//! depend on a particular symbol encoder. [`QrEncoder`] is the default
//! implementation; [`QrDecoder`] reads codes back out of finished badges.

mod decoder;
mod encoder;
mod style;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;
pub use style::{QrStyle, parse_hex_color};

use crate::error::Result;
use image::RgbaImage;

/// Turns a payload string into a square QR raster.
pub trait QrRenderer: Send + Sync {
    /// Render `data` as a `style.size` × `style.size` image.
    fn render(&self, data: &str, style: &QrStyle) -> Result<RgbaImage>;
}

/// Content read back from a QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedCode {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl ScannedCode {
    /// Wrap raw decoded bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Get the content as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
