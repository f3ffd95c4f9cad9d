//! Visual parameters of the rendered QR symbol

use crate::config::QrOptions;
use crate::error::{Error, Result};
use image::Rgba;
use qrcode::EcLevel;

/// Size, quiet zone, colors and error correction of a QR raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrStyle {
    /// Edge length of the output raster in pixels
    pub size: u32,
    /// Quiet zone width in modules
    pub margin: u32,
    /// Dark module color
    pub foreground: Rgba<u8>,
    /// Light module and quiet zone color
    pub background: Rgba<u8>,
    /// Error correction level
    pub ec_level: EcLevel,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            size: 300,
            margin: 1,
            foreground: Rgba([0x72, 0x58, 0xDE, 0xFF]),
            background: Rgba([0xFF, 0xFF, 0xFF, 0xFF]),
            ec_level: EcLevel::M,
        }
    }
}

impl QrStyle {
    /// Default geometry with the configured palette.
    pub fn from_options(options: &QrOptions) -> Result<Self> {
        Self::default().with_colors(&options.foreground, &options.background)
    }

    /// Override both colors from CSS hex strings.
    pub fn with_colors(mut self, foreground: &str, background: &str) -> Result<Self> {
        self.foreground = parse_hex_color(foreground)?;
        self.background = parse_hex_color(background)?;
        Ok(self)
    }
}

/// Parse `#rgb` or `#rrggbb` into an opaque RGBA pixel.
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>> {
    let digits = value.trim().trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(Error::Other(format!("invalid color: {value}"))),
    };

    let bytes = hex::decode(&expanded)?;
    Ok(Rgba([bytes[0], bytes[1], bytes[2], 0xFF]))
}
