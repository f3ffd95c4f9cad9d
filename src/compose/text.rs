//! Font loading and single-line text drawing.
//!
//! Sizes are given in CSS pixels (em size) and converted to the
//! `ab_glyph` pixel scale of each face. Positions use an alphabetic
//! baseline, like a browser canvas.

use crate::config::FontOptions;
use crate::error::{Error, Result};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use std::path::Path;

/// Font weight of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    /// Regular face
    Regular,
    /// Bold face, falls back to regular when no bold face is installed
    Bold,
}

/// Regular and bold faces used on the badge.
pub struct FontSet {
    regular: FontVec,
    bold: Option<FontVec>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("bold", &self.bold.is_some())
            .finish()
    }
}

impl FontSet {
    /// Build a set from raw font file contents.
    pub fn from_data(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<Self> {
        let regular = FontVec::try_from_vec(regular)
            .map_err(|_| Error::Font("failed to parse regular font data (TTF/OTF)".to_string()))?;
        let bold = bold
            .map(|data| {
                FontVec::try_from_vec(data)
                    .map_err(|_| Error::Font("failed to parse bold font data (TTF/OTF)".to_string()))
            })
            .transpose()?;
        Ok(Self { regular, bold })
    }

    /// Resolve fonts from configured paths, then from well-known system
    /// locations.
    ///
    /// Configured paths that cannot be read are errors. `Ok(None)` means no
    /// font was configured and none was found on the system.
    pub fn load(options: &FontOptions) -> Result<Option<Self>> {
        let regular = match &options.regular {
            Some(path) => Some(read_font_file(path)?),
            None => find_system_font(REGULAR_CANDIDATES),
        };
        let bold = match &options.bold {
            Some(path) => Some(read_font_file(path)?),
            None => find_system_font(BOLD_CANDIDATES),
        };

        match (regular, bold) {
            (Some(regular), bold) => Self::from_data(regular, bold).map(Some),
            // A lone bold face serves both weights.
            (None, Some(bold)) => Self::from_data(bold, None).map(Some),
            (None, None) => Ok(None),
        }
    }

    /// Face for the requested weight
    pub fn face(&self, weight: Weight) -> &FontVec {
        match weight {
            Weight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            Weight::Regular => &self.regular,
        }
    }
}

fn read_font_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| Error::Font(format!("Failed to read font {}: {e}", path.display())))
}

fn find_system_font(candidates: &[&str]) -> Option<Vec<u8>> {
    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            tracing::info!(path = %path, "Using system font");
            return Some(data);
        }
    }
    None
}

#[cfg(target_os = "macos")]
const REGULAR_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Verdana.ttf",
];
#[cfg(target_os = "macos")]
const BOLD_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Verdana Bold.ttf",
];

#[cfg(target_os = "windows")]
const REGULAR_CANDIDATES: &[&str] = &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"];
#[cfg(target_os = "windows")]
const BOLD_CANDIDATES: &[&str] = &["C:\\Windows\\Fonts\\arialbd.ttf", "C:\\Windows\\Fonts\\segoeuib.ttf"];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
];

/// Convert a CSS pixel size (em box) into the face's `PxScale`.
pub fn css_px_scale(font: &impl Font, css_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(css_px * font.height_unscaled() / units),
        _ => PxScale::from(css_px),
    }
}

/// Advance width of `text` in pixels, kerning included.
pub fn measure_text_width(font: &impl Font, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width
}

/// One line of horizontally centered text.
#[derive(Debug, Clone, Copy)]
pub struct TextLine {
    /// Baseline y coordinate
    pub baseline: f32,
    /// Size in CSS pixels
    pub size_px: f32,
    /// Face weight
    pub weight: Weight,
    /// Text wider than this is condensed horizontally to fit
    pub max_width: Option<f32>,
}

impl TextLine {
    /// Scale to draw `text` with, after applying `max_width`.
    pub fn fitted_scale(&self, font: &impl Font, text: &str) -> PxScale {
        let mut scale = css_px_scale(font, self.size_px);
        if let Some(max_width) = self.max_width {
            let width = measure_text_width(font, scale, text);
            if width > max_width && width > 0.0 {
                scale.x *= max_width / width;
            }
        }
        scale
    }

    /// Draw `text` centered on `center_x`.
    pub fn draw(&self, img: &mut RgbaImage, fonts: &FontSet, center_x: f32, text: &str, color: Rgba<u8>) {
        if text.is_empty() {
            return;
        }
        let font = fonts.face(self.weight);
        let scale = self.fitted_scale(font, text);
        let width = measure_text_width(font, scale, text);
        let ascent = font.as_scaled(scale).ascent();

        let x = (center_x - width / 2.0).round() as i32;
        let top = (self.baseline - ascent).round() as i32;
        draw_text_mut(img, color, x, top, scale, font, text);
    }
}

/// DejaVu Sans faces checked in under `tests/fixtures`.
#[cfg(test)]
pub(crate) fn fixture_fonts() -> FontSet {
    FontSet::from_data(
        include_bytes!("../../tests/fixtures/DejaVuSans.ttf").to_vec(),
        Some(include_bytes!("../../tests/fixtures/DejaVuSans-Bold.ttf").to_vec()),
    )
    .expect("fixture fonts parse")
}
