//! PNG export of composed badges

use crate::compose::ComposedBadge;
use crate::error::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

/// Prefix of every exported file name
pub const FILENAME_PREFIX: &str = "CEAT_DA_QR_";

/// `CEAT_DA_QR_<name>.png`, with spaces in the name turned into underscores.
///
/// Only the ASCII space is replaced; the name is otherwise used as typed.
pub fn download_filename(name: &str) -> String {
    format!("{FILENAME_PREFIX}{}.png", name.replace(' ', "_"))
}

/// Serialize a raster to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// `data:image/png;base64,...` form of a raster.
pub fn data_url(image: &RgbaImage) -> Result<String> {
    let png = encode_png(image)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

/// Write the badge into `dir` under its derived file name.
///
/// Creates `dir` if needed. Names that would resolve outside `dir` are
/// rejected.
pub async fn save_to_dir(badge: &ComposedBadge, dir: &Path) -> Result<PathBuf> {
    let filename = download_filename(badge.request().name());
    if !is_plain_file_name(&filename) {
        return Err(Error::Export(format!(
            "'{filename}' is not a valid file name"
        )));
    }

    let png = encode_png(badge.image())?;

    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        Error::Export(format!("Failed to create directory {}: {e}", dir.display()))
    })?;

    let path = dir.join(&filename);
    tokio::fs::write(&path, &png)
        .await
        .map_err(|e| Error::Export(format!("Failed to write {}: {e}", path.display())))?;

    tracing::info!(path = %path.display(), bytes = png.len(), "Badge exported");
    Ok(path)
}

fn is_plain_file_name(name: &str) -> bool {
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
