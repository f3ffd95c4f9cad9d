//! recruit-badge - recruiter badge generator
//!
//! Turns a candidate name and a recruiter identifier into a 340×420 PNG
//! badge: the two fields as text, the referral URL, and a QR code of that
//! URL with a soft drop shadow.
//!
//! # Features
//!
//! - **Payload**: `recruiter_id` is trimmed, lower-cased and base64 encoded into
//!   the referral URL; [`decode_recruiter_id`] reverses it
//! - **Composition**: deterministic layout, fonts from config or the system
//! - **Export**: `CEAT_DA_QR_<name>.png`, PNG bytes or a data URL
//! - **Scanning**: read the QR code back out of a finished badge
//!
//! # Example
//!
//! ```no_run
//! use recruit_badge::{BadgeComposer, BadgeSession, FontOptions, GenerationState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let composer = BadgeComposer::from_font_options(&FontOptions::default())?;
//!     let mut session = BadgeSession::new(Arc::new(composer));
//!
//!     if let GenerationState::Rendered(badge) = session.generate("Asha Rao", " REC123 ").await {
//!         println!("QR payload: {}", badge.payload());
//!     }
//!
//!     let path = session.download(std::path::Path::new(".")).await?;
//!     println!("Saved {}", path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod output;
pub mod payload;
pub mod qr;
pub mod request;
pub mod session;

// Re-exports for convenience
pub use error::{Error, Result};

pub use compose::{BadgeComposer, CANVAS_HEIGHT, CANVAS_WIDTH, ComposedBadge, FontSet};
pub use config::{BadgeConfig, FontOptions, LogRotation, LoggingOptions, OutputOptions, QrOptions};
pub use export::{data_url, download_filename, encode_png, save_to_dir};
pub use payload::{BASE_URL, Payload, build_payload, decode_recruiter_id, normalize_recruiter_id};
pub use qr::{QrDecoder, QrEncoder, QrRenderer, QrStyle, ScannedCode};
pub use request::BadgeRequest;
pub use session::{BadgeSession, GenerationState};

use image::DynamicImage;

/// Read a badge image and recover the payload URL and, when present, the
/// recruiter id.
pub fn scan_badge(image: &DynamicImage) -> Result<(String, Option<String>)> {
    let code = QrDecoder::new().decode(image)?;
    let text = code
        .as_str()
        .ok_or_else(|| Error::QrDecode("QR content is not UTF-8 text".to_string()))?
        .to_string();

    let recruiter_id = match decode_recruiter_id(&text) {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::debug!("QR payload is not a badge URL: {err}");
            None
        }
    };

    Ok((text, recruiter_id))
}
