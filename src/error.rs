//! Error types for badge generation

use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when a required input field is missing.
pub const VALIDATION_MESSAGE: &str = "Both name and recruiter ID are required.";

/// Generic message shown for any failure while rendering a badge.
pub const RENDER_FAILURE_MESSAGE: &str = "Something went wrong while generating QR code.";

/// Main error type for badge operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required input missing
    #[error("{0}")]
    Validation(String),

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Payload URL could not be decoded back into a recruiter id
    #[error("Invalid badge payload: {0}")]
    PayloadDecode(String),

    /// Font loading or parsing failed
    #[error("Font error: {0}")]
    Font(String),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Export to disk failed
    #[error("Export failed: {0}")]
    Export(String),

    /// Export requested before any badge was rendered
    #[error("No badge has been generated yet")]
    NothingToExport,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for the single validation rule of the generator.
    pub fn missing_fields() -> Self {
        Error::Validation(VALIDATION_MESSAGE.to_string())
    }

    /// Whether this is an input validation failure rather than a render failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// The message presented to the user. Render failures collapse into one
    /// generic string; details only go to the log.
    pub fn user_message(&self) -> &str {
        match self {
            Error::Validation(message) => message,
            _ => RENDER_FAILURE_MESSAGE,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::PayloadDecode(format!("base64 decode error: {e}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::Other(format!("Hex decode error: {}", e))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Other(format!("Background task failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_passed_through() {
        let err = Error::missing_fields();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), VALIDATION_MESSAGE);
        assert_eq!(err.to_string(), VALIDATION_MESSAGE);
    }

    #[test]
    fn render_failures_share_generic_message() {
        for err in [
            Error::QrEncode("data too long".into()),
            Error::Font("bad table".into()),
            Error::Image("encoder".into()),
        ] {
            assert!(!err.is_validation());
            assert_eq!(err.user_message(), RENDER_FAILURE_MESSAGE);
        }
    }
}
