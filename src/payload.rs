//! Referral payload construction
//!
//! The payload is the URL encoded into the badge's QR code. It carries the
//! recruiter identifier as a base64 token in the `recruiter_id` query
//! parameter. Scanning parties reverse the encoding with
//! [`decode_recruiter_id`].

use crate::error::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Landing page every badge points at.
pub const BASE_URL: &str = "https://www.freshersworld.com/ceat-apprentice-da-test";

/// Query parameter carrying the encoded recruiter id.
pub const RECRUITER_PARAM: &str = "recruiter_id";

/// A built referral URL together with its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Full URL embedded in the QR code
    pub url: String,
    /// Trimmed, lower-cased recruiter id
    pub recruiter_id: String,
    /// Base64 form of `recruiter_id` as it appears in the URL
    pub token: String,
}

impl Payload {
    /// The URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize_recruiter_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Build the referral payload for a raw recruiter id.
///
/// The token is standard padded base64 over the UTF-8 bytes of the
/// normalized id and is embedded without percent-encoding.
pub fn build_payload(raw_recruiter_id: &str) -> Payload {
    let recruiter_id = normalize_recruiter_id(raw_recruiter_id);
    let token = STANDARD.encode(recruiter_id.as_bytes());
    let url = format!("{BASE_URL}?{RECRUITER_PARAM}={token}");

    Payload {
        url,
        recruiter_id,
        token,
    }
}

/// Recover the normalized recruiter id from a payload URL.
///
/// The parameter value is read verbatim: form-decoding would turn the
/// base64 `+` into a space.
pub fn decode_recruiter_id(url: &str) -> Result<String> {
    let token = recruiter_token(url).ok_or_else(|| {
        Error::PayloadDecode(format!("missing '{RECRUITER_PARAM}' parameter in {url}"))
    })?;
    let bytes = STANDARD.decode(token)?;
    String::from_utf8(bytes)
        .map_err(|e| Error::PayloadDecode(format!("recruiter id is not valid UTF-8: {e}")))
}

fn recruiter_token(url: &str) -> Option<&str> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == RECRUITER_PARAM).then_some(value)
    })
}
