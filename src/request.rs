//! Badge input validation

use crate::error::{Error, Result};
use crate::payload::normalize_recruiter_id;
use serde::Serialize;

/// The two user-supplied fields of a badge.
///
/// Only constructible through [`BadgeRequest::new`], so a value in hand has
/// passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeRequest {
    name: String,
    recruiter_id: String,
}

impl BadgeRequest {
    /// Validate raw form input.
    ///
    /// `name` is taken as typed and only has to be non-empty. `recruiter_id`
    /// must contain something other than whitespace.
    pub fn new(name: impl Into<String>, recruiter_id: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let recruiter_id = recruiter_id.into();

        if name.is_empty() || recruiter_id.trim().is_empty() {
            return Err(Error::missing_fields());
        }

        Ok(Self { name, recruiter_id })
    }

    /// Name exactly as entered
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recruiter id exactly as entered
    pub fn raw_recruiter_id(&self) -> &str {
        &self.recruiter_id
    }

    /// Recruiter id as printed on the badge and embedded in the payload
    pub fn recruiter_id(&self) -> String {
        normalize_recruiter_id(&self.recruiter_id)
    }
}
