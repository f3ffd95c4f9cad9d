//! Helpers for presenting generation and scan results

use crate::compose::ComposedBadge;
use crate::export::download_filename;
use crate::session::GenerationState;
use serde_json::{Map, Value, json};
use std::path::Path;

/// Combined structured and human-readable representation of a result
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Structured JSON representation suitable for downstream consumers
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render the outcome of a generation attempt, with the export path if the
/// badge was saved.
pub fn render_generation(state: &GenerationState, saved: Option<&Path>) -> Rendered {
    let mut root = Map::new();
    root.insert(
        "status".to_string(),
        Value::String(state.label().to_string()),
    );
    let mut human = Vec::new();

    match state {
        GenerationState::Idle => human.push("No badge generated".to_string()),
        GenerationState::ValidationFailed(message) | GenerationState::RenderFailed(message) => {
            root.insert("error".to_string(), Value::String(message.clone()));
            human.push(message.clone());
        }
        GenerationState::Rendered(badge) => {
            root.insert("badge".to_string(), badge_value(badge));
            human.push("Badge generated".to_string());
            human.push(format!("  Name: {}", badge.request().name()));
            human.push(format!(
                "  Recruiter ID: {}",
                badge.payload().recruiter_id
            ));
            human.push(format!("  Payload: {}", badge.payload()));
            let (width, height) = badge.dimensions();
            human.push(format!("  Image: {width}x{height} PNG"));
        }
    }

    if let Some(path) = saved {
        root.insert(
            "file".to_string(),
            Value::String(path.display().to_string()),
        );
        human.push(format!("  Saved to: {}", path.display()));
    }

    Rendered {
        json: Value::Object(root),
        human,
    }
}

/// Structured description of a composed badge
pub fn badge_value(badge: &ComposedBadge) -> Value {
    let (width, height) = badge.dimensions();
    json!({
        "name": badge.request().name(),
        "recruiter_id": badge.payload().recruiter_id,
        "token": badge.payload().token,
        "payload": badge.payload().url,
        "width": width,
        "height": height,
        "filename": download_filename(badge.request().name()),
    })
}

/// Render a scanned badge: the QR text and, when it is a badge URL, the
/// recovered recruiter id.
pub fn render_scan(text: &str, recruiter_id: Option<&str>) -> Rendered {
    let json = json!({
        "payload": text,
        "recruiter_id": recruiter_id,
    });

    let mut human = vec![format!("QR text: {text}")];
    match recruiter_id {
        Some(id) => human.push(format!("Recruiter ID: {id}")),
        None => human.push("No recruiter ID in payload".to_string()),
    }

    Rendered { json, human }
}
