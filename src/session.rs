//! Generation state machine
//!
//! A [`BadgeSession`] stands in for the input form: each call to
//! [`BadgeSession::generate`] moves it to a new [`GenerationState`], and the
//! most recent successful badge stays available for export until another
//! generation succeeds.

use crate::compose::{BadgeComposer, ComposedBadge};
use crate::error::{Error, Result};
use crate::export;
use crate::qr::{QrEncoder, QrRenderer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of the latest generation attempt
#[derive(Debug, Clone, Default)]
pub enum GenerationState {
    /// Nothing attempted yet
    #[default]
    Idle,
    /// Input was rejected; carries the user-facing message
    ValidationFailed(String),
    /// A badge was produced
    Rendered(Arc<ComposedBadge>),
    /// Rendering failed; carries the user-facing message
    RenderFailed(String),
}

impl GenerationState {
    /// Short machine-readable label
    pub fn label(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::ValidationFailed(_) => "validation_failed",
            GenerationState::Rendered(_) => "rendered",
            GenerationState::RenderFailed(_) => "render_failed",
        }
    }

    /// User-facing error message, if the attempt failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationState::ValidationFailed(message)
            | GenerationState::RenderFailed(message) => Some(message),
            _ => None,
        }
    }

    /// The badge produced by this attempt, if any
    pub fn badge(&self) -> Option<&ComposedBadge> {
        match self {
            GenerationState::Rendered(badge) => Some(badge),
            _ => None,
        }
    }
}

/// One user's generate/download workflow.
pub struct BadgeSession<R = QrEncoder> {
    composer: Arc<BadgeComposer<R>>,
    state: GenerationState,
    displayed: Option<Arc<ComposedBadge>>,
}

impl<R> BadgeSession<R>
where
    R: QrRenderer + 'static,
{
    /// Start an idle session backed by `composer`.
    pub fn new(composer: Arc<BadgeComposer<R>>) -> Self {
        Self {
            composer,
            state: GenerationState::Idle,
            displayed: None,
        }
    }

    /// State after the latest attempt
    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Badge currently on display: the last one that rendered successfully
    pub fn displayed(&self) -> Option<&ComposedBadge> {
        self.displayed.as_deref()
    }

    /// Whether there is a badge to export
    pub fn can_download(&self) -> bool {
        self.displayed.is_some()
    }

    /// Validate and render a badge.
    ///
    /// Composition runs on the blocking pool. The displayed badge is only
    /// replaced when rendering succeeds.
    pub async fn generate(&mut self, name: &str, recruiter_id: &str) -> &GenerationState {
        let composer = Arc::clone(&self.composer);
        let name = name.to_owned();
        let recruiter_id = recruiter_id.to_owned();

        let outcome = tokio::task::spawn_blocking(move || composer.generate(&name, &recruiter_id))
            .await
            .map_err(Error::from)
            .and_then(|result| result);

        self.state = match outcome {
            Ok(badge) => {
                let badge = Arc::new(badge);
                tracing::info!(
                    recruiter_id = %badge.payload().recruiter_id,
                    "Badge generated"
                );
                self.displayed = Some(Arc::clone(&badge));
                GenerationState::Rendered(badge)
            }
            Err(err) if err.is_validation() => {
                tracing::debug!("Badge input rejected: {err}");
                GenerationState::ValidationFailed(err.user_message().to_string())
            }
            Err(err) => {
                tracing::error!(error = %err, "Badge generation failed");
                GenerationState::RenderFailed(err.user_message().to_string())
            }
        };

        &self.state
    }

    /// Export the displayed badge as `CEAT_DA_QR_<name>.png` into `dir`.
    pub async fn download(&self, dir: &Path) -> Result<PathBuf> {
        let badge = self.displayed.as_deref().ok_or(Error::NothingToExport)?;
        export::save_to_dir(badge, dir).await
    }
}
