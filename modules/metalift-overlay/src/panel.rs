use tracing::{info, warn};

use metalift_common::{InjectionState, ScoreResult};
use metalift_score::MAX_CONDENSED_SUGGESTIONS;

/// Where a generated field came from. Surfaced to the user so a heuristic
/// replacement is never mistaken for an AI one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOrigin {
    Generated,
    Heuristic,
}

/// A replacement value for one field, ready for the panel to offer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Title(String),
    Description(String),
    Tags(Vec<String>),
}

/// Lifecycle and action messaging for the panel. Success and Info are both
/// non-error: Info marks the heuristic path, Failure marks a page visit the
/// overlay could not attach to.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Info(String),
    Failure(String),
}

/// Presentation boundary. The pipeline never renders; it hands results and
/// lifecycle transitions to whatever implements this.
pub trait PanelSink: Send + Sync {
    fn attached(&self);
    fn detached(&self);
    fn state_changed(&self, state: InjectionState);
    fn score_updated(&self, score: &ScoreResult);
    fn field_generated(&self, update: &FieldUpdate, origin: UpdateOrigin);
    fn notify(&self, notice: &Notice);
}

/// Panel that renders to the log. Used by the dry-run binary and as a
/// stand-in wherever no real panel is wired up.
pub struct LogPanel;

impl PanelSink for LogPanel {
    fn attached(&self) {
        info!("Panel attached");
    }

    fn detached(&self) {
        info!("Panel detached");
    }

    fn state_changed(&self, state: InjectionState) {
        info!(%state, "Injection state");
    }

    fn score_updated(&self, score: &ScoreResult) {
        info!(
            overall = score.overall_score,
            grade = %score.grade,
            title = score.component_scores.title,
            description = score.component_scores.description,
            tags = score.component_scores.tags,
            "Score updated"
        );
        for suggestion in score.top_suggestions(MAX_CONDENSED_SUGGESTIONS) {
            info!(%suggestion, "Suggestion");
        }
    }

    fn field_generated(&self, update: &FieldUpdate, origin: UpdateOrigin) {
        info!(?origin, ?update, "Field generated");
    }

    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::Success(msg) | Notice::Info(msg) => info!(%msg, "Panel notice"),
            Notice::Failure(msg) => warn!(%msg, "Panel notice"),
        }
    }
}
