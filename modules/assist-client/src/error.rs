use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistError>;

/// The caller treats every variant identically — any failure falls through
/// to the heuristic generator — so the split exists for logging, not
/// control flow.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for AssistError {
    fn from(err: reqwest::Error) -> Self {
        AssistError::Network(err.to_string())
    }
}
