use thiserror::Error;

/// Pipeline errors that cross a module boundary. Field absence and
/// container-not-found are not errors — they are flags and lifecycle
/// states — so this stays small.
#[derive(Error, Debug)]
pub enum MetaliftError {
    #[error("Injection error: {0}")]
    Injection(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
