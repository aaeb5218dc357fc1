use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the preview library itself.
///
/// Runtime construction errors are not wrapped here; they travel as
/// `anyhow::Error` straight out of `PreviewController::mount`.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("no item named `{0}` in the current listing")]
    NotFound(String),

    #[error("`{0}` has no playable items")]
    EmptyListing(PathBuf),

    #[error("player is already mounted")]
    AlreadyMounted,

    #[error("controller was released; build a fresh one to play again")]
    Released,

    #[error("failed to read listing at {path}")]
    Listing {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PreviewError>;
