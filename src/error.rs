//! Error types for showreel

use thiserror::Error;

/// Result type alias for showreel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the crate's fallible operations.
///
/// Playback failures are not represented here: resource errors and autoplay
/// rejections are absorbed by the media controller and show up as state.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The shell context was used outside its mount/unmount window
    #[error("Shell context is not mounted")]
    NotMounted,

    /// An index past the end of a collection
    #[error("Index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// A section was asked about a card it does not hold
    #[error("Unknown card: {0}")]
    UnknownCard(usize),

    /// A scenario file could not be read or parsed
    #[error("Scenario error: {0}")]
    ScenarioError(String),

    /// The card driver's worker has already shut down
    #[error("Card has been unmounted")]
    Disposed,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ScenarioError(err.to_string())
    }
}
