//! Error types for the map client
//!
//! Every failure the user can see is a `MapError`. The `Display` text is
//! exactly what ends up in the alert dialog.

use std::path::PathBuf;

/// Status code every server endpoint is expected to answer with
pub const EXPECTED_STATUS: u16 = 200;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// The server answered, but not with a success status
    #[error("The status is wrong! Expected: {expected}, Was: {actual}")]
    BadStatus { expected: u16, actual: u16 },

    /// The request never completed, or the body could not be parsed
    #[error("There was an error contacting the server: {0}")]
    Transport(String),

    /// Start and end resolve to the same building
    #[error("We can't find a path from one building to itself! ({code})")]
    InvalidQuery { code: String },

    /// The background map image could not be read or decoded
    #[error("Could not load map image {}: {reason}", .path.display())]
    Background { path: PathBuf, reason: String },

    /// Writing a route snapshot failed
    #[error("Could not export snapshot: {0}")]
    Snapshot(String),

    /// A configuration value is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MapError {
    pub fn bad_status(actual: u16) -> Self {
        Self::BadStatus { expected: EXPECTED_STATUS, actual }
    }

    /// Short title for the alert dialog
    pub fn title(&self) -> &'static str {
        match self {
            Self::BadStatus { .. } | Self::Transport(_) => "Server error",
            Self::InvalidQuery { .. } => "Invalid route",
            Self::Background { .. } => "Map image",
            Self::Snapshot(_) => "Export failed",
            Self::Config(_) => "Configuration",
        }
    }
}

impl From<reqwest::Error> for MapError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type MapResult<T> = Result<T, MapError>;
