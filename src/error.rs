//! Error type shared by the driver and the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MigrationError>;

#[derive(Debug, Error)]
pub enum MigrationError {
    /// The input is valid JSON but a path the migration relies on is absent
    /// or has the wrong shape. Displays the decoder's message as is.
    #[error(transparent)]
    MissingPath(serde_json::Error),

    #[error("genesis is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to encode migrated genesis: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chain id must not be blank: {0:?}")]
    InvalidChainId(String),

    #[error("invalid genesis time {value:?}: {source}")]
    InvalidGenesisTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl MigrationError {
    /// Classify a deserialization failure: shape problems become
    /// `MissingPath`, anything else is a plain parse error.
    pub fn from_decode(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => MigrationError::MissingPath(err),
            _ => MigrationError::Parse(err),
        }
    }
}
