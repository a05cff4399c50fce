//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the local result store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing store could not be reached or opened.
    #[error("result store unavailable: {0}")]
    Unavailable(String),

    /// A record could not be written.
    #[error("failed to write result: {0}")]
    Write(String),

    /// A query failed.
    #[error("query failed: {0}")]
    Query(String),
}

/// Failures of the remote profile/sync collaborator.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("network error: {0}")]
    Network(String),

    #[error("sync rejected: {0}")]
    Rejected(String),
}

/// Failures while loading [`crate::config::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures talking to a running session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session task has stopped and no longer accepts commands.
    #[error("session has ended")]
    Closed,

    #[error("session task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
