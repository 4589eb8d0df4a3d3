use crate::timeline::error::TimelineError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write snapshot file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode snapshot data from '{0}'")]
    CacheDecode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("Failed to encode snapshot data")]
    CacheEncode(#[source] Box<bincode::error::EncodeError>),

    #[error("Failed to parse JSON snapshot '{0}'")]
    JsonParse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode JSON snapshot")]
    JsonEncode(#[source] serde_json::Error),

    #[error("Snapshot contains an invalid timeline for station '{station}'")]
    InvalidTimeline {
        station: String,
        #[source]
        source: TimelineError,
    },

    #[error("Snapshot lists station '{0}' more than once")]
    DuplicateStation(String),

    // Covers errors joining tokio blocking tasks
    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
