use crate::snapshot::error::SnapshotError;
use crate::timeline::error::TimelineError;
use crate::types::geo_point::CoordinateError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = StationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StationError {
    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Station '{0}' not found")]
    StationNotFound(String),

    #[error("Station '{0}' already exists")]
    DuplicateStation(String),

    #[error("Batch column '{column}' has {found} values, expected {expected}")]
    ArityMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution,
}

impl StationError {
    /// Duplicate station names and duplicate location start times.
    pub fn is_conflict(&self) -> bool {
        match self {
            StationError::Timeline(e) => e.is_conflict(),
            StationError::DuplicateStation(_) => true,
            _ => false,
        }
    }

    pub fn is_invalid_range(&self) -> bool {
        matches!(self, StationError::Timeline(e) if e.is_invalid_range())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StationError::StationNotFound(_))
    }
}
