use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("Station '{station}' already has a location starting at {start}")]
    DuplicateStart {
        station: String,
        start: DateTime<Utc>,
    },

    #[error("End time {end} is not after start time {start} for station '{station}'")]
    EndNotAfterStart {
        station: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("End time {end} for station '{station}' overlaps the location starting at {successor_start}")]
    OverlapsSuccessor {
        station: String,
        end: DateTime<Utc>,
        successor_start: DateTime<Utc>,
    },

    #[error("Start time {start} for station '{station}' falls inside the location {predecessor_start} - {predecessor_end}")]
    OverlapsPredecessor {
        station: String,
        start: DateTime<Utc>,
        predecessor_start: DateTime<Utc>,
        predecessor_end: DateTime<Utc>,
    },

    // Only raised when rebuilding a timeline from stored intervals
    #[error("Station '{station}' has more than one open location ({first} and {second})")]
    MultipleOpen {
        station: String,
        first: DateTime<Utc>,
        second: DateTime<Utc>,
    },

    #[error("Open location {open_start} for station '{station}' is followed by a location at {later_start}")]
    OpenNotLatest {
        station: String,
        open_start: DateTime<Utc>,
        later_start: DateTime<Utc>,
    },

    #[error("Location starting at {start} belongs to station '{found}', not '{station}'")]
    ForeignInterval {
        station: String,
        found: String,
        start: DateTime<Utc>,
    },
}

impl TimelineError {
    /// The new location collides with an existing one at the same start time.
    pub fn is_conflict(&self) -> bool {
        matches!(self, TimelineError::DuplicateStart { .. })
    }

    /// The requested time range is empty, reversed, or overlaps known locations.
    pub fn is_invalid_range(&self) -> bool {
        matches!(
            self,
            TimelineError::EndNotAfterStart { .. }
                | TimelineError::OverlapsSuccessor { .. }
                | TimelineError::OverlapsPredecessor { .. }
                | TimelineError::MultipleOpen { .. }
                | TimelineError::OpenNotLatest { .. }
        )
    }
}
