use crate::types::geo_point::GeoPoint;
use crate::types::station::StationLocationRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded position of a station, valid from `start_time` (inclusive) up to `end_time`
/// (exclusive). A missing `end_time` means the position is still current.
///
/// Intervals are created by [`StationTimeline`](crate::StationTimeline) and only ever change by
/// having their end time set when a more recent position is inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInterval {
    station: String,
    position: GeoPoint,
    depth: Option<f64>,
    comment: Option<String>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

impl LocationInterval {
    pub(crate) fn new(
        station: String,
        position: GeoPoint,
        depth: Option<f64>,
        comment: Option<String>,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            station,
            position,
            depth,
            comment,
            start_time,
            end_time,
        }
    }

    /// Name of the station this interval belongs to.
    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Nominal depth in meters, if recorded.
    pub fn depth(&self) -> Option<f64> {
        self.depth
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// `true` when `timestamp` falls in `[start_time, end_time)`.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start_time <= timestamp && self.end_time.map_or(true, |end| timestamp < end)
    }

    /// Exclusive upper bound; open intervals extend forever.
    pub(crate) fn overlaps(&self, other: &LocationInterval) -> bool {
        let self_before_other_ends = other.end_time.map_or(true, |end| self.start_time < end);
        let other_before_self_ends = self.end_time.map_or(true, |end| other.start_time < end);
        self_before_other_ends && other_before_self_ends
    }

    pub(crate) fn close_at(&mut self, end_time: DateTime<Utc>) {
        self.end_time = Some(end_time);
    }

    /// Flattens the interval into the record shape handed to transport layers.
    pub fn to_record(&self) -> StationLocationRecord {
        StationLocationRecord {
            station_name: self.station.clone(),
            latitude: self.position.latitude(),
            longitude: self.position.longitude(),
            start_time: self.start_time,
            end_time: self.end_time,
            depth: self.depth,
            comment: self.comment.clone(),
        }
    }
}
