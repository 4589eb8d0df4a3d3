//! Station metadata and the flat record shapes returned to callers: location records,
//! nearest-station results and batch (column) results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a station, as registered with [`StationRegistry::create_station`](crate::StationRegistry::create_station).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationInfo {
    /// Short unique name (e.g. "L4"). Lookups by name ignore case.
    pub name: String,
    /// Descriptive name (e.g. "Long-term station 4"), if provided.
    pub full_name: Option<String>,
}

impl StationInfo {
    /// Registry key for `name`: station names are unique regardless of case.
    pub(crate) fn key_for(name: &str) -> String {
        name.to_lowercase()
    }

    pub(crate) fn key(&self) -> String {
        Self::key_for(&self.name)
    }
}

/// A station's position over one interval, flattened for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationLocationRecord {
    pub station_name: String,
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
    pub start_time: DateTime<Utc>,
    /// `None` while the position is still current.
    pub end_time: Option<DateTime<Utc>>,
    /// Nominal depth in meters, if recorded.
    pub depth: Option<f64>,
    pub comment: Option<String>,
}

/// The station closest to a query point at the query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestStation {
    pub station_name: String,
    /// Latitude of the station's position at the query time.
    pub latitude: f64,
    /// Longitude of the station's position at the query time.
    pub longitude: f64,
    /// Great-circle distance from the query point, in kilometers.
    pub distance_km: f64,
}

/// Nearest-station assignments for a batch of observations, as parallel columns.
///
/// Index `i` of both columns corresponds to observation `i`; both entries are `None` when no
/// station had a recorded position at that observation's time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearestColumns {
    pub station: Vec<Option<String>>,
    pub distance_km: Vec<Option<f64>>,
}

impl FromIterator<(Option<String>, Option<f64>)> for NearestColumns {
    fn from_iter<T: IntoIterator<Item = (Option<String>, Option<f64>)>>(iter: T) -> Self {
        let (station, distance_km) = iter.into_iter().unzip();
        Self {
            station,
            distance_km,
        }
    }
}

impl NearestColumns {
    pub fn len(&self) -> usize {
        self.station.len()
    }

    pub fn is_empty(&self) -> bool {
        self.station.is_empty()
    }
}
