//! The set of known stations and the cross-station queries: where every station was at a given
//! time, and which station was nearest to an observed coordinate.
//!
//! Station counts are small (tens), so every query is a full scan over the stations; there is no
//! spatial index.

use crate::error::{Result, StationError};
use crate::timeline::station_timeline::{NewInterval, StationTimeline};
use crate::types::geo_point::GeoPoint;
use crate::types::location_interval::LocationInterval;
use crate::types::station::{NearestColumns, NearestStation, StationInfo, StationLocationRecord};
use crate::types::timestamp::IntoTimestamp;
use bon::bon;
use chrono::{DateTime, Utc};
use log::{debug, info};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct StationEntry {
    info: StationInfo,
    timeline: RwLock<StationTimeline>,
}

// Insertions validate fully before mutating, so a poisoned lock never guards a half-applied
// insert and the data can be used as is.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// All stations, each owning its position timeline.
///
/// The registry is shared by reference: station creation locks the station map, location
/// inserts lock only the affected station, and queries take read locks so they run concurrently
/// with each other.
///
/// # Examples
///
/// ```
/// use station_history::{GeoPoint, StationRegistry, StationError};
/// use chrono::{TimeZone, Utc};
///
/// # fn main() -> Result<(), StationError> {
/// let registry = StationRegistry::new();
/// registry.create_station().name("L4").full_name("Long-term station 4").call()?;
/// registry
///     .set_location()
///     .station("l4")
///     .position(GeoPoint::new(41.0, -71.0)?)
///     .start(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
///     .call()?;
///
/// let nearest = registry
///     .nearest(GeoPoint::new(41.01, -71.01)?, Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap())
///     .unwrap();
/// assert_eq!(nearest.station_name, "L4");
/// assert!(nearest.distance_km > 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct StationRegistry {
    stations: RwLock<BTreeMap<String, Arc<StationEntry>>>,
}

#[bon]
impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a station. Names are unique regardless of case.
    ///
    /// # Errors
    ///
    /// [`StationError::DuplicateStation`] if a station with the same name (ignoring case)
    /// already exists.
    #[builder]
    pub fn create_station(
        &self,
        #[builder(into)] name: String,
        #[builder(into)] full_name: Option<String>,
    ) -> Result<StationInfo> {
        let info = StationInfo { name, full_name };
        let timeline = StationTimeline::new(info.name.clone());
        self.insert_timeline(info.clone(), timeline)?;
        info!("Created station {}", info.name);
        Ok(info)
    }

    /// Records a position for a station from `start` onwards.
    ///
    /// Without `.end(...)` the position runs up to the next known position of the station, or
    /// stays current if there is none. The preceding position is closed at `start` when it was
    /// still open or ran up to the next known position. The insert runs under the station's
    /// write lock, so concurrent inserts for the same station are serialized and readers never
    /// observe a partial update.
    ///
    /// # Errors
    ///
    /// * [`StationError::StationNotFound`] for an unknown station.
    /// * [`StationError::Timeline`] when the start time is already taken or the time range is
    ///   empty or overlaps a known position. Nothing is changed in that case.
    #[builder]
    pub fn set_location(
        &self,
        station: &str,
        position: GeoPoint,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        depth: Option<f64>,
        #[builder(into)] comment: Option<String>,
    ) -> Result<LocationInterval> {
        let entry = self.entry(station)?;
        let new = NewInterval::builder()
            .position(position)
            .start(start)
            .maybe_end(end)
            .maybe_depth(depth)
            .maybe_comment(comment)
            .build();

        let mut timeline = write(&entry.timeline);
        let interval = timeline.insert(new)?.clone();
        info!(
            "Set location of station {} to {} from {} until {:?}",
            entry.info.name,
            interval.position(),
            interval.start_time(),
            interval.end_time()
        );
        Ok(interval)
    }
}

impl StationRegistry {
    pub(crate) fn insert_timeline(&self, info: StationInfo, timeline: StationTimeline) -> Result<()> {
        let mut stations = write(&self.stations);
        match stations.entry(info.key()) {
            Entry::Occupied(existing) => Err(StationError::DuplicateStation(
                existing.get().info.name.clone(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(StationEntry {
                    info,
                    timeline: RwLock::new(timeline),
                }));
                Ok(())
            }
        }
    }

    /// Every station with a copy of its timeline, in station key order.
    pub(crate) fn export(&self) -> Vec<(StationInfo, StationTimeline)> {
        self.entries()
            .into_iter()
            .map(|entry| (entry.info.clone(), read(&entry.timeline).clone()))
            .collect()
    }

    fn entry(&self, name: &str) -> Result<Arc<StationEntry>> {
        read(&self.stations)
            .get(&StationInfo::key_for(name))
            .cloned()
            .ok_or_else(|| StationError::StationNotFound(name.to_string()))
    }

    // Entries in station key order; the map lock is released before any timeline is read.
    fn entries(&self) -> Vec<Arc<StationEntry>> {
        read(&self.stations).values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        read(&self.stations).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.stations).is_empty()
    }

    /// Every registered station, ordered by lower-cased name.
    pub fn stations(&self) -> Vec<StationInfo> {
        self.entries()
            .into_iter()
            .map(|entry| entry.info.clone())
            .collect()
    }

    pub fn station(&self, name: &str) -> Option<StationInfo> {
        self.entry(name).ok().map(|entry| entry.info.clone())
    }

    /// A copy of one station's full timeline.
    pub fn timeline(&self, name: &str) -> Result<StationTimeline> {
        let entry = self.entry(name)?;
        let timeline = read(&entry.timeline).clone();
        Ok(timeline)
    }

    /// Where `name` was at `at`. `Ok(None)` means the station exists but had no recorded
    /// position at that time.
    pub fn location_of(
        &self,
        name: &str,
        at: impl IntoTimestamp,
    ) -> Result<Option<LocationInterval>> {
        let entry = self.entry(name)?;
        let interval = read(&entry.timeline).lookup(at).cloned();
        Ok(interval)
    }

    /// One `(station name, interval)` pair per station with a position at `at`, in station key
    /// order.
    pub fn all_active(&self, at: impl IntoTimestamp) -> Vec<(String, LocationInterval)> {
        let at = at.into_timestamp();
        self.entries()
            .into_iter()
            .filter_map(|entry| {
                let interval = read(&entry.timeline).lookup(at).cloned()?;
                Some((entry.info.name.clone(), interval))
            })
            .collect()
    }

    /// [`all_active`](Self::all_active) flattened into transport records.
    pub fn locations_at(&self, at: impl IntoTimestamp) -> Vec<StationLocationRecord> {
        self.all_active(at)
            .into_iter()
            .map(|(_, interval)| interval.to_record())
            .collect()
    }

    /// The station whose position at `at` is closest to `point`.
    ///
    /// Exact distance ties go to the station whose lower-cased name sorts first. Returns `None`
    /// when no station had a position at `at`.
    pub fn nearest(&self, point: GeoPoint, at: impl IntoTimestamp) -> Option<NearestStation> {
        let at = at.into_timestamp();
        let nearest = self
            .entries()
            .into_iter()
            .filter_map(|entry| {
                let position = read(&entry.timeline).lookup(at)?.position();
                let distance_km = point.distance_to(&position);
                Some((OrderedFloat(distance_km), entry, position))
            })
            // min_by keeps the first of equal elements, i.e. the lowest station key.
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(distance_km, entry, position)| NearestStation {
                station_name: entry.info.name.clone(),
                latitude: position.latitude(),
                longitude: position.longitude(),
                distance_km: distance_km.into_inner(),
            });
        debug!(
            "Nearest station to {} at {}: {:?}",
            point,
            at,
            nearest.as_ref().map(|n| (&n.station_name, n.distance_km))
        );
        nearest
    }

    /// Element-wise [`nearest`](Self::nearest): entry `i` of the output is the nearest station
    /// name and distance for `points[i]` at `timestamps[i]`, or `(None, None)`.
    ///
    /// Elements are resolved in parallel.
    ///
    /// # Errors
    ///
    /// [`StationError::ArityMismatch`] when the inputs differ in length.
    pub fn nearest_batch(
        &self,
        points: &[GeoPoint],
        timestamps: &[DateTime<Utc>],
    ) -> Result<Vec<(Option<String>, Option<f64>)>> {
        if timestamps.len() != points.len() {
            return Err(StationError::ArityMismatch {
                column: "timestamp",
                expected: points.len(),
                found: timestamps.len(),
            });
        }
        let resolved: Vec<_> = points
            .par_iter()
            .zip(timestamps.par_iter())
            .map(|(point, at)| match self.nearest(*point, *at) {
                Some(nearest) => (Some(nearest.station_name), Some(nearest.distance_km)),
                None => (None, None),
            })
            .collect();
        info!(
            "Assigned nearest stations to {} of {} observations",
            resolved.iter().filter(|(name, _)| name.is_some()).count(),
            resolved.len()
        );
        Ok(resolved)
    }

    /// [`nearest_batch`](Self::nearest_batch) over parallel coordinate columns, as received from
    /// tabular observation logs.
    ///
    /// # Errors
    ///
    /// [`StationError::ArityMismatch`] when the columns differ in length (checked before any
    /// coordinate is validated), [`StationError::Coordinate`] for an invalid coordinate.
    pub fn nearest_columns(
        &self,
        latitudes: &[f64],
        longitudes: &[f64],
        timestamps: &[DateTime<Utc>],
    ) -> Result<NearestColumns> {
        for (column, found) in [("longitude", longitudes.len()), ("timestamp", timestamps.len())] {
            if found != latitudes.len() {
                return Err(StationError::ArityMismatch {
                    column,
                    expected: latitudes.len(),
                    found,
                });
            }
        }
        let points = latitudes
            .iter()
            .zip(longitudes)
            .map(|(lat, lon)| GeoPoint::new(*lat, *lon))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(self.nearest_batch(&points, timestamps)?.into_iter().collect())
    }
}
