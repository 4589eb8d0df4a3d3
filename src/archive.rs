//! This module provides the main entry point: a [`StationRegistry`] backed by a snapshot in a
//! cache folder, with query methods that default to "now" when no time is given.

use crate::error::{Result, StationError};
use crate::registry::station_registry::StationRegistry;
use crate::snapshot::error::SnapshotError;
use crate::snapshot::registry_snapshot::RegistrySnapshot;
use crate::types::geo_point::GeoPoint;
use crate::types::station::{NearestStation, StationLocationRecord};
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use bon::bon;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::path::{Path, PathBuf};

const SNAPSHOT_FILE_NAME: &str = "stations.bin";

/// A station registry persisted in a cache folder.
///
/// Create an instance with [`StationArchive::new()`] to use the default cache directory or
/// [`StationArchive::with_cache_folder()`] to choose one. The registry is restored from the
/// folder's snapshot if there is one; call [`StationArchive::save()`] to write changes back.
///
/// # Examples
///
/// ```no_run
/// # use station_history::{GeoPoint, StationArchive, StationError};
/// # async fn run() -> Result<(), StationError> {
/// let archive = StationArchive::new().await?;
/// let nearest = archive
///     .nearest()
///     .point(GeoPoint::new(41.2, -70.9)?)
///     .call();
/// if let Some(nearest) = nearest {
///     println!("{} is {:.1} km away", nearest.station_name, nearest.distance_km);
/// }
/// # Ok(())
/// # }
/// ```
pub struct StationArchive {
    registry: StationRegistry,
    cache_folder: PathBuf,
}

#[bon]
impl StationArchive {
    /// Opens (or creates) an archive in `cache_folder`.
    ///
    /// # Errors
    ///
    /// * [`StationError::CacheDirCreation`] if the folder cannot be created.
    /// * [`StationError::Snapshot`] if the snapshot file cannot be checked or read, or holds an
    ///   invalid timeline.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self> {
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| StationError::CacheDirCreation(cache_folder.clone(), e))?;

        let snapshot_file = cache_folder.join(SNAPSHOT_FILE_NAME);
        // Only a confirmed absence starts an empty registry.
        let snapshot_exists = tokio::fs::try_exists(&snapshot_file)
            .await
            .map_err(|e| SnapshotError::CacheRead(snapshot_file.clone(), e))?;
        let registry = if snapshot_exists {
            let snapshot = RegistrySnapshot::read_bincode(&snapshot_file).await?;
            info!(
                "Restored {} stations with {} locations from {}",
                snapshot.stations.len(),
                snapshot.location_count(),
                snapshot_file.display()
            );
            StationRegistry::from_snapshot(snapshot)?
        } else {
            warn!(
                "No station snapshot found at {}, starting empty",
                snapshot_file.display()
            );
            StationRegistry::new()
        };

        Ok(Self {
            registry,
            cache_folder,
        })
    }

    /// Opens the archive in the default cache directory (`<cache>/station_history_cache`).
    ///
    /// # Errors
    ///
    /// [`StationError::CacheDirResolution`] if the platform has no cache directory, otherwise
    /// as [`StationArchive::with_cache_folder()`].
    pub async fn new() -> Result<Self> {
        let cache_folder = get_cache_dir().ok_or(StationError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn cache_folder(&self) -> &Path {
        &self.cache_folder
    }

    /// Writes the current registry to the cache folder's snapshot.
    pub async fn save(&self) -> Result<()> {
        let snapshot = self.registry.snapshot();
        snapshot
            .write_bincode(&self.cache_folder.join(SNAPSHOT_FILE_NAME))
            .await?;
        Ok(())
    }

    /// Replays the stations and locations of a JSON snapshot into this archive.
    ///
    /// Unknown stations are created; locations go through the normal insertion checks in
    /// chronological order with their recorded end times. Returns the number of locations
    /// added. Import stops at the first rejected location; everything before it stays.
    pub async fn import_json(&self, path: &Path) -> Result<usize> {
        let snapshot = RegistrySnapshot::read_json(path).await?;
        let mut added = 0;
        for mut station in snapshot.stations {
            if self.registry.station(&station.name).is_none() {
                self.registry
                    .create_station()
                    .name(station.name.clone())
                    .maybe_full_name(station.full_name.clone())
                    .call()?;
            }
            station.locations.sort_by_key(|location| location.start_time());
            for location in station.locations {
                self.registry
                    .set_location()
                    .station(&station.name)
                    .position(location.position())
                    .start(location.start_time())
                    .maybe_end(location.end_time())
                    .maybe_depth(location.depth())
                    .maybe_comment(location.comment())
                    .call()?;
                added += 1;
            }
        }
        info!("Imported {} locations from {}", added, path.display());
        Ok(added)
    }

    /// Writes the current registry as a human-readable JSON snapshot.
    pub async fn export_json(&self, path: &Path) -> Result<()> {
        self.registry.snapshot().write_json(path).await?;
        Ok(())
    }

    /// Finds the station nearest to a point.
    ///
    /// * `.point(GeoPoint)`: **Required.** The observed coordinate.
    /// * `.at(DateTime<Utc>)`: Optional. The observation time. Defaults to now.
    #[builder]
    pub fn nearest(&self, point: GeoPoint, at: Option<DateTime<Utc>>) -> Option<NearestStation> {
        self.registry.nearest(point, at.unwrap_or_else(Utc::now))
    }

    /// Lists the position of every station that had one at the given time.
    ///
    /// * `.at(DateTime<Utc>)`: Optional. Defaults to now.
    #[builder]
    pub fn stations_at(&self, at: Option<DateTime<Utc>>) -> Vec<StationLocationRecord> {
        self.registry.locations_at(at.unwrap_or_else(Utc::now))
    }

    /// Where one station was at the given time.
    ///
    /// * `.station(&str)`: **Required.** Station name, any case.
    /// * `.at(DateTime<Utc>)`: Optional. Defaults to now.
    #[builder]
    pub fn location(
        &self,
        station: &str,
        at: Option<DateTime<Utc>>,
    ) -> Result<Option<StationLocationRecord>> {
        let interval = self
            .registry
            .location_of(station, at.unwrap_or_else(Utc::now))?;
        Ok(interval.map(|interval| interval.to_record()))
    }
}
