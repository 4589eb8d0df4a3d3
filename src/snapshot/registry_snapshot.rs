//! Persisting the registry: a compact bincode cache for fast restarts and a JSON form that can
//! be edited by hand or used to seed a fresh deployment.

use crate::registry::station_registry::StationRegistry;
use crate::snapshot::error::SnapshotError;
use crate::timeline::station_timeline::StationTimeline;
use crate::types::location_interval::LocationInterval;
use crate::types::station::StationInfo;
use bincode::config::{Configuration, Fixint, LittleEndian};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

/// One station and its full position history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub name: String,
    pub full_name: Option<String>,
    pub locations: Vec<LocationInterval>,
}

/// The persisted form of a [`StationRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub stations: Vec<StationSnapshot>,
}

impl RegistrySnapshot {
    pub fn location_count(&self) -> usize {
        self.stations.iter().map(|s| s.locations.len()).sum()
    }

    pub async fn read_bincode(path: &Path) -> Result<Self, SnapshotError> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || -> Result<Self, SnapshotError> {
            let bytes =
                std::fs::read(&path).map_err(|e| SnapshotError::CacheRead(path.clone(), e))?;
            let (snapshot, _) =
                bincode::serde::decode_from_slice::<RegistrySnapshot, _>(&bytes, BINCODE_CONFIG)
                    .map_err(|e| SnapshotError::CacheDecode(path.clone(), Box::new(e)))?;
            Ok(snapshot)
        })
        .await?
    }

    /// Writes the snapshot through a temporary file in the target directory, so readers never
    /// see a half-written cache.
    pub async fn write_bincode(&self, path: &Path) -> Result<(), SnapshotError> {
        let cache_start = std::time::Instant::now();
        let snapshot = self.clone();
        let bytes = tokio::task::spawn_blocking(move || {
            bincode::serde::encode_to_vec(&snapshot, BINCODE_CONFIG)
                .map_err(|e| SnapshotError::CacheEncode(Box::new(e)))
        })
        .await??;
        let written = bytes.len();
        Self::persist(path.to_path_buf(), bytes).await?;
        info!(
            "Wrote snapshot of {} stations ({} bytes) to {} in {:?}",
            self.stations.len(),
            written,
            path.display(),
            cache_start.elapsed()
        );
        Ok(())
    }

    pub async fn read_json(path: &Path) -> Result<Self, SnapshotError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SnapshotError::CacheRead(path.to_path_buf(), e))?;
        serde_json::from_slice(&bytes).map_err(|e| SnapshotError::JsonParse(path.to_path_buf(), e))
    }

    pub async fn write_json(&self, path: &Path) -> Result<(), SnapshotError> {
        let bytes = serde_json::to_vec_pretty(self).map_err(SnapshotError::JsonEncode)?;
        Self::persist(path.to_path_buf(), bytes).await
    }

    async fn persist(path: PathBuf, bytes: Vec<u8>) -> Result<(), SnapshotError> {
        tokio::task::spawn_blocking(move || {
            write_atomically(&path, &bytes).map_err(|e| SnapshotError::CacheWrite(path, e))
        })
        .await?
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl StationRegistry {
    /// Copies every station and its timeline into a [`RegistrySnapshot`].
    pub fn snapshot(&self) -> RegistrySnapshot {
        let stations = self
            .export()
            .into_iter()
            .map(|(info, timeline)| StationSnapshot {
                name: info.name,
                full_name: info.full_name,
                locations: timeline.intervals().cloned().collect(),
            })
            .collect();
        RegistrySnapshot { stations }
    }

    /// Rebuilds a registry from a snapshot, validating every timeline.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self, SnapshotError> {
        let registry = StationRegistry::new();
        for station in snapshot.stations {
            let StationSnapshot {
                name,
                full_name,
                locations,
            } = station;
            let timeline = StationTimeline::from_intervals(name.clone(), locations).map_err(
                |source| SnapshotError::InvalidTimeline {
                    station: name.clone(),
                    source,
                },
            )?;
            registry
                .insert_timeline(
                    StationInfo {
                        name: name.clone(),
                        full_name,
                    },
                    timeline,
                )
                .map_err(|_| SnapshotError::DuplicateStation(name))?;
        }
        Ok(registry)
    }
}
