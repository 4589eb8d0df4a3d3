mod archive;
mod error;
mod registry;
mod snapshot;
mod timeline;
mod types;
mod utils;

pub use archive::StationArchive;
pub use error::{Result, StationError};

pub use registry::station_registry::StationRegistry;

pub use timeline::error::TimelineError;
pub use timeline::station_timeline::{plan_insertion, InsertionPlan, NewInterval, StationTimeline};

pub use types::geo_point::{CoordinateError, GeoPoint};
pub use types::location_interval::LocationInterval;
pub use types::station::*;
pub use types::timestamp::IntoTimestamp;

pub use snapshot::error::SnapshotError;
pub use snapshot::registry_snapshot::{RegistrySnapshot, StationSnapshot};
