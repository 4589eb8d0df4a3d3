pub mod error;
pub mod station_timeline;
