pub mod geo_point;
pub mod location_interval;
pub mod station;
pub mod timestamp;
