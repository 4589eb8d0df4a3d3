pub mod error;
pub mod registry_snapshot;
