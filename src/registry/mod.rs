pub mod station_registry;
