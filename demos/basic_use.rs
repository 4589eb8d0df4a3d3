use chrono::{TimeZone, Utc};
use station_history::{GeoPoint, StationArchive, StationError};

#[tokio::main]
async fn main() -> Result<(), StationError> {
    let archive = StationArchive::new().await?;
    let registry = archive.registry();

    if registry.station("L4").is_none() {
        registry
            .create_station()
            .name("L4")
            .full_name("Long-term station 4")
            .call()?;
        // Inserted out of order on purpose: the later deployment first.
        registry
            .set_location()
            .station("L4")
            .position(GeoPoint::new(41.02, -70.98)?)
            .start(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
            .depth(32.0)
            .call()?;
        registry
            .set_location()
            .station("L4")
            .position(GeoPoint::new(41.0, -71.0)?)
            .start(Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap())
            .comment("first deployment")
            .call()?;
        archive.save().await?;
    }

    for interval in registry.timeline("L4")?.intervals() {
        println!(
            "{} from {} until {:?}",
            interval.position(),
            interval.start_time(),
            interval.end_time()
        );
    }

    let nearest = archive
        .nearest()
        .point(GeoPoint::new(41.01, -71.01)?)
        .at(Utc.with_ymd_and_hms(2023, 8, 1, 12, 0, 0).unwrap())
        .call();
    println!("{:#?}", nearest);

    Ok(())
}
