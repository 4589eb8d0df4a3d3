use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Anything that can name an instant on the station timelines.
///
/// Naive values carry no offset and are read as UTC; a bare [`NaiveDate`] means midnight UTC of
/// that day.
pub trait IntoTimestamp {
    fn into_timestamp(self) -> DateTime<Utc>;
}

impl IntoTimestamp for DateTime<Utc> {
    fn into_timestamp(self) -> DateTime<Utc> {
        self
    }
}

impl IntoTimestamp for DateTime<FixedOffset> {
    fn into_timestamp(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

impl IntoTimestamp for DateTime<Local> {
    fn into_timestamp(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

impl IntoTimestamp for NaiveDateTime {
    fn into_timestamp(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl IntoTimestamp for NaiveDate {
    fn into_timestamp(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.and_time(chrono::NaiveTime::MIN))
    }
}
