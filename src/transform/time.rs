//! Timestamp handling shared by the time dimension and the fact table.
//!
//! Instants are UTC. Weekdays count from Monday = 0, weeks are ISO-8601.

use crate::records::RecordError;
use crate::warehouse::TimeRow;
use chrono::{DateTime, Datelike, Timelike, Utc};

const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub fn instant_from_millis(ts: i64) -> Result<DateTime<Utc>, RecordError> {
    DateTime::from_timestamp_millis(ts).ok_or(RecordError::TimestampOutOfRange(ts))
}

/// The text stored in every `start_time` column.
pub fn start_time(ts: i64) -> Result<String, RecordError> {
    Ok(instant_from_millis(ts)?
        .format(START_TIME_FORMAT)
        .to_string())
}

pub fn derive_time_row(ts: i64) -> Result<TimeRow, RecordError> {
    let instant = instant_from_millis(ts)?;
    Ok(TimeRow {
        start_time: instant.format(START_TIME_FORMAT).to_string(),
        hour: instant.hour(),
        day: instant.day(),
        week: instant.iso_week().week(),
        month: instant.month(),
        year: instant.year(),
        weekday: instant.weekday().num_days_from_monday(),
    })
}
