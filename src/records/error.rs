use thiserror::Error;

/// Errors raised while turning raw JSON text into typed records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed JSON at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Song file is empty")]
    EmptySongFile,

    #[error("Song file holds more than one record")]
    TrailingSongData,

    #[error("Event at line {line} is missing required field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("Invalid user id '{0}'")]
    InvalidUserId(String),

    #[error("Timestamp {0} is not a whole number of milliseconds")]
    InvalidTimestamp(f64),

    #[error("Timestamp {0} ms is out of range")]
    TimestampOutOfRange(i64),
}
