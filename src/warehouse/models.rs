//! Typed rows written to the warehouse tables.

/// A row of the `songs` table.
#[derive(Clone, Debug, PartialEq)]
pub struct SongRow {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    /// `None` when the source reports year 0.
    pub year: Option<i32>,
    /// Seconds, exactly as parsed from the source.
    pub duration: f64,
}

/// A row of the `artists` table.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtistRow {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A row of the `users` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

/// A row of the `time` table. Every field but `start_time` is derived
/// from the instant; see [`crate::transform::time`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimeRow {
    pub start_time: String,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

/// A row of the `songplays` fact table.
#[derive(Clone, Debug, PartialEq)]
pub struct SongplayRow {
    pub start_time: String,
    pub user_id: i64,
    pub level: Option<String>,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// Identifiers resolved for a play event by the song/artist lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}
