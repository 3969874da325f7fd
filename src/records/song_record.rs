use super::RecordError;
use crate::warehouse::{ArtistRow, SongRow};
use serde::Deserialize;

/// One song/artist pair, as found in a song data file.
///
/// The source also carries `num_songs`, which is not loaded anywhere and is
/// skipped with the other unknown fields.
#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub artist_name: String,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
    pub year: i32,
    pub duration: f64,
}

impl SongRecord {
    pub fn song_row(&self) -> SongRow {
        SongRow {
            song_id: self.song_id.clone(),
            title: self.title.clone(),
            artist_id: self.artist_id.clone(),
            year: (self.year != 0).then_some(self.year),
            duration: self.duration,
        }
    }

    pub fn artist_row(&self) -> ArtistRow {
        ArtistRow {
            artist_id: self.artist_id.clone(),
            name: self.artist_name.clone(),
            location: self.artist_location.clone(),
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        }
    }
}

/// Parses the single JSON object of a song file. Whitespace around the
/// object is allowed, a second object is not.
pub fn parse_song_record(text: &str) -> Result<SongRecord, RecordError> {
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<SongRecord>();
    let record = match stream.next() {
        None => return Err(RecordError::EmptySongFile),
        Some(Err(source)) => {
            return Err(RecordError::Json {
                line: source.line(),
                source,
            })
        }
        Some(Ok(record)) => record,
    };
    if stream.next().is_some() {
        return Err(RecordError::TrailingSongData);
    }
    Ok(record)
}
