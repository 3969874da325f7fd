//! WarehouseWriter trait definition.
//!
//! Transformers issue every statement through this trait, so they never see
//! SQL text. The SQLite implementation lives on `rusqlite::Connection`, which
//! also makes it available on an open `rusqlite::Transaction`.

use super::models::{ArtistRow, SongMatch, SongRow, SongplayRow, TimeRow, UserRow};
use super::schema::{
    ARTIST_INSERT, SONGPLAY_INSERT, SONG_INSERT, SONG_SELECT, TIME_INSERT, USER_INSERT,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Statement-issuing seam between the transformers and the database.
///
/// Every insert is conflict-ignore: it returns `true` when a new row was
/// written and `false` when a row with the same primary key already existed.
pub trait WarehouseWriter {
    fn insert_song(&self, song: &SongRow) -> Result<bool>;

    fn insert_artist(&self, artist: &ArtistRow) -> Result<bool>;

    fn insert_user(&self, user: &UserRow) -> Result<bool>;

    fn insert_time(&self, time: &TimeRow) -> Result<bool>;

    fn insert_songplay(&self, songplay: &SongplayRow) -> Result<bool>;

    /// Finds the song whose title, artist name and duration all match exactly.
    /// Returns `None` on a miss; a miss is not an error.
    fn find_song(&self, title: &str, artist_name: &str, duration: f64)
        -> Result<Option<SongMatch>>;
}

impl WarehouseWriter for Connection {
    fn insert_song(&self, song: &SongRow) -> Result<bool> {
        let mut stmt = self.prepare_cached(SONG_INSERT)?;
        let inserted = stmt
            .execute(params![
                song.song_id,
                song.title,
                song.artist_id,
                song.year,
                song.duration
            ])
            .with_context(|| format!("Failed to insert song {}", song.song_id))?;
        Ok(inserted > 0)
    }

    fn insert_artist(&self, artist: &ArtistRow) -> Result<bool> {
        let mut stmt = self.prepare_cached(ARTIST_INSERT)?;
        let inserted = stmt
            .execute(params![
                artist.artist_id,
                artist.name,
                artist.location,
                artist.latitude,
                artist.longitude
            ])
            .with_context(|| format!("Failed to insert artist {}", artist.artist_id))?;
        Ok(inserted > 0)
    }

    fn insert_user(&self, user: &UserRow) -> Result<bool> {
        let mut stmt = self.prepare_cached(USER_INSERT)?;
        let inserted = stmt
            .execute(params![
                user.user_id,
                user.first_name,
                user.last_name,
                user.gender,
                user.level
            ])
            .with_context(|| format!("Failed to insert user {}", user.user_id))?;
        Ok(inserted > 0)
    }

    fn insert_time(&self, time: &TimeRow) -> Result<bool> {
        let mut stmt = self.prepare_cached(TIME_INSERT)?;
        let inserted = stmt
            .execute(params![
                time.start_time,
                time.hour,
                time.day,
                time.week,
                time.month,
                time.year,
                time.weekday
            ])
            .with_context(|| format!("Failed to insert time {}", time.start_time))?;
        Ok(inserted > 0)
    }

    fn insert_songplay(&self, songplay: &SongplayRow) -> Result<bool> {
        let mut stmt = self.prepare_cached(SONGPLAY_INSERT)?;
        let inserted = stmt
            .execute(params![
                songplay.start_time,
                songplay.user_id,
                songplay.level,
                songplay.song_id,
                songplay.artist_id,
                songplay.session_id,
                songplay.location,
                songplay.user_agent
            ])
            .with_context(|| format!("Failed to insert songplay at {}", songplay.start_time))?;
        Ok(inserted > 0)
    }

    fn find_song(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>> {
        let mut stmt = self.prepare_cached(SONG_SELECT)?;
        let found = stmt
            .query_row(params![title, artist_name, duration], |r| {
                Ok(SongMatch {
                    song_id: r.get(0)?,
                    artist_id: r.get(1)?,
                })
            })
            .optional()?;
        Ok(found)
    }
}
