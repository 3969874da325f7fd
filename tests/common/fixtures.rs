//! Test fixture creation for data trees and the warehouse file

use super::constants::*;
use rusqlite::Connection;
use songplay_etl::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary song/log data tree plus the path of its warehouse database.
pub struct TestData {
    _dir: TempDir,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub database: PathBuf,
}

#[allow(dead_code)]
impl TestData {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let song_data = dir.path().join("song_data");
        let log_data = dir.path().join("log_data");
        fs::create_dir_all(&song_data).unwrap();
        fs::create_dir_all(&log_data).unwrap();
        let database = dir.path().join("sparkify.db");
        Self {
            _dir: dir,
            song_data,
            log_data,
            database,
        }
    }

    fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn write_song(&self, relative: &str, contents: &str) -> PathBuf {
        Self::write(&self.song_data, relative, contents)
    }

    pub fn write_log(&self, relative: &str, contents: &str) -> PathBuf {
        Self::write(&self.log_data, relative, contents)
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            database: self.database.clone(),
            song_data: self.song_data.clone(),
            log_data: self.log_data.clone(),
            reset: false,
        }
    }

    pub fn reset_config(&self) -> AppConfig {
        AppConfig {
            reset: true,
            ..self.config()
        }
    }

    /// Opens a second connection on the warehouse file for assertions.
    pub fn connect(&self) -> Connection {
        Connection::open(&self.database).unwrap()
    }

    pub fn count(&self, table: &str) -> usize {
        let count: i64 = self
            .connect()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
            .unwrap();
        count as usize
    }
}

/// Song file for `song_id` by the first test artist, with the first test
/// song's title, year and duration.
pub fn song_json(song_id: &str) -> String {
    song_json_with(song_id, SONG_1_TITLE, SONG_1_YEAR, SONG_1_DURATION)
}

pub fn song_json_with(song_id: &str, title: &str, year: i32, duration: f64) -> String {
    serde_json::json!({
        "num_songs": 1,
        "artist_id": ARTIST_1_ID,
        "artist_latitude": ARTIST_1_LATITUDE,
        "artist_longitude": ARTIST_1_LONGITUDE,
        "artist_location": ARTIST_1_LOCATION,
        "artist_name": ARTIST_1_NAME,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": year,
    })
    .to_string()
}

/// One event log line. `userId` is written as a string, as the source
/// logs do.
pub fn log_event(page: &str, ts: i64, user_id: i64, song: &str, length: f64) -> String {
    serde_json::json!({
        "artist": ARTIST_1_NAME,
        "auth": "Logged In",
        "firstName": format!("First{}", user_id),
        "gender": "F",
        "itemInSession": 0,
        "lastName": format!("Last{}", user_id),
        "length": length,
        "level": "free",
        "location": "Phoenix-Mesa-Scottsdale, AZ",
        "method": "PUT",
        "page": page,
        "registration": 1540344794796.0,
        "sessionId": SESSION_ID,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0",
        "userId": user_id.to_string(),
    })
    .to_string()
}

pub fn log_lines(events: &[String]) -> String {
    events.join("\n") + "\n"
}
