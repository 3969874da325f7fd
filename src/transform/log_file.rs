use super::time::{derive_time_row, start_time};
use super::LoadStats;
use crate::records::{parse_log_events, LogEvent, RecordError, SongPlay};
use crate::warehouse::{SongplayRow, TimeRow, UserRow, WarehouseWriter};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Loads one event log file: time rows, then users, then one songplay per
/// `NextSong` event.
pub fn process_log_file(writer: &dyn WarehouseWriter, path: &Path) -> Result<LoadStats> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file {}", path.display()))?;
    let plays = parse_log_events(&text)
        .and_then(retain_song_plays)
        .with_context(|| format!("Failed to parse log file {}", path.display()))?;
    load_song_plays(writer, &plays).with_context(|| format!("Failed to load log file {}", path.display()))
}

/// Keeps `NextSong` events only and validates them into song plays.
pub fn retain_song_plays(events: Vec<(usize, LogEvent)>) -> Result<Vec<SongPlay>, RecordError> {
    events
        .into_iter()
        .filter(|(_, event)| event.is_next_song())
        .map(|(line, event)| event.into_song_play(line))
        .collect()
}

/// One time row per distinct timestamp, in first-seen order.
pub fn derive_time_rows(plays: &[SongPlay]) -> Result<Vec<TimeRow>, RecordError> {
    let mut seen = HashSet::new();
    plays
        .iter()
        .filter(|play| seen.insert(play.ts))
        .map(|play| derive_time_row(play.ts))
        .collect()
}

/// One user row per distinct user id; the first event for a user wins.
pub fn derive_users(plays: &[SongPlay]) -> Vec<UserRow> {
    let mut seen = HashSet::new();
    plays
        .iter()
        .filter(|play| seen.insert(play.user_id))
        .map(|play| UserRow {
            user_id: play.user_id,
            first_name: play.first_name.clone(),
            last_name: play.last_name.clone(),
            gender: play.gender.clone(),
            level: play.level.clone(),
        })
        .collect()
}

fn load_song_plays(writer: &dyn WarehouseWriter, plays: &[SongPlay]) -> Result<LoadStats> {
    let mut stats = LoadStats::default();

    for time_row in derive_time_rows(plays)? {
        if writer.insert_time(&time_row)? {
            stats.time_rows += 1;
        }
    }

    for user in derive_users(plays) {
        if writer.insert_user(&user)? {
            stats.users += 1;
        }
    }

    for play in plays {
        stats.play_events += 1;
        let found = writer.find_song(&play.song, &play.artist, play.length)?;
        if found.is_none() {
            debug!(
                "No song matches '{}' by '{}' ({}s) at line {}",
                play.song, play.artist, play.length, play.line
            );
            stats.unresolved_songplays += 1;
        }
        let (song_id, artist_id) = match found {
            Some(m) => (Some(m.song_id), Some(m.artist_id)),
            None => (None, None),
        };
        let songplay = SongplayRow {
            start_time: start_time(play.ts)?,
            user_id: play.user_id,
            level: play.level.clone(),
            song_id,
            artist_id,
            session_id: play.session_id,
            location: play.location.clone(),
            user_agent: play.user_agent.clone(),
        };
        if writer.insert_songplay(&songplay)? {
            stats.songplays += 1;
        }
    }

    Ok(stats)
}
