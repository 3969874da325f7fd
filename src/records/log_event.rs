use super::RecordError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// The page value that marks a song being played.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// One line of an event log, as found on disk.
///
/// Only `page` and `ts` are guaranteed; everything else may be null on
/// events other than song plays. Source fields not listed here
/// (`auth`, `method`, `status`, `itemInSession`, `registration`) are skipped.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub artist: Option<String>,
    pub song: Option<String>,
    pub length: Option<f64>,
    pub session_id: Option<i64>,
    pub page: String,
    pub user_agent: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "deserialize_ts")]
    pub ts: i64,
    #[serde(default, deserialize_with = "deserialize_user_id")]
    pub user_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
}

/// Epoch milliseconds, written either as an integer or as a float with no
/// fractional part (`1541106106796.0`).
fn deserialize_ts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ts) => Ok(ts),
        RawTimestamp::Float(ts)
            if ts.fract() == 0.0 && ts >= i64::MIN as f64 && ts < i64::MAX as f64 =>
        {
            Ok(ts as i64)
        }
        RawTimestamp::Float(ts) => Err(D::Error::custom(RecordError::InvalidTimestamp(ts))),
    }
}

/// User ids show up as numbers, as numeric strings, or as an empty string
/// for logged-out sessions.
fn deserialize_user_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<RawUserId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawUserId::Number(id)) => Ok(Some(id)),
        Some(RawUserId::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(RecordError::InvalidUserId(text)))
        }
    }
}

/// A validated song play: a `NextSong` event with every field the
/// warehouse needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SongPlay {
    /// 1-based line of the event in its file.
    pub line: usize,
    pub ts: i64,
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub song: String,
    pub artist: String,
    pub length: f64,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

fn required<T>(value: Option<T>, line: usize, field: &'static str) -> Result<T, RecordError> {
    value.ok_or(RecordError::MissingField { line, field })
}

impl LogEvent {
    pub fn is_next_song(&self) -> bool {
        self.page == NEXT_SONG_PAGE
    }

    pub fn into_song_play(self, line: usize) -> Result<SongPlay, RecordError> {
        Ok(SongPlay {
            line,
            ts: self.ts,
            user_id: required(self.user_id, line, "userId")?,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            level: self.level,
            song: required(self.song, line, "song")?,
            artist: required(self.artist, line, "artist")?,
            length: required(self.length, line, "length")?,
            session_id: required(self.session_id, line, "sessionId")?,
            location: self.location,
            user_agent: self.user_agent,
        })
    }
}

/// Parses newline-delimited events, returning each with its 1-based line
/// number. Blank lines are skipped.
pub fn parse_log_events(text: &str) -> Result<Vec<(usize, LogEvent)>, RecordError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<LogEvent>(line)
                .map(|event| (index + 1, event))
                .map_err(|source| RecordError::Json {
                    line: index + 1,
                    source,
                })
        })
        .collect()
}
