//! Typed shapes of the two input record kinds.
//!
//! Each file is parsed once into these types at the boundary; everything
//! downstream works on named fields.

mod error;
mod log_event;
mod song_record;

pub use error::RecordError;
pub use log_event::{parse_log_events, LogEvent, SongPlay, NEXT_SONG_PAGE};
pub use song_record::{parse_song_record, SongRecord};
