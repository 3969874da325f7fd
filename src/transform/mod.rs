//! Transformers: one input file in, warehouse rows out.
//!
//! A transformer reads and parses its file, issues its inserts through a
//! [`WarehouseWriter`] and never commits; the load driver owns the
//! transaction around it.

mod log_file;
mod song_file;
pub mod time;

pub use log_file::{derive_time_rows, derive_users, process_log_file, retain_song_plays};
pub use song_file::process_song_file;

use crate::warehouse::WarehouseWriter;
use anyhow::Result;
use std::ops::AddAssign;
use std::path::Path;

/// Signature shared by the song and log transformers.
pub type FileTransformer = fn(&dyn WarehouseWriter, &Path) -> Result<LoadStats>;

/// Rows newly written per table. Inserts absorbed by an existing primary
/// key are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub songs: usize,
    pub artists: usize,
    pub users: usize,
    pub time_rows: usize,
    pub songplays: usize,
    /// `NextSong` events seen; one songplay insert is issued for each.
    pub play_events: usize,
    /// Play events whose song/artist lookup missed, inserted or not.
    pub unresolved_songplays: usize,
}

impl AddAssign for LoadStats {
    fn add_assign(&mut self, other: Self) {
        self.songs += other.songs;
        self.artists += other.artists;
        self.users += other.users;
        self.time_rows += other.time_rows;
        self.songplays += other.songplays;
        self.play_events += other.play_events;
        self.unresolved_songplays += other.unresolved_songplays;
    }
}
