use super::LoadStats;
use crate::records::{parse_song_record, SongRecord};
use crate::warehouse::WarehouseWriter;
use anyhow::{Context, Result};
use std::path::Path;

/// Loads one song data file: one song row, then one artist row.
pub fn process_song_file(writer: &dyn WarehouseWriter, path: &Path) -> Result<LoadStats> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read song file {}", path.display()))?;
    let record = parse_song_record(&text)
        .with_context(|| format!("Failed to parse song file {}", path.display()))?;
    load_song_record(writer, &record)
}

fn load_song_record(writer: &dyn WarehouseWriter, record: &SongRecord) -> Result<LoadStats> {
    let mut stats = LoadStats::default();
    if writer.insert_song(&record.song_row())? {
        stats.songs += 1;
    }
    if writer.insert_artist(&record.artist_row())? {
        stats.artists += 1;
    }
    Ok(stats)
}
