//! Load driver.
//!
//! Walks a data root, hands every file to a transformer inside its own
//! transaction and commits file by file. The first failure rolls back the
//! file in flight and aborts the run; files committed before it stay.

use crate::config::AppConfig;
use crate::locator::{find_files, DATA_FILE_EXTENSION};
use crate::transform::{process_log_file, process_song_file, FileTransformer, LoadStats};
use crate::warehouse::SqliteWarehouse;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// What one data root contributed to the warehouse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub files_found: usize,
    pub files_processed: usize,
    pub stats: LoadStats,
}

/// Outcome of a full run: song data, then log data, then final row counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub song_data: LoadSummary,
    pub log_data: LoadSummary,
    pub table_counts: Vec<(&'static str, usize)>,
}

/// Loads every data file under `root` with `transformer`, one transaction
/// per file.
pub fn process_data(
    warehouse: &mut SqliteWarehouse,
    root: &Path,
    transformer: FileTransformer,
) -> Result<LoadSummary> {
    let files = find_files(root, DATA_FILE_EXTENSION)?;
    let mut summary = LoadSummary {
        files_found: files.len(),
        ..Default::default()
    };
    info!("{} files found in {}", files.len(), root.display());

    for (index, path) in files.iter().enumerate() {
        let tx = warehouse
            .transaction()
            .with_context(|| format!("Failed to begin transaction for {}", path.display()))?;

        let stats = match transformer(&*tx, path) {
            Ok(stats) => stats,
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "Rollback after failure on {} failed: {}",
                        path.display(),
                        rollback_err
                    );
                }
                return Err(err);
            }
        };
        tx.commit()
            .with_context(|| format!("Failed to commit {}", path.display()))?;

        debug!("{}: {:?}", path.display(), stats);
        summary.stats += stats;
        summary.files_processed += 1;
        info!("{}/{} files processed.", index + 1, files.len());
    }

    Ok(summary)
}

fn log_summary(label: &str, summary: &LoadSummary) {
    let stats = &summary.stats;
    info!(
        "{}: {} of {} files loaded",
        label, summary.files_processed, summary.files_found
    );
    info!(
        "  new rows: {} songs, {} artists, {} users, {} time, {} songplays",
        stats.songs, stats.artists, stats.users, stats.time_rows, stats.songplays
    );
    if stats.play_events > 0 {
        info!(
            "  {} play events, {} without a matching song",
            stats.play_events, stats.unresolved_songplays
        );
    }
}

/// Runs the whole load against the configured database: optional reset,
/// song data, then log data.
pub fn run(config: &AppConfig) -> Result<RunSummary> {
    info!("Opening warehouse {}", config.database.display());
    let mut warehouse = SqliteWarehouse::open(&config.database)?;

    if config.reset {
        warehouse.reset()?;
    }

    let song_data = process_data(&mut warehouse, &config.song_data, process_song_file)
        .context("Song data load failed")?;
    let log_data = process_data(&mut warehouse, &config.log_data, process_log_file)
        .context("Log data load failed")?;

    log_summary("Song data", &song_data);
    log_summary("Log data", &log_data);

    let table_counts = warehouse.get_counts()?;
    info!("Database contains:");
    for (table, count) in &table_counts {
        info!("  {} {}", count, table);
    }

    warehouse.close()?;

    Ok(RunSummary {
        song_data,
        log_data,
        table_counts,
    })
}
