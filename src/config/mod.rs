mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "sparkify.db";
pub const DEFAULT_SONG_DATA: &str = "data/song_data";
pub const DEFAULT_LOG_DATA: &str = "data/log_data";

/// CLI arguments that take part in config resolution.
/// Environment variables and built-in defaults are already folded in by clap.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub database: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub reset: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            song_data: PathBuf::from(DEFAULT_SONG_DATA),
            log_data: PathBuf::from(DEFAULT_LOG_DATA),
            reset: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub reset: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let database = file
            .database
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.database.clone());
        let song_data = file
            .song_data
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.song_data.clone());
        let log_data = file
            .log_data
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.log_data.clone());
        let reset = file.reset.unwrap_or(cli.reset);

        validate_data_dir("song_data", &song_data)?;
        validate_data_dir("log_data", &log_data)?;

        // A bare file name has an empty parent, meaning the working directory.
        if let Some(parent) = database.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        Ok(Self {
            database,
            song_data,
            log_data,
            reset,
        })
    }
}

fn validate_data_dir(name: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{} directory does not exist: {:?}", name, path);
    }
    if !path.is_dir() {
        bail!("{} is not a directory: {:?}", name, path);
    }
    Ok(())
}
