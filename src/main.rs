use anyhow::{Context, Result};
use clap::Parser;
use songplay_etl::config::{DEFAULT_DATABASE, DEFAULT_LOG_DATA, DEFAULT_SONG_DATA};
use songplay_etl::{run, AppConfig, CliConfig, FileConfig};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "songplay-etl")]
#[command(about = "Load song metadata and listening logs into a SQLite star schema")]
struct CliArgs {
    /// Path to the SQLite warehouse database file.
    #[clap(long, env = "SONGPLAY_DATABASE", default_value = DEFAULT_DATABASE, value_parser = parse_path)]
    pub database: PathBuf,

    /// Root directory of the song metadata files.
    #[clap(long, env = "SONGPLAY_SONG_DATA", default_value = DEFAULT_SONG_DATA, value_parser = parse_path)]
    pub song_data: PathBuf,

    /// Root directory of the listening event logs.
    #[clap(long, env = "SONGPLAY_LOG_DATA", default_value = DEFAULT_LOG_DATA, value_parser = parse_path)]
    pub log_data: PathBuf,

    /// Drop and recreate all warehouse tables before loading.
    #[clap(long, env = "SONGPLAY_RESET")]
    pub reset: bool,

    /// Path to a TOML config file. Values in it override the flags above.
    #[clap(long, env = "SONGPLAY_CONFIG", value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config = CliConfig {
        database: cli_args.database,
        song_data: cli_args.song_data,
        log_data: cli_args.log_data,
        reset: cli_args.reset,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    run(&config)?;
    info!("Load completed successfully");
    Ok(())
}
