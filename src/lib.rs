//! Songplay ETL Library
//!
//! Loads song metadata and listening event logs into a five-table SQLite
//! star schema. The binary wires these modules together; they are exposed
//! here for testing and reuse.

pub mod config;
pub mod locator;
pub mod pipeline;
pub mod records;
pub mod sqlite_persistence;
pub mod transform;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig};
pub use pipeline::{process_data, run, LoadSummary, RunSummary};
pub use transform::{process_log_file, process_song_file, LoadStats};
pub use warehouse::{SqliteWarehouse, WarehouseWriter};
