//! Common test infrastructure
//!
//! Builds song and log data trees in a temporary directory and points a
//! warehouse database file next to them. Tests should only import from this
//! module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{song_json, TestData, SONG_1_ID};
//!
//! #[test]
//! fn test_load_song() {
//!     let data = TestData::new();
//!     data.write_song("A/A/A/S1.json", &song_json(SONG_1_ID));
//!     songplay_etl::run(&data.config()).unwrap();
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
pub use fixtures::{log_event, log_lines, song_json, song_json_with, TestData};
