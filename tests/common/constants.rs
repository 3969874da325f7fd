//! Shared constants for end-to-end tests
//!
//! When fixture data changes (ids, titles, timestamps), update only this file.

#![allow(dead_code)]

// ============================================================================
// Song data
// ============================================================================

pub const SONG_1_ID: &str = "S1";
pub const SONG_1_TITLE: &str = "Test Song";
pub const SONG_1_YEAR: i32 = 2000;
pub const SONG_1_DURATION: f64 = 210.5;

pub const SONG_2_ID: &str = "S2";
pub const SONG_2_TITLE: &str = "You Gotta Be";
/// Duration with more digits than an f32 carries, to catch rounding.
pub const SONG_2_DURATION: f64 = 246.30812;

pub const ARTIST_1_ID: &str = "A1";
pub const ARTIST_1_NAME: &str = "The Test Band";
pub const ARTIST_1_LOCATION: &str = "New York, NY";
pub const ARTIST_1_LATITUDE: f64 = 40.71455;
pub const ARTIST_1_LONGITUDE: f64 = -74.00712;

// ============================================================================
// Log data
// ============================================================================

pub const USER_1_ID: i64 = 8;
pub const USER_2_ID: i64 = 15;
pub const USER_3_ID: i64 = 26;

pub const SESSION_ID: i64 = 139;

/// 2018-11-01 21:01:46.796 UTC
pub const TS_1: i64 = 1541106106796;
pub const TS_1_START_TIME: &str = "2018-11-01 21:01:46.796";
/// 2018-11-01 21:05:52.796 UTC
pub const TS_2: i64 = 1541106352796;
/// 2018-11-01 21:08:16.796 UTC
pub const TS_3: i64 = 1541106496796;

pub const NEXT_SONG: &str = "NextSong";
pub const HOME: &str = "Home";
