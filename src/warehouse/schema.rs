//! SQLite schema and statement catalog for the songplay warehouse.
//!
//! Four dimension tables (`songs`, `artists`, `users`, `time`) and one fact
//! table (`songplays`). Every insert is conflict-ignore on the primary key:
//! a row that already exists is left untouched.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

// =============================================================================
// Foreign Keys
// =============================================================================

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const PLAYED_SONG_FK: ForeignKey = ForeignKey {
    foreign_table: "songs",
    foreign_column: "song_id",
    on_delete: ForeignKeyOnChange::SetNull,
};

const PLAYED_ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
    on_delete: ForeignKeyOnChange::SetNull,
};

const USER_FK: ForeignKey = ForeignKey {
    foreign_table: "users",
    foreign_column: "user_id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const TIME_FK: ForeignKey = ForeignKey {
    foreign_table: "time",
    foreign_column: "start_time",
    on_delete: ForeignKeyOnChange::NoAction,
};

// =============================================================================
// Dimension Tables
// =============================================================================

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
    indices: &[("idx_artists_name", "name")],
};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("song_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist_id", &SqlType::Text, foreign_key = Some(&ARTIST_FK)),
        sqlite_column!("year", &SqlType::Integer), // NULL when unknown
        sqlite_column!("duration", &SqlType::Real, non_null = true), // seconds
    ],
    indices: &[("idx_songs_title", "title")],
};

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("user_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!("gender", &SqlType::Text),
        sqlite_column!("level", &SqlType::Text), // 'free', 'paid'
    ],
    indices: &[],
};

const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!("start_time", &SqlType::Text, is_primary_key = true), // 'YYYY-MM-DD HH:MM:SS.mmm' UTC
        sqlite_column!("hour", &SqlType::Integer, non_null = true),
        sqlite_column!("day", &SqlType::Integer, non_null = true),
        sqlite_column!("week", &SqlType::Integer, non_null = true), // ISO week
        sqlite_column!("month", &SqlType::Integer, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("weekday", &SqlType::Integer, non_null = true), // 0=Monday
    ],
    indices: &[],
};

// =============================================================================
// Fact Table
// =============================================================================

const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!(
            "start_time",
            &SqlType::Text,
            is_primary_key = true,
            foreign_key = Some(&TIME_FK)
        ),
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("level", &SqlType::Text),
        sqlite_column!("song_id", &SqlType::Text, foreign_key = Some(&PLAYED_SONG_FK)),
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            foreign_key = Some(&PLAYED_ARTIST_FK)
        ),
        sqlite_column!("session_id", &SqlType::Integer),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
    indices: &[("idx_songplays_user", "user_id")],
};

// =============================================================================
// Versioned Schema Definition
// =============================================================================

/// Warehouse schema. Tables are listed so that referenced tables precede the
/// tables referencing them; dropping walks the list backwards.
pub const WAREHOUSE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE,
        SONGS_TABLE,
        USERS_TABLE,
        TIME_TABLE,
        SONGPLAYS_TABLE,
    ],
}];

/// Table names in creation order, for row counting and reporting.
pub const TABLE_NAMES: [&str; 5] = ["artists", "songs", "users", "time", "songplays"];

// =============================================================================
// Statement Catalog
// =============================================================================

/// Binds `(song_id, title, artist_id, year, duration)`.
pub const SONG_INSERT: &str = "INSERT INTO songs (song_id, title, artist_id, year, duration) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT DO NOTHING";

/// Binds `(artist_id, name, location, latitude, longitude)`.
pub const ARTIST_INSERT: &str =
    "INSERT INTO artists (artist_id, name, location, latitude, longitude) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT DO NOTHING";

/// Binds `(user_id, first_name, last_name, gender, level)`.
pub const USER_INSERT: &str =
    "INSERT INTO users (user_id, first_name, last_name, gender, level) \
     VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT DO NOTHING";

/// Binds `(start_time, hour, day, week, month, year, weekday)`.
pub const TIME_INSERT: &str =
    "INSERT INTO time (start_time, hour, day, week, month, year, weekday) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) ON CONFLICT DO NOTHING";

/// Binds `(start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)`.
pub const SONGPLAY_INSERT: &str = "INSERT INTO songplays \
     (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) ON CONFLICT DO NOTHING";

/// Binds `(title, artist_name, duration)`, yields at most one `(song_id, artist_id)`.
/// Ties on the match triple resolve to the lowest song id.
pub const SONG_SELECT: &str = "SELECT songs.song_id, artists.artist_id FROM songs \
     JOIN artists ON songs.artist_id = artists.artist_id \
     WHERE songs.title = ?1 AND artists.name = ?2 AND songs.duration = ?3 \
     ORDER BY songs.song_id, artists.artist_id LIMIT 1";

/// `CREATE TABLE IF NOT EXISTS` statements, in creation order.
pub fn create_table_statements() -> Vec<String> {
    WAREHOUSE_VERSIONED_SCHEMAS[WAREHOUSE_VERSIONED_SCHEMAS.len() - 1]
        .tables
        .iter()
        .map(Table::create_sql)
        .collect()
}

/// `DROP TABLE IF EXISTS` statements, fact table first.
pub fn drop_table_statements() -> Vec<String> {
    WAREHOUSE_VERSIONED_SCHEMAS[WAREHOUSE_VERSIONED_SCHEMAS.len() - 1]
        .tables
        .iter()
        .rev()
        .map(Table::drop_sql)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    fn create_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        let schema = &WAREHOUSE_VERSIONED_SCHEMAS[0];
        schema.create(&conn).unwrap();
        conn
    }

    #[test]
    fn test_schema_creates_successfully() {
        let conn = create_schema();
        WAREHOUSE_VERSIONED_SCHEMAS[0].validate(&conn).unwrap();
    }

    #[test]
    fn test_statement_lists_cover_every_table() {
        let creates = create_table_statements();
        let drops = drop_table_statements();
        assert_eq!(creates.len(), 5);
        assert_eq!(drops.len(), 5);
        assert!(creates.iter().all(|s| s.starts_with("CREATE TABLE IF NOT EXISTS")));
        assert_eq!(drops[0], "DROP TABLE IF EXISTS songplays;");
        assert_eq!(drops[4], "DROP TABLE IF EXISTS artists;");
        for name in TABLE_NAMES {
            assert!(creates.iter().any(|s| s.contains(&format!("EXISTS {} (", name))));
        }
    }

    #[test]
    fn test_inserts_ignore_conflicts() {
        let conn = create_schema();

        conn.execute(
            ARTIST_INSERT,
            params!["A1", "First Name", Option::<String>::None, 1.5, 2.5],
        )
        .unwrap();
        let inserted = conn
            .execute(
                ARTIST_INSERT,
                params!["A1", "Second Name", "Somewhere", 0.0, 0.0],
            )
            .unwrap();
        assert_eq!(inserted, 0);

        let name: String = conn
            .query_row("SELECT name FROM artists WHERE artist_id = 'A1'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(name, "First Name");
    }

    #[test]
    fn test_song_select_breaks_ties_by_lowest_song_id() {
        let conn = create_schema();

        conn.execute(
            ARTIST_INSERT,
            params!["A1", "Band", Option::<String>::None, Option::<f64>::None, Option::<f64>::None],
        )
        .unwrap();
        conn.execute(SONG_INSERT, params!["S9", "Tune", "A1", 2001, 180.25])
            .unwrap();
        conn.execute(SONG_INSERT, params!["S2", "Tune", "A1", 2002, 180.25])
            .unwrap();
        conn.execute(SONG_INSERT, params!["S1", "Tune", "A1", 2003, 180.5])
            .unwrap();

        let (song_id, artist_id): (String, String) = conn
            .query_row(SONG_SELECT, params!["Tune", "Band", 180.25], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(song_id, "S2");
        assert_eq!(artist_id, "A1");
    }
}
