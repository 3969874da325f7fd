//! SQLite-backed songplay warehouse.
//!
//! Holds the single connection used for a whole run. Opening the warehouse
//! bootstraps the schema; each input file is then loaded inside its own
//! transaction obtained from [`SqliteWarehouse::transaction`].

use super::schema::{TABLE_NAMES, WAREHOUSE_VERSIONED_SCHEMAS};
use crate::sqlite_persistence::{VersionedSchema, BASE_DB_VERSION};
use anyhow::{bail, Context, Result};
use rusqlite::{Connection, Transaction};
use std::path::Path;
use tracing::{debug, info};

pub struct SqliteWarehouse {
    conn: Connection,
}

fn latest_schema() -> &'static VersionedSchema {
    &WAREHOUSE_VERSIONED_SCHEMAS[WAREHOUSE_VERSIONED_SCHEMAS.len() - 1]
}

fn bootstrap_schema(conn: &Connection) -> Result<()> {
    let db_version: i64 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .context("Failed to read database version")?;
    let schema = latest_schema();
    let expected_version = (BASE_DB_VERSION + schema.version) as i64;

    if db_version != 0 && db_version != expected_version {
        bail!(
            "Unknown database version {}, expected {}",
            db_version,
            expected_version
        );
    }

    debug!("Ensuring warehouse schema at version {}", schema.version);
    schema.create(conn)?;
    schema
        .validate(conn)
        .context("Existing tables do not match the warehouse schema")?;
    Ok(())
}

impl SqliteWarehouse {
    /// Opens (creating if needed) the warehouse database at `db_path`.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open warehouse database {}", db_path.display()))?;

        Self::from_connection(conn)
    }

    /// Opens a throwaway warehouse that lives only in memory.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // Songs land before their artist row, so references are not enforced.
        conn.pragma_update(None, "foreign_keys", false)
            .context("Failed to disable foreign key enforcement")?;
        bootstrap_schema(&conn)?;
        Ok(SqliteWarehouse { conn })
    }

    /// Drops all five tables and recreates them empty.
    pub fn reset(&mut self) -> Result<()> {
        info!("Dropping and recreating warehouse tables");
        let schema = latest_schema();
        let tx = self.conn.transaction()?;
        schema.drop(&tx)?;
        schema.create(&tx)?;
        tx.commit()?;
        Ok(())
    }

    /// Begins the transaction that scopes one input file.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Row counts per table, in creation order.
    pub fn get_counts(&self) -> Result<Vec<(&'static str, usize)>> {
        TABLE_NAMES
            .iter()
            .map(|name| -> Result<(&'static str, usize)> {
                let count: i64 =
                    self.conn
                        .query_row(&format!("SELECT COUNT(*) FROM {}", name), [], |r| {
                            r.get(0)
                        })?;
                Ok((*name, count as usize))
            })
            .collect()
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, err)| err)
            .context("Failed to close warehouse database")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::models::{ArtistRow, SongRow};
    use crate::warehouse::WarehouseWriter;
    use tempfile::TempDir;

    fn artist(id: &str) -> ArtistRow {
        ArtistRow {
            artist_id: id.to_string(),
            name: format!("Artist {}", id),
            location: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn opens_fresh_database_with_empty_tables() {
        let warehouse = SqliteWarehouse::open_in_memory().unwrap();
        let counts = warehouse.get_counts().unwrap();
        assert_eq!(counts.len(), 5);
        assert!(counts.iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("warehouse.db");

        let warehouse = SqliteWarehouse::open(&db_path).unwrap();
        warehouse.connection().insert_artist(&artist("A1")).unwrap();
        warehouse.close().unwrap();

        let warehouse = SqliteWarehouse::open(&db_path).unwrap();
        let counts = warehouse.get_counts().unwrap();
        assert_eq!(counts[0], ("artists", 1));
    }

    #[test]
    fn reset_empties_every_table() {
        let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();
        warehouse.connection().insert_artist(&artist("A1")).unwrap();

        warehouse.reset().unwrap();

        let counts = warehouse.get_counts().unwrap();
        assert!(counts.iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn rejects_database_with_mismatched_table() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("warehouse.db");
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute("CREATE TABLE songs (song_id TEXT PRIMARY KEY)", [])
                .unwrap();
        }

        let result = SqliteWarehouse::open(&db_path);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_database_version() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("warehouse.db");
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.pragma_update(None, "user_version", 7).unwrap();
        }

        let err = SqliteWarehouse::open(&db_path).err().unwrap();
        assert!(err.to_string().contains("Unknown database version"));
    }

    #[test]
    fn uncommitted_transaction_is_rolled_back() {
        let mut warehouse = SqliteWarehouse::open_in_memory().unwrap();
        {
            let tx = warehouse.transaction().unwrap();
            tx.insert_artist(&artist("A1")).unwrap();
        }
        assert_eq!(warehouse.get_counts().unwrap()[0], ("artists", 0));
    }

    fn foreign_keys_enabled(warehouse: &SqliteWarehouse) -> i64 {
        warehouse
            .connection()
            .query_row("PRAGMA foreign_keys", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn foreign_keys_are_not_enforced() {
        let warehouse = SqliteWarehouse::open_in_memory().unwrap();
        assert_eq!(foreign_keys_enabled(&warehouse), 0);

        let temp_dir = TempDir::new().unwrap();
        let warehouse = SqliteWarehouse::open(temp_dir.path().join("warehouse.db")).unwrap();
        assert_eq!(foreign_keys_enabled(&warehouse), 0);
    }

    #[test]
    fn song_loads_before_its_artist_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("warehouse.db");
        let mut warehouse = SqliteWarehouse::open(&db_path).unwrap();

        let tx = warehouse.transaction().unwrap();
        let song = SongRow {
            song_id: "S1".to_string(),
            title: "Test Song".to_string(),
            artist_id: "A1".to_string(),
            year: Some(2000),
            duration: 210.5,
        };
        assert!(tx.insert_song(&song).unwrap());
        assert!(tx.insert_artist(&artist("A1")).unwrap());
        tx.commit().unwrap();
        warehouse.close().unwrap();

        let warehouse = SqliteWarehouse::open(&db_path).unwrap();
        let counts = warehouse.get_counts().unwrap();
        assert_eq!(counts[0], ("artists", 1));
        assert_eq!(counts[1], ("songs", 1));
    }
}
