mod models;
mod schema;
mod store;
mod trait_def;

pub use models::*;
pub use schema::{
    create_table_statements, drop_table_statements, ARTIST_INSERT, SONGPLAY_INSERT, SONG_INSERT,
    SONG_SELECT, TABLE_NAMES, TIME_INSERT, USER_INSERT, WAREHOUSE_VERSIONED_SCHEMAS,
};
pub use store::SqliteWarehouse;
pub use trait_def::WarehouseWriter;
