//! Table declarations
//!
//! Four tables: `page_headers`, `weeds`, and the two weed child tables
//! `weed_common_names` and `weed_photos`.

use crate::Result;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

pub const PAGE_HEADERS: &str = "page_headers";
pub const WEEDS: &str = "weeds";
pub const WEED_COMMON_NAMES: &str = "weed_common_names";
pub const WEED_PHOTOS: &str = "weed_photos";

/// All tables, children before parents
///
/// Deleting in this order never violates a foreign key.
pub const TABLES_CHILD_FIRST: [&str; 4] = [WEED_PHOTOS, WEED_COMMON_NAMES, WEEDS, PAGE_HEADERS];

/// Declared `VARCHAR` lengths
///
/// SQLite does not enforce these, so seed data is checked against them
/// before it is written.
pub mod limits {
    pub const HEADER_IMAGE_URL: usize = 250;
    pub const HEADER_TITLE: usize = 100;
    pub const HEADER_SUBTITLE: usize = 100;
    pub const SCIENTIFIC_NAME: usize = 200;
    pub const LOCATION_MAP: usize = 200;
    pub const COMMON_NAME: usize = 250;
    pub const PHOTO_URL: usize = 200;
    pub const PHOTO_CAPTION: usize = 250;
}

/// Create all four tables if they don't exist
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_page_headers_table(pool).await?;
    create_weeds_table(pool).await?;
    create_weed_common_names_table(pool).await?;
    create_weed_photos_table(pool).await?;

    debug!("Schema ready ({})", TABLES_CHILD_FIRST.join(", "));
    Ok(())
}

async fn create_page_headers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS page_headers (
            id INTEGER PRIMARY KEY,
            image_url VARCHAR(250) NOT NULL,
            title VARCHAR(100) NOT NULL,
            subtitle VARCHAR(100) NOT NULL,
            announcement TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_weeds_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weeds (
            id INTEGER PRIMARY KEY,
            scientific_name VARCHAR(200) NOT NULL,
            description TEXT NOT NULL,
            removal_method TEXT NOT NULL,
            comments TEXT NOT NULL,
            location_desc TEXT NOT NULL,
            location_map VARCHAR(200) NOT NULL,
            display_order INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_weed_common_names_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weed_common_names (
            id INTEGER PRIMARY KEY,
            common_name VARCHAR(250) NOT NULL,
            is_primary BOOLEAN NOT NULL,
            weed_id INTEGER NOT NULL REFERENCES weeds(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_weed_common_names_weed ON weed_common_names(weed_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_weed_photos_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weed_photos (
            id INTEGER PRIMARY KEY,
            photo_url VARCHAR(200) NOT NULL,
            caption VARCHAR(250) NOT NULL,
            display_order INTEGER NOT NULL,
            weed_id INTEGER NOT NULL REFERENCES weeds(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_weed_photos_weed ON weed_photos(weed_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete every row from every table, children first
///
/// Takes a connection so callers can run it inside their own transaction.
pub async fn purge_all(conn: &mut SqliteConnection) -> Result<u64> {
    let mut deleted = 0;
    for table in TABLES_CHILD_FIRST {
        let result = sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&mut *conn)
            .await?;
        deleted += result.rows_affected();
    }

    Ok(deleted)
}
