//! Database initialization
//!
//! Opens (creating if missing) the SQLite database named by the database URL,
//! enables foreign keys and creates the four tables.

use crate::db::schema::create_tables;
use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Check that the URL names a backend this build can open
fn ensure_sqlite(database_url: &str) -> Result<()> {
    if database_url.starts_with("sqlite:") {
        return Ok(());
    }

    let scheme = database_url.split("://").next().unwrap_or(database_url);
    Err(Error::Config(format!(
        "Unsupported database backend '{}': only sqlite: URLs are supported",
        scheme
    )))
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open database connection pool and create tables if needed
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    ensure_sqlite(database_url)?;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_millis(5000));

    let newly_created = {
        let path = options.get_filename();
        let missing = !is_in_memory(database_url) && !path.exists();

        // Create parent directory if it doesn't exist
        if missing {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }
        missing
    };

    // Every connection to an in-memory database sees its own empty database,
    // so keep exactly one and never recycle it
    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;

    if newly_created {
        info!("Initialized new database: {}", database_url);
    } else {
        info!("Opened database: {}", database_url);
    }

    create_tables(&pool).await?;

    Ok(pool)
}

/// Private in-memory database with all tables created
pub async fn init_in_memory() -> Result<SqlitePool> {
    init_database("sqlite::memory:").await
}
