//! Transactional reseed
//!
//! Deletes every row and writes the seed set again inside one transaction.
//! SQLite allows a single writer at a time, so concurrent page views each
//! see a complete seed set rather than a mix of deletes and inserts.

use sqlx::SqliteConnection;
use wotw_common::db::purge_all;
use wotw_common::Result;

use super::{HeaderSeed, SeedSet, WeedSeed};

/// Rows written by one reseed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub rows_deleted: u64,
    pub headers: usize,
    pub weeds: usize,
    pub common_names: usize,
    pub photos: usize,
}

/// Delete and rewrite everything on a caller-owned connection
///
/// Callers are expected to pass an open transaction. Either everything is
/// replaced or, on error, nothing is: the transaction rolls back when
/// dropped uncommitted.
pub async fn reseed_with(conn: &mut SqliteConnection, seed: &SeedSet) -> Result<SeedReport> {
    let mut report = SeedReport {
        rows_deleted: purge_all(&mut *conn).await?,
        ..Default::default()
    };

    insert_header(&mut *conn, &seed.header).await?;
    report.headers += 1;

    for weed in &seed.weeds {
        let weed_id = insert_weed(&mut *conn, weed).await?;
        report.weeds += 1;

        for name in &weed.common_names {
            sqlx::query(
                "INSERT INTO weed_common_names (common_name, is_primary, weed_id) VALUES (?, ?, ?)",
            )
            .bind(&name.name)
            .bind(name.primary)
            .bind(weed_id)
            .execute(&mut *conn)
            .await?;
            report.common_names += 1;
        }

        for photo in &weed.photos {
            sqlx::query(
                r#"
                INSERT INTO weed_photos (photo_url, caption, display_order, weed_id)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&photo.url)
            .bind(&photo.caption)
            .bind(photo.display_order)
            .bind(weed_id)
            .execute(&mut *conn)
            .await?;
            report.photos += 1;
        }
    }

    tracing::debug!(
        rows_deleted = report.rows_deleted,
        weeds = report.weeds,
        common_names = report.common_names,
        photos = report.photos,
        "Reseed written"
    );

    Ok(report)
}

async fn insert_header(conn: &mut SqliteConnection, header: &HeaderSeed) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO page_headers (image_url, title, subtitle, announcement)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&header.image_url)
    .bind(&header.title)
    .bind(&header.subtitle)
    .bind(&header.announcement)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Insert one weed row and return its id
async fn insert_weed(conn: &mut SqliteConnection, weed: &WeedSeed) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO weeds (
            scientific_name, description, removal_method, comments,
            location_desc, location_map, display_order
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&weed.scientific_name)
    .bind(&weed.description)
    .bind(&weed.removal_method)
    .bind(&weed.comments)
    .bind(&weed.location_desc)
    .bind(&weed.location_map)
    .bind(weed.display_order)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}
