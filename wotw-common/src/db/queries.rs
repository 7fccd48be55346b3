//! Read queries used to build the page
//!
//! The loaders take a connection so the page can be read inside the same
//! transaction that seeded it.

use crate::db::models::{PageHeader, Weed, WeedCommonName, WeedPhoto};
use crate::Result;
use sqlx::SqliteConnection;

/// Load the page header (lowest id if several exist)
pub async fn load_page_header(conn: &mut SqliteConnection) -> Result<Option<PageHeader>> {
    let header = sqlx::query_as::<_, PageHeader>(
        "SELECT id, image_url, title, subtitle, announcement FROM page_headers ORDER BY id LIMIT 1",
    )
    .fetch_optional(&mut *conn)
    .await?;

    Ok(header)
}

/// Load all weeds in display order
pub async fn load_weeds(conn: &mut SqliteConnection) -> Result<Vec<Weed>> {
    let weeds = sqlx::query_as::<_, Weed>(
        r#"
        SELECT id, scientific_name, description, removal_method, comments,
               location_desc, location_map, display_order
        FROM weeds
        ORDER BY display_order, id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(weeds)
}

/// Load a weed's common names, primary name first
pub async fn load_common_names(
    conn: &mut SqliteConnection,
    weed_id: i64,
) -> Result<Vec<WeedCommonName>> {
    let names = sqlx::query_as::<_, WeedCommonName>(
        r#"
        SELECT id, common_name, is_primary, weed_id
        FROM weed_common_names
        WHERE weed_id = ?
        ORDER BY is_primary DESC, id
        "#,
    )
    .bind(weed_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(names)
}

/// Load a weed's photos in display order
pub async fn load_photos(conn: &mut SqliteConnection, weed_id: i64) -> Result<Vec<WeedPhoto>> {
    let photos = sqlx::query_as::<_, WeedPhoto>(
        r#"
        SELECT id, photo_url, caption, display_order, weed_id
        FROM weed_photos
        WHERE weed_id = ?
        ORDER BY display_order, id
        "#,
    )
    .bind(weed_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(photos)
}
