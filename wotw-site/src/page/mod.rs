//! Page model loaded from the database

use sqlx::SqliteConnection;
use wotw_common::db::{
    load_common_names, load_page_header, load_photos, load_weeds, PageHeader, Weed,
    WeedCommonName, WeedPhoto,
};
use wotw_common::{Error, Result};

mod render;

pub use render::{render_error_page, render_page};

/// A weed together with its child rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeedEntry {
    pub weed: Weed,
    /// Primary name first
    pub common_names: Vec<WeedCommonName>,
    /// In display order
    pub photos: Vec<WeedPhoto>,
}

impl WeedEntry {
    /// Name shown as the section heading
    ///
    /// Falls back to the first listed name when none is flagged primary.
    pub fn primary_name(&self) -> Option<&str> {
        self.common_names
            .iter()
            .find(|n| n.is_primary)
            .or_else(|| self.common_names.first())
            .map(|n| n.common_name.as_str())
    }

    /// Every name except the one returned by [`primary_name`](Self::primary_name)
    pub fn other_names(&self) -> Vec<&str> {
        let primary = self.primary_name();
        let mut skipped = false;
        self.common_names
            .iter()
            .map(|n| n.common_name.as_str())
            .filter(|name| {
                if !skipped && Some(*name) == primary {
                    skipped = true;
                    return false;
                }
                true
            })
            .collect()
    }
}

/// Everything the page template needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub header: PageHeader,
    pub weeds: Vec<WeedEntry>,
}

/// Load the page from the tables
///
/// Fails with `NotFound` if no header row exists (the tables were not seeded).
pub async fn load_page(conn: &mut SqliteConnection) -> Result<PageView> {
    let header = load_page_header(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound("page header".to_string()))?;

    let mut weeds = Vec::new();
    for weed in load_weeds(&mut *conn).await? {
        let common_names = load_common_names(&mut *conn, weed.id).await?;
        let photos = load_photos(&mut *conn, weed.id).await?;
        weeds.push(WeedEntry {
            weed,
            common_names,
            photos,
        });
    }

    tracing::debug!(weeds = weeds.len(), "Page loaded");

    Ok(PageView { header, weeds })
}
