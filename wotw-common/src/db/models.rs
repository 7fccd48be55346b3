//! Database record types
//!
//! One struct per table. Child records carry the id of their owning weed.

use serde::{Deserialize, Serialize};

/// Banner shown at the top of the page (`page_headers`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PageHeader {
    pub id: i64,
    pub image_url: String,
    pub title: String,
    pub subtitle: String,
    /// Trusted HTML rendered verbatim above the weeds
    pub announcement: Option<String>,
}

/// Invasive plant entry (`weeds`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Weed {
    pub id: i64,
    pub scientific_name: String,
    pub description: String,
    pub removal_method: String,
    pub comments: String,
    pub location_desc: String,
    /// Path of the map image showing where the weed grows on the property
    pub location_map: String,
    pub display_order: i64,
}

/// Alternate name of a weed (`weed_common_names`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeedCommonName {
    pub id: i64,
    pub common_name: String,
    pub is_primary: bool,
    pub weed_id: i64,
}

/// Photo of a weed (`weed_photos`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeedPhoto {
    pub id: i64,
    pub photo_url: String,
    pub caption: String,
    pub display_order: i64,
    pub weed_id: i64,
}
