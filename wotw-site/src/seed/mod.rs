//! Seed set: the complete content written to the database on every page view
//!
//! A seed set is plain data. The built-in catalog lives in [`catalog`]; a
//! TOML file with the same shape can replace it at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};
use wotw_common::db::limits;
use wotw_common::{Error, Result};

mod catalog;
mod reseed;

pub use reseed::{reseed_with, SeedReport};

/// Page banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSeed {
    pub image_url: String,
    pub title: String,
    pub subtitle: String,
    /// Trusted HTML shown below the banner
    #[serde(default)]
    pub announcement: Option<String>,
}

/// One common name of a weed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSeed {
    pub name: String,
    #[serde(default)]
    pub primary: bool,
}

impl NameSeed {
    pub fn primary(name: &str) -> Self {
        Self { name: name.to_string(), primary: true }
    }

    pub fn alternate(name: &str) -> Self {
        Self { name: name.to_string(), primary: false }
    }
}

/// One photo of a weed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSeed {
    pub url: String,
    pub caption: String,
    pub display_order: i64,
}

/// One weed with its names and photos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeedSeed {
    pub scientific_name: String,
    pub description: String,
    pub removal_method: String,
    pub comments: String,
    pub location_desc: String,
    pub location_map: String,
    pub display_order: i64,
    #[serde(default)]
    pub common_names: Vec<NameSeed>,
    #[serde(default)]
    pub photos: Vec<PhotoSeed>,
}

/// Header plus the weeds shown on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSet {
    pub header: HeaderSeed,
    pub weeds: Vec<WeedSeed>,
}

impl SeedSet {
    /// Parse a seed set from TOML and validate it
    pub fn parse(content: &str) -> Result<Self> {
        let seed: SeedSet = toml::from_str(content)
            .map_err(|e| Error::InvalidInput(format!("Parse seed file failed: {}", e)))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Load a seed set from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read seed file failed ({}): {}", path.display(), e))
        })?;
        let seed = Self::parse(&content)?;
        info!(
            "Loaded seed file {} ({} weeds)",
            path.display(),
            seed.weeds.len()
        );
        Ok(seed)
    }

    /// Seed file if one is configured, built-in catalog otherwise
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let seed = Self::builtin();
                seed.validate()?;
                Ok(seed)
            }
        }
    }

    /// Total number of rows one reseed writes
    pub fn row_count(&self) -> usize {
        1 + self
            .weeds
            .iter()
            .map(|w| 1 + w.common_names.len() + w.photos.len())
            .sum::<usize>()
    }

    /// Check the seed set against the table declarations
    ///
    /// Rejects anything the database would store but shouldn't: empty
    /// required text, values longer than the declared column length, and
    /// weeds sharing a display order. A weed without exactly one primary
    /// common name is only warned about.
    pub fn validate(&self) -> Result<()> {
        let header = &self.header;
        check_text("header.image_url", &header.image_url, limits::HEADER_IMAGE_URL)?;
        check_text("header.title", &header.title, limits::HEADER_TITLE)?;
        check_text("header.subtitle", &header.subtitle, limits::HEADER_SUBTITLE)?;

        if self.weeds.is_empty() {
            return Err(Error::InvalidInput("seed set has no weeds".to_string()));
        }

        let mut orders = HashSet::new();
        for weed in &self.weeds {
            let name = &weed.scientific_name;
            check_text("scientific_name", name, limits::SCIENTIFIC_NAME)?;
            check_required(name, "description", &weed.description)?;
            check_required(name, "removal_method", &weed.removal_method)?;
            check_required(name, "comments", &weed.comments)?;
            check_required(name, "location_desc", &weed.location_desc)?;
            check_text(
                &format!("{}.location_map", name),
                &weed.location_map,
                limits::LOCATION_MAP,
            )?;

            if !orders.insert(weed.display_order) {
                return Err(Error::InvalidInput(format!(
                    "{}: display_order {} is used by another weed",
                    name, weed.display_order
                )));
            }

            for common in &weed.common_names {
                check_text(
                    &format!("{}.common_names", name),
                    &common.name,
                    limits::COMMON_NAME,
                )?;
            }

            for photo in &weed.photos {
                check_text(&format!("{}.photos.url", name), &photo.url, limits::PHOTO_URL)?;
                check_text(
                    &format!("{}.photos.caption", name),
                    &photo.caption,
                    limits::PHOTO_CAPTION,
                )?;
            }

            let primaries = weed.common_names.iter().filter(|n| n.primary).count();
            if primaries != 1 {
                warn!(
                    scientific_name = %name,
                    primaries,
                    "Weed should have exactly one primary common name"
                );
            }
        }

        Ok(())
    }
}

fn check_required(weed: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{}.{} is empty", weed, field)));
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} is empty", field)));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(Error::InvalidInput(format!(
            "{} is {} characters, limit is {}",
            field, len, max_len
        )));
    }
    Ok(())
}
