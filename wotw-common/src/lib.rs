//! # Weed of the Week Common Library
//!
//! Shared code for the Weed of the Week site:
//! - Database schema, record types and initialization
//! - Configuration resolution (CLI / ENV / TOML / defaults)
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
