//! HTTP handlers for wotw-site

pub mod index;

pub use index::show_page;
