//! Database schema, record types and queries

pub mod init;
pub mod models;
pub mod queries;
pub mod schema;

pub use init::*;
pub use models::*;
pub use queries::*;
pub use schema::*;
