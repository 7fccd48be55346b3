//! wotw-site library - Weed of the Week web page
//!
//! Serves a single page. Each request to `/` replaces the contents of the
//! four site tables with the configured seed set and renders the page from
//! them. Images referenced by the seed set are served under `/static/`.

use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod page;
pub mod seed;

use seed::SeedSet;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Content written on every page view
    pub seed: Arc<SeedSet>,
    /// Directory served under `/static/`
    pub static_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, seed: SeedSet, static_dir: PathBuf) -> Self {
        Self {
            db,
            seed: Arc::new(seed),
            static_dir,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(api::show_page))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
