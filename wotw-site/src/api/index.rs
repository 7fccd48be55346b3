//! Root page
//!
//! Every view reseeds the tables and renders the page from what was just
//! written.

use axum::{extract::State, response::Html};

use crate::error::SiteResult;
use crate::page::{load_page, render_page};
use crate::seed::reseed_with;
use crate::AppState;

/// GET /
///
/// Delete-all, insert the seed set, read the page back, commit, render.
/// The read happens inside the reseed transaction so the page always shows
/// exactly the rows this request wrote.
pub async fn show_page(State(state): State<AppState>) -> SiteResult<Html<String>> {
    let mut tx = state.db.begin().await?;

    let report = reseed_with(&mut tx, &state.seed).await?;
    let page = load_page(&mut tx).await?;

    tx.commit().await?;

    tracing::debug!(
        weeds = report.weeds,
        common_names = report.common_names,
        photos = report.photos,
        "Page reseeded"
    );

    Ok(Html(render_page(&page).into_string()))
}
