//! Integration tests for the wotw-site router
//!
//! Tests cover:
//! - GET / reseeds the tables and renders the page
//! - Row counts and foreign-key integrity after a page view
//! - Idempotent reseeding across repeated page views
//! - Concurrent page views on a file database
//! - Rollback and generic 500 page when the reseed fails
//! - Static file serving and unknown routes

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower::util::ServiceExt; // for `oneshot` method
use wotw_common::db::{init_database, init_in_memory};
use wotw_site::seed::SeedSet;
use wotw_site::{build_router, AppState};

/// Test helper: Router over a fresh in-memory database
async fn setup_app(seed: SeedSet) -> (Router, SqlitePool) {
    setup_app_with_static(seed, PathBuf::from("static")).await
}

async fn setup_app_with_static(seed: SeedSet, static_dir: PathBuf) -> (Router, SqlitePool) {
    let db = init_in_memory().await.expect("in-memory database");
    let state = AppState::new(db.clone(), seed, static_dir);
    (build_router(state), db)
}

/// Test helper: Row count of one table
async fn count_rows(db: &SqlitePool, table: &str) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {}", table);
    sqlx::query_scalar(&query).fetch_one(db).await.unwrap()
}

/// Test helper: Create request
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract body as text
async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

async fn get_root(app: &Router) -> (StatusCode, String) {
    let response = app.clone().oneshot(test_request("GET", "/")).await.unwrap();
    let status = response.status();
    (status, extract_text(response.into_body()).await)
}

/// Everything visible on the page, without generated ids
async fn snapshot(db: &SqlitePool) -> Vec<String> {
    let mut rows: Vec<String> = sqlx::query_scalar(
        "SELECT title || '|' || subtitle || '|' || COALESCE(announcement, '') FROM page_headers",
    )
    .fetch_all(db)
    .await
    .unwrap();

    let weeds: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT w.scientific_name || '|' || w.display_order || '|' ||
               (SELECT group_concat(common_name || ':' || is_primary, ',')
                FROM (SELECT * FROM weed_common_names WHERE weed_id = w.id ORDER BY id)) || '|' ||
               (SELECT group_concat(photo_url || ':' || display_order, ',')
                FROM (SELECT * FROM weed_photos WHERE weed_id = w.id ORDER BY id))
        FROM weeds w
        ORDER BY w.display_order
        "#,
    )
    .fetch_all(db)
    .await
    .unwrap();

    rows.extend(weeds);
    rows
}

// =============================================================================
// Page view
// =============================================================================

#[tokio::test]
async fn test_root_renders_seeded_page() {
    let (app, _db) = setup_app(SeedSet::builtin()).await;

    let response = app.oneshot(test_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("<title>Weed of the Week</title>"));
    assert!(html.contains("These invasives have to go!"));
    assert!(html.contains("<h2>garden yellowrocket</h2>"));
    assert!(html.contains("<h2>oxeye daisy</h2>"));
    assert!(html.contains("<em>Barbarea vulgaris</em>"));
    assert!(html.contains("<em>Leucanthemum vulgare</em>"));
    assert!(html.contains(r#"src="/static/images/OxeyeDaisy-1.jpg""#));
    assert!(html.contains(r#"<section class="announcement">"#));

    // Weeds appear in display order
    let rocket = html.find("Barbarea vulgaris").unwrap();
    let daisy = html.find("Leucanthemum vulgare").unwrap();
    assert!(rocket < daisy);
}

#[tokio::test]
async fn test_tables_hold_exactly_one_seed_set() {
    let (app, db) = setup_app(SeedSet::builtin()).await;

    let (status, _) = get_root(&app).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(count_rows(&db, "page_headers").await, 1);
    assert_eq!(count_rows(&db, "weeds").await, 2);
    assert_eq!(count_rows(&db, "weed_common_names").await, 5 + 7);
    assert_eq!(count_rows(&db, "weed_photos").await, 4);

    let names: Vec<String> =
        sqlx::query_scalar("SELECT scientific_name FROM weeds ORDER BY display_order")
            .fetch_all(&db)
            .await
            .unwrap();
    assert_eq!(names, vec!["Barbarea vulgaris", "Leucanthemum vulgare"]);
}

#[tokio::test]
async fn test_first_edition_seeds_one_weed_without_announcement() {
    let (app, db) = setup_app(SeedSet::first_edition()).await;

    let (status, html) = get_root(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains(r#"<section class="announcement">"#));

    assert_eq!(count_rows(&db, "page_headers").await, 1);
    assert_eq!(count_rows(&db, "weeds").await, 1);

    let announcement: Option<String> =
        sqlx::query_scalar("SELECT announcement FROM page_headers")
            .fetch_one(&db)
            .await
            .unwrap();
    assert!(announcement.is_none());
}

#[tokio::test]
async fn test_child_rows_reference_valid_weeds() {
    let (app, db) = setup_app(SeedSet::builtin()).await;
    get_root(&app).await;

    let orphan_names: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM weed_common_names n LEFT JOIN weeds w ON n.weed_id = w.id WHERE w.id IS NULL",
    )
    .fetch_one(&db)
    .await
    .unwrap();
    let orphan_photos: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM weed_photos p LEFT JOIN weeds w ON p.weed_id = w.id WHERE w.id IS NULL",
    )
    .fetch_one(&db)
    .await
    .unwrap();

    assert_eq!(orphan_names, 0);
    assert_eq!(orphan_photos, 0);

    let primaries: Vec<i64> = sqlx::query_scalar(
        "SELECT SUM(is_primary) FROM weed_common_names GROUP BY weed_id ORDER BY weed_id",
    )
    .fetch_all(&db)
    .await
    .unwrap();
    assert_eq!(primaries, vec![1, 1]);
}

#[tokio::test]
async fn test_repeated_views_are_idempotent() {
    let (app, db) = setup_app(SeedSet::builtin()).await;

    let (_, first_html) = get_root(&app).await;
    let first = snapshot(&db).await;

    for _ in 0..3 {
        let (status, html) = get_root(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(html, first_html);
    }

    assert_eq!(snapshot(&db).await, first);
    assert_eq!(count_rows(&db, "weeds").await, 2);
}

#[tokio::test]
async fn test_stale_rows_are_replaced() {
    let (app, db) = setup_app(SeedSet::first_edition()).await;

    sqlx::query("INSERT INTO page_headers (image_url, title, subtitle) VALUES ('old.jpg', 'Old', 'Old')")
        .execute(&db)
        .await
        .unwrap();

    let (status, html) = get_root(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("<title>Old</title>"));
    assert_eq!(count_rows(&db, "page_headers").await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_views_each_see_complete_seed_set() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("wotw.db").display());
    let db = init_database(&url).await.unwrap();
    let app = build_router(AppState::new(db.clone(), SeedSet::builtin(), PathBuf::from("static")));

    let mut handles = Vec::new();
    for _ in 0..40 {
        let app = app.clone();
        handles.push(tokio::spawn(async move { get_root(&app).await }));
    }

    for handle in handles {
        let (status, html) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<h2>garden yellowrocket</h2>"));
        assert!(html.contains("<h2>oxeye daisy</h2>"));
    }

    assert_eq!(count_rows(&db, "page_headers").await, 1);
    assert_eq!(count_rows(&db, "weeds").await, 2);
    assert_eq!(count_rows(&db, "weed_common_names").await, 5 + 7);
    assert_eq!(count_rows(&db, "weed_photos").await, 4);
}

// =============================================================================
// Failure handling
// =============================================================================

#[tokio::test]
async fn test_failed_reseed_rolls_back_and_returns_generic_500() {
    let (app, db) = setup_app(SeedSet::builtin()).await;
    get_root(&app).await;
    let before = snapshot(&db).await;

    sqlx::query(
        r#"
        CREATE TRIGGER block_photos BEFORE INSERT ON weed_photos
        BEGIN
            SELECT RAISE(ABORT, 'photo insert blocked');
        END
        "#,
    )
    .execute(&db)
    .await
    .unwrap();

    let (status, html) = get_root(&app).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(html.contains("Internal Server Error"));
    assert!(!html.contains("photo insert blocked"), "error detail must not leak");

    assert_eq!(snapshot(&db).await, before, "failed reseed must not change content");
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_post_to_root_not_allowed() {
    let (app, db) = setup_app(SeedSet::builtin()).await;

    let response = app.oneshot(test_request("POST", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(count_rows(&db, "weeds").await, 0);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let (app, _db) = setup_app(SeedSet::builtin()).await;

    let response = app.oneshot(test_request("GET", "/weeds")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_files_served() {
    let static_dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(static_dir.path().join("images")).unwrap();
    std::fs::write(static_dir.path().join("images").join("OxeyeDaisy-1.jpg"), b"jpeg").unwrap();

    let (app, _db) =
        setup_app_with_static(SeedSet::builtin(), static_dir.path().to_path_buf()).await;

    let response = app
        .clone()
        .oneshot(test_request("GET", "/static/images/OxeyeDaisy-1.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_text(response.into_body()).await, "jpeg");

    let missing = app
        .oneshot(test_request("GET", "/static/images/missing.jpg"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
