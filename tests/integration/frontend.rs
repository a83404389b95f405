//! Static frontend hosting.

use std::fs;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use user_service::api::{create_router, AppState};
use user_service::Config;

const INDEX: &str = "<!doctype html><title>{{ not templated }}</title>";

fn app_with_dist() -> (Router, tempfile::TempDir) {
    let dist = tempfile::tempdir().unwrap();
    fs::write(dist.path().join("index.html"), INDEX).unwrap();
    fs::write(dist.path().join("vite.svg"), "<svg/>").unwrap();
    fs::create_dir(dist.path().join("assets")).unwrap();
    fs::write(dist.path().join("assets").join("app.js"), "console.log(1)").unwrap();

    let config = Config {
        frontend_dist: dist.path().to_path_buf(),
        ..Config::default()
    };
    let router = create_router(AppState::default(), &config).unwrap();
    (router, dist)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn root_serves_index_verbatim() {
    let (router, _dist) = app_with_dist();

    let (status, body) = get(&router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, INDEX);
}

#[tokio::test]
async fn vite_svg_and_assets_are_served() {
    let (router, _dist) = app_with_dist();

    assert_eq!(get(&router, "/vite.svg").await, (StatusCode::OK, "<svg/>".to_string()));
    assert_eq!(
        get(&router, "/assets/app.js").await,
        (StatusCode::OK, "console.log(1)".to_string())
    );
}

#[tokio::test]
async fn missing_asset_and_unrouted_paths_are_404() {
    let (router, _dist) = app_with_dist();

    assert_eq!(get(&router, "/assets/missing.js").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&router, "/users").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&router, "/index.html").await.0, StatusCode::NOT_FOUND);
}
