//! User CRUD through the full router.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{app, listed_ids, send, today};

#[tokio::test]
async fn health_returns_envelope() {
    let (router, _) = app();

    let (status, body) = send(&router, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "service healthy");
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["version"], "1.0.0");
    assert_eq!(body["data"]["timestamp"].as_str().unwrap().len(), 19);
}

#[tokio::test]
async fn list_returns_seed_users_in_order() {
    let (router, _) = app();

    let (status, body) = send(&router, Method::GET, "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(
        body["data"][0],
        json!({"id": 1, "name": "Zhang San", "email": "zhangsan@example.com", "created_at": "2024-01-01"})
    );
    assert_eq!(listed_ids(&router).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn get_existing_user() {
    let (router, _) = app();

    let (status, body) = send(&router, Method::GET, "/api/users/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Li Si");
}

#[tokio::test]
async fn create_appends_user_with_next_id() {
    let (router, _) = app();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(r#"{"name":"Zhao Liu","email":"zl@example.com"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 201);
    assert_eq!(
        body["data"],
        json!({"id": 4, "name": "Zhao Liu", "email": "zl@example.com", "created_at": today()})
    );
    assert_eq!(listed_ids(&router).await, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn create_ignores_supplied_id_and_date() {
    let (router, _) = app();

    let (_, body) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(r#"{"id":1,"name":"x","email":"x@example.com","created_at":"1999-01-01"}"#),
    )
    .await;

    assert_eq!(body["data"]["id"], 4);
    assert_eq!(body["data"]["created_at"], today());
}

#[tokio::test]
async fn update_replaces_name_and_email_only() {
    let (router, _) = app();

    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/users/3",
        Some(r#"{"id":42,"name":"Wang Liu","email":"wl@example.com","created_at":"2000-01-01"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"id": 3, "name": "Wang Liu", "email": "wl@example.com", "created_at": "2024-01-03"})
    );

    let (_, fetched) = send(&router, Method::GET, "/api/users/3", None).await;
    assert_eq!(fetched["data"], body["data"]);
}

#[tokio::test]
async fn delete_removes_one_user_and_keeps_order() {
    let (router, _) = app();

    let (status, body) = send(&router, Method::DELETE, "/api/users/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"deleted_user_id": 2, "deleted_user_name": "Li Si"})
    );
    assert_eq!(listed_ids(&router).await, vec![1, 3]);
}

#[tokio::test]
async fn missing_id_is_404_for_every_operation() {
    let (router, _) = app();
    let update = Some(r#"{"name":"a","email":"b"}"#);

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, update),
        (Method::DELETE, None),
    ] {
        for id in ["99", "abc", "02"] {
            let uri = format!("/api/users/{id}");
            let (status, response) = send(&router, method.clone(), &uri, body).await;

            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(
                response,
                json!({"code": 404, "message": "user not found", "data": null})
            );
        }
    }
    assert_eq!(listed_ids(&router).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn malformed_body_is_400_and_store_unchanged() {
    let (router, state) = app();

    for (method, uri) in [(Method::POST, "/api/users"), (Method::PUT, "/api/users/1")] {
        for body in ["{", "", r#"{"name":5}"#, "[1,2]"] {
            let (status, response) = send(&router, method.clone(), uri, Some(body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri} {body:?}");
            assert_eq!(response["code"], 400);
            assert!(response["data"].is_null());
            let message = response["message"].as_str().unwrap();
            assert!(message.starts_with("invalid request body: "), "{message}");
        }
    }

    let store = state.store.read().await;
    assert_eq!(store.len(), 3);
    assert_eq!(store.get(1).unwrap().name, "Zhang San");
}

#[tokio::test]
async fn null_fields_read_as_empty_strings() {
    let (router, _) = app();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(r#"{"name":null,"email":"x@example.com"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 4);
    assert_eq!(body["data"]["name"], "");
    assert_eq!(body["data"]["email"], "x@example.com");

    let (status, body) = send(
        &router,
        Method::PUT,
        "/api/users/1",
        Some(r#"{"name":"Zhang Wei","email":null}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Zhang Wei");
    assert_eq!(body["data"]["email"], "");
}

#[tokio::test]
async fn null_body_is_an_empty_payload() {
    let (router, _) = app();

    let (status, body) = send(&router, Method::POST, "/api/users", Some("null")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["data"],
        json!({"id": 4, "name": "", "email": "", "created_at": today()})
    );
    assert_eq!(listed_ids(&router).await, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn create_after_delete_does_not_reuse_ids() {
    let (router, _) = app();

    send(&router, Method::DELETE, "/api/users/2", None).await;
    let (_, body) = send(
        &router,
        Method::POST,
        "/api/users",
        Some(r#"{"name":"n","email":"e"}"#),
    )
    .await;

    assert_eq!(body["data"]["id"], 4);
    assert_eq!(listed_ids(&router).await, vec![1, 3, 4]);
}

#[tokio::test]
async fn create_without_content_type_is_accepted() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let (router, state) = app();

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/users")
                .body(Body::from(r#"{"name":"plain","email":"p@example.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(state.store.read().await.len(), 4);
}
