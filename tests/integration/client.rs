//! CLI probe client against a live listener.

use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

use user_service::client::ServiceClient;
use user_service::error::ServiceError;
use user_service::models::UserPayload;

use crate::app;

async fn spawn_server() -> String {
    let (router, _) = app();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn client_reads_health_and_users() {
    let client = ServiceClient::new(spawn_server().await);

    let health = client.health().await.unwrap();
    assert_eq!(health.data.unwrap().status, "healthy");

    let users = client.list_users().await.unwrap();
    assert_eq!(users.data.unwrap().len(), 3);
}

#[tokio::test]
async fn client_creates_user() {
    let client = ServiceClient::new(spawn_server().await);

    let created = client
        .create_user(&UserPayload::new("Test User", "test@example.com"))
        .await
        .unwrap();

    assert_eq!(created.code, 201);
    assert_eq!(created.data.unwrap().id, 4);
}

#[tokio::test]
async fn client_reports_non_success_status() {
    let base = spawn_server().await;
    let client = ServiceClient::new(format!("{base}/api/nope/health"));

    let err = client.health().await.unwrap_err();

    assert!(matches!(err, ServiceError::UnexpectedStatus { .. }), "{err}");
}
