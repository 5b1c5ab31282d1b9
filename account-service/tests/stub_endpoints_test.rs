//! `/login` and `/transaction` decode and echo their bodies.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn login_echoes_request() {
    let app = TestApp::new();
    let request = json!({ "number": 123456, "password": "hunter2" });

    let response = app
        .request(Method::POST, "/login", None, Some(request.clone()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, request);
}

#[tokio::test]
async fn login_rejects_other_methods() {
    let app = TestApp::new();

    let response = app.request(Method::GET, "/login", None, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "method is not allowed GET");
}

#[tokio::test]
async fn transaction_echoes_request() {
    let app = TestApp::new();
    let request = json!({ "toAccount": 7, "amount": 250 });

    let response = app
        .request(Method::POST, "/transaction", None, Some(request.clone()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, request);
}

#[tokio::test]
async fn transaction_rejects_malformed_body() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/transaction",
            None,
            Some(json!({ "toAccount": "seven" })),
        )
        .await;

    assert!(response.status().is_client_error());
}
