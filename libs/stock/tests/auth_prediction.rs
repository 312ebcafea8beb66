mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::serve_once;
use stock::{
    AuthError, FetchError, MemoryStorage,
    auth::{AuthClient, AuthSession},
    prediction_client::PredictionClient,
};

#[tokio::test]
async fn login_stores_token() {
    let (base, server) = serve_once(200, r#"{"token":"abc123"}"#).await;
    let storage = Arc::new(MemoryStorage::new());
    let session = AuthSession::new(AuthClient::new(base).unwrap(), storage);

    session.login("user@example.com", "hunter2").await.unwrap();

    assert_eq!(session.token().unwrap(), "abc123");
    assert_eq!(session.email().unwrap(), "user@example.com");

    let captured = server.await.unwrap();
    assert!(captured.request_line.starts_with("POST /login "));
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "email": "user@example.com", "password": "hunter2" })
    );
}

#[tokio::test]
async fn login_without_token_is_invalid_credentials() {
    let (base, _server) = serve_once(200, r#"{"message":"nope"}"#).await;
    let session = AuthSession::new(AuthClient::new(base).unwrap(), Arc::new(MemoryStorage::new()));

    let err = session.login("user@example.com", "bad").await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn rejected_signup_is_invalid_credentials() {
    let (base, server) = serve_once(401, "{}").await;
    let client = AuthClient::new(base).unwrap();

    let err = client.signup("user@example.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(server.await.unwrap().request_line.starts_with("POST /signup "));
}

#[tokio::test]
async fn update_password_sends_bearer_token() {
    let (base, server) = serve_once(200, r#"{"message":"Password updated"}"#).await;
    let client = AuthClient::new(base).unwrap();

    let msg = client
        .update_password("user@example.com", "tok", "newpw")
        .await
        .unwrap();

    assert_eq!(msg, "Password updated");
    let captured = server.await.unwrap();
    assert!(captured.request_line.starts_with("POST /api/user/update-password "));
    assert!(
        captured
            .head
            .to_ascii_lowercase()
            .contains("authorization: bearer tok")
    );
}

#[tokio::test]
async fn predict_posts_ticker_and_date() {
    let (base, server) = serve_once(
        200,
        r#"{"predicted_price":187.42,"accuracy":2.5,"graph_path":"static/AAPL.png"}"#,
    )
    .await;
    let client = PredictionClient::new(base.clone()).unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let prediction = client.predict("aapl", date).await.unwrap();

    assert_eq!(prediction.predicted_price, 187.42);
    assert_eq!(prediction.accuracy_percent(), Some(97.5));
    assert_eq!(client.graph_url(&prediction), format!("{base}/static/AAPL.png"));

    let captured = server.await.unwrap();
    assert!(captured.request_line.starts_with("POST /predict "));
    let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "ticker": "AAPL", "predictionDate": "2025-01-15" })
    );
}

#[tokio::test]
async fn predict_error_status_is_fetch_error() {
    let (base, _server) = serve_once(503, "{}").await;
    let client = PredictionClient::new(base).unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let err = client.predict("AAPL", date).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { .. }));
}
