mod common;

use auth::Identity;
use auth::Role;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;

async fn message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"]["message"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_account_returns_caller_identity() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("a@x.com", "secret1", "doctor").await;

    let response = app
        .get("/api/account")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["role"], "doctor");
}

#[tokio::test]
async fn test_missing_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/account")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(response).await, "Missing Authorization header");
}

#[tokio::test]
async fn test_empty_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/account")
        .header("Authorization", "Bearer ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(response).await, "Token is empty");
}

#[tokio::test]
async fn test_wrong_scheme() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/account")
        .header("Authorization", "Basic abc")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        message(response).await,
        "Invalid Authorization header format. Expected: Bearer <token>"
    );
}

#[tokio::test]
async fn test_expired_token() {
    let app = TestApp::spawn().await;
    let issued = Utc::now() - Duration::minutes(31);
    let token = app
        .authenticator
        .token_codec()
        .issue_at(&Identity::new(1, Role::Doctor), issued)
        .unwrap();

    let response = app
        .get("/api/account")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(response).await, "Token is expired");
}

#[tokio::test]
async fn test_tampered_token() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("a@x.com", "secret1", "patient").await;

    let mut tampered = token.into_bytes();
    let last = tampered.len() - 1;
    tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = app
        .get("/api/account")
        .bearer_auth(&tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(response).await, "Token signature is invalid");
}

#[tokio::test]
async fn test_token_signed_with_other_key_is_rejected() {
    let app = TestApp::spawn().await;
    let foreign = auth::TokenCodec::new(
        b"another-secret-key-at-least-32-bytes!",
        Duration::minutes(30),
    )
    .issue(&Identity::new(1, Role::Admin))
    .unwrap();

    let response = app
        .get("/api/admin/session")
        .bearer_auth(&foreign)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(response).await, "Token signature is invalid");
}

#[tokio::test]
async fn test_role_gate() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("p@x.com", "secret1", "patient").await;

    let doctor_route = app
        .get("/api/doctor/session")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(doctor_route.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        message(doctor_route).await,
        "Insufficient permissions: doctor role required"
    );

    let patient_route = app
        .get("/api/patient/session")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(patient_route.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_role_hierarchy() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("root@x.com", "secret1", "admin").await;

    for path in ["/api/doctor/session", "/api/patient/session"] {
        let response = app
            .get(path)
            .bearer_auth(&token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }

    let response = app
        .get("/api/admin/session")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}
