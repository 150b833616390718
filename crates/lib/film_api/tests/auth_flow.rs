//! Session lifecycle through the HTTP surface.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{Call, PASSWORD, app, app_from, config_with, login, session, signup};
use serde_json::json;

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let resp = Call::get("/health").send(&app).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn alice_end_to_end() {
    let app = app();

    let created = signup(&app, "alice@x.com").await;
    assert_eq!(created.body["user"]["email"], "alice@x.com");
    assert!(created.body["user"].get("password_hash").is_none());

    let resp = login(&app, "alice@x.com", PASSWORD).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["token_type"], "Bearer");
    assert_eq!(resp.body["expires_in"], 900);
    let access = resp.body["access_token"].as_str().unwrap().to_string();
    let refresh = resp.body["refresh_token"].as_str().unwrap().to_string();

    // Authenticated request resolves to alice.
    let me = Call::get("/auth/me").bearer(&access).send(&app).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["email"], "alice@x.com");

    // One altered character in the signature is rejected.
    let at = access.rfind('.').unwrap() + 5;
    let swapped = if &access[at..=at] == "A" { "B" } else { "A" };
    let tampered = format!("{}{}{}", &access[..at], swapped, &access[at + 1..]);
    let resp = Call::get("/auth/me").bearer(&tampered).send(&app).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    // Rotation.
    let rotated = Call::post("/auth/refresh")
        .json(json!({ "refresh_token": refresh }))
        .send(&app)
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let refresh2 = rotated.body["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(refresh2, refresh);

    // Replay of the rotated token fails.
    let replay = Call::post("/auth/refresh")
        .json(json!({ "refresh_token": refresh }))
        .send(&app)
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    // Logout, then the current token is dead too.
    let out = Call::post("/auth/logout")
        .json(json!({ "refresh_token": refresh2 }))
        .send(&app)
        .await;
    assert_eq!(out.status, StatusCode::NO_CONTENT);

    let after = Call::post("/auth/refresh")
        .json(json!({ "refresh_token": refresh2 }))
        .send(&app)
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = app();
    signup(&app, "alice@x.com").await;

    let wrong = login(&app, "alice@x.com", "pw1234567").await;
    let unknown = login(&app, "bob@x.com", PASSWORD).await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = app();
    signup(&app, "alice@x.com").await;

    let resp = Call::post("/auth/signup")
        .json(json!({
            "email": "Alice@X.com",
            "password": PASSWORD,
            "first_name": "Alice",
            "last_name": "Again",
        }))
        .send(&app)
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "validation_error");
}

#[tokio::test]
async fn guarded_routes_need_a_token() {
    let app = app();
    let resp = Call::get("/auth/me").send(&app).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "unauthorized");

    let resp = Call::get("/cameras").bearer("not.a.jwt").send(&app).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn access_cookie_is_accepted_without_header() {
    let app = app();
    signup(&app, "alice@x.com").await;
    let resp = login(&app, "alice@x.com", PASSWORD).await;

    let line = resp.set_cookie_line("access_token").unwrap();
    assert!(line.contains("HttpOnly"));
    assert!(line.contains("Path=/"));
    let refresh_line = resp.set_cookie_line("refresh_token").unwrap();
    assert!(refresh_line.contains("Path=/auth"));
    assert!(refresh_line.contains("SameSite=Strict"));

    let access = resp.cookie("access_token").unwrap();
    let me = Call::get("/auth/me").cookie("access_token", &access).send(&app).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn header_wins_over_cookie() {
    let app = app();
    let (access, _) = session(&app, "alice@x.com").await;

    // Valid cookie, garbage header: the header is what counts.
    let resp = Call::get("/auth/me")
        .bearer("garbage")
        .cookie("access_token", &access)
        .send(&app)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    // Non-Bearer header does not fall back to the cookie.
    let resp = Call::get("/auth/me")
        .authorization("Basic YWxpY2U6cHc=")
        .cookie("access_token", &access)
        .send(&app)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_from_cookie() {
    let app = app();
    let (_, refresh) = session(&app, "alice@x.com").await;

    let resp = Call::post("/auth/refresh")
        .cookie("refresh_token", &refresh)
        .send(&app)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.cookie("refresh_token").is_some_and(|c| c != refresh));
}

#[tokio::test]
async fn refresh_without_token_is_unauthorized() {
    let app = app();
    let resp = Call::post("/auth/refresh").send(&app).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_always_succeeds_and_clears_cookies() {
    let app = app();

    let resp = Call::post("/auth/logout").send(&app).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(resp.cookie("access_token").as_deref(), Some(""));
    assert_eq!(resp.cookie("refresh_token").as_deref(), Some(""));

    let resp = Call::post("/auth/logout")
        .json(json!({ "refresh_token": "never-issued" }))
        .send(&app)
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn logout_all_revokes_every_session() {
    let app = app();
    let (access, phone) = session(&app, "alice@x.com").await;
    let laptop = login(&app, "alice@x.com", PASSWORD).await.body["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = Call::post("/auth/logout-all").bearer(&access).send(&app).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    for token in [phone, laptop] {
        let resp = Call::post("/auth/refresh")
            .json(json!({ "refresh_token": token }))
            .send(&app)
            .await;
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn zero_ttl_access_tokens_are_rejected() {
    // Configuration refuses a zero TTL, so set it directly.
    let mut config = config_with(&[]);
    config.auth.access_ttl = Duration::zero();
    let app = app_from(config);
    let (access, _) = session(&app, "alice@x.com").await;

    let resp = Call::get("/auth/me").bearer(&access).send(&app).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn incomplete_bodies_get_the_error_envelope() {
    let app = app();

    let resp = Call::post("/auth/signup")
        .json(json!({ "email": "a@x.com", "password": PASSWORD }))
        .send(&app)
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "validation_error");
    assert!(resp.body["message"].is_string());

    let resp = Call::post("/auth/login")
        .json(json!({ "email": "alice@x.com" }))
        .send(&app)
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "validation_error");

    // No JSON content type at all.
    let resp = Call::post("/auth/login").send(&app).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "validation_error");
}
